use crate::{core::header::HeaderModel, utils::util::Result};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Vcf { is_uncompressed: bool },
}

impl OutputType {
    pub fn is_uncompressed(&self) -> bool {
        match self {
            Self::Vcf { is_uncompressed } => *is_uncompressed,
        }
    }
}

enum Sink {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<Box<dyn Write>>>),
}

pub struct VcfWriter {
    sink: Sink,
    pub output_type: OutputType,
    pub lines_written: usize,
}

impl VcfWriter {
    fn resolve_output_type(output_type: &Option<OutputType>, output: Option<&str>) -> OutputType {
        match (output_type, output) {
            (Some(output_type), _) => *output_type,
            (None, Some(path)) => Self::infer_output_type_from_extension(path),
            (None, None) => OutputType::Vcf {
                is_uncompressed: true,
            },
        }
    }

    fn infer_output_type_from_extension(path: &str) -> OutputType {
        let path_lower = path.to_lowercase();
        let is_compressed = path_lower.ends_with(".gz") || path_lower.ends_with(".bgz");
        OutputType::Vcf {
            is_uncompressed: !is_compressed,
        }
    }

    /// Opens the output file, or standard output when `output` is `None`.
    pub fn new(output_type: &Option<OutputType>, output: Option<&str>) -> Result<Self> {
        let output_type = Self::resolve_output_type(output_type, output);
        log::trace!("{:?}", &output_type);

        let target: Box<dyn Write> = match output {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|e| crate::vcf_error!("Failed to create writer for {}: {}", path, e))?,
            ),
            None => Box::new(io::stdout()),
        };
        let buffered = BufWriter::new(target);
        let sink = if output_type.is_uncompressed() {
            Sink::Plain(buffered)
        } else {
            Sink::Gzip(GzEncoder::new(buffered, Compression::default()))
        };
        Ok(VcfWriter {
            sink,
            output_type,
            lines_written: 0,
        })
    }

    fn writer(&mut self) -> &mut dyn Write {
        match &mut self.sink {
            Sink::Plain(writer) => writer as &mut dyn Write,
            Sink::Gzip(writer) => writer as &mut dyn Write,
        }
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self.writer();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn write_header(&mut self, header: &HeaderModel) -> Result<()> {
        for line in header.print_header() {
            self.write_line(&line)?;
        }
        Ok(())
    }

    /// Flushes buffered output and completes the gzip stream.
    pub fn finish(self) -> Result<()> {
        match self.sink {
            Sink::Plain(mut writer) => writer.flush()?,
            Sink::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::readers::open_input_reader;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn output_type_is_inferred_from_extension() {
        assert_eq!(
            VcfWriter::resolve_output_type(&None, Some("out.vcf.gz")),
            OutputType::Vcf {
                is_uncompressed: false
            }
        );
        assert!(VcfWriter::resolve_output_type(&None, Some("out.vcf")).is_uncompressed());
        assert!(VcfWriter::resolve_output_type(&None, None).is_uncompressed());
        let forced = Some(OutputType::Vcf {
            is_uncompressed: false,
        });
        assert!(!VcfWriter::resolve_output_type(&forced, Some("out.vcf")).is_uncompressed());
    }

    #[test]
    fn writes_compressed_output() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("out.vcf.gz");
        let path_str = path.to_string_lossy().into_owned();

        let mut header = HeaderModel::new();
        header.add_fileformat("VCFv4.2").unwrap();
        header
            .parse_header_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO")
            .unwrap();

        let mut writer = VcfWriter::new(&None, Some(path_str.as_str())).unwrap();
        writer.write_header(&header).unwrap();
        writer.write_line("1\t10\t.\tA\tT\t.\tPASS\tMQ=1").unwrap();
        assert_eq!(writer.lines_written, 3);
        writer.finish().unwrap();

        let mut contents = String::new();
        open_input_reader(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(
            contents,
            "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t10\t.\tA\tT\t.\tPASS\tMQ=1\n"
        );
    }
}
