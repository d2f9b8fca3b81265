use crate::{error::VcfError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufReader, Read as ioRead},
    path::Path,
};

pub const STDIN_PATH: &str = "-";

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip") || path_str.ends_with(".bgz")
}

/// Opens a plain or gzip compressed text file, or standard input for `-`.
pub fn open_input_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    if path.as_os_str() == STDIN_PATH {
        log::debug!("Reading from standard input");
        return Ok(BufReader::new(Box::new(io::stdin())));
    }
    let file = File::open(path)
        .map_err(|error| crate::vcf_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(VcfError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{BufRead, Write};
    use tempfile::tempdir;

    #[test]
    fn reads_plain_and_gzipped_files() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let plain_path = temp_dir.path().join("calls.vcf");
        std::fs::write(&plain_path, "##fileformat=VCFv4.2\n").unwrap();

        let gz_path = temp_dir.path().join("calls.vcf.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        encoder.write_all(b"##fileformat=VCFv4.2\n").unwrap();
        encoder.finish().unwrap();

        for path in [plain_path, gz_path] {
            let mut line = String::new();
            open_input_reader(&path)
                .unwrap()
                .read_line(&mut line)
                .unwrap();
            assert_eq!(line, "##fileformat=VCFv4.2\n");
        }
    }

    #[test]
    fn rejects_gz_extension_without_gzip_content() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("calls.vcf.gz");
        std::fs::write(&path, "##fileformat=VCFv4.2\n").unwrap();
        assert!(matches!(
            open_input_reader(&path),
            Err(VcfError::InvalidGzipHeader { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempdir().expect("temp dir should be created");
        assert!(open_input_reader(&temp_dir.path().join("absent.vcf")).is_err());
    }
}
