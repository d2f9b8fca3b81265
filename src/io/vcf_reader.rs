use super::readers::open_input_reader;
use crate::{core::header::HeaderModel, error::VcfError, utils::util::Result};
use std::{
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// A data line together with its 1-based line number in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    pub number: usize,
    pub text: String,
}

/// Line reader over a VCF stream: the `#` block is consumed up front, data
/// lines are handed out afterwards.
pub struct VcfReader<R: BufRead> {
    reader: R,
    pub header: HeaderModel,
    pending: Option<DataLine>,
    line_number: usize,
}

/// Reads one line, replacing invalid UTF-8 so that a bad byte only affects
/// the line it is on. Returns `None` at the end of input.
fn read_text_line<R: BufRead>(reader: &mut R, buffer: &mut Vec<u8>) -> Result<Option<String>> {
    buffer.clear();
    if reader.read_until(b'\n', buffer)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buffer[..]);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

impl VcfReader<BufReader<Box<dyn Read>>> {
    pub fn from_path(path: &Path, annotation_key: &str) -> Result<Self> {
        log::debug!("Opening VCF {}", path.display());
        Self::new(open_input_reader(path)?, annotation_key)
    }
}

impl<R: BufRead> VcfReader<R> {
    pub fn new(mut reader: R, annotation_key: &str) -> Result<Self> {
        let mut header_lines = Vec::new();
        let mut pending = None;
        let mut line_number = 0;
        let mut buffer = Vec::new();
        while let Some(line) = read_text_line(&mut reader, &mut buffer)? {
            line_number += 1;
            if line.starts_with('#') {
                header_lines.push(line);
            } else if !line.trim().is_empty() {
                pending = Some(DataLine {
                    number: line_number,
                    text: line,
                });
                break;
            }
        }
        if header_lines.is_empty() {
            return Err(VcfError::header_syntax(
                "VCF files always have to start with a metadata line",
                pending.map(|line| line.text).unwrap_or_default(),
            ));
        }
        let header = HeaderModel::from_lines(&header_lines, annotation_key)?;
        log::debug!(
            "Read {} header lines, {} sample(s)",
            header_lines.len(),
            header.sample_ids.len()
        );
        Ok(VcfReader {
            reader,
            header,
            pending,
            line_number,
        })
    }

    fn read_data_line(&mut self) -> Result<Option<DataLine>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        let mut buffer = Vec::new();
        while let Some(line) = read_text_line(&mut self.reader, &mut buffer)? {
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with('#') {
                return Err(VcfError::header_syntax(
                    format!("header line found among data lines at line {}", self.line_number),
                    line,
                ));
            }
            return Ok(Some(DataLine {
                number: self.line_number,
                text: line,
            }));
        }
        Ok(None)
    }

    /// Reads up to `size` data lines, an empty batch signals the end of input.
    pub fn read_batch(&mut self, size: usize) -> Result<Vec<DataLine>> {
        let mut batch = Vec::with_capacity(size);
        while batch.len() < size {
            match self.read_data_line()? {
                Some(line) => batch.push(line),
                None => break,
            }
        }
        Ok(batch)
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<DataLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_data_line().transpose()
    }
}
