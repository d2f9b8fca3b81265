use crate::{core::parser::VcfParser, io::vcf_reader::DataLine, utils::util::Result};
use rayon::prelude::*;

/// The rendered output of one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub lines: Vec<String>,
    pub warnings: usize,
}

pub fn process_line(parser: &VcfParser, line: &DataLine) -> Result<LineOutcome> {
    let records = parser.parse_line(&line.text)?;
    let warnings = records.warnings().len();
    let lines = records
        .map(|record| record.map(|record| record.to_line(&parser.header)))
        .collect::<Result<Vec<_>>>()?;
    Ok(LineOutcome { lines, warnings })
}

/// Parses a batch on the current rayon pool. Results keep the input order.
pub fn process_batch(parser: &VcfParser, batch: &[DataLine]) -> Vec<Result<LineOutcome>> {
    batch
        .par_iter()
        .map(|line| process_line(parser, line))
        .collect()
}
