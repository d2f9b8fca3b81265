use crate::{
    cli::{ParseArgs, FULL_VERSION},
    core::{header::HeaderModel, parser::VcfParser},
    io::{vcf_reader::VcfReader, vcf_writer::VcfWriter},
    utils::util::{format_number_with_commas, Result},
};
use rayon::ThreadPoolBuilder;
use std::env;

mod worker;

use worker::process_batch;


/// Counts collected over one `parse` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub lines: usize,
    pub records: usize,
    pub skipped: usize,
    pub warnings: usize,
}

fn add_version_info(header: &mut HeaderModel) -> Result<()> {
    let command_line = env::args().collect::<Vec<String>>().join(" ");
    let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    header.add_version_tracking(
        env!("CARGO_PKG_NAME"),
        &**FULL_VERSION,
        &date,
        &command_line,
    )
}

// Silent runs still write when an output file is given
fn open_writer(args: &ParseArgs) -> Result<Option<VcfWriter>> {
    if args.silent && args.output.is_none() {
        return Ok(None);
    }
    VcfWriter::new(&args.output_type, args.output.as_deref()).map(Some)
}

pub fn parse(args: ParseArgs) -> Result<ParseSummary> {
    let config = args.config();
    let mut reader = VcfReader::from_path(&args.input, &config.annotation_key)?;
    let mut header = reader.header.clone();
    if !args.no_version {
        add_version_info(&mut header)?;
    }

    let mut writer = open_writer(&args)?;
    if let Some(writer) = writer.as_mut() {
        writer.write_header(&header)?;
    }
    if args.print_header {
        if let Some(writer) = writer {
            writer.finish()?;
        }
        return Ok(ParseSummary::default());
    }

    let parser = VcfParser::new(header, config);
    log::debug!(
        "Initializing parse thread pool with {} threads...",
        args.num_threads
    );
    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .thread_name(|i| format!("vcfsplit-parse-{i}"))
        .build()
        .map_err(|e| crate::vcf_error!("Failed to initialize parse thread pool: {e}"))?;

    let mut summary = ParseSummary::default();
    loop {
        let batch = reader.read_batch(args.batch_size)?;
        if batch.is_empty() {
            break;
        }
        let outcomes = pool.install(|| process_batch(&parser, &batch));
        for (line, outcome) in batch.iter().zip(outcomes) {
            summary.lines += 1;
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) if args.skip_malformed && e.is_line_local() => {
                    log::warn!("Skipping line {}: {}", line.number, e);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    log::error!("Failed to parse line {}", line.number);
                    return Err(e);
                }
            };
            summary.records += outcome.lines.len();
            summary.warnings += outcome.warnings;
            if let Some(writer) = writer.as_mut() {
                for text in &outcome.lines {
                    writer.write_line(text)?;
                }
            }
        }
        log::debug!(
            "Processed {} lines",
            format_number_with_commas(summary.lines)
        );
    }

    if let Some(writer) = writer {
        writer.finish()?;
    }

    log::info!(
        "Parsed {} variant lines into {} records",
        format_number_with_commas(summary.lines),
        format_number_with_commas(summary.records)
    );
    if summary.skipped > 0 {
        log::warn!(
            "Skipped {} malformed lines",
            format_number_with_commas(summary.skipped)
        );
    }
    if summary.warnings > 0 {
        log::warn!(
            "{} INFO values did not match their declared Number",
            format_number_with_commas(summary.warnings)
        );
    }
    Ok(summary)
}
