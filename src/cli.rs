use crate::{
    constants::*,
    io::{readers::STDIN_PATH, vcf_writer::OutputType},
};
use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
/// * `0.1.0` - when built outside a git checkout
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or_default();
    if git_describe.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="vcfsplit",
          author="Tom Mokveld <tmokveld@pacificbiosciences.com>",
          version=&**FULL_VERSION,
          about="VCF parser and multiallelic variant decomposer",
          long_about = None,
          after_help = format!("Copyright (C) 2004-{}     Pacific Biosciences of California, Inc.
          This program comes with ABSOLUTELY NO WARRANTY; it is intended for
          Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Parse(ParseArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Parse(_) => "parse",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct ParseArgs {
    /// VCF file to parse, plain or gzip compressed ('-' for standard input)
    #[arg(value_name = "VCF", value_parser = check_input_exists)]
    pub input: PathBuf,

    /// Split multiallelic variants into one record per alternate allele
    #[arg(short = 's', long = "split")]
    pub split: bool,

    /// Symbol for alleles that are not observed after splitting
    #[arg(
        long = "allele-symbol",
        value_name = "SYMBOL",
        default_value = DEFAULT_ALLELE_SYMBOL,
        value_parser = validate_allele_symbol
    )]
    pub allele_symbol: String,

    /// Abort on INFO fields that are undeclared or do not match their declared Number
    #[arg(long = "check-info")]
    pub check_info: bool,

    /// INFO field holding per-allele VEP style annotations
    #[arg(
        long = "annotation-key",
        value_name = "KEY",
        default_value = DEFAULT_ANNOTATION_KEY
    )]
    pub annotation_key: String,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    /// Number of threads to use
    #[arg(
        short = '@',
        value_name = "THREADS",
        default_value = "1",
        value_parser = threads_in_range
    )]
    pub num_threads: usize,

    /// Output type: v|z, v/z: un/compressed VCF
    #[arg(
        short = 'O',
        long = "output-type",
        value_name = "OUTPUT_TYPE",
        value_parser = validate_output_type,
        help_heading = "Advanced"
    )]
    pub output_type: Option<OutputType>,

    /// Parse the variants but do not print them
    #[arg(long = "silent", help_heading = "Advanced")]
    pub silent: bool,

    /// Print only the header and exit
    #[arg(long = "print-header", help_heading = "Advanced")]
    pub print_header: bool,

    /// Do not append version and command line to the header
    #[arg(long = "no-version", help_heading = "Advanced")]
    pub no_version: bool,

    /// Skip malformed variant lines with a warning instead of aborting
    #[arg(long = "skip-malformed", help_heading = "Advanced")]
    pub skip_malformed: bool,

    /// Number of lines parsed per batch
    #[arg(
        long = "batch-size",
        value_name = "LINES",
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = batch_size_in_range,
        help_heading = "Advanced"
    )]
    pub batch_size: usize,
}

impl ParseArgs {
    pub fn config(&self) -> ParseConfig {
        ParseConfig::default().with(|config| {
            config.unobserved_symbol = self.allele_symbol.clone();
            config.strict = self.check_info;
            config.split_variants = self.split;
            config.annotation_key = self.annotation_key.clone();
        })
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `-v` or `--verbose` flag in the command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse::<usize>()
        .map_err(|_| anyhow!("`{}` is not a valid thread number", s))?;
    if thread == 0 {
        return Err(anyhow!("Number of threads must be >= 1"));
    }
    Ok(thread)
}

fn batch_size_in_range(s: &str) -> Result<usize> {
    let size: usize = s
        .parse::<usize>()
        .map_err(|_| anyhow!("`{}` is not a valid batch size", s))?;
    if size == 0 {
        return Err(anyhow!("Batch size must be >= 1"));
    }
    Ok(size)
}

fn validate_allele_symbol(s: &str) -> Result<String> {
    if s.is_empty() || s.contains(['/', '|', ':', '\t']) {
        return Err(anyhow!(
            "Invalid allele symbol `{}`: must be non-empty and contain none of / | : or tab",
            s
        ));
    }
    Ok(s.to_string())
}

/// Accepts an existing file, or `-` for standard input.
fn check_input_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if s != STDIN_PATH && !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn validate_output_type(s: &str) -> Result<OutputType> {
    match s {
        "v" => Ok(OutputType::Vcf {
            is_uncompressed: true,
        }),
        "z" => Ok(OutputType::Vcf {
            is_uncompressed: false,
        }),
        _ => Err(anyhow!("Invalid output type: {}. Must be one of v, z.", s)),
    }
}
