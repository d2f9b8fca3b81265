mod parse;

pub use parse::{parse, ParseSummary};
