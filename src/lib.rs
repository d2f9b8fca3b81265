pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod annotation;
    pub mod cardinality;
    pub mod genmod;
    pub mod genotype;
    pub mod header;
    pub mod info;
    pub mod parser;
    pub mod variant;
}

pub mod io {
    pub mod readers;
    pub mod vcf_reader;
    pub mod vcf_writer;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
