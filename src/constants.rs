pub const DEFAULT_ALLELE_SYMBOL: &str = "0";
pub const DEFAULT_ANNOTATION_KEY: &str = "CSQ";
pub const DEFAULT_STRICT: bool = false;
pub const DEFAULT_SPLIT_VARIANTS: bool = false;
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// The eight mandatory columns of every VCF body line.
pub const FIXED_COLUMNS: [&str; 8] = [
    "CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO",
];
pub const FORMAT_COLUMN: &str = "FORMAT";

// Values assumed for a sample whose FORMAT data is absent
pub const UNSET_GT: &str = "./.";
pub const UNSET_AD: &str = ".,.";
pub const UNSET_DP: &str = "0";
pub const UNSET_GQ: &str = "0";

pub const MISSING_VALUE: &str = ".";
pub const ANNOTATION_ALLELE_COLUMN: &str = "Allele";
pub const ANNOTATION_SYMBOL_COLUMN: &str = "SYMBOL";

pub const GENETIC_MODELS_KEY: &str = "GeneticModels";
pub const COMPOUNDS_KEY: &str = "Compounds";
pub const RANK_SCORE_KEY: &str = "RankScore";
pub const INDIVIDUAL_RANK_SCORE_KEY: &str = "IndividualRankScore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Symbol written for alleles that are not observed after decomposition.
    pub unobserved_symbol: String,
    /// Abort on undeclared INFO keys and cardinality violations.
    pub strict: bool,
    pub split_variants: bool,
    /// INFO key carrying per-allele VEP style annotations.
    pub annotation_key: String,
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            unobserved_symbol: DEFAULT_ALLELE_SYMBOL.to_string(),
            strict: DEFAULT_STRICT,
            split_variants: DEFAULT_SPLIT_VARIANTS,
            annotation_key: DEFAULT_ANNOTATION_KEY.to_string(),
        }
    }
}
