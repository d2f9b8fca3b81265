use crate::constants::{MISSING_VALUE, UNSET_AD, UNSET_DP, UNSET_GQ, UNSET_GT};
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

/// Genotype of a sample whose record carries no FORMAT data.
pub static UNSET_GENOTYPE: Lazy<Genotype> = Lazy::new(|| Genotype::decode(&HashMap::new()));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zygosity {
    NoCall,
    HomRef,
    HomAlt,
    Het,
}

impl fmt::Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zygosity::NoCall => write!(f, "no_call"),
            Zygosity::HomRef => write!(f, "hom_ref"),
            Zygosity::HomAlt => write!(f, "hom_alt"),
            Zygosity::Het => write!(f, "het"),
        }
    }
}

/// Decoded FORMAT values of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Genotype {
    /// `allele_1/allele_2`, always `/` separated.
    pub genotype: String,
    pub allele_1: String,
    pub allele_2: String,
    pub called: bool,
    pub phased: bool,
    pub zygosity: Zygosity,
    pub ref_depth: Option<u32>,
    pub alt_depth: Option<u32>,
    pub combined_depth: Option<u32>,
    pub depth_of_coverage: u32,
    pub genotype_quality: f64,
    /// `PL`, or `GL` when `PL` is absent.
    pub likelihoods: Vec<f64>,
}

impl Default for Genotype {
    fn default() -> Self {
        UNSET_GENOTYPE.clone()
    }
}

fn parse_count(token: &str) -> Option<u32> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

fn parse_count_pair(raw: &str) -> (Option<u32>, Option<u32>) {
    let mut tokens = raw.split(',');
    let first = tokens.next().and_then(parse_count);
    let second = tokens.next().and_then(parse_count);
    (first, second)
}

fn add_depth(total: Option<u32>, value: Option<u32>) -> Option<u32> {
    match (total, value) {
        // Sums past u32::MAX are unknown
        (Some(total), Some(value)) => total.checked_add(value),
        (total, None) => total,
        (None, value) => value,
    }
}

impl Genotype {
    /// Builds the FORMAT key to value mapping of one sample column.
    pub fn sample_fields<'a>(format: &'a str, sample: &'a str) -> HashMap<&'a str, &'a str> {
        format.split(':').zip(sample.split(':')).collect()
    }

    pub fn from_sample(format: Option<&str>, sample: &str) -> Self {
        match format {
            Some(format) => Self::decode(&Self::sample_fields(format, sample)),
            None => Self::default(),
        }
    }

    /// Decodes one sample. Unparsable numeric values fall back to their
    /// defaults, decoding never fails.
    pub fn decode(fields: &HashMap<&str, &str>) -> Self {
        let get = |key: &str| fields.get(key).copied().filter(|v| !v.is_empty());
        let gt = fields.get("GT").copied().unwrap_or(UNSET_GT);

        let phased = gt.contains('|');
        let gt_chars: Vec<char> = gt.chars().collect();
        // Single character allele indices only; e.g. `10/1` reads as `1/1`.
        let (allele_1, allele_2) = if gt_chars.len() < 3 {
            (gt.to_string(), MISSING_VALUE.to_string())
        } else {
            (
                gt_chars[0].to_string(),
                gt_chars[gt_chars.len() - 1].to_string(),
            )
        };
        let genotype = format!("{allele_1}/{allele_2}");
        let called = genotype != UNSET_GT;
        let zygosity = if !called {
            Zygosity::NoCall
        } else if genotype == "0/0" {
            Zygosity::HomRef
        } else if allele_1 == allele_2 {
            Zygosity::HomAlt
        } else {
            Zygosity::Het
        };

        let (ref_depth, alt_depth) = Self::resolve_depths(
            fields.get("AD").copied().unwrap_or(UNSET_AD),
            get("RO"),
            get("AO"),
            get("PR"),
            get("SR"),
        );
        let combined_depth = match (ref_depth, alt_depth) {
            (Some(ref_depth), Some(alt_depth)) => ref_depth.checked_add(alt_depth),
            _ => None,
        };

        let depth_of_coverage = fields
            .get("DP")
            .copied()
            .unwrap_or(UNSET_DP)
            .parse::<u32>()
            .unwrap_or(0);
        let genotype_quality = fields
            .get("GQ")
            .copied()
            .unwrap_or(UNSET_GQ)
            .parse::<f64>()
            .unwrap_or(0.0);

        let likelihoods = get("PL")
            .or_else(|| get("GL"))
            .and_then(|raw| {
                raw.split(',')
                    .map(|score| score.parse::<f64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .ok()
            })
            .unwrap_or_default();

        Genotype {
            genotype,
            allele_1,
            allele_2,
            called,
            phased,
            zygosity,
            ref_depth,
            alt_depth,
            combined_depth,
            depth_of_coverage,
            genotype_quality,
            likelihoods,
        }
    }

    /// Reference and alternate read support. `AD` wins over `RO`/`AO`, which
    /// win over the summed `PR` + `SR` pairs.
    fn resolve_depths(
        ad: &str,
        ro: Option<&str>,
        ao: Option<&str>,
        pr: Option<&str>,
        sr: Option<&str>,
    ) -> (Option<u32>, Option<u32>) {
        let allele_depths: Vec<&str> = ad.split(',').collect();
        if allele_depths.len() > 1 && allele_depths[0] != MISSING_VALUE {
            return (parse_count(allele_depths[0]), parse_count(allele_depths[1]));
        }
        if ro.is_some() || ao.is_some() {
            return (ro.and_then(parse_count), ao.and_then(parse_count));
        }
        let mut ref_depth = None;
        let mut alt_depth = None;
        for pair in [pr, sr].into_iter().flatten() {
            let (ref_count, alt_count) = parse_count_pair(pair);
            ref_depth = add_depth(ref_depth, ref_count);
            alt_depth = add_depth(alt_depth, alt_count);
        }
        (ref_depth, alt_depth)
    }

    pub fn has_variant(&self) -> bool {
        matches!(self.zygosity, Zygosity::HomAlt | Zygosity::Het)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.genotype)
    }
}
