use crate::{error::VcfError, utils::util::Result};
use std::fmt;

/// The `Number` code of an INFO or FORMAT declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// A fixed number of values, `Fixed(0)` being a flag.
    Fixed(usize),
    /// `A`: one value per alternate allele.
    PerAlt,
    /// `R`: one value per allele, reference included.
    PerAllele,
    /// `G`: one value per genotype.
    PerGenotype,
    /// `.`: any number of values.
    Unbounded,
}

impl Cardinality {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Cardinality::PerAlt),
            "R" => Some(Cardinality::PerAllele),
            "G" => Some(Cardinality::PerGenotype),
            "." => Some(Cardinality::Unbounded),
            _ => code.parse::<usize>().ok().map(Cardinality::Fixed),
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Cardinality::Fixed(0))
    }

    /// Number of values a field with this code must carry, `None` when
    /// unconstrained.
    ///
    /// `PerGenotype` is counted per sample, which is how these records have
    /// always been checked.
    pub fn required_count(&self, num_alts: usize, num_samples: usize) -> Option<usize> {
        match self {
            Cardinality::Fixed(0) | Cardinality::Unbounded => None,
            Cardinality::Fixed(n) => Some(*n),
            Cardinality::PerAlt => Some(num_alts),
            Cardinality::PerAllele => Some(num_alts + 1),
            Cardinality::PerGenotype => Some(num_samples),
        }
    }

    pub fn validate(
        &self,
        id: &str,
        tokens: &[String],
        num_alts: usize,
        num_samples: usize,
    ) -> std::result::Result<(), CardinalityMismatch> {
        match self.required_count(num_alts, num_samples) {
            Some(expected) if expected != tokens.len() => Err(CardinalityMismatch {
                id: id.to_string(),
                cardinality: *self,
                expected,
                actual: tokens.len(),
                value: format!("{}={}", id, tokens.join(",")),
            }),
            _ => Ok(()),
        }
    }
}

impl std::str::FromStr for Cardinality {
    type Err = VcfError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| crate::vcf_error!("Invalid Number code: {:?}", s))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Fixed(n) => write!(f, "{n}"),
            Cardinality::PerAlt => write!(f, "A"),
            Cardinality::PerAllele => write!(f, "R"),
            Cardinality::PerGenotype => write!(f, "G"),
            Cardinality::Unbounded => write!(f, "."),
        }
    }
}

/// A field whose value count disagrees with its declared `Number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityMismatch {
    pub id: String,
    pub cardinality: Cardinality,
    pub expected: usize,
    pub actual: usize,
    pub value: String,
}

impl fmt::Display for CardinalityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INFO field {} has the wrong number of entries according to the VCF header: Number={} requires {} value(s), found {}",
            self.value, self.cardinality, self.expected, self.actual
        )
    }
}

impl From<CardinalityMismatch> for VcfError {
    fn from(mismatch: CardinalityMismatch) -> Self {
        VcfError::Cardinality(mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Cardinality::from_code("1"), Some(Cardinality::Fixed(1)));
        assert_eq!(Cardinality::from_code("0"), Some(Cardinality::Fixed(0)));
        assert_eq!(Cardinality::from_code("A"), Some(Cardinality::PerAlt));
        assert_eq!(Cardinality::from_code("R"), Some(Cardinality::PerAllele));
        assert_eq!(Cardinality::from_code("G"), Some(Cardinality::PerGenotype));
        assert_eq!(Cardinality::from_code("."), Some(Cardinality::Unbounded));
        assert_eq!(Cardinality::from_code("X"), None);
        assert_eq!(Cardinality::from_code("-1"), None);
        assert!("Z".parse::<Cardinality>().is_err());
    }

    #[test]
    fn test_display_matches_header_code() {
        for code in ["0", "3", "A", "R", "G", "."] {
            assert_eq!(Cardinality::from_code(code).unwrap().to_string(), code);
        }
    }

    #[test]
    fn test_required_count() {
        assert_eq!(Cardinality::Fixed(2).required_count(3, 4), Some(2));
        assert_eq!(Cardinality::Fixed(0).required_count(3, 4), None);
        assert_eq!(Cardinality::PerAlt.required_count(3, 4), Some(3));
        assert_eq!(Cardinality::PerAllele.required_count(3, 4), Some(4));
        assert_eq!(Cardinality::PerGenotype.required_count(3, 4), Some(4));
        assert_eq!(Cardinality::Unbounded.required_count(3, 4), None);
    }

    #[test]
    fn test_validate_per_alt_mismatch() {
        let err = Cardinality::PerAlt
            .validate("CNT", &tokens(&["5"]), 2, 3)
            .unwrap_err();
        assert_eq!(err.id, "CNT");
        assert_eq!(err.cardinality, Cardinality::PerAlt);
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
        assert!(err.to_string().contains("CNT=5"));
    }

    #[test]
    fn test_validate_unconstrained_passes() {
        assert!(Cardinality::Unbounded
            .validate("X", &tokens(&["1", "2", "3"]), 1, 1)
            .is_ok());
        assert!(Cardinality::Fixed(0).validate("DB", &[], 1, 1).is_ok());
        assert!(Cardinality::PerAllele
            .validate("DP_HIST", &tokens(&["12", "43", "22"]), 2, 3)
            .is_ok());
    }
}
