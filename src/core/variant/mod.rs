mod builder;
mod split;


pub use builder::NewVariant;
pub use split::{split_genotype, Decompose};

use crate::{
    constants::MISSING_VALUE,
    core::{
        annotation::AnnotationMap, cardinality::CardinalityMismatch, genmod::FamilyAnnotations,
        genotype::Genotype, header::HeaderModel, info::InfoMap,
    },
};
use linked_hash_map::LinkedHashMap;
use std::fmt;

/// One VCF data line together with its decoded side maps.
///
/// The text columns are kept exactly as read so that a record that is not
/// decomposed is written back byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: String,
    /// `;` separated identifiers, one per alternate or a single shared one.
    pub id: String,
    pub reference: String,
    /// `,` separated alternate alleles.
    pub alt: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub format: Option<String>,
    /// Sample id to raw colon delimited sample column, in header order.
    pub samples: LinkedHashMap<String, String>,
    pub info_map: InfoMap,
    pub genotypes: LinkedHashMap<String, Genotype>,
    /// Only filled when the record carries the annotation INFO key.
    pub annotations: AnnotationMap,
    pub family: FamilyAnnotations,
    /// `chrom_pos_ref_alt`, with the first alternate for multiallelic records.
    pub variant_id: String,
    /// Cardinality violations tolerated while reading the record.
    pub warnings: Vec<CardinalityMismatch>,
}

pub fn build_variant_id(chrom: &str, pos: &str, reference: &str, alternative: &str) -> String {
    format!("{chrom}_{pos}_{reference}_{alternative}")
}

impl VariantRecord {
    pub fn alternatives(&self) -> Vec<&str> {
        self.alt.split(',').collect()
    }

    pub fn num_alternatives(&self) -> usize {
        self.alt.split(',').count()
    }

    pub fn is_multiallelic(&self) -> bool {
        self.num_alternatives() > 1
    }

    /// Re-emits the record as a tab delimited line in the column order of
    /// `header`.
    pub fn to_line(&self, header: &HeaderModel) -> String {
        let mut fields: Vec<&str> = vec![
            self.chrom.as_str(),
            self.pos.as_str(),
            self.id.as_str(),
            self.reference.as_str(),
            self.alt.as_str(),
            self.qual.as_str(),
            self.filter.as_str(),
            self.info.as_str(),
        ];
        if header.has_format_column() {
            fields.push(self.format.as_deref().unwrap_or(MISSING_VALUE));
            fields.extend(header.sample_ids.iter().map(|sample_id| {
                self.samples
                    .get(sample_id)
                    .map(String::as_str)
                    .unwrap_or(MISSING_VALUE)
            }));
        }
        fields.join("\t")
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variant_id)
    }
}
