//! Attribution of VEP style `CSQ` annotation entries to VCF alternate alleles.
//!
//! VEP spells indel alleles without the padding base VCF requires: an
//! insertion `C -> CACC` is annotated as `ACC`, a deletion `ACC -> C` as `-`.
//! When a site carries several deletions VEP keeps the remaining bases, so
//! `TACTTT -> TACT,TACTT` is annotated as `ACT` and `ACTT`.

use crate::{
    constants::{ANNOTATION_ALLELE_COLUMN, ANNOTATION_SYMBOL_COLUMN},
    error::VcfError,
    utils::util::Result,
};
use linked_hash_map::LinkedHashMap;
use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

/// One annotation entry, column name to value, in header column order.
pub type AnnotationEntry = LinkedHashMap<String, String>;

/// VCF alternate allele to the annotation entries attributed to it.
pub type AnnotationMap = LinkedHashMap<String, Vec<AnnotationEntry>>;

const DELETED_ALLELE: &str = "-";

/// How an annotation tool spells `alternative` relative to `reference`.
pub fn annotation_allele(reference: &str, alternative: &str) -> String {
    match alternative.len().cmp(&reference.len()) {
        Ordering::Equal => alternative.to_string(),
        Ordering::Less if alternative.chars().count() == 1 => DELETED_ALLELE.to_string(),
        Ordering::Less | Ordering::Greater => alternative.chars().skip(1).collect(),
    }
}

/// Attributes each raw annotation entry to the VCF alternate it describes.
///
/// Every alternate gets a (possibly empty) entry list. Entries with an allele
/// matching none of the alternates are kept under their own spelling.
pub fn build_annotation_map(
    raw_entries: &[String],
    reference: &str,
    alternatives: &[&str],
    columns: &[String],
) -> Result<AnnotationMap> {
    let mut annotations = AnnotationMap::new();
    let mut to_vcf_allele: HashMap<String, &str> = HashMap::new();
    for &alternative in alternatives {
        annotations.insert(alternative.to_string(), Vec::new());
        to_vcf_allele.insert(annotation_allele(reference, alternative), alternative);
    }

    for raw_entry in raw_entries {
        let values: Vec<&str> = raw_entry.split('|').collect();
        if values.len() != columns.len() {
            return Err(VcfError::annotation_syntax(
                format!(
                    "found {} fields, header declares {} ({})",
                    values.len(),
                    columns.len(),
                    columns.join("|")
                ),
                raw_entry.as_str(),
            ));
        }
        let entry: AnnotationEntry = columns
            .iter()
            .cloned()
            .zip(values.into_iter().map(str::to_string))
            .collect();

        let allele = match entry.get(ANNOTATION_ALLELE_COLUMN) {
            Some(allele) if !allele.is_empty() => allele.clone(),
            _ => {
                log::warn!("No allele found in annotation entry, skipping: {raw_entry}");
                continue;
            }
        };
        let vcf_allele = to_vcf_allele
            .get(allele.as_str())
            .map(|vcf_allele| vcf_allele.to_string())
            .unwrap_or(allele);
        match annotations.get_mut(&vcf_allele) {
            Some(entries) => entries.push(entry),
            None => {
                log::debug!("Annotation allele {vcf_allele} matches no alternate of {reference}");
                annotations.insert(vcf_allele, vec![entry]);
            }
        }
    }
    Ok(annotations)
}

/// Serializes annotation entries back into their INFO form.
pub fn build_annotation_string(entries: &[AnnotationEntry], columns: &[String]) -> Result<String> {
    let mut encoded = Vec::with_capacity(entries.len());
    for entry in entries {
        let values = columns
            .iter()
            .map(|column| {
                entry.get(column).map(String::as_str).ok_or_else(|| {
                    VcfError::annotation_syntax(
                        format!("entry has no value for column {column}"),
                        entry.values().cloned().collect::<Vec<_>>().join("|"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        encoded.push(values.join("|"));
    }
    Ok(encoded.join(","))
}

/// Gene symbols named by any attributed annotation entry.
pub fn gene_symbols(annotations: &AnnotationMap) -> BTreeSet<String> {
    annotations
        .values()
        .flatten()
        .filter_map(|entry| entry.get(ANNOTATION_SYMBOL_COLUMN))
        .filter(|symbol| !symbol.is_empty())
        .cloned()
        .collect()
}
