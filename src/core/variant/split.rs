use super::{build_variant_id, VariantRecord};
use crate::{
    constants::MISSING_VALUE,
    core::{
        annotation::{build_annotation_string, AnnotationMap},
        cardinality::Cardinality,
        genmod::FamilyAnnotations,
        genotype::Genotype,
        header::HeaderModel,
        info::{encode_info, InfoMap},
    },
    utils::util::Result,
};
use linked_hash_map::LinkedHashMap;

const OBSERVED_ALLELE: &str = "1";
const REFERENCE_ALLELE: &str = "0";

fn allele_index(allele: &str) -> Option<i64> {
    allele.trim().parse::<i64>().ok()
}

/// Re-encodes a `GT` value for the biallelic record of alternate
/// `alt_index`. Alleles that cannot be read as an index leave their
/// position at its default.
fn split_gt(gt: &str, alt_index: usize, unobserved_symbol: &str) -> String {
    let separator = if gt.contains('/') { '/' } else { '|' };
    let alleles: Vec<&str> = gt.split(separator).collect();
    let target = alt_index as i64 + 1;

    let mut ref_allele = MISSING_VALUE;
    let mut alt_allele = MISSING_VALUE;
    if alleles.len() == 2 && alleles[0] != MISSING_VALUE && alleles[1] != MISSING_VALUE {
        ref_allele = unobserved_symbol;
        alt_allele = unobserved_symbol;
        if alleles[0] == alleles[1] {
            if allele_index(alleles[0]) == Some(target) {
                ref_allele = OBSERVED_ALLELE;
                alt_allele = OBSERVED_ALLELE;
            }
        } else {
            // An unreadable first allele leaves the second unexamined
            match allele_index(alleles[0]) {
                Some(index) if index == target => alt_allele = OBSERVED_ALLELE,
                Some(_) if allele_index(alleles[1]) == Some(target) => {
                    alt_allele = OBSERVED_ALLELE
                }
                _ => {}
            }
        }
    } else if alleles[0] != MISSING_VALUE {
        if let Some(index) = allele_index(alleles[0]) {
            ref_allele = if index == target {
                OBSERVED_ALLELE
            } else {
                REFERENCE_ALLELE
            };
        }
    } else if alleles.len() == 2 && alleles[1] != MISSING_VALUE {
        if let Some(index) = allele_index(alleles[1]) {
            alt_allele = if index == target {
                OBSERVED_ALLELE
            } else {
                REFERENCE_ALLELE
            };
        }
    }

    if alleles.len() == 2 {
        format!("{ref_allele}{separator}{alt_allele}")
    } else {
        ref_allele.to_string()
    }
}

/// Keeps the reference depth and the depth of alternate `alt_index`.
fn split_ad(ad: &str, alt_index: usize) -> String {
    let depths: Vec<&str> = ad.split(',').collect();
    let alt_depth = depths.get(alt_index + 1).copied().unwrap_or(REFERENCE_ALLELE);
    format!("{},{}", depths[0], alt_depth)
}

/// Rewrites one raw sample column for the biallelic record of alternate
/// `alt_index`.
///
/// `GT` and `AD` are re-indexed, every other value is copied, including
/// values beyond the last FORMAT key.
///
/// ```
/// use vcfsplit::core::variant::split_genotype;
/// assert_eq!(split_genotype("1/2:30:0,10,20", "GT:DP:AD", 1, "0"), "0/1:30:0,20");
/// ```
pub fn split_genotype(raw: &str, format: &str, alt_index: usize, unobserved_symbol: &str) -> String {
    let keys: Vec<&str> = format.split(':').collect();
    raw.split(':')
        .enumerate()
        .map(|(n, value)| match keys.get(n).copied() {
            Some("GT") => split_gt(value, alt_index, unobserved_symbol),
            Some("AD") => split_ad(value, alt_index),
            _ => value.to_string(),
        })
        .collect::<Vec<_>>()
        .join(":")
}

impl VariantRecord {
    /// Derives the biallelic record of alternate `index`, as if it had been
    /// read from a line carrying that single alternate.
    pub fn split_alternative(
        &self,
        index: usize,
        header: &HeaderModel,
        unobserved_symbol: &str,
    ) -> Result<VariantRecord> {
        let alternatives = self.alternatives();
        let alternative = *alternatives.get(index).ok_or_else(|| {
            crate::vcf_error!(
                "Alternate index {} out of range for {} ({} alternates)",
                index,
                self.variant_id,
                alternatives.len()
            )
        })?;
        let id = self.id.split(';').nth(index).unwrap_or(&self.id);

        let mut info_map = InfoMap::new();
        let mut annotations = AnnotationMap::new();
        for (key, tokens) in &self.info_map {
            if key.is_empty() || key == MISSING_VALUE {
                info_map.insert(key.clone(), Vec::new());
                continue;
            }
            if *key == header.annotation_key {
                let entries = self
                    .annotations
                    .get(alternative)
                    .cloned()
                    .unwrap_or_default();
                if !entries.is_empty() {
                    let columns = header.annotation_columns();
                    info_map.insert(
                        key.clone(),
                        vec![build_annotation_string(&entries, &columns)?],
                    );
                }
                annotations.insert(alternative.to_string(), entries);
                continue;
            }
            let values = match header.info_declaration(key).map(|decl| decl.number) {
                Some(Cardinality::PerAlt) => tokens
                    .get(index)
                    .or_else(|| tokens.first())
                    .map(|token| vec![token.clone()])
                    .unwrap_or_default(),
                Some(Cardinality::PerAllele) => match (tokens.first(), tokens.get(index + 1)) {
                    (Some(reference), Some(allele)) => vec![reference.clone(), allele.clone()],
                    _ => tokens.clone(),
                },
                _ => tokens.clone(),
            };
            info_map.insert(key.clone(), values);
        }

        let mut samples = LinkedHashMap::new();
        let mut genotypes = LinkedHashMap::new();
        for (sample_id, raw) in &self.samples {
            let split = match &self.format {
                Some(format) => split_genotype(raw, format, index, unobserved_symbol),
                None => raw.clone(),
            };
            genotypes.insert(
                sample_id.clone(),
                Genotype::from_sample(self.format.as_deref(), &split),
            );
            samples.insert(sample_id.clone(), split);
        }

        let family = FamilyAnnotations::from_info(&info_map)?;
        Ok(VariantRecord {
            chrom: self.chrom.clone(),
            pos: self.pos.clone(),
            id: id.to_string(),
            reference: self.reference.clone(),
            alt: alternative.to_string(),
            qual: self.qual.clone(),
            filter: self.filter.clone(),
            info: encode_info(&info_map),
            format: self.format.clone(),
            samples,
            info_map,
            genotypes,
            annotations,
            family,
            variant_id: build_variant_id(&self.chrom, &self.pos, &self.reference, alternative),
            warnings: Vec::new(),
        })
    }

    /// Lazily decomposes the record into one record per alternate.
    pub fn decompose<'a>(self, header: &'a HeaderModel, unobserved_symbol: &'a str) -> Decompose<'a> {
        Decompose {
            total: self.num_alternatives(),
            source: self,
            header,
            unobserved_symbol,
            next: 0,
        }
    }
}

/// Iterator over the biallelic records of a multiallelic source record, in
/// alternate order.
#[derive(Debug)]
pub struct Decompose<'a> {
    source: VariantRecord,
    header: &'a HeaderModel,
    unobserved_symbol: &'a str,
    next: usize,
    total: usize,
}

impl Decompose<'_> {
    pub fn source(&self) -> &VariantRecord {
        &self.source
    }
}

impl Iterator for Decompose<'_> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(
            self.source
                .split_alternative(index, self.header, self.unobserved_symbol),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Decompose<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_genotype_multiallelic_het() {
        assert_eq!(split_genotype("1/2:30", "GT:DP", 0, "0"), "0/1:30");
        assert_eq!(split_genotype("1/2:30", "GT:DP", 1, "0"), "0/1:30");
        assert_eq!(split_genotype("1/2:30", "GT:DP", 2, "0"), "0/0:30");
    }

    #[test]
    fn test_split_genotype_unobserved_symbol() {
        assert_eq!(split_genotype("1/2:30", "GT:DP", 0, "."), "./1:30");
        assert_eq!(split_genotype("1/2:30", "GT:DP", 1, "."), "./1:30");
        assert_eq!(split_genotype("1/2:30", "GT:DP", 2, "."), "./.:30");
    }

    #[test]
    fn test_split_genotype_homozygous() {
        assert_eq!(split_genotype("2/2", "GT", 1, "0"), "1/1");
        assert_eq!(split_genotype("2/2", "GT", 0, "0"), "0/0");
        assert_eq!(split_genotype("0/0", "GT", 0, "0"), "0/0");
    }

    #[test]
    fn test_split_genotype_phased() {
        assert_eq!(split_genotype("2|1", "GT", 0, "0"), "0|1");
        assert_eq!(split_genotype("0|2", "GT", 1, "0"), "0|1");
        assert_eq!(split_genotype("0|2", "GT", 0, "0"), "0|0");
    }

    #[test]
    fn test_split_genotype_missing_alleles() {
        assert_eq!(split_genotype("./.", "GT", 0, "0"), "./.");
        assert_eq!(split_genotype("./2", "GT", 1, "0"), "./1");
        assert_eq!(split_genotype("./2", "GT", 0, "0"), "./0");
        assert_eq!(split_genotype("2/.", "GT", 1, "0"), "1/.");
        // The missing branch always writes 0 for an unobserved allele
        assert_eq!(split_genotype("./2", "GT", 0, "."), "./0");
    }

    #[test]
    fn test_split_genotype_haploid_and_polyploid() {
        assert_eq!(split_genotype("2", "GT", 1, "0"), "1");
        assert_eq!(split_genotype("2", "GT", 0, "0"), "0");
        assert_eq!(split_genotype(".", "GT", 0, "0"), ".");
        assert_eq!(split_genotype("1/2/2", "GT", 0, "0"), "1");
    }

    #[test]
    fn test_split_genotype_unreadable_alleles() {
        assert_eq!(split_genotype("X/X", "GT", 0, "0"), "0/0");
        assert_eq!(split_genotype("X/1", "GT", 0, "0"), "0/0");
        assert_eq!(split_genotype("1/X", "GT", 0, "0"), "0/1");
        assert_eq!(split_genotype("X/.", "GT", 0, "0"), "./.");
        assert_eq!(split_genotype("", "GT", 0, "0"), ".");
    }

    #[test]
    fn test_split_allele_depths() {
        assert_eq!(
            split_genotype("1/2:30:0,10,20", "GT:DP:AD", 1, "0"),
            "0/1:30:0,20"
        );
        assert_eq!(split_genotype("1/2:5,3", "GT:AD", 4, "0"), "0/0:5,0");
        assert_eq!(split_genotype("1/2:.", "GT:AD", 0, "0"), "0/1:.,0");
    }

    #[test]
    fn test_split_copies_other_values() {
        assert_eq!(
            split_genotype("1/2:60:0,7,8:16:10,20,30,40,50,60", "GT:GQ:AD:DP:PL", 0, "0"),
            "0/1:60:0,7:16:10,20,30,40,50,60"
        );
        assert_eq!(split_genotype("1/2:30:extra", "GT:DP", 0, "0"), "0/1:30:extra");
        assert_eq!(split_genotype("1/2", "GT:DP", 0, "0"), "0/1");
    }
}
