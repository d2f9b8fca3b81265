use super::{build_variant_id, VariantRecord};
use crate::{
    constants::{FIXED_COLUMNS, MISSING_VALUE},
    core::{
        annotation::{build_annotation_map, AnnotationMap},
        cardinality::CardinalityMismatch,
        genmod::FamilyAnnotations,
        genotype::Genotype,
        header::HeaderModel,
        info::{decode_info, InfoMap},
    },
    error::VcfError,
    utils::util::Result,
    ParseConfig,
};
use linked_hash_map::LinkedHashMap;

/// The separate fields of a variant that is built programmatically rather
/// than read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVariant {
    pub chrom: String,
    pub pos: String,
    pub id: String,
    pub reference: String,
    pub alt: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub format: Option<String>,
    pub samples: Vec<String>,
}

impl NewVariant {
    pub fn to_line(&self) -> String {
        let mut fields = vec![
            self.chrom.as_str(),
            self.pos.as_str(),
            self.id.as_str(),
            self.reference.as_str(),
            self.alt.as_str(),
            self.qual.as_str(),
            self.filter.as_str(),
            self.info.as_str(),
        ];
        if let Some(format) = &self.format {
            fields.push(format.as_str());
        }
        fields.extend(self.samples.iter().map(String::as_str));
        fields.join("\t")
    }
}

/// Checks every INFO entry against its header declaration.
///
/// In strict mode the first undeclared key or cardinality violation is
/// returned as an error, otherwise violations are collected and returned.
fn check_info(
    info: &InfoMap,
    header: &HeaderModel,
    num_alts: usize,
    strict: bool,
    line: &str,
) -> Result<Vec<CardinalityMismatch>> {
    let mut warnings = Vec::new();
    for (key, tokens) in info {
        if key.is_empty() || key == MISSING_VALUE {
            continue;
        }
        let Some(declaration) = header.info_declaration(key) else {
            if strict {
                return Err(VcfError::line_syntax(
                    format!("INFO field {key} is not declared in the VCF header"),
                    line,
                ));
            }
            continue;
        };
        if let Err(mismatch) =
            declaration
                .number
                .validate(key, tokens, num_alts, header.sample_ids.len())
        {
            if strict {
                return Err(mismatch.into());
            }
            log::debug!("{mismatch}");
            warnings.push(mismatch);
        }
    }
    Ok(warnings)
}

impl VariantRecord {
    /// Builds a record from one tab delimited data line.
    ///
    /// The line must have exactly as many columns as the header's column
    /// header line.
    pub fn from_line(line: &str, header: &HeaderModel, config: &ParseConfig) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if header.columns.is_empty() {
            return Err(VcfError::line_syntax(
                "no column header line has been parsed",
                line,
            ));
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != header.columns.len() {
            return Err(VcfError::line_syntax(
                format!(
                    "expected {} columns, found {}",
                    header.columns.len(),
                    fields.len()
                ),
                line,
            ));
        }

        let (chrom, pos, id, reference, alt, qual, filter, info) = (
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], fields[6], fields[7],
        );
        let format = header
            .has_format_column()
            .then(|| fields[FIXED_COLUMNS.len()].to_string());
        let samples: LinkedHashMap<String, String> = header
            .sample_ids
            .iter()
            .zip(fields.iter().skip(FIXED_COLUMNS.len() + 1))
            .map(|(sample_id, raw)| (sample_id.clone(), raw.to_string()))
            .collect();

        let alternatives: Vec<&str> = alt.split(',').collect();
        let info_map = decode_info(info);
        let warnings = check_info(&info_map, header, alternatives.len(), config.strict, line)?;

        let annotations = match info_map.get(&header.annotation_key) {
            Some(entries) => {
                let columns = header.annotation_columns();
                if columns.is_empty() {
                    return Err(VcfError::annotation_syntax(
                        format!(
                            "no Format: columns declared for INFO field {}",
                            header.annotation_key
                        ),
                        entries.join(","),
                    ));
                }
                build_annotation_map(entries, reference, &alternatives, &columns)?
            }
            None => AnnotationMap::new(),
        };
        let family = FamilyAnnotations::from_info(&info_map)?;

        let genotypes = samples
            .iter()
            .map(|(sample_id, raw)| {
                (
                    sample_id.clone(),
                    Genotype::from_sample(format.as_deref(), raw),
                )
            })
            .collect();

        Ok(VariantRecord {
            chrom: chrom.to_string(),
            pos: pos.to_string(),
            id: id.to_string(),
            reference: reference.to_string(),
            alt: alt.to_string(),
            qual: qual.to_string(),
            filter: filter.to_string(),
            info: info.to_string(),
            format,
            samples,
            info_map,
            genotypes,
            annotations,
            family,
            variant_id: build_variant_id(chrom, pos, reference, alternatives[0]),
            warnings,
        })
    }
}
