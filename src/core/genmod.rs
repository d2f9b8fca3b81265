//! Family level annotations written into INFO by genmod: inheritance models,
//! compound pairs and rank scores. Every entry is `family_id:payload`.

use crate::{
    constants::{COMPOUNDS_KEY, GENETIC_MODELS_KEY, INDIVIDUAL_RANK_SCORE_KEY, RANK_SCORE_KEY},
    core::info::InfoMap,
    error::VcfError,
    utils::util::Result,
};
use linked_hash_map::LinkedHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundVariant {
    pub variant_id: String,
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyAnnotations {
    pub genetic_models: LinkedHashMap<String, Vec<String>>,
    pub compounds: LinkedHashMap<String, Vec<CompoundVariant>>,
    pub rank_scores: LinkedHashMap<String, String>,
    pub individual_scores: LinkedHashMap<String, String>,
}

impl FamilyAnnotations {
    pub fn from_info(info: &InfoMap) -> Result<Self> {
        let mut annotations = FamilyAnnotations::default();
        if let Some(entries) = info.get(GENETIC_MODELS_KEY) {
            annotations.genetic_models = build_models(entries)?;
        }
        if let Some(entries) = info.get(COMPOUNDS_KEY) {
            annotations.compounds = build_compounds(entries)?;
        }
        if let Some(entries) = info.get(RANK_SCORE_KEY) {
            annotations.rank_scores = build_rank_scores(entries)?;
        }
        if let Some(entries) = info.get(INDIVIDUAL_RANK_SCORE_KEY) {
            annotations.individual_scores = build_rank_scores(entries)?;
        }
        Ok(annotations)
    }

    pub fn is_empty(&self) -> bool {
        self.genetic_models.is_empty()
            && self.compounds.is_empty()
            && self.rank_scores.is_empty()
            && self.individual_scores.is_empty()
    }
}

fn split_family_entry<'a>(entry: &'a str, key: &str) -> Result<(&'a str, &'a str)> {
    entry.split_once(':').ok_or_else(|| {
        VcfError::line_syntax(
            format!("{key} entry must be on the form family_id:value"),
            entry,
        )
    })
}

/// `1:AD|AD_dn` -> `{1: [AD, AD_dn]}`
pub fn build_models(entries: &[String]) -> Result<LinkedHashMap<String, Vec<String>>> {
    let mut models = LinkedHashMap::new();
    for entry in entries {
        let (family_id, family_models) = split_family_entry(entry, GENETIC_MODELS_KEY)?;
        models.insert(
            family_id.to_string(),
            family_models.split('|').map(str::to_string).collect(),
        );
    }
    Ok(models)
}

/// `1:1_23_A_C>24|1_24_T_A` -> `{1: [(1_23_A_C, 24), (1_24_T_A, None)]}`
pub fn build_compounds(
    entries: &[String],
) -> Result<LinkedHashMap<String, Vec<CompoundVariant>>> {
    let mut compounds = LinkedHashMap::new();
    for entry in entries {
        let (family_id, family_compounds) = split_family_entry(entry, COMPOUNDS_KEY)?;
        let variants = family_compounds
            .split('|')
            .map(|compound| match compound.split_once('>') {
                Some((variant_id, score)) => CompoundVariant {
                    variant_id: variant_id.to_string(),
                    score: Some(score.to_string()),
                },
                None => CompoundVariant {
                    variant_id: compound.to_string(),
                    score: None,
                },
            })
            .collect();
        compounds.insert(family_id.to_string(), variants);
    }
    Ok(compounds)
}

/// `1:12` -> `{1: 12}`
pub fn build_rank_scores(entries: &[String]) -> Result<LinkedHashMap<String, String>> {
    let mut scores = LinkedHashMap::new();
    for entry in entries {
        let (family_id, score) = split_family_entry(entry, RANK_SCORE_KEY)?;
        scores.insert(family_id.to_string(), score.to_string());
    }
    Ok(scores)
}
