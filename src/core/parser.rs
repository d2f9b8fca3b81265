use crate::{
    core::{
        cardinality::CardinalityMismatch,
        header::HeaderModel,
        variant::{Decompose, NewVariant, VariantRecord},
    },
    utils::util::Result,
    ParseConfig,
};

/// The records produced by one data line.
#[derive(Debug)]
pub enum LineRecords<'a> {
    Single(Option<VariantRecord>),
    Split(Decompose<'a>),
}

impl LineRecords<'_> {
    /// Cardinality violations tolerated while reading the source line.
    pub fn warnings(&self) -> &[CardinalityMismatch] {
        match self {
            LineRecords::Single(Some(record)) => &record.warnings,
            LineRecords::Single(None) => &[],
            LineRecords::Split(records) => &records.source().warnings,
        }
    }
}

impl Iterator for LineRecords<'_> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LineRecords::Single(record) => record.take().map(Ok),
            LineRecords::Split(records) => records.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            LineRecords::Single(record) => {
                let remaining = usize::from(record.is_some());
                (remaining, Some(remaining))
            }
            LineRecords::Split(records) => records.size_hint(),
        }
    }
}

/// Turns data lines into records against a fixed header.
#[derive(Debug, Clone)]
pub struct VcfParser {
    pub header: HeaderModel,
    pub config: ParseConfig,
    variants: Vec<VariantRecord>,
}

impl VcfParser {
    pub fn new(header: HeaderModel, config: ParseConfig) -> Self {
        VcfParser {
            header,
            config,
            variants: Vec::new(),
        }
    }

    /// Reads a complete header block and uses the configured annotation key.
    pub fn from_header_lines<I, S>(lines: I, config: ParseConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let header = HeaderModel::from_lines(lines, &config.annotation_key)?;
        Ok(Self::new(header, config))
    }

    /// Parses one data line. Multiallelic records are decomposed lazily
    /// when splitting is enabled.
    pub fn parse_line(&self, line: &str) -> Result<LineRecords<'_>> {
        let record = VariantRecord::from_line(line, &self.header, &self.config)?;
        if self.config.split_variants && record.is_multiallelic() {
            Ok(LineRecords::Split(
                record.decompose(&self.header, &self.config.unobserved_symbol),
            ))
        } else {
            Ok(LineRecords::Single(Some(record)))
        }
    }

    /// Parses one data line into all of its records.
    pub fn parse_records(&self, line: &str) -> Result<Vec<VariantRecord>> {
        self.parse_line(line)?.collect()
    }

    /// Builds a variant from separate fields and stores its record(s).
    pub fn add_variant(&mut self, variant: NewVariant) -> Result<()> {
        let records = self.parse_records(&variant.to_line())?;
        self.variants.extend(records);
        Ok(())
    }

    pub fn variants(&self) -> &[VariantRecord] {
        &self.variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VcfError;

    fn header_lines() -> Vec<&'static str> {
        vec![
            "##fileformat=VCFv4.1",
            "##INFO=<ID=MQ,Number=1,Type=Float,Description=\"RMS Mapping Quality\">",
            "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">",
            "##FORMAT=<ID=GQ,Number=1,Type=Integer,Description=\"Genotype Quality\">",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tfather\tmother\tproband",
        ]
    }

    fn new_variant(alt: &str) -> NewVariant {
        NewVariant {
            chrom: "1".to_string(),
            pos: "11900".to_string(),
            id: ".".to_string(),
            reference: "A".to_string(),
            alt: alt.to_string(),
            qual: "100".to_string(),
            filter: "PASS".to_string(),
            info: "MQ=1".to_string(),
            format: Some("GT:GQ".to_string()),
            samples: ["0/1:60", "0/1:60", "1/1:60"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[test]
    fn test_parse_line_without_split() {
        let parser = VcfParser::from_header_lines(header_lines(), ParseConfig::default()).unwrap();
        let records = parser
            .parse_records("1\t11900\t.\tA\tT,C\t100\tPASS\tMQ=1\tGT:GQ\t0/1:60\t0/2:60\t1/2:60")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].alt, "T,C");
    }

    #[test]
    fn test_parse_line_with_split() {
        let config = ParseConfig::default().with(|config| config.split_variants = true);
        let parser = VcfParser::from_header_lines(header_lines(), config).unwrap();
        let records = parser
            .parse_line("1\t11900\t.\tA\tT,C\t100\tPASS\tMQ=1\tGT:GQ\t0/1:60\t0/2:60\t1/2:60")
            .unwrap();
        assert_eq!(records.size_hint(), (2, Some(2)));
        let alts: Vec<String> = records.map(|record| record.unwrap().alt).collect();
        assert_eq!(alts, vec!["T", "C"]);
    }

    #[test]
    fn test_parse_line_biallelic_is_single() {
        let config = ParseConfig::default().with(|config| config.split_variants = true);
        let parser = VcfParser::from_header_lines(header_lines(), config).unwrap();
        let records = parser
            .parse_line("1\t11900\t.\tA\tT\t100\tPASS\tMQ=1\tGT:GQ\t0/1:60\t0/1:60\t1/1:60")
            .unwrap();
        assert!(matches!(records, LineRecords::Single(Some(_))));
        assert!(records.warnings().is_empty());
        assert_eq!(records.count(), 1);
    }

    #[test]
    fn test_build_vcf() {
        let mut header = HeaderModel::new();
        header.add_fileformat("VCFv4.1").unwrap();
        header
            .add_info("MQ", "1", "Float", "RMS Mapping Quality")
            .unwrap();
        let mut parser = VcfParser::new(header, ParseConfig::default().with(|c| c.split_variants = true));

        // No column header yet
        assert!(matches!(
            parser.add_variant(new_variant("T")),
            Err(VcfError::LineSyntax { .. })
        ));

        parser
            .header
            .parse_header_line(
                "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tfather\tmother\tproband",
            )
            .unwrap();
        parser.add_variant(new_variant("T")).unwrap();
        parser.add_variant(new_variant("T,C")).unwrap();

        assert!(parser.header.info.contains_key("MQ"));
        let variants = parser.variants();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].pos, "11900");
        assert_eq!(variants[0].alt, "T");
        assert_eq!(variants[2].alt, "C");
        assert_eq!(variants[2].samples["proband"], "0/0:60");
    }
}
