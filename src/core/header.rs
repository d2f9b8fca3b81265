use crate::{
    constants::{DEFAULT_ANNOTATION_KEY, FIXED_COLUMNS, FORMAT_COLUMN},
    core::cardinality::Cardinality,
    error::VcfError,
    utils::util::Result,
};
use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static FILEFORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##fileformat=(?P<version>.+)$").unwrap());

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^##(?:INFO|FORMAT)=<ID=(?P<id>[^,]+),\s*Number=(?P<number>\d+|\.|[AGR]),\s*Type=(?P<type>Integer|Float|Flag|Character|String),\s*Description="(?P<desc>(?:[^"\\]|\\.)*)".*>$"#,
    )
    .unwrap()
});

static DESCRIBED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^##(?:FILTER|ALT)=<ID=(?P<id>[^,]+),\s*Description="(?P<desc>(?:[^"\\]|\\.)*)".*>$"#)
        .unwrap()
});

static CONTIG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^##contig=<ID=(?P<id>[^>,]+),(?:.*,)?\s*length=(?P<length>\d+)(?:,.*)?>$").unwrap()
});

static META_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##(?P<key>[^=]+)=(?P<value>.*)$").unwrap());

const FORMAT_SPEC_MARKER: &str = "Format:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

impl std::str::FromStr for ValueType {
    type Err = VcfError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Integer" => Ok(ValueType::Integer),
            "Float" => Ok(ValueType::Float),
            "Flag" => Ok(ValueType::Flag),
            "Character" => Ok(ValueType::Character),
            "String" => Ok(ValueType::String),
            _ => Err(crate::vcf_error!("Invalid Type: {:?}", s)),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Float => write!(f, "Float"),
            ValueType::Flag => write!(f, "Flag"),
            ValueType::Character => write!(f, "Character"),
            ValueType::String => write!(f, "String"),
        }
    }
}

/// An `##INFO` or `##FORMAT` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub id: String,
    pub number: Cardinality,
    pub value_type: ValueType,
    pub description: String,
    /// Sub-field names listed after `Format:` in the description, e.g. the
    /// VEP `CSQ` columns.
    pub format_spec: Option<Vec<String>>,
    pub raw: String,
}

/// An `##FILTER` or `##ALT` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribedDeclaration {
    pub id: String,
    pub description: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContigDeclaration {
    pub id: String,
    pub length: u64,
    pub raw: String,
}

/// Any other `##key=value` metadata line.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherLine {
    pub key: String,
    pub value: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderDeclaration {
    FileFormat(String),
    Info(FieldDeclaration),
    Format(FieldDeclaration),
    Filter(DescribedDeclaration),
    Alt(DescribedDeclaration),
    Contig(ContigDeclaration),
    Other(OtherLine),
}

/// Extracts the `|` separated sub-field names following the last `Format:`
/// of a description.
pub fn format_spec_from_description(description: &str) -> Option<Vec<String>> {
    let (_, spec) = description.rsplit_once(FORMAT_SPEC_MARKER)?;
    Some(spec.trim().split('|').map(str::to_string).collect())
}

/// Parses a single `##` metadata line.
pub fn parse_declaration(line: &str) -> Result<HeaderDeclaration> {
    let line = line.trim_end_matches(['\r', '\n']);
    let grammar_error = |kind: &str| VcfError::header_syntax(format!("invalid {kind} line"), line);

    if line.starts_with("##fileformat") {
        let caps = FILEFORMAT_RE
            .captures(line)
            .ok_or_else(|| grammar_error("fileformat"))?;
        return Ok(HeaderDeclaration::FileFormat(caps["version"].to_string()));
    }

    if line.starts_with("##INFO") || line.starts_with("##FORMAT") {
        let is_info = line.starts_with("##INFO");
        let kind = if is_info { "INFO" } else { "FORMAT" };
        let caps = FIELD_RE
            .captures(line)
            .ok_or_else(|| grammar_error(kind))?;
        let description = caps["desc"].to_string();
        let declaration = FieldDeclaration {
            id: caps["id"].to_string(),
            number: caps["number"].parse().map_err(|_| grammar_error(kind))?,
            value_type: caps["type"].parse().map_err(|_| grammar_error(kind))?,
            format_spec: format_spec_from_description(&description),
            description,
            raw: line.to_string(),
        };
        return Ok(if is_info {
            HeaderDeclaration::Info(declaration)
        } else {
            HeaderDeclaration::Format(declaration)
        });
    }

    if line.starts_with("##FILTER") || line.starts_with("##ALT") {
        let is_filter = line.starts_with("##FILTER");
        let caps = DESCRIBED_RE
            .captures(line)
            .ok_or_else(|| grammar_error(if is_filter { "FILTER" } else { "ALT" }))?;
        let declaration = DescribedDeclaration {
            id: caps["id"].to_string(),
            description: caps["desc"].to_string(),
            raw: line.to_string(),
        };
        return Ok(if is_filter {
            HeaderDeclaration::Filter(declaration)
        } else {
            HeaderDeclaration::Alt(declaration)
        });
    }

    if line.starts_with("##contig") {
        let caps = CONTIG_RE
            .captures(line)
            .ok_or_else(|| grammar_error("contig"))?;
        let length = caps["length"]
            .parse::<u64>()
            .map_err(|e| VcfError::header_syntax(format!("invalid contig length: {e}"), line))?;
        return Ok(HeaderDeclaration::Contig(ContigDeclaration {
            id: caps["id"].to_string(),
            length,
            raw: line.to_string(),
        }));
    }

    let caps = META_RE
        .captures(line)
        .ok_or_else(|| grammar_error("metadata"))?;
    Ok(HeaderDeclaration::Other(OtherLine {
        key: caps["key"].to_string(),
        value: caps["value"].to_string(),
        raw: line.to_string(),
    }))
}

fn upsert<V>(map: &mut LinkedHashMap<String, V>, id: String, value: V) {
    match map.get_mut(&id) {
        Some(existing) => {
            log::debug!("Header declaration {id} redefined, keeping the last definition");
            *existing = value;
        }
        None => {
            map.insert(id, value);
        }
    }
}

/// The parsed metadata block of a VCF file.
///
/// Every declaration kind keeps its insertion order so that the header can be
/// written back exactly as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderModel {
    pub fileformat: Option<String>,
    pub info: LinkedHashMap<String, FieldDeclaration>,
    pub format: LinkedHashMap<String, FieldDeclaration>,
    pub filter: LinkedHashMap<String, DescribedDeclaration>,
    pub alt: LinkedHashMap<String, DescribedDeclaration>,
    pub contig: LinkedHashMap<String, ContigDeclaration>,
    pub other: Vec<OtherLine>,
    /// Column names of the `#CHROM` line, without the leading `#`.
    pub columns: Vec<String>,
    pub sample_ids: Vec<String>,
    pub annotation_key: String,
}

impl Default for HeaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderModel {
    pub fn new() -> Self {
        Self::with_annotation_key(DEFAULT_ANNOTATION_KEY)
    }

    pub fn with_annotation_key(annotation_key: &str) -> Self {
        HeaderModel {
            fileformat: None,
            info: LinkedHashMap::new(),
            format: LinkedHashMap::new(),
            filter: LinkedHashMap::new(),
            alt: LinkedHashMap::new(),
            contig: LinkedHashMap::new(),
            other: Vec::new(),
            columns: Vec::new(),
            sample_ids: Vec::new(),
            annotation_key: annotation_key.to_string(),
        }
    }

    /// Builds a header from the complete `#` prefixed block of a VCF file.
    ///
    /// The block must start with the `##fileformat` line and end with exactly
    /// one `#CHROM` column header line.
    pub fn from_lines<I, S>(lines: I, annotation_key: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut header = Self::with_annotation_key(annotation_key);
        let mut seen_any = false;
        for line in lines {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            if !seen_any {
                seen_any = true;
                if !line.starts_with("##fileformat") {
                    return Err(VcfError::header_syntax(
                        "VCF must start with a fileformat line",
                        line,
                    ));
                }
            }
            if !header.columns.is_empty() {
                return Err(VcfError::header_syntax(
                    "line found after the column header line",
                    line,
                ));
            }
            if line.starts_with("##") {
                header.parse_meta_data(line)?;
            } else if line.starts_with('#') {
                header.parse_header_line(line)?;
            } else {
                return Err(VcfError::header_syntax(
                    "expected a metadata or column header line",
                    line,
                ));
            }
        }
        if header.columns.is_empty() {
            return Err(VcfError::header_syntax(
                "column header line (#CHROM...) is missing",
                "",
            ));
        }
        Ok(header)
    }

    /// Parses one `##` metadata line and stores the declaration.
    pub fn parse_meta_data(&mut self, line: &str) -> Result<()> {
        match parse_declaration(line)? {
            HeaderDeclaration::FileFormat(version) => self.fileformat = Some(version),
            HeaderDeclaration::Info(decl) => upsert(&mut self.info, decl.id.clone(), decl),
            HeaderDeclaration::Format(decl) => upsert(&mut self.format, decl.id.clone(), decl),
            HeaderDeclaration::Filter(decl) => upsert(&mut self.filter, decl.id.clone(), decl),
            HeaderDeclaration::Alt(decl) => upsert(&mut self.alt, decl.id.clone(), decl),
            HeaderDeclaration::Contig(decl) => upsert(&mut self.contig, decl.id.clone(), decl),
            HeaderDeclaration::Other(other) => self.other.push(other),
        }
        Ok(())
    }

    /// Parses the single `#CHROM` column header line.
    pub fn parse_header_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        let body = line
            .strip_prefix('#')
            .ok_or_else(|| VcfError::header_syntax("column header must start with '#'", line))?;
        let mut columns: Vec<String> = body.split('\t').map(str::to_string).collect();
        if columns.len() < FIXED_COLUMNS.len() + 1 {
            columns = body.split_whitespace().map(str::to_string).collect();
        }

        if columns.len() < FIXED_COLUMNS.len()
            || columns
                .iter()
                .zip(FIXED_COLUMNS.iter())
                .any(|(found, expected)| found != expected)
        {
            return Err(VcfError::header_syntax(
                format!("column header must start with {}", FIXED_COLUMNS.join(",")),
                line,
            ));
        }
        if columns.len() > FIXED_COLUMNS.len() && columns[FIXED_COLUMNS.len()] != FORMAT_COLUMN {
            return Err(VcfError::header_syntax(
                "sample columns require a FORMAT column",
                line,
            ));
        }

        self.sample_ids = columns
            .iter()
            .skip(FIXED_COLUMNS.len() + 1)
            .cloned()
            .collect();
        self.columns = columns;
        log::debug!("Header declares {} sample(s)", self.sample_ids.len());
        Ok(())
    }

    pub fn has_format_column(&self) -> bool {
        self.columns.len() > FIXED_COLUMNS.len()
    }

    pub fn info_declaration(&self, id: &str) -> Option<&FieldDeclaration> {
        self.info.get(id)
    }

    pub fn format_declaration(&self, id: &str) -> Option<&FieldDeclaration> {
        self.format.get(id)
    }

    /// Column names of the annotation INFO field, empty if it is not declared
    /// or its description has no `Format:` clause.
    pub fn annotation_columns(&self) -> Vec<String> {
        self.info
            .get(&self.annotation_key)
            .and_then(|decl| decl.format_spec.clone())
            .unwrap_or_default()
    }

    /// Header lines in canonical order: fileformat, FILTER, FORMAT, INFO,
    /// contig, ALT, other metadata, then the column header.
    pub fn print_header(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(fileformat) = &self.fileformat {
            lines.push(format!("##fileformat={fileformat}"));
        }
        lines.extend(self.filter.values().map(|d| d.raw.clone()));
        lines.extend(self.format.values().map(|d| d.raw.clone()));
        lines.extend(self.info.values().map(|d| d.raw.clone()));
        lines.extend(self.contig.values().map(|d| d.raw.clone()));
        lines.extend(self.alt.values().map(|d| d.raw.clone()));
        lines.extend(self.other.iter().map(|o| o.raw.clone()));
        if !self.columns.is_empty() {
            lines.push(format!("#{}", self.columns.join("\t")));
        }
        lines
    }

    pub fn add_fileformat(&mut self, fileformat: &str) -> Result<()> {
        self.parse_meta_data(&format!("##fileformat={fileformat}"))
    }

    pub fn add_info(
        &mut self,
        id: &str,
        number: &str,
        value_type: &str,
        description: &str,
    ) -> Result<()> {
        self.parse_meta_data(&format!(
            "##INFO=<ID={id},Number={number},Type={value_type},Description=\"{description}\">"
        ))
    }

    pub fn add_format(
        &mut self,
        id: &str,
        number: &str,
        value_type: &str,
        description: &str,
    ) -> Result<()> {
        self.parse_meta_data(&format!(
            "##FORMAT=<ID={id},Number={number},Type={value_type},Description=\"{description}\">"
        ))
    }

    pub fn add_filter(&mut self, id: &str, description: &str) -> Result<()> {
        self.parse_meta_data(&format!(
            "##FILTER=<ID={id},Description=\"{description}\">"
        ))
    }

    pub fn add_alt(&mut self, id: &str, description: &str) -> Result<()> {
        self.parse_meta_data(&format!("##ALT=<ID={id},Description=\"{description}\">"))
    }

    pub fn add_contig(&mut self, id: &str, length: u64) -> Result<()> {
        self.parse_meta_data(&format!("##contig=<ID={id},length={length}>"))
    }

    pub fn add_meta_data(&mut self, key: &str, value: &str) -> Result<()> {
        self.parse_meta_data(&format!("##{key}={value}"))
    }

    /// Records which program, version and command line produced the output.
    pub fn add_version_tracking(
        &mut self,
        id: &str,
        version: &str,
        date: &str,
        command_line: &str,
    ) -> Result<()> {
        let value = format!(
            "<ID={},Version={},Date=\"{}\",CommandLineOptions=\"{}\">",
            id,
            version,
            date,
            command_line.replace('"', "'")
        );
        self.add_meta_data("Software", &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_header_lines() -> Vec<&'static str> {
        vec![
            "##fileformat=VCFv4.2",
            "##FILTER=<ID=LowQual,Description=\"Low quality\">",
            "##INFO=<ID=MQ,Number=1,Type=Float,Description=\"RMS Mapping Quality\">",
            "##INFO=<ID=CNT,Number=A,Type=Integer,Description=\"Number of times this allele was found in external db\">",
            "##contig=<ID=1,length=249250621,assembly=b37>",
            "##INFO=<ID=DP_HIST,Number=R,Type=String,Description=\"Histogram for DP; Mids: 2.5|7.5|12.5\">",
            "##FORMAT=<ID=AD,Number=.,Type=Integer,Description=\"Allelic depths for the ref and alt alleles in the order listed\">",
            "##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read Depth\">",
            "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">",
            "##reference=file:///human_g1k_v37.fasta",
            "##ALT=<ID=DEL,Description=\"Deletion\">",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tfather\tmother\tproband",
        ]
    }

    #[test]
    fn test_parse_header_block() {
        let header = HeaderModel::from_lines(example_header_lines(), "CSQ").unwrap();
        assert_eq!(header.fileformat.as_deref(), Some("VCFv4.2"));
        assert_eq!(header.sample_ids, vec!["father", "mother", "proband"]);
        assert!(header.annotation_columns().is_empty());

        let mq = header.info_declaration("MQ").unwrap();
        assert_eq!(mq.description, "RMS Mapping Quality");
        assert_eq!(mq.number, Cardinality::Fixed(1));
        assert_eq!(mq.value_type, ValueType::Float);

        let cnt = header.info_declaration("CNT").unwrap();
        assert_eq!(cnt.number, Cardinality::PerAlt);
        assert_eq!(cnt.value_type, ValueType::Integer);
        assert_eq!(
            header.info_declaration("DP_HIST").unwrap().number,
            Cardinality::PerAllele
        );

        assert!(header.filter.contains_key("LowQual"));
        assert_eq!(header.contig["1"].length, 249250621);
        assert!(header.alt.contains_key("DEL"));
        assert_eq!(header.format_declaration("AD").unwrap().number, Cardinality::Unbounded);
        assert_eq!(header.other[0].key, "reference");
        assert_eq!(
            header.columns,
            vec![
                "CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO", "FORMAT", "father",
                "mother", "proband"
            ]
        );
    }

    #[test]
    fn test_print_header_canonical_order() {
        let header = HeaderModel::from_lines(example_header_lines(), "CSQ").unwrap();
        let printed = header.print_header();
        let lines = example_header_lines();
        assert_eq!(
            printed,
            vec![
                lines[0], lines[1], lines[6], lines[7], lines[8], lines[2], lines[3], lines[5],
                lines[4], lines[10], lines[9], lines[11],
            ]
        );
        let reparsed = HeaderModel::from_lines(&printed, "CSQ").unwrap();
        assert_eq!(reparsed.print_header(), printed);
    }

    #[test]
    fn test_description_with_escaped_quotes() {
        let mut header = HeaderModel::new();
        header
            .parse_meta_data(
                r#"##INFO=<ID=CSQ,Number=.,Type=String,Description="Consequence from \"VEP\". Format: Allele|SYMBOL">"#,
            )
            .unwrap();
        header
            .parse_meta_data(r#"##FILTER=<ID=q10,Description="say \"hi\" there">"#)
            .unwrap();

        let csq = header.info_declaration("CSQ").unwrap();
        assert_eq!(csq.description, r#"Consequence from \"VEP\". Format: Allele|SYMBOL"#);
        assert_eq!(header.annotation_columns(), vec!["Allele", "SYMBOL"]);
        assert_eq!(header.filter["q10"].description, r#"say \"hi\" there"#);
    }

    #[test]
    fn test_malformed_lines() {
        let mut header = HeaderModel::new();
        for line in [
            "##fileformat",
            "##INFO=<ID=MQ,Number=1,Description=\"RMS Mapping Quality\">",
            "##INFO=<ID=MQ,Number=X,Type=Float,Description=\"RMS Mapping Quality\">",
            "##FORMAT=<ID=GT,Number=1,Type=Text,Description=\"Genotype\">",
            "##FILTER=<ID=LowQual>",
            "##contig=<ID=1,assembly=b37>",
            "##no_value_separator",
        ] {
            let err = header.parse_meta_data(line).unwrap_err();
            assert!(
                matches!(&err, VcfError::HeaderSyntax { line: l, .. } if l == line),
                "{line} should fail with a header syntax error, got {err}"
            );
        }
    }

    #[test]
    fn test_contig_length_after_other_attributes() {
        let decl = parse_declaration("##contig=<ID=chrX,assembly=b37,length=155270560,md5=abc>")
            .unwrap();
        match decl {
            HeaderDeclaration::Contig(contig) => {
                assert_eq!(contig.id, "chrX");
                assert_eq!(contig.length, 155270560);
            }
            other => panic!("unexpected declaration {other:?}"),
        }
    }

    #[test]
    fn test_annotation_columns() {
        let mut header = HeaderModel::new();
        header
            .parse_meta_data(
                "##INFO=<ID=CSQ,Number=.,Type=String,Description=\"Consequence type as predicted by VEP. Format: Allele|Gene|Feature|Feature_type|Consequence\">",
            )
            .unwrap();
        assert_eq!(
            header.annotation_columns(),
            vec!["Allele", "Gene", "Feature", "Feature_type", "Consequence"]
        );
    }

    #[test]
    fn test_format_spec_uses_last_marker() {
        assert_eq!(
            format_spec_from_description("Old Format: A|B. New Format:  X|Y "),
            Some(vec!["X".to_string(), "Y".to_string()])
        );
        assert_eq!(format_spec_from_description("Read depth"), None);
    }

    #[test]
    fn test_header_line_whitespace_fallback() {
        let mut header = HeaderModel::new();
        header
            .parse_header_line("#CHROM POS ID REF ALT QUAL FILTER INFO FORMAT s1 s2")
            .unwrap();
        assert_eq!(header.sample_ids, vec!["s1", "s2"]);
        assert!(header.has_format_column());
    }

    #[test]
    fn test_header_line_without_samples() {
        let mut header = HeaderModel::new();
        header
            .parse_header_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO")
            .unwrap();
        assert!(header.sample_ids.is_empty());
        assert!(!header.has_format_column());
        assert!(header.parse_header_line("#CHROM\tPOS\tID").is_err());
    }

    #[test]
    fn test_header_order_is_enforced() {
        let missing_fileformat = vec![
            "##INFO=<ID=MQ,Number=1,Type=Float,Description=\"RMS Mapping Quality\">",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
        ];
        assert!(matches!(
            HeaderModel::from_lines(missing_fileformat, "CSQ"),
            Err(VcfError::HeaderSyntax { .. })
        ));

        let missing_columns = vec!["##fileformat=VCFv4.2"];
        assert!(HeaderModel::from_lines(missing_columns, "CSQ").is_err());

        let trailing_line = vec![
            "##fileformat=VCFv4.2",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
            "##INFO=<ID=MQ,Number=1,Type=Float,Description=\"RMS Mapping Quality\">",
        ];
        assert!(HeaderModel::from_lines(trailing_line, "CSQ").is_err());
    }

    #[test]
    fn test_programmatic_declarations() {
        let mut header = HeaderModel::new();
        header.add_fileformat("VCFv4.1").unwrap();
        header
            .add_info("MQ", "1", "Float", "RMS Mapping Quality")
            .unwrap();
        header.add_format("GT", "1", "String", "Genotype").unwrap();
        header.add_filter("LowQual", "Low quality").unwrap();
        header.add_contig("1", 1000).unwrap();
        header
            .add_version_tracking("vcfsplit", "0.1.0", "2024-01-01", "vcfsplit parse \"x\"")
            .unwrap();

        assert_eq!(header.fileformat.as_deref(), Some("VCFv4.1"));
        assert_eq!(
            header.info["MQ"].raw,
            "##INFO=<ID=MQ,Number=1,Type=Float,Description=\"RMS Mapping Quality\">"
        );
        assert_eq!(header.other.len(), 1);
        assert_eq!(header.other[0].key, "Software");
        assert_eq!(
            header.other[0].raw,
            "##Software=<ID=vcfsplit,Version=0.1.0,Date=\"2024-01-01\",CommandLineOptions=\"vcfsplit parse 'x'\">"
        );
        assert!(header.add_info("BAD", "Q", "Float", "bad").is_err());
    }

    #[test]
    fn test_redefinition_keeps_position() {
        let mut header = HeaderModel::new();
        header.add_info("A", "1", "Integer", "first").unwrap();
        header.add_info("B", "1", "Integer", "second").unwrap();
        header.add_info("A", "A", "Integer", "redefined").unwrap();
        let ids: Vec<&String> = header.info.keys().collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(header.info["A"].number, Cardinality::PerAlt);
    }
}
