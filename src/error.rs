use crate::core::cardinality::CardinalityMismatch;
use std::path::PathBuf;
use thiserror::Error;

pub type VcfResult<T> = std::result::Result<T, VcfError>;

#[derive(Debug, Error)]
pub enum VcfError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed VCF header line ({reason}): {line}")]
    HeaderSyntax { reason: String, line: String },
    #[error("Malformed VCF variant line ({reason}): {line}")]
    LineSyntax { reason: String, line: String },
    #[error("{0}")]
    Cardinality(CardinalityMismatch),
    #[error("Malformed annotation entry ({reason}): {entry}")]
    AnnotationSyntax { reason: String, entry: String },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl VcfError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn header_syntax(reason: impl Into<String>, line: impl Into<String>) -> Self {
        Self::HeaderSyntax {
            reason: reason.into(),
            line: line.into(),
        }
    }

    pub fn line_syntax(reason: impl Into<String>, line: impl Into<String>) -> Self {
        Self::LineSyntax {
            reason: reason.into(),
            line: line.into(),
        }
    }

    pub fn annotation_syntax(reason: impl Into<String>, entry: impl Into<String>) -> Self {
        Self::AnnotationSyntax {
            reason: reason.into(),
            entry: entry.into(),
        }
    }

    /// Errors that only invalidate the current variant line. Header and I/O
    /// errors invalidate the whole stream.
    pub fn is_line_local(&self) -> bool {
        matches!(
            self,
            Self::LineSyntax { .. } | Self::Cardinality(_) | Self::AnnotationSyntax { .. }
        )
    }
}

#[macro_export]
macro_rules! vcf_error {
    ($($arg:tt)*) => {
        $crate::error::VcfError::message(format!($($arg)*))
    };
}
