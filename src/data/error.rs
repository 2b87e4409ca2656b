use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading a results file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("line {line}: {reason} (`{content}`)")]
    MalformedRow {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("reference row not found: no line starts with `inf`")]
    MissingReference,
}

impl DataError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        DataError::MalformedRow {
            line,
            content: content.trim().to_string(),
            reason: reason.into(),
        }
    }
}
