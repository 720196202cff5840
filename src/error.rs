use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::FileKind;

/// A malformed line in a profile or model text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct FormatError {
    /// 1-based line number in the source text.
    pub line: usize,
    pub message: String,
}

impl FormatError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Everything that can go wrong between a file selection and a plot.
#[derive(Debug, Error)]
pub enum SirError {
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no .{} file for {name}", .kind.extension())]
    MissingSiblingFile { name: String, kind: FileKind },

    #[error("no files selected")]
    NoFilesSelected,

    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("no parameters selected to plot")]
    NothingToPlot,
}

impl SirError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SirError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SirError>;

// ---------------------------------------------------------------------------
// LoadWarning – a recoverable per-entity read failure
// ---------------------------------------------------------------------------

/// A sibling file that was expected for an entity but could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub name: String,
    pub kind: FileKind,
    pub reason: String,
}

impl LoadWarning {
    pub fn new(name: &str, kind: FileKind, err: &SirError) -> Self {
        let reason = match err {
            SirError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                SirError::MissingSiblingFile {
                    name: name.to_string(),
                    kind,
                }
                .to_string()
            }
            other => other.to_string(),
        };
        Self {
            name: name.to_string(),
            kind,
            reason,
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.kind.extension(), self.reason)
    }
}
