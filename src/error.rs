// Error types shared by the record model and the file processor.
// Both are plain `thiserror` enums/structs so callers can branch on them;
// the UI turns them into console messages.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which record field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    CourseName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::CourseName => "Course name",
        };
        f.write_str(label)
    }
}

/// A name or course value that is not purely alphabetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be alphabetic")]
pub struct ValidationError {
    pub field: Field,
    pub value: String,
}

impl ValidationError {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Failures while loading or persisting the roster file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not open {}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("{} is not a valid enrollment file", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("record {index} in {} is invalid", path.display())]
    Record {
        path: PathBuf,
        index: usize,
        source: ValidationError,
    },

    #[error("could not create {}", path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("could not write records to {}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not flush {}", path.display())]
    Flush { path: PathBuf, source: io::Error },
}
