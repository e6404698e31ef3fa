//! Command line errors.

use std::io;
use std::path::PathBuf;

use etch_relief::EtchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid values: {0}")]
    Values(#[source] serde_json::Error),

    #[error("Failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("Unterminated placeholder starting at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("No value for placeholder `${{{name}}}`")]
    MissingValue { name: String },

    #[error("Template has {expected} placeholders but {received} values were given")]
    ValueCount { expected: usize, received: usize },

    #[error(transparent)]
    Etch(#[from] EtchError),
}

pub type CliResult<T> = Result<T, CliError>;
