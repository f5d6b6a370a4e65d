use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AssetError {
    #[error("invalid constant name: {0}")]
    InvalidConstantName(String),

    #[error("{catalog} request failed: {message}")]
    CatalogHttp {
        catalog: &'static str,
        message: String,
    },

    #[error("{catalog} returned status {status}: {message}")]
    CatalogStatus {
        catalog: &'static str,
        status: u16,
        message: String,
    },

    #[error("{catalog} response is missing the `{field}` field")]
    #[diagnostic(help("the upstream API format may have changed"))]
    CatalogShape {
        catalog: &'static str,
        field: &'static str,
    },

    #[error("failed to read input file at {0}")]
    InputRead(PathBuf),

    #[error("failed to parse input file {path}: {message}")]
    InputParse { path: PathBuf, message: String },

    #[error("malformed record in {source_name}: {message}")]
    MalformedRecord {
        source_name: &'static str,
        message: String,
    },

    #[error("genome {0} is missing from a source it qualified against")]
    UnknownGenome(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("unsupported config schema_version {0}")]
    #[diagnostic(help("this build understands schema_version 1"))]
    UnsupportedSchema(u32),

    #[error("failed to serialize output: {0}")]
    Serialize(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl AssetError {
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AssetError::CatalogHttp { .. } | AssetError::CatalogStatus { .. }
        )
    }
}
