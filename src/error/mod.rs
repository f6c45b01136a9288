mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::format_error_chain;

use crate::models::target::TargetVariant;
use crate::repo::compression::Compression;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverkitError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("No repository found in mirror list at {url}")]
    MirrorNotFound { url: String },

    #[error("Failed to decompress {codec} package index from {url}: {source}")]
    Decompression {
        url: String,
        codec: Compression,
        #[source]
        source: std::io::Error,
    },

    #[error("Package index error ({context}): {source}")]
    Database {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error(
        "Target {target} needs to find both kernel and kernel-devel packages (expected {expected}, found {found})"
    )]
    PackageCountMismatch {
        target: TargetVariant,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    #[error("Invalid kernel release: {0}")]
    InvalidKernelRelease(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to render build script: {0}")]
    Template(#[from] askama::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DriverkitError>;
