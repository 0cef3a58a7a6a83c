use std::path::PathBuf;

use obsidiana_core::Brand;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to load design tokens for brand {brand}; errors: {}", .causes.join(", "))]
    TokenModuleLoad { brand: Brand, causes: Vec<String> },

    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    #[error("unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    #[error("token module has no `{name}`")]
    MissingToken { name: String },

    #[error("`{name}` should be {expected}")]
    UnexpectedValue { name: String, expected: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single resolver could not produce a module.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Missing(String),
}
