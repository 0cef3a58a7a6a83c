use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Brand, TokenCategory};
use crate::transform::Platform;
use crate::validate::ValidationIssue;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no {category} tokens for brand {brand}")]
    MissingBrandTokens {
        brand: Brand,
        category: TokenCategory,
    },

    #[error("identifier collision on {platform}: `{identifier}` from both {first} and {second}")]
    IdentifierCollision {
        platform: Platform,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("invalid token tree at `{path}`: {message}")]
    InvalidTree { path: String, message: String },

    #[error("{} validation issue(s) in {brand} tokens: {}", .issues.len(), summarize(.issues))]
    Validation {
        brand: Brand,
        issues: Vec<ValidationIssue>,
    },

    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
