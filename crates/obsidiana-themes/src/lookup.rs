//! Token lookups shared by the projectors.

use obsidiana_core::models::TokenPath;
use obsidiana_core::transform::{identifier, NameConvention};
use obsidiana_core::TokenModule;

use crate::error::ThemeError;
use crate::mode::ThemeMode;

/// Module identifier of `color.<role>.<mode>.<variant>`.
pub fn color_name(role: &str, mode: ThemeMode, variant: &str) -> String {
    let path = TokenPath::from(&["color", role, mode.as_str(), variant][..]);
    identifier(&path, NameConvention::Pascal)
}

pub fn scalar<'a>(module: &'a TokenModule, name: &str) -> Result<&'a str, ThemeError> {
    optional_scalar(module, name)?.ok_or_else(|| ThemeError::MissingToken {
        name: name.to_string(),
    })
}

pub fn optional_scalar<'a>(
    module: &'a TokenModule,
    name: &str,
) -> Result<Option<&'a str>, ThemeError> {
    match module.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_scalar()
            .map(Some)
            .ok_or_else(|| ThemeError::UnexpectedValue {
                name: name.to_string(),
                expected: "a single value",
            }),
    }
}

/// First candidate present in the module.
pub fn first_scalar<'a>(
    module: &'a TokenModule,
    candidates: &[String],
) -> Result<&'a str, ThemeError> {
    for name in candidates {
        if let Some(value) = optional_scalar(module, name)? {
            return Ok(value);
        }
    }
    Err(ThemeError::MissingToken {
        name: candidates.join(" | "),
    })
}

/// A list token joined with `separator`; scalars pass through.
pub fn joined(module: &TokenModule, name: &str, separator: &str) -> Result<String, ThemeError> {
    module
        .get(name)
        .map(|value| value.joined(separator))
        .ok_or_else(|| ThemeError::MissingToken {
            name: name.to_string(),
        })
}
