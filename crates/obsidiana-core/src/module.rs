//! The resolved token module: a brand's tokens as a flat identifier map.
//!
//! This is what `index.json` holds and what theme generation consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::TokenValue;
use crate::transform::FlatToken;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenModule {
    entries: BTreeMap<String, TokenValue>,
}

impl TokenModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flat(tokens: &[FlatToken]) -> Self {
        Self {
            entries: tokens
                .iter()
                .map(|t| (t.name.clone(), t.value.clone()))
                .collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&TokenValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string_pretty(self)? + "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_preserves_lists() {
        let module = TokenModule::new()
            .with("ColorPrimaryLightDefault", "oklch(55% 0.15 40.24)")
            .with(
                "FontFamilyBase",
                vec!["Inter".to_string(), "sans-serif".to_string()],
            );
        let json = module.to_json_pretty().unwrap();
        assert!(json.ends_with("\n"));
        assert!(json.contains("\"FontFamilyBase\": [\n"));
        let parsed = TokenModule::from_json_str(&json).unwrap();
        assert_eq!(parsed, module);
        assert_eq!(
            parsed.get("FontFamilyBase").unwrap().as_list().unwrap(),
            ["Inter", "sans-serif"]
        );
    }

    #[test]
    fn test_rejects_nested_objects() {
        assert!(TokenModule::from_json_str(r##"{"Color": {"value": "#000"}}"##).is_err());
    }
}
