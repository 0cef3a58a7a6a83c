use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of brands the design system ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Obsidiana,
    Ixiptla,
}

impl Brand {
    pub const ALL: &[Brand] = &[Self::Obsidiana, Self::Ixiptla];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obsidiana => "obsidiana",
            Self::Ixiptla => "ixiptla",
        }
    }
}

impl FromStr for Brand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| CoreError::UnknownBrand(s.to_string()))
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source file grouping. Each category lives in `<category>.tokens.json`
/// whose root key is the category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Color,
    Design,
    Font,
}

impl TokenCategory {
    pub const ALL: &[TokenCategory] = &[Self::Color, Self::Design, Self::Font];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Design => "design",
            Self::Font => "font",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.tokens.json", self.as_str())
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
