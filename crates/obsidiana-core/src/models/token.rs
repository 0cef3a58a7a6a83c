use serde::{Deserialize, Serialize};

/// Semantic type tag carried by every leaf token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    BorderRadius,
    Size,
    BorderWidth,
    Number,
    Duration,
    CubicBezier,
    FontFamily,
    FontWeight,
}

impl TokenType {
    pub const ALL: &[TokenType] = &[
        Self::Color,
        Self::BorderRadius,
        Self::Size,
        Self::BorderWidth,
        Self::Number,
        Self::Duration,
        Self::CubicBezier,
        Self::FontFamily,
        Self::FontWeight,
    ];

    /// Tag as written in token source files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BorderRadius => "borderRadius",
            Self::Size => "size",
            Self::BorderWidth => "borderWidth",
            Self::Number => "number",
            Self::Duration => "duration",
            Self::CubicBezier => "cubicBezier",
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token value: either a single scalar or an ordered list of strings
/// (font stacks).
///
/// Source files may hold numbers or booleans for scalars; they are kept in
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Scalar(#[serde(deserialize_with = "scalar::deserialize")] String),
    List(Vec<String>),
}

impl TokenValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Render as a single string, joining list items with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::List(items) => items.join(separator),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<String>> for TokenValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

mod scalar {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
        Bool(bool),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => s,
            Raw::Num(n) => n.to_string(),
            Raw::Bool(b) => b.to_string(),
        })
    }
}

/// A leaf of a token tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Token {
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub kind: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "description")]
    pub comment: Option<String>,
}

impl Token {
    pub fn new(value: impl Into<TokenValue>, kind: TokenType) -> Self {
        Self {
            value: value.into(),
            kind,
            comment: None,
        }
    }
}
