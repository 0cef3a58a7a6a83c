//! Platform transform engine.
//!
//! Flattens a resolved token tree into platform identifiers and renders the
//! artifact each platform ships:
//!
//! | platform | identifier                       | artifact             |
//! |----------|----------------------------------|----------------------|
//! | css      | `--color-primary-light-default`  | `css/_variables.css` |
//! | js       | `ColorPrimaryLightDefault`       | `index.js`           |
//! | ts       | `ColorPrimaryLightDefault`       | `index.d.ts`         |
//! | json     | `ColorPrimaryLightDefault`       | `index.json`         |

mod format;
mod naming;

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{TokenPath, TokenTree, TokenType, TokenValue};
use crate::module::TokenModule;

pub use naming::{canonical_segments, identifier, NameConvention};

/// Output targets of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Css,
    Js,
    Ts,
    Json,
}

impl Platform {
    pub const ALL: &[Platform] = &[Self::Css, Self::Js, Self::Ts, Self::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Json => "json",
        }
    }

    pub fn naming(self) -> NameConvention {
        match self {
            Self::Css => NameConvention::Kebab,
            Self::Js | Self::Ts | Self::Json => NameConvention::Pascal,
        }
    }

    /// Artifact path relative to the brand's output directory.
    pub fn destination(self) -> &'static str {
        match self {
            Self::Css => "css/_variables.css",
            Self::Js => "index.js",
            Self::Ts => "index.d.ts",
            Self::Json => "index.json",
        }
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Config(format!("unknown platform: {s}")))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf token under its platform identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatToken {
    pub name: String,
    pub path: TokenPath,
    pub value: TokenValue,
    pub kind: TokenType,
    pub comment: Option<String>,
}

/// Flatten a tree for one platform.
///
/// Every identifier is recorded as it is produced; a second path mapping to
/// an identifier already taken fails the whole platform.
pub fn flatten(tree: &TokenTree, platform: Platform) -> Result<Vec<FlatToken>, CoreError> {
    let convention = platform.naming();
    let leaves = tree.leaves();
    let mut seen: HashMap<String, TokenPath> = HashMap::with_capacity(leaves.len());
    let mut flat = Vec::with_capacity(leaves.len());

    for (path, token) in leaves {
        let name = identifier(&path, convention);
        if let Some(first) = seen.get(&name) {
            return Err(CoreError::IdentifierCollision {
                platform,
                identifier: name,
                first: first.to_string(),
                second: path.to_string(),
            });
        }
        seen.insert(name.clone(), path.clone());
        flat.push(FlatToken {
            name,
            path,
            value: token.value.clone(),
            kind: token.kind,
            comment: token.comment.clone(),
        });
    }

    Ok(flat)
}

/// Flatten and render a tree into the platform's artifact text.
pub fn transform(tree: &TokenTree, platform: Platform) -> Result<String, CoreError> {
    let flat = flatten(tree, platform)?;
    tracing::debug!(%platform, tokens = flat.len(), "Flattened tokens");

    Ok(match platform {
        Platform::Css => format::css_variables(&flat),
        Platform::Js => format::es6_module(&flat),
        Platform::Ts => format::es6_declarations(&flat),
        Platform::Json => TokenModule::from_flat(&flat).to_json_pretty()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn color(lightness: &str) -> Token {
        Token::new(format!("oklch({lightness} 0.15 40.24)"), TokenType::Color)
    }

    fn sample_tree() -> TokenTree {
        TokenTree::new()
            .with(
                "color",
                TokenTree::new().with(
                    "primary",
                    TokenTree::new()
                        .with("light", TokenTree::new().with("default", color("55%")))
                        .with("dark", TokenTree::new().with("default", color("65%"))),
                ),
            )
            .with(
                "font",
                TokenTree::new().with(
                    "family",
                    TokenTree::new().with(
                        "base",
                        Token::new(
                            vec!["Inter".to_string(), "sans-serif".to_string()],
                            TokenType::FontFamily,
                        ),
                    ),
                ),
            )
    }

    #[test]
    fn test_flatten_names_per_platform() {
        let tree = sample_tree();
        let css: Vec<String> = flatten(&tree, Platform::Css)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            css,
            [
                "color-primary-dark-default",
                "color-primary-light-default",
                "font-family-base"
            ]
        );

        let js = flatten(&tree, Platform::Js).unwrap();
        assert_eq!(js[1].name, "ColorPrimaryLightDefault");
        assert_eq!(js[2].value.as_list().unwrap(), ["Inter", "sans-serif"]);
    }

    #[test]
    fn test_collision_is_an_error() {
        // `color.light.primary.default` and `color.primary.light.default` both
        // name ColorPrimaryLightDefault.
        let tree = sample_tree().with(
            "color",
            TokenTree::new()
                .with(
                    "light",
                    TokenTree::new().with(
                        "primary",
                        TokenTree::new().with("default", Token::new("#000000", TokenType::Color)),
                    ),
                )
                .with(
                    "primary",
                    TokenTree::new().with(
                        "light",
                        TokenTree::new().with("default", Token::new("#ffffff", TokenType::Color)),
                    ),
                ),
        );

        let err = flatten(&tree, Platform::Js).unwrap_err();
        match err {
            CoreError::IdentifierCollision {
                platform,
                identifier,
                first,
                second,
            } => {
                assert_eq!(platform, Platform::Js);
                assert_eq!(identifier, "ColorPrimaryLightDefault");
                assert_eq!(first, "color.light.primary.default");
                assert_eq!(second, "color.primary.light.default");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(transform(&tree, Platform::Css).is_err());
    }

    #[test]
    fn test_separator_collision() {
        let tree = TokenTree::new().with(
            "design",
            TokenTree::new()
                .with("border-width", Token::new("1px", TokenType::BorderWidth))
                .with(
                    "border",
                    TokenTree::new().with("width", Token::new("2px", TokenType::BorderWidth)),
                ),
        );
        assert!(matches!(
            flatten(&tree, Platform::Css),
            Err(CoreError::IdentifierCollision { .. })
        ));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let tree = sample_tree();
        for &platform in Platform::ALL {
            let first = transform(&tree, platform).unwrap();
            let second = transform(&tree.clone(), platform).unwrap();
            assert_eq!(first, second, "{platform} output differs between runs");
        }
    }

    #[test]
    fn test_description_reaches_artifacts() {
        let token: Token = serde_json::from_str(
            r#"{"value": "1px", "type": "borderWidth", "description": "hairline\nfor dividers"}"#,
        )
        .unwrap();
        let tree = TokenTree::new().with("design", TokenTree::new().with("border", token));

        let css = transform(&tree, Platform::Css).unwrap();
        assert!(css.contains("--design-border: 1px; /* hairline\nfor dividers */"));
        let js = transform(&tree, Platform::Js).unwrap();
        assert!(js.contains("export const DesignBorder = \"1px\"; /* hairline\nfor dividers */"));
        let json = transform(&tree, Platform::Json).unwrap();
        assert!(!json.contains("hairline"));
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("ts".parse::<Platform>().unwrap(), Platform::Ts);
        assert!("scss".parse::<Platform>().is_err());
    }
}
