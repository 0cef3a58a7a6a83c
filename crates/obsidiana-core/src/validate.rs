//! Structural checks on resolved token trees.
//!
//! These run before any artifact is written so a malformed brand never ships
//! partial output.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::color::{ColorError, ColorValue};
use crate::error::CoreError;
use crate::merge::ResolvedTokens;
use crate::models::{TokenPath, TokenTree, TokenType, TokenValue};

/// Color roles every brand palette must define.
pub const REQUIRED_COLOR_ROLES: &[&str] = &[
    "base", "primary", "secondary", "accent", "neutral", "info", "success", "warning", "error",
];

/// Variants required under each state of the `base` role.
const BASE_VARIANTS: &[&str] = &["100", "200", "300", "content"];

/// Variants required under each state of every other role.
const ROLE_VARIANTS: &[&str] = &["default", "content"];

const STATES: &[&str] = &["light", "dark"];

/// Radii from largest to smallest.
const RADIUS_ORDER: &[&str] = &["box", "field", "selector"];

/// Longest accepted theme transition, in seconds.
const MAX_TRANSITION_SECS: f64 = 0.5;

const GENERIC_FAMILIES: &[&str] = &["serif", "sans-serif", "monospace", "cursive", "fantasy"];

static RE_VARIANT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:default|content|contrast|\d+)$").unwrap());

static RE_REM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?rem$").unwrap());

static RE_PX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)px$").unwrap());

static RE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(s|ms)$").unwrap());

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("{path}: {error}")]
    InvalidColor { path: String, error: ColorError },

    #[error("color.{role} is missing")]
    MissingRole { role: String },

    #[error("color.{role} has no {state} variant group")]
    MissingState { role: String, state: &'static str },

    #[error("color.{role}: `{path}` exists only under {present}")]
    UnpairedToken {
        role: String,
        path: String,
        present: &'static str,
    },

    #[error("color.{role}: `{path}` is {light} in light but {dark} in dark")]
    TypeMismatch {
        role: String,
        path: String,
        light: TokenType,
        dark: TokenType,
    },

    #[error("color.{role}.{state} lacks `{variant}`")]
    MissingVariant {
        role: String,
        state: &'static str,
        variant: &'static str,
    },

    #[error("{path}: color variant names must be default, content, contrast or a number")]
    VariantName { path: String },

    #[error("{path}: `{value}` is not a {unit} value")]
    Unit {
        path: String,
        value: String,
        unit: &'static str,
    },

    #[error("{path}: border width {value} is thinner than 1px")]
    BorderTooThin { path: String, value: String },

    #[error("design.radius.{larger} ({larger_value}) is not above {smaller} ({smaller_value})")]
    RadiusOrder {
        larger: &'static str,
        larger_value: String,
        smaller: &'static str,
        smaller_value: String,
    },

    #[error("{path}: duration `{value}` must be above 0s and at most 0.5s")]
    Duration { path: String, value: String },

    #[error("font.family.{family} must fall back to {expected}")]
    FontFallback {
        family: &'static str,
        expected: &'static str,
    },

    #[error("color.base.{state}.content at {lightness}% lacks contrast")]
    Contrast { state: &'static str, lightness: f64 },
}

/// Run every check against a brand's merged tokens.
pub fn validate_resolved(resolved: &ResolvedTokens) -> Result<(), CoreError> {
    let issues = validate_tree(&resolved.tree());
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation {
            brand: resolved.brand,
            issues,
        })
    }
}

/// Run every check against a tree rooted above the category groups.
pub fn validate_tree(tree: &TokenTree) -> Vec<ValidationIssue> {
    let mut issues = validate_colors(tree);
    issues.extend(validate_dimensions(tree));
    if let Some(colors) = tree.group("color") {
        issues.extend(check_required_roles(colors));
        issues.extend(check_theme_parity(colors));
        issues.extend(check_variant_names(colors));
        issues.extend(check_content_contrast(colors));
    }
    if let Some(design) = tree.group("design") {
        issues.extend(check_radius_order(design));
    }
    if let Some(font) = tree.group("font") {
        issues.extend(check_font_fallbacks(font));
    }
    issues
}

/// Every `color`-typed leaf must be a well-formed color.
pub fn validate_colors(tree: &TokenTree) -> Vec<ValidationIssue> {
    tree.leaves()
        .into_iter()
        .filter(|(_, token)| token.kind == TokenType::Color)
        .filter_map(|(path, token)| {
            let Some(value) = token.value.as_scalar() else {
                return Some(ValidationIssue::InvalidColor {
                    path: path.to_string(),
                    error: ColorError::Malformed(token.value.joined(", ")),
                });
            };
            ColorValue::parse(value)
                .err()
                .map(|error| ValidationIssue::InvalidColor {
                    path: path.to_string(),
                    error,
                })
        })
        .collect()
}

/// Light and dark must expose the same leaf paths with the same types.
pub fn check_theme_parity(colors: &TokenTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (role, node) in colors.iter() {
        let Some(role_group) = node.as_group() else {
            continue;
        };
        let (Some(light), Some(dark)) = (role_group.group("light"), role_group.group("dark")) else {
            for &state in STATES {
                if role_group.group(state).is_none() {
                    issues.push(ValidationIssue::MissingState {
                        role: role.clone(),
                        state,
                    });
                }
            }
            continue;
        };

        let light_leaves = leaf_types(light);
        let dark_leaves = leaf_types(dark);

        for (path, light_type) in &light_leaves {
            match dark_leaves.get(path) {
                None => issues.push(ValidationIssue::UnpairedToken {
                    role: role.clone(),
                    path: path.to_string(),
                    present: "light",
                }),
                Some(dark_type) if dark_type != light_type => {
                    issues.push(ValidationIssue::TypeMismatch {
                        role: role.clone(),
                        path: path.to_string(),
                        light: *light_type,
                        dark: *dark_type,
                    })
                }
                Some(_) => {}
            }
        }
        for path in dark_leaves.keys().filter(|p| !light_leaves.contains_key(*p)) {
            issues.push(ValidationIssue::UnpairedToken {
                role: role.clone(),
                path: path.to_string(),
                present: "dark",
            });
        }
    }

    issues
}

fn leaf_types(tree: &TokenTree) -> BTreeMap<TokenPath, TokenType> {
    tree.leaves()
        .into_iter()
        .map(|(path, token)| (path, token.kind))
        .collect()
}

/// Required roles exist and carry their required variants in both states.
pub fn check_required_roles(colors: &TokenTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for &role in REQUIRED_COLOR_ROLES {
        let Some(role_group) = colors.group(role) else {
            issues.push(ValidationIssue::MissingRole { role: role.into() });
            continue;
        };
        let variants = if role == "base" {
            BASE_VARIANTS
        } else {
            ROLE_VARIANTS
        };
        for &state in STATES {
            // A missing state group is reported by the parity check.
            let Some(state_group) = role_group.group(state) else {
                continue;
            };
            for &variant in variants {
                if state_group.token(variant).is_none() {
                    issues.push(ValidationIssue::MissingVariant {
                        role: role.into(),
                        state,
                        variant,
                    });
                }
            }
        }
    }

    issues
}

/// Leaf names under color roles follow the variant naming scheme.
pub fn check_variant_names(colors: &TokenTree) -> Vec<ValidationIssue> {
    colors
        .leaves()
        .into_iter()
        .filter(|(path, _)| !path.leaf_name().is_some_and(|n| RE_VARIANT_NAME.is_match(n)))
        .map(|(path, _)| ValidationIssue::VariantName {
            path: format!("color.{path}"),
        })
        .collect()
}

/// Radii and sizes are rem, border widths whole px of at least 1, and
/// durations within (0, 0.5s].
pub fn validate_dimensions(tree: &TokenTree) -> Vec<ValidationIssue> {
    tree.leaves()
        .into_iter()
        .filter_map(|(path, token)| {
            let value = token.value.joined(", ");
            let path = path.to_string();
            match token.kind {
                TokenType::BorderRadius | TokenType::Size if !RE_REM.is_match(&value) => {
                    Some(ValidationIssue::Unit {
                        path,
                        value,
                        unit: "rem",
                    })
                }
                TokenType::BorderWidth => {
                    let px = RE_PX
                        .captures(&value)
                        .map(|caps| caps[1].parse::<u32>().unwrap_or(u32::MAX));
                    match px {
                        None => Some(ValidationIssue::Unit {
                            path,
                            value,
                            unit: "px",
                        }),
                        Some(0) => Some(ValidationIssue::BorderTooThin { path, value }),
                        Some(_) => None,
                    }
                }
                TokenType::Duration => match duration_secs(&value) {
                    Some(secs) if secs > 0.0 && secs <= MAX_TRANSITION_SECS => None,
                    _ => Some(ValidationIssue::Duration { path, value }),
                },
                _ => None,
            }
        })
        .collect()
}

fn duration_secs(value: &str) -> Option<f64> {
    let caps = RE_DURATION.captures(value)?;
    let amount = caps[1].parse::<f64>().ok()?;
    Some(if &caps[2] == "ms" { amount / 1000.0 } else { amount })
}

fn rem(value: &str) -> Option<f64> {
    value.strip_suffix("rem")?.parse().ok()
}

/// `box` > `field` > `selector` for whichever radii are defined.
pub fn check_radius_order(design: &TokenTree) -> Vec<ValidationIssue> {
    let radii: Vec<(&'static str, &str)> = RADIUS_ORDER
        .iter()
        .filter_map(|&name| {
            let value = design.token(&format!("radius.{name}"))?.value.as_scalar()?;
            Some((name, value))
        })
        .collect();

    radii
        .windows(2)
        .filter_map(|pair| {
            let [(larger, larger_value), (smaller, smaller_value)] = pair else {
                return None;
            };
            // Malformed units are reported by the dimension check.
            let (big, small) = (rem(larger_value)?, rem(smaller_value)?);
            (big <= small).then(|| ValidationIssue::RadiusOrder {
                larger: *larger,
                larger_value: larger_value.to_string(),
                smaller: *smaller,
                smaller_value: smaller_value.to_string(),
            })
        })
        .collect()
}

/// Body text falls back to `sans-serif`; headers to some generic family.
pub fn check_font_fallbacks(font: &TokenTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let stack = |family: &str| -> Option<Vec<String>> {
        let token = font.token(&format!("family.{family}"))?;
        Some(match &token.value {
            TokenValue::Scalar(s) => s.split(',').map(|f| f.trim().to_string()).collect(),
            TokenValue::List(items) => items.clone(),
        })
    };

    if let Some(base) = stack("base") {
        if !base.iter().any(|f| f == "sans-serif") {
            issues.push(ValidationIssue::FontFallback {
                family: "base",
                expected: "sans-serif",
            });
        }
    }
    if let Some(headers) = stack("headers") {
        if !headers.iter().any(|f| GENERIC_FAMILIES.contains(&f.as_str())) {
            issues.push(ValidationIssue::FontFallback {
                family: "headers",
                expected: "a generic family",
            });
        }
    }

    issues
}

/// Base content reads dark on light backgrounds and light on dark ones.
/// Only oklch colors carry a lightness to compare.
pub fn check_content_contrast(colors: &TokenTree) -> Vec<ValidationIssue> {
    STATES
        .iter()
        .filter_map(|&state| {
            let value = colors
                .token(&format!("base.{state}.content"))?
                .value
                .as_scalar()?;
            let lightness = ColorValue::parse(value).ok()?.lightness()?;
            let readable = match state {
                "light" => lightness < 50.0,
                _ => lightness > 50.0,
            };
            (!readable).then_some(ValidationIssue::Contrast { state, lightness })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn color(value: &str) -> Token {
        Token::new(value, TokenType::Color)
    }

    fn states(light: TokenTree, dark: TokenTree) -> TokenTree {
        TokenTree::new().with("light", light).with("dark", dark)
    }

    fn role() -> TokenTree {
        let variant = || {
            TokenTree::new()
                .with("default", color("oklch(55% 0.15 40.24)"))
                .with("content", color("oklch(98% 0.01 40.24)"))
        };
        states(variant(), variant())
    }

    fn base_role() -> TokenTree {
        let variant = |content: &str| {
            TokenTree::new()
                .with("100", color("oklch(97% 0.01 83.24)"))
                .with("200", color("oklch(94% 0.01 83.24)"))
                .with("300", color("oklch(90% 0.01 83.24)"))
                .with("content", color(content))
        };
        states(
            variant("oklch(25% 0.02 83.24)"),
            variant("oklch(93% 0.01 83.24)"),
        )
    }

    fn full_palette() -> TokenTree {
        REQUIRED_COLOR_ROLES
            .iter()
            .fold(TokenTree::new(), |tree, &name| {
                let group = if name == "base" { base_role() } else { role() };
                tree.with(name, group)
            })
    }

    #[test]
    fn test_complete_palette_passes() {
        let tree = TokenTree::new().with("color", full_palette());
        assert_eq!(validate_tree(&tree), vec![]);
    }

    #[test]
    fn test_parity_detects_unpaired_and_type_mismatch() {
        let light = TokenTree::new()
            .with("default", color("#000000"))
            .with("content", color("#ffffff"))
            .with("hover", color("#111111"));
        let dark = TokenTree::new()
            .with("default", Token::new("1px", TokenType::Size))
            .with("content", color("#000000"));
        let colors = TokenTree::new().with("primary", states(light, dark));

        let issues = check_theme_parity(&colors);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&ValidationIssue::UnpairedToken {
            role: "primary".into(),
            path: "hover".into(),
            present: "light",
        }));
        assert!(issues.contains(&ValidationIssue::TypeMismatch {
            role: "primary".into(),
            path: "default".into(),
            light: TokenType::Color,
            dark: TokenType::Size,
        }));
    }

    #[test]
    fn test_missing_state_reported() {
        let colors = TokenTree::new().with(
            "accent",
            TokenTree::new().with("light", TokenTree::new().with("default", color("#000"))),
        );
        let issues = check_theme_parity(&colors);
        assert_eq!(
            issues,
            vec![ValidationIssue::MissingState {
                role: "accent".into(),
                state: "dark"
            }]
        );
    }

    #[test]
    fn test_invalid_color_reported_with_path() {
        let tree = TokenTree::new().with(
            "color",
            TokenTree::new().with(
                "info",
                TokenTree::new().with("light", TokenTree::new().with("default", color("blue"))),
            ),
        );
        let issues = validate_colors(&tree);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().starts_with("color.info.light.default"));
    }

    #[test]
    fn test_required_roles_and_variants() {
        let mut palette = full_palette();
        palette = palette.with(
            "warning",
            states(
                TokenTree::new().with("default", color("#000")),
                TokenTree::new().with("default", color("#000")),
            ),
        );
        let issues = check_required_roles(&palette);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| matches!(
            i,
            ValidationIssue::MissingVariant { role, variant: "content", .. } if role == "warning"
        )));

        let issues = check_required_roles(&TokenTree::new());
        assert_eq!(issues.len(), REQUIRED_COLOR_ROLES.len());
    }

    #[test]
    fn test_variant_names() {
        let colors = TokenTree::new().with(
            "primary",
            states(
                TokenTree::new().with("hover", color("#000")),
                TokenTree::new().with("100", color("#000")),
            ),
        );
        let issues = check_variant_names(&colors);
        assert_eq!(
            issues,
            vec![ValidationIssue::VariantName {
                path: "color.primary.light.hover".into()
            }]
        );
    }

    fn design(radii: [&str; 3]) -> TokenTree {
        let radius = |value: &str| Token::new(value, TokenType::BorderRadius);
        TokenTree::new()
            .with(
                "radius",
                TokenTree::new()
                    .with("box", radius(radii[0]))
                    .with("field", radius(radii[1]))
                    .with("selector", radius(radii[2])),
            )
            .with(
                "size",
                TokenTree::new().with("field", Token::new("0.25rem", TokenType::Size)),
            )
            .with(
                "border",
                TokenTree::new().with("width", Token::new("1px", TokenType::BorderWidth)),
            )
            .with(
                "transition",
                TokenTree::new().with("theme", Token::new("0.3s", TokenType::Duration)),
            )
    }

    #[test]
    fn test_dimension_units() {
        let tree = TokenTree::new().with("design", design(["0.5rem", "6px", "0.25rem"]));
        assert_eq!(
            validate_dimensions(&tree),
            vec![ValidationIssue::Unit {
                path: "design.radius.field".into(),
                value: "6px".into(),
                unit: "rem",
            }]
        );

        let tree = TokenTree::new().with(
            "design",
            TokenTree::new()
                .with("size", Token::new("4", TokenType::Size))
                .with("border", Token::new("0.1rem", TokenType::BorderWidth)),
        );
        let issues = validate_dimensions(&tree);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| matches!(i, ValidationIssue::Unit { .. })));
    }

    #[test]
    fn test_border_width_at_least_one_px() {
        let tree = TokenTree::new().with(
            "design",
            TokenTree::new().with("border", Token::new("0px", TokenType::BorderWidth)),
        );
        assert_eq!(
            validate_dimensions(&tree),
            vec![ValidationIssue::BorderTooThin {
                path: "design.border".into(),
                value: "0px".into(),
            }]
        );
    }

    #[test]
    fn test_transition_duration_bounds() {
        let duration = |value: &str| {
            TokenTree::new().with("transition", Token::new(value, TokenType::Duration))
        };
        for ok in ["0.3s", "0.5s", "150ms"] {
            assert_eq!(validate_dimensions(&duration(ok)), vec![], "{ok}");
        }
        for bad in ["0s", "0.6s", "800ms", "fast"] {
            assert_eq!(
                validate_dimensions(&duration(bad)),
                vec![ValidationIssue::Duration {
                    path: "transition".into(),
                    value: bad.into(),
                }],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_radius_order() {
        assert_eq!(
            check_radius_order(&design(["0.5rem", "0.375rem", "0.25rem"])),
            vec![]
        );

        let issues = check_radius_order(&design(["0.5rem", "0.25rem", "0.25rem"]));
        assert_eq!(
            issues,
            vec![ValidationIssue::RadiusOrder {
                larger: "field",
                larger_value: "0.25rem".into(),
                smaller: "selector",
                smaller_value: "0.25rem".into(),
            }]
        );

        let issues = check_radius_order(&design(["0.25rem", "0.5rem", "1rem"]));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_font_fallbacks() {
        let stack = |names: &[&str]| {
            let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
            Token::new(names, TokenType::FontFamily)
        };
        let fonts = |headers: &[&str], base: &[&str]| {
            TokenTree::new().with(
                "family",
                TokenTree::new()
                    .with("headers", stack(headers))
                    .with("base", stack(base)),
            )
        };

        let font = fonts(&["Playfair Display", "Georgia", "serif"], &["Inter", "sans-serif"]);
        assert_eq!(check_font_fallbacks(&font), vec![]);

        let font = fonts(&["Playfair Display", "Georgia"], &["Inter", "serif"]);
        assert_eq!(
            check_font_fallbacks(&font),
            vec![
                ValidationIssue::FontFallback {
                    family: "base",
                    expected: "sans-serif",
                },
                ValidationIssue::FontFallback {
                    family: "headers",
                    expected: "a generic family",
                },
            ]
        );
    }

    #[test]
    fn test_content_contrast() {
        assert_eq!(check_content_contrast(&full_palette()), vec![]);

        let inverted = full_palette().with(
            "base",
            states(
                TokenTree::new().with("content", color("oklch(93% 0.01 83.24)")),
                TokenTree::new().with("content", color("oklch(25% 0.02 83.24)")),
            ),
        );
        assert_eq!(
            check_content_contrast(&inverted),
            vec![
                ValidationIssue::Contrast {
                    state: "light",
                    lightness: 93.0,
                },
                ValidationIssue::Contrast {
                    state: "dark",
                    lightness: 25.0,
                },
            ]
        );

        // Hex colors carry no lightness to compare.
        let hex = TokenTree::new().with(
            "base",
            states(
                TokenTree::new().with("content", color("#ffffff")),
                TokenTree::new().with("content", color("#000000")),
            ),
        );
        assert_eq!(check_content_contrast(&hex), vec![]);
    }
}
