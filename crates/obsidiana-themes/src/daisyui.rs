//! daisyUI `@plugin "daisyui/theme"` blocks.

use obsidiana_core::{Brand, TokenModule};

use crate::error::ThemeError;
use crate::lookup::{color_name, optional_scalar, scalar};
use crate::mode::ThemeMode;

/// Roles emitted as `--color-<role>` / `--color-<role>-content` pairs.
const ROLES: &[&str] = &[
    "primary", "secondary", "accent", "neutral", "info", "success", "warning", "error",
];

const RADII: &[(&str, &str)] = &[
    ("--radius-selector", "DesignRadiusSelector"),
    ("--radius-field", "DesignRadiusField"),
    ("--radius-box", "DesignRadiusBox"),
];

/// Emitted only when the brand defines them.
const OPTIONAL: &[(&str, &str)] = &[
    ("--size-selector", "DesignSizeSelector"),
    ("--size-field", "DesignSizeField"),
    ("--border", "DesignBorderWidth"),
    ("--depth", "DesignEffectDepth"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaisyUiTheme {
    pub light: String,
    pub dark: String,
}

impl DaisyUiTheme {
    pub fn block(&self, mode: ThemeMode) -> &str {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Both blocks, light first.
    pub fn to_css(&self) -> String {
        format!("{}\n{}", self.light, self.dark)
    }
}

pub fn project(brand: Brand, module: &TokenModule) -> Result<DaisyUiTheme, ThemeError> {
    Ok(DaisyUiTheme {
        light: block(brand, module, ThemeMode::Light)?,
        dark: block(brand, module, ThemeMode::Dark)?,
    })
}

fn block(brand: Brand, module: &TokenModule, mode: ThemeMode) -> Result<String, ThemeError> {
    let name = match mode {
        ThemeMode::Light => brand.to_string(),
        ThemeMode::Dark => format!("{brand}-dark"),
    };

    let mut out = format!(
        "@plugin \"daisyui/theme\" {{\n  name: \"{name}\";\n  color-scheme: {mode};\n\n"
    );

    for step in ["100", "200", "300", "content"] {
        let value = scalar(module, &color_name("base", mode, step))?;
        out.push_str(&format!("  --color-base-{step}: {value};\n"));
    }

    for role in ROLES {
        let main = scalar(module, &color_name(role, mode, "default"))?;
        let content = scalar(module, &color_name(role, mode, "content"))?;
        out.push_str(&format!(
            "\n  --color-{role}: {main};\n  --color-{role}-content: {content};\n"
        ));
    }

    out.push('\n');
    for (property, token) in RADII {
        out.push_str(&format!("  {property}: {};\n", scalar(module, token)?));
    }
    for (property, token) in OPTIONAL {
        if let Some(value) = optional_scalar(module, token)? {
            out.push_str(&format!("  {property}: {value};\n"));
        }
    }

    out.push_str("}\n");
    Ok(out)
}
