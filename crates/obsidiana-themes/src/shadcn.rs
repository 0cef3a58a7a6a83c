//! shadcn/ui custom property blocks.
//!
//! Each property lists candidate `(role, variant)` pairs in priority order.
//! Dedicated surface roles (`background`, `foreground`, `muted`, `border`) and
//! `contrast` variants win when a brand defines them; otherwise the property
//! falls back to roles every brand is required to have.

use obsidiana_core::TokenModule;

use crate::error::ThemeError;
use crate::lookup::{color_name, first_scalar, scalar};
use crate::mode::ThemeMode;

type Candidates = &'static [(&'static str, &'static str)];

const BACKGROUND: Candidates = &[("background", "default"), ("base", "100")];
const FOREGROUND: Candidates = &[("foreground", "default"), ("base", "content")];
const BORDER: Candidates = &[("border", "default"), ("base", "300")];

const PROPERTIES: &[(&str, Candidates)] = &[
    ("background", BACKGROUND),
    ("foreground", FOREGROUND),
    ("card", BACKGROUND),
    ("card-foreground", FOREGROUND),
    ("popover", BACKGROUND),
    ("popover-foreground", FOREGROUND),
    ("primary", &[("primary", "default")]),
    ("primary-foreground", &[("primary", "contrast"), ("primary", "content")]),
    ("secondary", &[("secondary", "default")]),
    ("secondary-foreground", &[("secondary", "contrast"), ("secondary", "content")]),
    ("muted", &[("muted", "default"), ("base", "200")]),
    ("muted-foreground", &[("muted", "contrast"), ("neutral", "default")]),
    ("accent", &[("accent", "default")]),
    ("accent-foreground", &[("accent", "contrast"), ("accent", "content")]),
    ("destructive", &[("error", "default")]),
    ("destructive-foreground", &[("error", "contrast"), ("error", "content")]),
    ("border", BORDER),
    ("input", BORDER),
    ("ring", &[("primary", "default")]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadcnTheme {
    pub light: String,
    pub dark: String,
}

impl ShadcnTheme {
    pub fn block(&self, mode: ThemeMode) -> &str {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn to_css(&self) -> String {
        format!("{}\n{}", self.light, self.dark)
    }
}

pub fn project(module: &TokenModule) -> Result<ShadcnTheme, ThemeError> {
    Ok(ShadcnTheme {
        light: block(module, ThemeMode::Light)?,
        dark: block(module, ThemeMode::Dark)?,
    })
}

fn block(module: &TokenModule, mode: ThemeMode) -> Result<String, ThemeError> {
    let selector = match mode {
        ThemeMode::Light => ":root",
        ThemeMode::Dark => ".dark",
    };
    let mut out = format!("{selector} {{\n");

    for (property, candidates) in PROPERTIES {
        let names: Vec<String> = candidates
            .iter()
            .map(|(role, variant)| color_name(role, mode, variant))
            .collect();
        let value = first_scalar(module, &names)?;
        out.push_str(&format!("  --{property}: {value};\n"));
    }

    // Radius is mode independent.
    if mode == ThemeMode::Light {
        out.push_str(&format!("  --radius: {};\n", scalar(module, "DesignRadiusField")?));
    }

    out.push_str("}\n");
    Ok(out)
}
