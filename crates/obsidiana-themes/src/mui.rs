//! Material UI theme objects.
//!
//! Both modes share typography, shape and component overrides; only the
//! palette differs.

use obsidiana_core::TokenModule;
use serde::Serialize;

use crate::error::ThemeError;
use crate::lookup::{color_name, joined, scalar};
use crate::mode::ThemeMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuiTheme {
    pub typography: Typography,
    pub shape: Shape,
    pub components: Components,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub h1: HeadingFont,
    pub h2: HeadingFont,
    pub h3: HeadingFont,
    pub h4: HeadingFont,
    pub h5: HeadingFont,
    pub h6: HeadingFont,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingFont {
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub border_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    #[serde(rename = "MuiButton")]
    pub button: StyleOverrides<ButtonRoot>,
    #[serde(rename = "MuiTextField")]
    pub text_field: StyleOverrides<TextFieldRoot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides<T> {
    pub style_overrides: Root<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root<T> {
    pub root: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonRoot {
    pub border_radius: String,
    pub text_transform: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFieldRoot {
    #[serde(rename = "& .MuiOutlinedInput-root")]
    pub outlined_input: Rounding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rounding {
    pub border_radius: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub mode: ThemeMode,
    pub primary: PaletteColor,
    pub secondary: PaletteColor,
    pub error: PaletteColor,
    pub warning: PaletteColor,
    pub info: PaletteColor,
    pub success: PaletteColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteColor {
    pub main: String,
}

/// Light and dark themes of one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuiThemes {
    pub light: MuiTheme,
    pub dark: MuiTheme,
}

impl MuiThemes {
    pub fn get(&self, mode: ThemeMode) -> &MuiTheme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

pub fn project(module: &TokenModule) -> Result<MuiThemes, ThemeError> {
    Ok(MuiThemes {
        light: project_mode(module, ThemeMode::Light)?,
        dark: project_mode(module, ThemeMode::Dark)?,
    })
}

pub fn project_mode(module: &TokenModule, mode: ThemeMode) -> Result<MuiTheme, ThemeError> {
    let headers = HeadingFont {
        font_family: joined(module, "FontFamilyHeaders", ",")?,
    };
    let field_radius = scalar(module, "DesignRadiusField")?;
    let box_radius = scalar(module, "DesignRadiusBox")?;

    let main = |role: &str| -> Result<PaletteColor, ThemeError> {
        Ok(PaletteColor {
            main: scalar(module, &color_name(role, mode, "default"))?.to_string(),
        })
    };

    Ok(MuiTheme {
        typography: Typography {
            font_family: joined(module, "FontFamilyBase", ",")?,
            h1: headers.clone(),
            h2: headers.clone(),
            h3: headers.clone(),
            h4: headers.clone(),
            h5: headers.clone(),
            h6: headers,
        },
        shape: Shape {
            border_radius: leading_number(field_radius),
        },
        components: Components {
            button: StyleOverrides {
                style_overrides: Root {
                    root: ButtonRoot {
                        border_radius: box_radius.to_string(),
                        text_transform: "none",
                    },
                },
            },
            text_field: StyleOverrides {
                style_overrides: Root {
                    root: TextFieldRoot {
                        outlined_input: Rounding {
                            border_radius: field_radius.to_string(),
                        },
                    },
                },
            },
        },
        palette: Palette {
            mode,
            primary: main("primary")?,
            secondary: main("secondary")?,
            error: main("error")?,
            warning: main("warning")?,
            info: main("info")?,
            success: main("success")?,
        },
    })
}

/// Numeric prefix of a dimension (`0.375rem` -> 0.375); 0 when there is none.
fn leading_number(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    trimmed[..end].parse().unwrap_or(0.0)
}
