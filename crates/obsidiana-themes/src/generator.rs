use std::path::PathBuf;
use std::str::FromStr;

use futures::future::join_all;
use obsidiana_core::{Brand, TokenModule};
use serde::{Deserialize, Serialize};

use crate::daisyui::{self, DaisyUiTheme};
use crate::error::ThemeError;
use crate::loader::BrandLoader;
use crate::mode::ThemeMode;
use crate::mui::{self, MuiTheme, MuiThemes};
use crate::shadcn::{self, ShadcnTheme};

/// Supported UI framework theme formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFormat {
    DaisyUi,
    Mui,
    Shadcn,
}

impl ThemeFormat {
    pub const ALL: &[ThemeFormat] = &[Self::DaisyUi, Self::Mui, Self::Shadcn];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DaisyUi => "daisyui",
            Self::Mui => "mui",
            Self::Shadcn => "shadcn",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::DaisyUi | Self::Shadcn => "css",
            Self::Mui => "json",
        }
    }

    /// Theme file path relative to the themes output directory.
    pub fn relative_path(self, brand: Brand) -> PathBuf {
        PathBuf::from(self.as_str()).join(format!("{brand}.{}", self.extension()))
    }
}

impl FromStr for ThemeFormat {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ThemeError::UnknownName {
                kind: "theme format",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ThemeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every theme format for one brand.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSet {
    pub brand: Brand,
    pub daisyui: DaisyUiTheme,
    pub mui: MuiThemes,
    pub shadcn: ShadcnTheme,
}

impl ThemeSet {
    pub fn from_module(brand: Brand, module: &TokenModule) -> Result<Self, ThemeError> {
        Ok(Self {
            brand,
            daisyui: daisyui::project(brand, module)?,
            mui: mui::project(module)?,
            shadcn: shadcn::project(module)?,
        })
    }

    /// File contents for one format: both CSS blocks, or `{light, dark}` JSON.
    pub fn render(&self, format: ThemeFormat) -> Result<String, ThemeError> {
        Ok(match format {
            ThemeFormat::DaisyUi => self.daisyui.to_css(),
            ThemeFormat::Shadcn => self.shadcn.to_css(),
            ThemeFormat::Mui => serde_json::to_string_pretty(&self.mui)? + "\n",
        })
    }

    /// A single mode of one format.
    pub fn render_mode(&self, format: ThemeFormat, mode: ThemeMode) -> Result<String, ThemeError> {
        Ok(match format {
            ThemeFormat::DaisyUi => self.daisyui.block(mode).to_string(),
            ThemeFormat::Shadcn => self.shadcn.block(mode).to_string(),
            ThemeFormat::Mui => serde_json::to_string_pretty(self.mui.get(mode))? + "\n",
        })
    }
}

/// Loads brand modules and projects them into framework themes.
pub struct ThemeGenerator {
    loader: BrandLoader,
}

impl ThemeGenerator {
    pub fn new(loader: BrandLoader) -> Self {
        Self { loader }
    }

    pub async fn daisyui(&self, brand: Brand) -> Result<DaisyUiTheme, ThemeError> {
        let module = self.loader.load(brand).await?;
        daisyui::project(brand, &module)
    }

    pub async fn mui(&self, brand: Brand) -> Result<MuiThemes, ThemeError> {
        let module = self.loader.load(brand).await?;
        mui::project(&module)
    }

    /// One MUI theme; light unless a mode is given.
    pub async fn mui_theme(
        &self,
        brand: Brand,
        mode: Option<ThemeMode>,
    ) -> Result<MuiTheme, ThemeError> {
        let module = self.loader.load(brand).await?;
        mui::project_mode(&module, mode.unwrap_or_default())
    }

    pub async fn shadcn(&self, brand: Brand) -> Result<ShadcnTheme, ThemeError> {
        let module = self.loader.load(brand).await?;
        shadcn::project(&module)
    }

    pub async fn theme_set(&self, brand: Brand) -> Result<ThemeSet, ThemeError> {
        let module = self.loader.load(brand).await?;
        ThemeSet::from_module(brand, &module)
    }

    /// Generate every brand concurrently; results keep the input order.
    pub async fn generate_all(
        &self,
        brands: &[Brand],
    ) -> Vec<(Brand, Result<ThemeSet, ThemeError>)> {
        let results = join_all(brands.iter().map(|&brand| self.theme_set(brand))).await;
        brands.iter().copied().zip(results).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::loader::MemoryResolver;

    fn generator() -> ThemeGenerator {
        let resolver = MemoryResolver::new().with(Brand::Ixiptla, fixtures::ixiptla());
        ThemeGenerator::new(BrandLoader::new().with(resolver))
    }

    #[tokio::test]
    async fn test_mui_theme_defaults_to_light() {
        let theme = generator().mui_theme(Brand::Ixiptla, None).await.unwrap();
        assert_eq!(theme.palette.mode, ThemeMode::Light);
        let dark = generator()
            .mui_theme(Brand::Ixiptla, Some(ThemeMode::Dark))
            .await
            .unwrap();
        assert_eq!(dark.palette.mode, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_generate_all_keeps_failures_per_brand() {
        let results = generator()
            .generate_all(&[Brand::Obsidiana, Brand::Ixiptla])
            .await;
        assert_eq!(results[0].0, Brand::Obsidiana);
        assert!(matches!(results[0].1, Err(ThemeError::TokenModuleLoad { .. })));
        assert_eq!(results[1].0, Brand::Ixiptla);
        assert!(results[1].1.is_ok());
    }

    #[tokio::test]
    async fn test_render_formats() {
        let set = generator().theme_set(Brand::Ixiptla).await.unwrap();

        let daisy = set.render(ThemeFormat::DaisyUi).unwrap();
        assert!(daisy.contains("name: \"ixiptla\";") && daisy.contains("name: \"ixiptla-dark\";"));

        let mui: serde_json::Value =
            serde_json::from_str(&set.render(ThemeFormat::Mui).unwrap()).unwrap();
        assert_eq!(mui["light"]["palette"]["mode"], "light");
        assert_eq!(mui["dark"]["palette"]["mode"], "dark");

        let dark_only = set.render_mode(ThemeFormat::Shadcn, ThemeMode::Dark).unwrap();
        assert!(dark_only.starts_with(".dark {"));
        assert!(!dark_only.contains(":root"));
    }

    #[test]
    fn test_format_paths() {
        assert_eq!(
            ThemeFormat::Mui.relative_path(Brand::Ixiptla),
            PathBuf::from("mui/ixiptla.json")
        );
        assert_eq!(
            ThemeFormat::DaisyUi.relative_path(Brand::Obsidiana),
            PathBuf::from("daisyui/obsidiana.css")
        );
        assert_eq!("shadcn".parse::<ThemeFormat>().unwrap(), ThemeFormat::Shadcn);
        assert!("tailwind".parse::<ThemeFormat>().is_err());
    }
}
