use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Brand;
use crate::transform::Platform;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub tokens: TokensConfig,
    pub build: BuildConfig,
    pub themes: ThemesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensConfig {
    pub source_dir: PathBuf,
    pub brands: Vec<Brand>,
    pub allow_base_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub output_dir: PathBuf,
    pub platforms: Vec<Platform>,
    pub validate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesConfig {
    pub output_dir: PathBuf,
    /// Where published token packages are installed. Falls back to the
    /// platform data directory.
    pub package_dir: Option<PathBuf>,
    /// Local build output, tried after the package location.
    pub build_dir: PathBuf,
}

impl AppConfig {
    /// Load config: an explicit file, else the user file if present, else the
    /// built-in defaults. Sections missing from a file keep their defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let user_path = Self::config_path();
        if user_path.exists() {
            tracing::debug!(path = %user_path.display(), "Loading user config");
            Self::from_file(&user_path)
        } else {
            Self::from_toml("")
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document layered over the built-in defaults.
    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        let mut merged: toml::Value =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))?;
        let user: toml::Value =
            toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        overlay(&mut merged, user);
        merged
            .try_into()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("obsidiana.toml"))
    }
}

impl ThemesConfig {
    /// Resolved published-package directory.
    pub fn package_dir(&self) -> PathBuf {
        self.package_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().join("design-tokens"))
                .unwrap_or_else(|| PathBuf::from("node_modules/@codigo-obsidiana/design-tokens"))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "obsidiana")
}

/// Recursively replace values in `base` with those from `user`.
fn overlay(base: &mut toml::Value, user: toml::Value) {
    match (base, user) {
        (toml::Value::Table(base), toml::Value::Table(user)) => {
            for (key, value) in user {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, user) => *base = user,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_toml("").expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.tokens.source_dir, PathBuf::from("tokens"));
        assert_eq!(config.tokens.brands, [Brand::Obsidiana, Brand::Ixiptla]);
        assert!(!config.tokens.allow_base_only);
        assert_eq!(config.build.platforms, Platform::ALL);
        assert!(config.build.validate);
        assert!(config.themes.package_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml("[build]\nplatforms = [\"css\"]\n").unwrap();
        assert_eq!(config.build.platforms, [Platform::Css]);
        assert!(config.build.validate);
        assert_eq!(config.build.output_dir, PathBuf::from("dist"));
        assert_eq!(config.themes.build_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_unknown_brand_rejected() {
        let res = AppConfig::from_toml("[tokens]\nbrands = [\"tlaloc\"]\n");
        assert!(matches!(res, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_explicit_package_dir() {
        let config = AppConfig::from_toml("[themes]\npackage_dir = \"/opt/tokens\"\n").unwrap();
        assert_eq!(config.themes.package_dir(), PathBuf::from("/opt/tokens"));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.build.output_dir, config.build.output_dir);
        assert_eq!(deserialized.tokens.brands, config.tokens.brands);
    }
}
