use std::path::PathBuf;

use obsidiana_core::config::AppConfig;
use obsidiana_core::merge::MergeOptions;
use obsidiana_core::pipeline::{build_all, check_brand, BuildOptions};
use obsidiana_core::store::FsTokenStore;
use obsidiana_core::{Brand, Platform};
use obsidiana_themes::writer::write_theme_set;
use obsidiana_themes::{BrandLoader, ThemeFormat, ThemeGenerator, ThemeMode, ThemeSet};

use crate::error::CliError;

fn selected_brands(config: &AppConfig, brands: &[Brand]) -> Vec<Brand> {
    if brands.is_empty() {
        config.tokens.brands.clone()
    } else {
        brands.to_vec()
    }
}

pub fn build(
    config: &AppConfig,
    brands: &[Brand],
    platforms: &[Platform],
    out: Option<PathBuf>,
    keep_going: bool,
) -> Result<(), CliError> {
    let brands = selected_brands(config, brands);
    let mut options = BuildOptions::from_config(config);
    if !platforms.is_empty() {
        options.platforms = platforms.to_vec();
    }
    let out_dir = out.unwrap_or_else(|| config.build.output_dir.clone());
    let store = FsTokenStore::new(&config.tokens.source_dir);

    let mut failed = 0;
    for (brand, result) in build_all(&store, &brands, &options) {
        match result.and_then(|build| build.write(&out_dir)) {
            Ok(files) => {
                tracing::info!(
                    %brand,
                    files = files.len(),
                    out = %out_dir.display(),
                    "Brand built"
                );
            }
            Err(e) if keep_going => {
                tracing::warn!(%brand, error = %e, "Brand failed, skipping");
                failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        return Err(CliError::BrandsFailed {
            failed,
            total: brands.len(),
        });
    }
    Ok(())
}

pub fn check(config: &AppConfig, brands: &[Brand]) -> Result<(), CliError> {
    let store = FsTokenStore::new(&config.tokens.source_dir);
    let options = MergeOptions {
        allow_base_only: config.tokens.allow_base_only,
    };

    let mut total = 0;
    for brand in selected_brands(config, brands) {
        let issues = check_brand(&store, brand, options)?;
        for issue in &issues {
            tracing::warn!(%brand, "{issue}");
        }
        if issues.is_empty() {
            tracing::info!(%brand, "Tokens valid");
        }
        total += issues.len();
    }

    if total > 0 {
        return Err(CliError::Invalid(total));
    }
    Ok(())
}

/// Render one theme. MUI defaults to the light theme; the CSS formats print
/// both blocks unless a mode is given.
pub async fn theme(
    config: &AppConfig,
    format: ThemeFormat,
    brand: Brand,
    mode: Option<ThemeMode>,
) -> Result<String, CliError> {
    let generator = ThemeGenerator::new(BrandLoader::from_config(&config.themes));
    let set = generator.theme_set(brand).await?;
    render(&set, format, mode)
}

fn render(
    set: &ThemeSet,
    format: ThemeFormat,
    mode: Option<ThemeMode>,
) -> Result<String, CliError> {
    let text = match (format, mode) {
        (ThemeFormat::Mui, None) => set.render_mode(format, ThemeMode::default())?,
        (_, Some(mode)) => set.render_mode(format, mode)?,
        (_, None) => set.render(format)?,
    };
    Ok(text)
}

pub async fn themes(
    config: &AppConfig,
    brands: &[Brand],
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let brands = selected_brands(config, brands);
    let out_dir = out.unwrap_or_else(|| config.themes.output_dir.clone());
    let generator = ThemeGenerator::new(BrandLoader::from_config(&config.themes));

    let mut failed = 0;
    for (brand, result) in generator.generate_all(&brands).await {
        let written = match result {
            Ok(set) => write_theme_set(&out_dir, &set).await,
            Err(e) => Err(e),
        };
        match written {
            Ok(files) => {
                tracing::info!(
                    %brand,
                    files = files.len(),
                    out = %out_dir.display(),
                    "Themes written"
                );
            }
            Err(e) => {
                tracing::warn!(%brand, error = %e, "Theme generation failed");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::BrandsFailed {
            failed,
            total: brands.len(),
        });
    }
    Ok(())
}
