//! Per-brand build pipeline.
//!
//! For each brand: merge base and brand trees, optionally validate, then
//! render every requested platform. All artifacts are produced in memory
//! before anything is written, so a failing brand leaves no partial output.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::CoreError;
use crate::merge::{resolve_brand, MergeOptions};
use crate::models::Brand;
use crate::module::TokenModule;
use crate::store::TokenSource;
use crate::transform::{flatten, transform, Platform};
use crate::validate::{validate_resolved, validate_tree, ValidationIssue};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub platforms: Vec<Platform>,
    pub validate: bool,
    pub merge: MergeOptions,
}

impl BuildOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            platforms: config.build.platforms.clone(),
            validate: config.build.validate,
            merge: MergeOptions {
                allow_base_only: config.tokens.allow_base_only,
            },
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            platforms: Platform::ALL.to_vec(),
            validate: true,
            merge: MergeOptions::default(),
        }
    }
}

/// One rendered output file.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub platform: Platform,
    /// Path relative to the brand's output directory.
    pub path: PathBuf,
    pub contents: String,
}

/// Everything generated for one brand.
#[derive(Debug, Clone)]
pub struct BrandBuild {
    pub brand: Brand,
    pub artifacts: Vec<Artifact>,
}

impl BrandBuild {
    pub fn artifact(&self, platform: Platform) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.platform == platform)
    }

    /// Write artifacts under `<out_dir>/<brand>/`, returning the written paths.
    pub fn write(&self, out_dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
        let brand_dir = out_dir.join(self.brand.as_str());
        let mut written = Vec::with_capacity(self.artifacts.len());

        for artifact in &self.artifacts {
            let path = brand_dir.join(&artifact.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &artifact.contents)?;
            tracing::debug!(path = %path.display(), "Wrote artifact");
            written.push(path);
        }

        Ok(written)
    }
}

/// Merge, validate and render one brand.
pub fn build_brand(
    source: &impl TokenSource,
    brand: Brand,
    options: &BuildOptions,
) -> Result<BrandBuild, CoreError> {
    tracing::info!(%brand, "Building brand");

    let resolved = resolve_brand(source, brand, options.merge)?;
    if options.validate {
        validate_resolved(&resolved)?;
    }

    let tree = resolved.tree();
    let mut artifacts = Vec::with_capacity(options.platforms.len());
    for &platform in &options.platforms {
        let contents = transform(&tree, platform)?;
        tracing::info!(%brand, %platform, bytes = contents.len(), "Rendered platform");
        artifacts.push(Artifact {
            platform,
            path: PathBuf::from(platform.destination()),
            contents,
        });
    }

    Ok(BrandBuild { brand, artifacts })
}

/// Build several brands independently. One brand failing does not stop the
/// others; the caller decides what to do with each result.
pub fn build_all(
    source: &impl TokenSource,
    brands: &[Brand],
    options: &BuildOptions,
) -> Vec<(Brand, Result<BrandBuild, CoreError>)> {
    brands
        .iter()
        .map(|&brand| (brand, build_brand(source, brand, options)))
        .collect()
}

/// Merge and validate without rendering, returning every issue found.
pub fn check_brand(
    source: &impl TokenSource,
    brand: Brand,
    options: MergeOptions,
) -> Result<Vec<ValidationIssue>, CoreError> {
    let resolved = resolve_brand(source, brand, options)?;
    let tree = resolved.tree();
    let issues = validate_tree(&tree);

    // Collisions are reported through the error path of every platform.
    for &platform in Platform::ALL {
        flatten(&tree, platform)?;
    }

    Ok(issues)
}

/// The flat identifier map a brand resolves to, without touching disk.
pub fn resolve_module(
    source: &impl TokenSource,
    brand: Brand,
    options: MergeOptions,
) -> Result<TokenModule, CoreError> {
    let resolved = resolve_brand(source, brand, options)?;
    let flat = flatten(&resolved.tree(), Platform::Json)?;
    Ok(TokenModule::from_flat(&flat))
}
