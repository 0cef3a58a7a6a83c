//! Brand token module loading.
//!
//! A [`BrandLoader`] holds an ordered list of resolvers and returns the first
//! module any of them produces. When every resolver fails, the error carries
//! each failure so the caller sees why every location was rejected.

use std::collections::HashMap;
use std::path::PathBuf;

use futures::future::BoxFuture;
use futures::FutureExt;
use obsidiana_core::config::ThemesConfig;
use obsidiana_core::{Brand, Platform, TokenModule};

use crate::error::{ResolveError, ThemeError};

/// One place a brand's token module may come from.
pub trait ModuleResolver: Send + Sync {
    /// Label used in logs and load errors.
    fn name(&self) -> String;

    fn resolve(&self, brand: Brand) -> BoxFuture<'_, Result<TokenModule, ResolveError>>;
}

/// Reads `<root>/<brand>/index.json`.
#[derive(Debug, Clone)]
pub struct FileResolver {
    label: &'static str,
    root: PathBuf,
}

impl FileResolver {
    pub fn new(label: &'static str, root: impl Into<PathBuf>) -> Self {
        Self {
            label,
            root: root.into(),
        }
    }

    /// Installed design-token package.
    pub fn package(root: impl Into<PathBuf>) -> Self {
        Self::new("package", root)
    }

    /// Output of a local `obsidiana build`.
    pub fn local_build(root: impl Into<PathBuf>) -> Self {
        Self::new("local build", root)
    }

    pub fn module_path(&self, brand: Brand) -> PathBuf {
        self.root
            .join(brand.as_str())
            .join(Platform::Json.destination())
    }
}

impl ModuleResolver for FileResolver {
    fn name(&self) -> String {
        format!("{} ({})", self.label, self.root.display())
    }

    fn resolve(&self, brand: Brand) -> BoxFuture<'_, Result<TokenModule, ResolveError>> {
        let path = self.module_path(brand);
        async move {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ResolveError::NotFound(path));
                }
                Err(source) => return Err(ResolveError::Io { path, source }),
            };
            TokenModule::from_json_str(&content)
                .map_err(|source| ResolveError::Parse { path, source })
        }
        .boxed()
    }
}

/// Modules held in memory, keyed by brand.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    modules: HashMap<Brand, TokenModule>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, brand: Brand, module: TokenModule) -> Self {
        self.modules.insert(brand, module);
        self
    }
}

impl ModuleResolver for MemoryResolver {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn resolve(&self, brand: Brand) -> BoxFuture<'_, Result<TokenModule, ResolveError>> {
        let result = self
            .modules
            .get(&brand)
            .cloned()
            .ok_or_else(|| ResolveError::Missing(format!("no in-memory module for {brand}")));
        futures::future::ready(result).boxed()
    }
}

/// Tries resolvers in order until one yields a module.
#[derive(Default)]
pub struct BrandLoader {
    resolvers: Vec<Box<dyn ModuleResolver>>,
}

impl BrandLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package location first, then the local build directory.
    pub fn from_config(config: &ThemesConfig) -> Self {
        Self::new()
            .with(FileResolver::package(config.package_dir()))
            .with(FileResolver::local_build(config.build_dir.clone()))
    }

    pub fn with(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn resolver_names(&self) -> Vec<String> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub async fn load(&self, brand: Brand) -> Result<TokenModule, ThemeError> {
        let mut causes = Vec::with_capacity(self.resolvers.len());

        for resolver in &self.resolvers {
            let name = resolver.name();
            match resolver.resolve(brand).await {
                Ok(module) => {
                    if module.is_empty() {
                        tracing::warn!(%brand, resolver = %name, "Token module is empty");
                    }
                    tracing::debug!(
                        %brand,
                        resolver = %name,
                        tokens = module.len(),
                        "Loaded token module"
                    );
                    return Ok(module);
                }
                Err(e) => {
                    tracing::debug!(%brand, resolver = %name, error = %e, "Resolver failed");
                    causes.push(format!("{name}: {e}"));
                }
            }
        }

        Err(ThemeError::TokenModuleLoad { brand, causes })
    }

    /// Load by brand name; names outside the known brands fail up front.
    pub async fn load_by_name(&self, name: &str) -> Result<TokenModule, ThemeError> {
        let brand: Brand = name
            .parse()
            .map_err(|_| ThemeError::UnknownBrand(name.to_string()))?;
        self.load(brand).await
    }
}
