//! Token sources.
//!
//! A store hands out the shared base tree and each brand's override tree per
//! category. The filesystem layout mirrors the designers' repository:
//!
//! ```text
//! <root>/base/**/<category>.tokens.json
//! <root>/brands/<brand>/<category>.tokens.json
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;
use crate::merge::merge_trees;
use crate::models::{Brand, TokenCategory, TokenTree};

/// Anything that can supply authored token trees.
pub trait TokenSource {
    /// The shared base tree for a category, if one exists.
    fn base_tree(&self, category: TokenCategory) -> Result<Option<TokenTree>, CoreError>;

    /// A brand's override tree for a category, if one exists.
    fn brand_tree(
        &self,
        brand: Brand,
        category: TokenCategory,
    ) -> Result<Option<TokenTree>, CoreError>;
}

/// Token sources read from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsTokenStore {
    root: PathBuf,
}

impl FsTokenStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn base_dir(&self) -> PathBuf {
        self.root.join("base")
    }

    fn brand_dir(&self, brand: Brand) -> PathBuf {
        self.root.join("brands").join(brand.as_str())
    }
}

impl TokenSource for FsTokenStore {
    fn base_tree(&self, category: TokenCategory) -> Result<Option<TokenTree>, CoreError> {
        let base_dir = self.base_dir();
        if !base_dir.is_dir() {
            tracing::warn!(path = %base_dir.display(), "Base token directory does not exist");
            return Ok(None);
        }

        let file_name = category.file_name();
        let mut merged: Option<TokenTree> = None;

        for entry in WalkDir::new(&base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || entry.file_name().to_str() != Some(&file_name) {
                continue;
            }
            let tree = load_tree_file(entry.path(), category)?;
            merged = Some(match merged {
                Some(acc) => merge_trees(&acc, &tree),
                None => tree,
            });
        }

        Ok(merged)
    }

    fn brand_tree(
        &self,
        brand: Brand,
        category: TokenCategory,
    ) -> Result<Option<TokenTree>, CoreError> {
        let path = self.brand_dir(brand).join(category.file_name());
        if !path.is_file() {
            return Ok(None);
        }
        load_tree_file(&path, category).map(Some)
    }
}

/// Read and parse one token source file.
pub fn load_tree_file(path: &Path, category: TokenCategory) -> Result<TokenTree, CoreError> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| CoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let tree = TokenTree::from_value(&value).map_err(|e| match e {
        CoreError::InvalidTree { path: at, message } => CoreError::InvalidTree {
            path: at,
            message: format!("{message} (in {})", path.display()),
        },
        other => other,
    })?;

    ensure_category_root(&tree, category, &path.display().to_string())?;

    tracing::debug!(path = %path.display(), leaves = tree.leaf_count(), "Loaded token file");
    Ok(tree)
}

/// A category tree may only hold its own root group, so one category can
/// never override another's leaves once the categories are folded together.
pub fn ensure_category_root(
    tree: &TokenTree,
    category: TokenCategory,
    origin: &str,
) -> Result<(), CoreError> {
    match tree.names().find(|&name| name != category.as_str()) {
        Some(foreign) => Err(CoreError::InvalidTree {
            path: foreign.to_string(),
            message: format!("root key in {category} tokens from {origin}"),
        }),
        None => Ok(()),
    }
}

/// In-memory token sources, handy for fixtures and generated trees.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    base: HashMap<TokenCategory, TokenTree>,
    brands: HashMap<(Brand, TokenCategory), TokenTree>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, category: TokenCategory, tree: TokenTree) -> Self {
        self.base.insert(category, tree);
        self
    }

    pub fn with_brand(mut self, brand: Brand, category: TokenCategory, tree: TokenTree) -> Self {
        self.brands.insert((brand, category), tree);
        self
    }
}

impl TokenSource for MemoryTokenStore {
    fn base_tree(&self, category: TokenCategory) -> Result<Option<TokenTree>, CoreError> {
        Ok(self.base.get(&category).cloned())
    }

    fn brand_tree(
        &self,
        brand: Brand,
        category: TokenCategory,
    ) -> Result<Option<TokenTree>, CoreError> {
        Ok(self.brands.get(&(brand, category)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenValue;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_reads_brand_and_base_files() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "base/design.tokens.json",
            r#"{"design": {"border": {"width": {"value": "1px", "type": "borderWidth"}}}}"#,
        );
        write(
            dir.path(),
            "brands/ixiptla/design.tokens.json",
            r#"{"design": {"border": {"width": {"value": "2px", "type": "borderWidth"}}}}"#,
        );

        let store = FsTokenStore::new(dir.path());
        let base = store.base_tree(TokenCategory::Design).unwrap().unwrap();
        let brand = store
            .brand_tree(Brand::Ixiptla, TokenCategory::Design)
            .unwrap()
            .unwrap();
        assert_eq!(base.token("design.border.width").unwrap().value, TokenValue::from("1px"));
        assert_eq!(brand.token("design.border.width").unwrap().value, TokenValue::from("2px"));

        assert!(store
            .brand_tree(Brand::Obsidiana, TokenCategory::Design)
            .unwrap()
            .is_none());
        assert!(store.base_tree(TokenCategory::Font).unwrap().is_none());
    }

    #[test]
    fn test_nested_base_files_merge_in_path_order() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "base/a/color.tokens.json",
            r##"{"color": {"info": {"light": {"default": {"value": "#000000", "type": "color"}}}}}"##,
        );
        write(
            dir.path(),
            "base/b/color.tokens.json",
            r##"{"color": {"info": {"light": {"default": {"value": "#ffffff", "type": "color"}, "content": {"value": "#111111", "type": "color"}}}}}"##,
        );

        let store = FsTokenStore::new(dir.path());
        let base = store.base_tree(TokenCategory::Color).unwrap().unwrap();
        assert_eq!(base.leaf_count(), 2);
        assert_eq!(
            base.token("color.info.light.default").unwrap().value,
            TokenValue::from("#ffffff")
        );
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "brands/ixiptla/font.tokens.json", "{ not json");

        let store = FsTokenStore::new(dir.path());
        let err = store
            .brand_tree(Brand::Ixiptla, TokenCategory::Font)
            .unwrap_err();
        assert!(matches!(err, CoreError::Json { .. }));
        assert!(err.to_string().contains("font.tokens.json"));
    }

    #[test]
    fn test_foreign_root_key_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "brands/ixiptla/design.tokens.json",
            r##"{"design": {}, "color": {"primary": {"value": "#000000", "type": "color"}}}"##,
        );

        let store = FsTokenStore::new(dir.path());
        let err = store
            .brand_tree(Brand::Ixiptla, TokenCategory::Design)
            .unwrap_err();
        match err {
            CoreError::InvalidTree { path, message } => {
                assert_eq!(path, "color");
                assert!(message.contains("design.tokens.json"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
