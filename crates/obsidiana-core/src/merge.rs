//! Brand resolution: shared base trees overlaid with a brand's overrides.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::models::{Brand, TokenCategory, TokenNode, TokenTree};
use crate::store::{ensure_category_root, TokenSource};

/// Overlay `overrides` on `base`, returning a new tree.
///
/// Leaves present in both take the override; base-only paths are kept as is;
/// groups union recursively. When one side holds a leaf and the other a group
/// at the same key, the override node replaces the base node.
pub fn merge_trees(base: &TokenTree, overrides: &TokenTree) -> TokenTree {
    let mut merged = base.clone();
    for (name, over) in overrides.iter() {
        let node = match (base.get(name), over) {
            (Some(TokenNode::Group(base_group)), TokenNode::Group(over_group)) => {
                TokenNode::Group(merge_trees(base_group, over_group))
            }
            (Some(existing), replacement) => {
                if std::mem::discriminant(existing) != std::mem::discriminant(replacement) {
                    tracing::debug!(key = %name, "Override changes node kind, replacing base node");
                }
                replacement.clone()
            }
            (None, added) => added.clone(),
        };
        merged.insert(name.clone(), node);
    }
    merged
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Accept categories the brand does not override, using the base tree
    /// alone. Without it a missing brand tree is an error.
    pub allow_base_only: bool,
}

/// A brand's merged trees, one per category.
#[derive(Debug, Clone)]
pub struct ResolvedTokens {
    pub brand: Brand,
    categories: BTreeMap<TokenCategory, TokenTree>,
}

impl ResolvedTokens {
    pub fn category(&self, category: TokenCategory) -> Option<&TokenTree> {
        self.categories.get(&category)
    }

    /// Every category folded into one tree (roots `color`, `design`, `font`).
    pub fn tree(&self) -> TokenTree {
        self.categories
            .values()
            .fold(TokenTree::new(), |acc, tree| merge_trees(&acc, tree))
    }
}

/// Merge base and brand trees for every category.
pub fn resolve_brand(
    source: &impl TokenSource,
    brand: Brand,
    options: MergeOptions,
) -> Result<ResolvedTokens, CoreError> {
    let mut categories = BTreeMap::new();

    for &category in TokenCategory::ALL {
        let base = source.base_tree(category)?;
        let overrides = source.brand_tree(brand, category)?;
        if let Some(tree) = &base {
            ensure_category_root(tree, category, "base")?;
        }
        if let Some(tree) = &overrides {
            ensure_category_root(tree, category, brand.as_str())?;
        }

        let merged = match (base, overrides) {
            (Some(base), Some(overrides)) => merge_trees(&base, &overrides),
            (None, Some(overrides)) => overrides,
            (Some(base), None) if options.allow_base_only => {
                tracing::warn!(%brand, %category, "Brand has no overrides, using base tokens");
                base
            }
            _ => return Err(CoreError::MissingBrandTokens { brand, category }),
        };

        tracing::debug!(%brand, %category, leaves = merged.leaf_count(), "Merged category");
        categories.insert(category, merged);
    }

    Ok(ResolvedTokens { brand, categories })
}
