use std::path::{Path, PathBuf};

use crate::error::ThemeError;
use crate::generator::{ThemeFormat, ThemeSet};

/// Write every format of a theme set under `out_dir`, returning the paths.
///
/// Layout: `daisyui/<brand>.css`, `mui/<brand>.json`, `shadcn/<brand>.css`.
pub async fn write_theme_set(out_dir: &Path, set: &ThemeSet) -> Result<Vec<PathBuf>, ThemeError> {
    let mut written = Vec::with_capacity(ThemeFormat::ALL.len());

    for &format in ThemeFormat::ALL {
        let path = out_dir.join(format.relative_path(set.brand));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, set.render(format)?).await?;
        tracing::debug!(brand = %set.brand, %format, path = %path.display(), "Wrote theme");
        written.push(path);
    }

    Ok(written)
}
