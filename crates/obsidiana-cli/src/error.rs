use obsidiana_core::CoreError;
use obsidiana_themes::ThemeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error("{failed} of {total} brand(s) failed")]
    BrandsFailed { failed: usize, total: usize },

    #[error("{0} validation issue(s) found")]
    Invalid(usize),
}
