//! CLI error types.

use std::path::PathBuf;

use folio_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{} is outside the site root {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("{0}")]
    Validation(String),
}
