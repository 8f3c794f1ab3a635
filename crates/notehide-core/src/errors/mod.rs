//! Error taxonomy for the pipeline.
//!
//! Only outer APIs (config parsing, whitelist editing, store writes) return
//! these. The classification path recovers locally and never propagates them.

mod config_error;
mod document_error;
mod selector_error;
mod settings_error;

pub use config_error::ConfigError;
pub use document_error::DocumentError;
pub use selector_error::SelectorError;
pub use settings_error::SettingsError;

/// Top-level error for every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum NotehideError {
    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type NotehideResult<T> = Result<T, NotehideError>;
