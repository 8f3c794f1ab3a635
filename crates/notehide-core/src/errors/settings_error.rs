/// Settings store and whitelist editing errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings load failed: {reason}")]
    LoadFailed { reason: String },

    #[error("settings write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("account handle is empty")]
    EmptyHandle,

    #[error("invalid account handle {handle:?}: expected 1-15 letters, digits or underscores")]
    InvalidHandle { handle: String },

    #[error("account {handle:?} is already whitelisted")]
    AlreadyWhitelisted { handle: String },
}
