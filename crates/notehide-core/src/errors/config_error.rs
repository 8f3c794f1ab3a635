/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {reason}")]
    Invalid { reason: String },

    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}
