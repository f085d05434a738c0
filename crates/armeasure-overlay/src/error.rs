/// An error type for loading and validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Error when a style value is out of range.
    #[error("Invalid overlay style: {0}")]
    InvalidStyle(String),

    /// Error when the near and far clipping planes are not `0 < near < far`.
    #[error("Invalid clipping planes (near: {0}, far: {1})")]
    InvalidClipPlanes(f32, f32),

    /// Error to read the configuration file.
    #[error("Failed to read the configuration file. {0}")]
    Io(#[from] std::io::Error),

    /// Error when the configuration cannot be parsed.
    #[error("Failed to parse the overlay configuration. {0}")]
    Parse(#[from] serde_json::Error),
}
