use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Construction problems surface as `InvalidConfig`; nothing inside a running
/// simulation is fallible except explicit misuse of the histogram API.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected simulation configuration (raised before any state is built).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument to a runtime API call.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Reading a configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for `SimulationConfig`.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Exporting state as JSON failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
