use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the library: configuration validation and the
/// zero-vector normalization precondition. Collision resolution itself has
/// no error path (a degenerate quadratic skips the reflection for that tick).
#[derive(Debug, Error)]
pub enum Error {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("agent count must be positive")]
    NoAgents,

    #[error("particle lifetime must be positive")]
    ZeroLifetime,

    #[error("obstacle radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("cannot normalize a zero-length direction vector")]
    ZeroDirection,

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
