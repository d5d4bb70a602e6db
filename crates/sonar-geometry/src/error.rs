//! Geometry loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating level geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("failed to read level '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("hull of vessel {0} has fewer than three vertices")]
    DegenerateHull(u32),

    #[error("terrain bucket size must be positive, got {0}")]
    InvalidBucketSize(f32),
}
