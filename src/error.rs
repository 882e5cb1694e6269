//! Error types for the kmsprobe library

use std::io;
use thiserror::Error;

/// Fatal errors of a probe run
///
/// Anything that is not listed here (one plane, encoder, connector or
/// CRTC failing to answer) is skipped by the report builders instead.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Failed to open the device node
    #[error("Cannot open card {path}: {source}")]
    DeviceOpen {
        /// Path that was opened
        path: String,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Failed to fetch the CRTC/connector/encoder id lists
    #[error("Could not get card resources: {0}")]
    Resources(#[source] io::Error),

    /// Failed to fetch the plane id list
    #[error("Could not get plane resources: {0}")]
    PlaneResources(#[source] io::Error),

    /// The kernel refused a client capability opt-in
    #[error("Failed to set client capability {cap}: {source}")]
    ClientCap {
        /// Name of the capability, e.g. `DRM_CLIENT_CAP_ATOMIC`
        cap: &'static str,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),

    /// JSON serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Process exit code the binaries use for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::DeviceOpen { .. } => 1,
            ProbeError::Resources(_) | ProbeError::PlaneResources(_) => 2,
            ProbeError::ClientCap { .. } => 3,
            ProbeError::Output(_) => 4,
            #[cfg(feature = "json")]
            ProbeError::Json(_) => 4,
        }
    }
}

/// Result type for kmsprobe operations
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
