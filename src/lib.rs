//! # KMSPROBE - DRM/KMS resource listing via IOCTLs
//!
//! A small Rust library for enumerating the display resources of a Linux
//! DRM device node through direct kernel IOCTL communication.
//!
//! ## Features
//!
//! - **Driver capabilities** (`DRM_CAP_*`)
//! - **Planes** before and after the universal planes opt-in, with their
//!   type, formats and the CRTCs that can drive them
//! - **Encoders, connectors and CRTCs** including mode timings
//! - **JSON export** of the full probe (feature `json`)
//! - **Mockable device seam** so every report runs without a GPU
//!
//! ## Quick Start
//!
//! ```no_run
//! use kmsprobe::{Card, DEFAULT_DEVICE};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let card = Card::open(DEFAULT_DEVICE)?;
//!     kmsprobe::run(&card, &mut std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

#[allow(missing_docs)]
pub mod device;
pub mod error;
#[allow(missing_docs)]
pub mod ioctl;
pub mod mappings;
#[allow(missing_docs)]
pub mod report;

// Re-export main API for easy access
pub use device::{Card, KmsDevice};
pub use error::{ProbeError, ProbeResult};
pub use mappings::{bit_indices, CodeTable, PlaneKind};
pub use report::{list_planes, run, CapEntry, PlaneEntry, PlaneVisibility, Probe};

#[cfg(feature = "json")]
pub use report::{collect, ProbeReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Device node probed when none is given
pub const DEFAULT_DEVICE: &str = "/dev/dri/card0";

/// Get library information
///
/// # Example
///
/// ```no_run
/// println!("Using kmsprobe v{}", kmsprobe::version());
/// ```
pub fn version() -> &'static str {
    VERSION
}


/// Prelude module for convenient imports
///
/// # Example
///
/// ```no_run
/// use kmsprobe::prelude::*;
///
/// let card = Card::open(DEFAULT_DEVICE)?;
/// list_planes(&card, &mut std::io::stdout())?;
/// # Ok::<(), ProbeError>(())
/// ```
pub mod prelude {
    pub use crate::device::{Card, KmsDevice};
    pub use crate::error::{ProbeError, ProbeResult};
    pub use crate::report::{list_planes, run, Probe};
    pub use crate::{version, DEFAULT_DEVICE};
}
