//! Driver capability report

use crate::device::KmsDevice;
use crate::mappings::{DRIVER_CAPS, REPORTED_CAPS};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// One queried capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapEntry {
    /// `DRM_CAP_*` identifier
    pub id: u64,
    /// `DRM_CAP_*` name
    pub name: &'static str,
    /// Value, `None` when the driver rejected the query
    pub value: Option<u64>,
}

impl fmt::Display for CapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}: {}", self.name, value),
            None => write!(f, "{}: unsupported", self.name),
        }
    }
}

/// Query every capability in [`REPORTED_CAPS`]
pub fn query_caps<D: KmsDevice>(device: &D) -> Vec<CapEntry> {
    REPORTED_CAPS
        .iter()
        .map(|&id| {
            let value = match device.get_cap(id) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::debug!("{} query failed: {}", DRIVER_CAPS.name(id), e);
                    None
                }
            };
            CapEntry {
                id,
                name: DRIVER_CAPS.name(id),
                value,
            }
        })
        .collect()
}

/// One line per capability
pub fn write_caps<W: Write>(out: &mut W, caps: &[CapEntry]) -> io::Result<()> {
    for cap in caps {
        writeln!(out, "{}", cap)?;
    }
    Ok(())
}
