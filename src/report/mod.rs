//! Query and print procedures
//!
//! Each section is gathered into owned entries first and then written,
//! so the builders can be driven by a mock device and checked without a
//! GPU. [`run`] streams every section in order; a fatal error leaves the
//! sections already written in place.

pub mod caps;
pub mod outputs;
pub mod planes;

pub use caps::CapEntry;
pub use planes::PlaneEntry;

use crate::device::{CardResources, ConnectorRecord, CrtcRecord, DriverVersion, EncoderRecord, KmsDevice};
use crate::error::{ProbeError, ProbeResult};
use crate::mappings::ClientCap;
use serde::Serialize;
use std::io::{self, Write};

/// Section titles, in print order
pub mod sections {
    pub const DRIVER: &str = "DRIVER";
    pub const CAPS: &str = "CAPS";
    pub const LEGACY_PLANES: &str = "WITHOUT UNIVERSAL PLANES";
    pub const UNIVERSAL_PLANES: &str = "WITH UNIVERSAL PLANES";
    pub const ENCODERS: &str = "ENCODERS";
    pub const CONNECTORS: &str = "CONNECTORS";
    pub const CRTCS: &str = "CRTCS";
}

/// Which planes the kernel enumerates for this file descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaneVisibility {
    /// Primary and cursor planes are hidden
    Legacy,
    /// All planes are visible
    Universal,
}

/// Query state for one open device
///
/// Plane visibility only ever moves from `Legacy` to `Universal`.
pub struct Probe<'d, D: KmsDevice> {
    device: &'d D,
    visibility: PlaneVisibility,
}

impl<'d, D: KmsDevice> Probe<'d, D> {
    /// Start in legacy plane visibility
    pub fn new(device: &'d D) -> Self {
        Self {
            device,
            visibility: PlaneVisibility::Legacy,
        }
    }

    /// Current plane visibility
    pub fn visibility(&self) -> PlaneVisibility {
        self.visibility
    }

    /// Driver identity, `None` if the driver does not answer
    pub fn driver(&self) -> Option<DriverVersion> {
        match self.device.driver_version() {
            Ok(version) => Some(version),
            Err(e) => {
                log::debug!("driver version query failed: {}", e);
                None
            }
        }
    }

    /// Values of the reported driver capabilities
    pub fn caps(&self) -> Vec<CapEntry> {
        caps::query_caps(self.device)
    }

    /// Planes visible under the current visibility
    pub fn planes(&self) -> ProbeResult<Vec<PlaneEntry>> {
        planes::query_planes(self.device)
    }

    /// Opt into universal planes, then atomic
    ///
    /// Both capabilities are required; either refusal is fatal. Calling
    /// this again after success issues nothing.
    pub fn enable_universal_planes(&mut self) -> ProbeResult<()> {
        if self.visibility == PlaneVisibility::Universal {
            return Ok(());
        }
        for cap in [ClientCap::UniversalPlanes, ClientCap::Atomic] {
            self.device
                .set_client_cap(cap.code(), 1)
                .map_err(|source| ProbeError::ClientCap {
                    cap: cap.name(),
                    source,
                })?;
        }
        self.visibility = PlaneVisibility::Universal;
        log::info!("universal planes enabled");
        Ok(())
    }

    /// CRTC, connector and encoder id lists
    pub fn resources(&self) -> ProbeResult<CardResources> {
        self.device.card_resources().map_err(ProbeError::Resources)
    }

    /// Encoders of `res` that answered
    pub fn encoders(&self, res: &CardResources) -> Vec<EncoderRecord> {
        outputs::query_encoders(self.device, res)
    }

    /// Connectors of `res` that answered
    pub fn connectors(&self, res: &CardResources) -> Vec<ConnectorRecord> {
        outputs::query_connectors(self.device, res)
    }

    /// CRTCs of `res` that answered
    pub fn crtcs(&self, res: &CardResources) -> Vec<CrtcRecord> {
        outputs::query_crtcs(self.device, res)
    }
}

/// Write a section heading preceded by a blank line
pub fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n--{}--", title)
}

/// Write the driver identity line
pub fn write_driver<W: Write>(out: &mut W, driver: Option<&DriverVersion>) -> io::Result<()> {
    match driver {
        Some(v) => writeln!(
            out,
            "driver: {} {}.{}.{} ({}) {}",
            v.name, v.major, v.minor, v.patchlevel, v.date, v.desc
        ),
        None => writeln!(out, "driver: unknown"),
    }
}

/// Plane listing before and after the universal planes opt-in
pub fn list_planes<D: KmsDevice, W: Write>(device: &D, out: &mut W) -> ProbeResult<()> {
    let mut probe = Probe::new(device);
    write_plane_passes(&mut probe, out)
}

fn write_plane_passes<D: KmsDevice, W: Write>(probe: &mut Probe<'_, D>, out: &mut W) -> ProbeResult<()> {
    write_heading(out, sections::LEGACY_PLANES)?;
    planes::write_planes(out, &probe.planes()?)?;
    out.flush()?;

    probe.enable_universal_planes()?;

    write_heading(out, sections::UNIVERSAL_PLANES)?;
    planes::write_planes(out, &probe.planes()?)?;
    out.flush()?;
    Ok(())
}

/// Run every section against `device`, writing text to `out`
pub fn run<D: KmsDevice, W: Write>(device: &D, out: &mut W) -> ProbeResult<()> {
    let mut probe = Probe::new(device);

    write_heading(out, sections::DRIVER)?;
    write_driver(out, probe.driver().as_ref())?;

    write_heading(out, sections::CAPS)?;
    caps::write_caps(out, &probe.caps())?;
    out.flush()?;

    write_plane_passes(&mut probe, out)?;

    let res = probe.resources()?;

    write_heading(out, sections::ENCODERS)?;
    outputs::write_encoders(out, &probe.encoders(&res))?;

    write_heading(out, sections::CONNECTORS)?;
    outputs::write_connectors(out, &probe.connectors(&res))?;

    write_heading(out, sections::CRTCS)?;
    outputs::write_crtcs(out, &probe.crtcs(&res))?;
    out.flush()?;

    Ok(())
}

/// Everything a probe run found, for machine-readable output
#[cfg(feature = "json")]
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Device node that was probed
    pub device: String,
    /// When the probe ran
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Driver identity if the driver answered
    pub driver: Option<DriverVersion>,
    /// Capability values
    pub caps: Vec<CapEntry>,
    /// Planes before the universal planes opt-in
    pub planes_legacy: Vec<PlaneEntry>,
    /// Planes after the universal planes opt-in
    pub planes_universal: Vec<PlaneEntry>,
    /// Top-level id lists and framebuffer size limits
    pub resources: CardResources,
    /// Encoders
    pub encoders: Vec<EncoderRecord>,
    /// Connectors with their modes
    pub connectors: Vec<ConnectorRecord>,
    /// CRTCs with their active mode
    pub crtcs: Vec<CrtcRecord>,
}

#[cfg(feature = "json")]
impl ProbeReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON followed by a newline
    pub fn write_json<W: Write>(&self, out: &mut W) -> ProbeResult<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Gather every section into a [`ProbeReport`]
#[cfg(feature = "json")]
pub fn collect<D: KmsDevice>(device: &D, path: &str) -> ProbeResult<ProbeReport> {
    let mut probe = Probe::new(device);
    let driver = probe.driver();
    let caps = probe.caps();
    let planes_legacy = probe.planes()?;
    probe.enable_universal_planes()?;
    let planes_universal = probe.planes()?;
    let resources = probe.resources()?;

    Ok(ProbeReport {
        device: path.to_string(),
        generated_at: chrono::Utc::now(),
        driver,
        caps,
        planes_legacy,
        planes_universal,
        encoders: probe.encoders(&resources),
        connectors: probe.connectors(&resources),
        crtcs: probe.crtcs(&resources),
        resources,
    })
}
