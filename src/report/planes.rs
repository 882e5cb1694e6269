//! Plane report: type classification and supported formats

use crate::device::{KmsDevice, ObjectKind, PlaneRecord};
use crate::error::{ProbeError, ProbeResult};
use crate::mappings::{format_bit_indices, fourcc_ascii, PlaneKind, FOURCC_FORMATS};
use serde::Serialize;
use std::io::{self, Write};

/// Name of the plane property holding its [`PlaneKind`]
pub const TYPE_PROPERTY: &str = "TYPE";

/// A plane together with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaneEntry {
    pub id: u32,
    pub kind: PlaneKind,
    /// Bitmask of CRTC indices that can drive this plane
    pub possible_crtcs: u32,
    pub crtc_id: u32,
    pub fb_id: u32,
    pub formats: Vec<u32>,
}

impl PlaneEntry {
    fn new(plane: PlaneRecord, kind: PlaneKind) -> Self {
        Self {
            id: plane.id,
            kind,
            possible_crtcs: plane.possible_crtcs,
            crtc_id: plane.crtc_id,
            fb_id: plane.fb_id,
            formats: plane.formats,
        }
    }

    /// One line per supported format; a plane without formats prints nothing
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let crtcs = format_bit_indices(self.possible_crtcs);
        for &format in &self.formats {
            let name = match FOURCC_FORMATS.get(format as u64) {
                Some(name) => name.to_string(),
                None => format!("{} ({})", FOURCC_FORMATS.fallback(), fourcc_ascii(format)),
            };
            writeln!(
                out,
                "plane {} [{}] format: {} {} crtcs: {}",
                self.id,
                self.kind,
                alternate_hex(format),
                name,
                crtcs
            )?;
        }
        Ok(())
    }
}

/// Hex with a `0x` prefix, except zero which prints as a bare `0`
fn alternate_hex(value: u32) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{:#x}", value)
    }
}

/// Classify a plane by scanning its properties for `TYPE`
///
/// The name comparison ignores case. A missing property, or a property
/// list the driver will not return, yields [`PlaneKind::Unclassified`].
pub fn classify_plane<D: KmsDevice>(device: &D, plane_id: u32) -> PlaneKind {
    let props = match device.object_properties(plane_id, ObjectKind::Plane) {
        Ok(props) => props,
        Err(e) => {
            log::debug!("plane {}: property list unavailable: {}", plane_id, e);
            return PlaneKind::Unclassified;
        }
    };

    for prop in &props {
        match device.property(prop.id) {
            Ok(info) if info.name.eq_ignore_ascii_case(TYPE_PROPERTY) => {
                return PlaneKind::from_type_value(prop.value);
            }
            Ok(_) => {}
            Err(e) => log::debug!("plane {}: property {} unavailable: {}", plane_id, prop.id, e),
        }
    }

    PlaneKind::Unclassified
}

/// Enumerate the planes the kernel currently exposes
///
/// Failing to list planes is fatal; a plane that cannot be fetched is
/// skipped.
pub fn query_planes<D: KmsDevice>(device: &D) -> ProbeResult<Vec<PlaneEntry>> {
    let ids = device.plane_ids().map_err(ProbeError::PlaneResources)?;

    let mut planes = Vec::with_capacity(ids.len());
    for id in ids {
        let plane = match device.plane(id) {
            Ok(plane) => plane,
            Err(e) => {
                log::debug!("skipping plane {}: {}", id, e);
                continue;
            }
        };
        let kind = classify_plane(device, plane.id);
        planes.push(PlaneEntry::new(plane, kind));
    }
    Ok(planes)
}

/// Write every plane's format lines
pub fn write_planes<W: Write>(out: &mut W, planes: &[PlaneEntry]) -> io::Result<()> {
    for plane in planes {
        plane.write_text(out)?;
    }
    Ok(())
}
