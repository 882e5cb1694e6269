//! The kernel interface as seen by the report builders
//!
//! [`KmsDevice`] is the seam between the report code and the DRM ioctls.
//! [`Card`] implements it on a real device node; tests substitute a mock.
//! Every query hands back an owned record, so dropping the record is the
//! only release there is and it happens exactly once on every path.

mod card;

pub use card::Card;

use crate::ioctl;
use serde::{Deserialize, Serialize};
use std::io;

/// Driver identity from `DRM_IOCTL_VERSION`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverVersion {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
    /// Patch level
    pub patchlevel: i32,
    /// Driver name, e.g. `i915`
    pub name: String,
    /// Driver date string
    pub date: String,
    /// Free-form description
    pub desc: String,
}

/// Top-level mode resources of a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardResources {
    /// Framebuffer ids
    pub framebuffers: Vec<u32>,
    /// CRTC ids; a CRTC's position here is its index in `possible_crtcs` masks
    pub crtcs: Vec<u32>,
    /// Connector ids
    pub connectors: Vec<u32>,
    /// Encoder ids
    pub encoders: Vec<u32>,
    /// Minimum framebuffer width
    pub min_width: u32,
    /// Maximum framebuffer width
    pub max_width: u32,
    /// Minimum framebuffer height
    pub min_height: u32,
    /// Maximum framebuffer height
    pub max_height: u32,
}

/// One plane from `MODE_GETPLANE`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneRecord {
    pub id: u32,
    pub crtc_id: u32,
    pub fb_id: u32,
    /// Bitmask of CRTC indices that can drive this plane
    pub possible_crtcs: u32,
    pub gamma_size: u32,
    /// Supported fourcc formats
    pub formats: Vec<u32>,
}

/// Property id/value pair attached to a mode object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub id: u32,
    pub value: u64,
}

/// Property metadata from `MODE_GETPROPERTY`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub id: u32,
    pub name: String,
    pub flags: u32,
}

/// One encoder from `MODE_GETENCODER`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderRecord {
    pub id: u32,
    pub encoder_type: u32,
    /// Currently assigned CRTC, 0 when unassigned
    pub crtc_id: u32,
    pub possible_crtcs: u32,
    pub possible_clones: u32,
}

/// Display mode timings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub name: String,
    /// Pixel clock in kHz
    pub clock: u32,
    pub hdisplay: u16,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub hskew: u16,
    pub vdisplay: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    pub vscan: u16,
    pub vrefresh: u32,
    pub flags: u32,
    pub mode_type: u32,
}

impl From<&ioctl::DrmModeModeInfo> for ModeInfo {
    fn from(raw: &ioctl::DrmModeModeInfo) -> Self {
        Self {
            name: ioctl::fixed_name(&raw.name),
            clock: raw.clock,
            hdisplay: raw.hdisplay,
            hsync_start: raw.hsync_start,
            hsync_end: raw.hsync_end,
            htotal: raw.htotal,
            hskew: raw.hskew,
            vdisplay: raw.vdisplay,
            vsync_start: raw.vsync_start,
            vsync_end: raw.vsync_end,
            vtotal: raw.vtotal,
            vscan: raw.vscan,
            vrefresh: raw.vrefresh,
            flags: raw.flags,
            mode_type: raw.type_,
        }
    }
}

/// One connector from `MODE_GETCONNECTOR`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRecord {
    pub id: u32,
    pub connector_type: u32,
    pub connector_type_id: u32,
    pub connection: u32,
    /// Current encoder, 0 when none
    pub encoder_id: u32,
    pub mm_width: u32,
    pub mm_height: u32,
    pub subpixel: u32,
    /// Encoders this connector can be attached to
    pub encoders: Vec<u32>,
    pub modes: Vec<ModeInfo>,
}

/// One CRTC from `MODE_GETCRTC`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtcRecord {
    pub id: u32,
    pub fb_id: u32,
    pub x: u32,
    pub y: u32,
    pub gamma_size: u32,
    /// Active mode, `None` when the CRTC is off
    pub mode: Option<ModeInfo>,
}

/// Mode object types for property queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Crtc,
    Connector,
    Encoder,
    Plane,
}

impl ObjectKind {
    /// `DRM_MODE_OBJECT_*` value
    pub fn code(self) -> u32 {
        match self {
            ObjectKind::Crtc => ioctl::DRM_MODE_OBJECT_CRTC,
            ObjectKind::Connector => ioctl::DRM_MODE_OBJECT_CONNECTOR,
            ObjectKind::Encoder => ioctl::DRM_MODE_OBJECT_ENCODER,
            ObjectKind::Plane => ioctl::DRM_MODE_OBJECT_PLANE,
        }
    }
}

/// Read-only KMS queries plus client capability opt-in
///
/// Object lookups take the id returned by the matching list query.
#[cfg_attr(test, mockall::automock)]
pub trait KmsDevice {
    /// Driver name and version
    fn driver_version(&self) -> io::Result<DriverVersion>;

    /// Value of one `DRM_CAP_*`
    fn get_cap(&self, cap: u64) -> io::Result<u64>;

    /// Opt into one `DRM_CLIENT_CAP_*`
    fn set_client_cap(&self, cap: u64, value: u64) -> io::Result<()>;

    /// CRTC, connector, encoder and framebuffer id lists
    fn card_resources(&self) -> io::Result<CardResources>;

    /// Plane ids visible under the current client capabilities
    fn plane_ids(&self) -> io::Result<Vec<u32>>;

    fn plane(&self, id: u32) -> io::Result<PlaneRecord>;

    /// Properties attached to a mode object
    fn object_properties(&self, id: u32, kind: ObjectKind) -> io::Result<Vec<PropertyValue>>;

    fn property(&self, id: u32) -> io::Result<PropertyInfo>;

    fn encoder(&self, id: u32) -> io::Result<EncoderRecord>;

    fn connector(&self, id: u32) -> io::Result<ConnectorRecord>;

    fn crtc(&self, id: u32) -> io::Result<CrtcRecord>;
}
