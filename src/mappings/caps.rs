//! Driver and client capability identifiers

use super::CodeTable;

/// `DRM_CAP_*` identifiers accepted by `DRM_IOCTL_GET_CAP`
pub const DRIVER_CAPS: CodeTable = CodeTable::new(
    &[
        (0x1, "DRM_CAP_DUMB_BUFFER"),
        (0x2, "DRM_CAP_VBLANK_HIGH_CRTC"),
        (0x3, "DRM_CAP_DUMB_PREFERRED_DEPTH"),
        (0x4, "DRM_CAP_DUMB_PREFER_SHADOW"),
        (0x5, "DRM_CAP_PRIME"),
        (0x6, "DRM_CAP_TIMESTAMP_MONOTONIC"),
        (0x7, "DRM_CAP_ASYNC_PAGE_FLIP"),
        (0x8, "DRM_CAP_CURSOR_WIDTH"),
        (0x9, "DRM_CAP_CURSOR_HEIGHT"),
        (0x10, "DRM_CAP_ADDFB2_MODIFIERS"),
        (0x11, "DRM_CAP_PAGE_FLIP_TARGET"),
        (0x12, "DRM_CAP_CRTC_IN_VBLANK_EVENT"),
        (0x13, "DRM_CAP_SYNCOBJ"),
        (0x14, "DRM_CAP_SYNCOBJ_TIMELINE"),
        (0x15, "DRM_CAP_ATOMIC_ASYNC_PAGE_FLIP"),
    ],
    "unknown",
);

/// Capabilities queried by the capability report, in print order
pub const REPORTED_CAPS: &[u64] = &[
    0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
];

/// `DRM_CLIENT_CAP_*` identifiers accepted by `DRM_IOCTL_SET_CLIENT_CAP`
pub const CLIENT_CAPS: CodeTable = CodeTable::new(
    &[
        (1, "DRM_CLIENT_CAP_STEREO_3D"),
        (2, "DRM_CLIENT_CAP_UNIVERSAL_PLANES"),
        (3, "DRM_CLIENT_CAP_ATOMIC"),
        (4, "DRM_CLIENT_CAP_ASPECT_RATIO"),
        (5, "DRM_CLIENT_CAP_WRITEBACK_CONNECTORS"),
        (6, "DRM_CLIENT_CAP_CURSOR_PLANE_HOTSPOT"),
    ],
    "unknown",
);

/// Client capabilities this tool opts into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCap {
    /// Expose primary and cursor planes in plane enumeration
    UniversalPlanes,
    /// Expose atomic modesetting properties
    Atomic,
}

impl ClientCap {
    /// Numeric identifier passed to the kernel
    pub fn code(self) -> u64 {
        match self {
            ClientCap::UniversalPlanes => 2,
            ClientCap::Atomic => 3,
        }
    }

    /// `DRM_CLIENT_CAP_*` name
    pub fn name(self) -> &'static str {
        CLIENT_CAPS.name(self.code())
    }
}
