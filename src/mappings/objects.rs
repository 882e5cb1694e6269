//! Names for plane, encoder and connector enumerations and mode bits

use super::CodeTable;
use serde::{Deserialize, Serialize};

/// `DRM_PLANE_TYPE_*`, the values of a plane's `TYPE` property
pub const PLANE_TYPES: CodeTable = CodeTable::new(
    &[
        (0, "DRM_PLANE_TYPE_OVERLAY"),
        (1, "DRM_PLANE_TYPE_PRIMARY"),
        (2, "DRM_PLANE_TYPE_CURSOR"),
    ],
    "???",
);

/// `DRM_MODE_ENCODER_*`
pub const ENCODER_TYPES: CodeTable = CodeTable::new(
    &[
        (0, "DRM_MODE_ENCODER_NONE"),
        (1, "DRM_MODE_ENCODER_DAC"),
        (2, "DRM_MODE_ENCODER_TMDS"),
        (3, "DRM_MODE_ENCODER_LVDS"),
        (4, "DRM_MODE_ENCODER_TVDAC"),
        (5, "DRM_MODE_ENCODER_VIRTUAL"),
        (6, "DRM_MODE_ENCODER_DSI"),
        (7, "DRM_MODE_ENCODER_DPMST"),
        (8, "DRM_MODE_ENCODER_DPI"),
    ],
    "unknown",
);

/// `DRM_MODE_CONNECTOR_*`
pub const CONNECTOR_TYPES: CodeTable = CodeTable::new(
    &[
        (0, "DRM_MODE_CONNECTOR_Unknown"),
        (1, "DRM_MODE_CONNECTOR_VGA"),
        (2, "DRM_MODE_CONNECTOR_DVII"),
        (3, "DRM_MODE_CONNECTOR_DVID"),
        (4, "DRM_MODE_CONNECTOR_DVIA"),
        (5, "DRM_MODE_CONNECTOR_Composite"),
        (6, "DRM_MODE_CONNECTOR_SVIDEO"),
        (7, "DRM_MODE_CONNECTOR_LVDS"),
        (8, "DRM_MODE_CONNECTOR_Component"),
        (9, "DRM_MODE_CONNECTOR_9PinDIN"),
        (10, "DRM_MODE_CONNECTOR_DisplayPort"),
        (11, "DRM_MODE_CONNECTOR_HDMIA"),
        (12, "DRM_MODE_CONNECTOR_HDMIB"),
        (13, "DRM_MODE_CONNECTOR_TV"),
        (14, "DRM_MODE_CONNECTOR_eDP"),
        (15, "DRM_MODE_CONNECTOR_VIRTUAL"),
        (16, "DRM_MODE_CONNECTOR_DSI"),
        (17, "DRM_MODE_CONNECTOR_DPI"),
        (18, "DRM_MODE_CONNECTOR_WRITEBACK"),
        (19, "DRM_MODE_CONNECTOR_SPI"),
        (20, "DRM_MODE_CONNECTOR_USB"),
    ],
    "unknown",
);

/// `connection` field of a connector
pub const CONNECTION_STATES: CodeTable = CodeTable::new(
    &[
        (1, "DRM_MODE_CONNECTED"),
        (2, "DRM_MODE_DISCONNECTED"),
        (3, "DRM_MODE_UNKNOWNCONNECTION"),
    ],
    "unknown",
);

/// Kernel `enum subpixel_order` as reported by `MODE_GETCONNECTOR`
pub const SUBPIXEL_ORDERS: CodeTable = CodeTable::new(
    &[
        (0, "DRM_MODE_SUBPIXEL_UNKNOWN"),
        (1, "DRM_MODE_SUBPIXEL_HORIZONTAL_RGB"),
        (2, "DRM_MODE_SUBPIXEL_HORIZONTAL_BGR"),
        (3, "DRM_MODE_SUBPIXEL_VERTICAL_RGB"),
        (4, "DRM_MODE_SUBPIXEL_VERTICAL_BGR"),
        (5, "DRM_MODE_SUBPIXEL_NONE"),
    ],
    "unknown",
);

/// Single-bit `DRM_MODE_FLAG_*` values, keyed by mask
pub const MODE_FLAGS: CodeTable = CodeTable::new(
    &[
        (1 << 0, "PHSYNC"),
        (1 << 1, "NHSYNC"),
        (1 << 2, "PVSYNC"),
        (1 << 3, "NVSYNC"),
        (1 << 4, "INTERLACE"),
        (1 << 5, "DBLSCAN"),
        (1 << 6, "CSYNC"),
        (1 << 7, "PCSYNC"),
        (1 << 8, "NCSYNC"),
        (1 << 9, "HSKEW"),
        (1 << 10, "BCAST"),
        (1 << 11, "PIXMUX"),
        (1 << 12, "DBLCLK"),
        (1 << 13, "CLKDIV2"),
    ],
    "",
);

/// Single-bit `DRM_MODE_TYPE_*` values, keyed by mask
pub const MODE_TYPES: CodeTable = CodeTable::new(
    &[
        (1 << 0, "BUILTIN"),
        (1 << 1, "CLOCK_C"),
        (1 << 2, "CRTC_C"),
        (1 << 3, "PREFERRED"),
        (1 << 4, "DEFAULT"),
        (1 << 5, "USERDEF"),
        (1 << 6, "DRIVER"),
    ],
    "",
);

/// Classification of a plane from its `TYPE` property
///
/// `Unclassified` is used when the plane exposes no `TYPE` property at
/// all, so a missing property can never be mistaken for an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneKind {
    /// `DRM_PLANE_TYPE_OVERLAY`
    Overlay,
    /// `DRM_PLANE_TYPE_PRIMARY`
    Primary,
    /// `DRM_PLANE_TYPE_CURSOR`
    Cursor,
    /// `TYPE` property with a value outside the known range
    Unknown(u64),
    /// No `TYPE` property found
    Unclassified,
}

impl PlaneKind {
    /// Map a `TYPE` property value to a kind
    pub fn from_type_value(value: u64) -> Self {
        match value {
            0 => PlaneKind::Overlay,
            1 => PlaneKind::Primary,
            2 => PlaneKind::Cursor,
            other => PlaneKind::Unknown(other),
        }
    }

    /// Display label, `???` for unknown and unclassified planes
    pub fn label(&self) -> &'static str {
        match self {
            PlaneKind::Overlay => PLANE_TYPES.name(0),
            PlaneKind::Primary => PLANE_TYPES.name(1),
            PlaneKind::Cursor => PLANE_TYPES.name(2),
            PlaneKind::Unknown(_) | PlaneKind::Unclassified => PLANE_TYPES.fallback(),
        }
    }
}

impl std::fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
