//! DRM fourcc pixel format names (`drm_fourcc.h`)

use super::CodeTable;

/// Build a little-endian fourcc code from its four characters
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    (code[0] as u32) | ((code[1] as u32) << 8) | ((code[2] as u32) << 16) | ((code[3] as u32) << 24)
}

const fn fc(code: &[u8; 4]) -> u64 {
    fourcc(code) as u64
}

/// `DRM_FORMAT_XRGB8888`, the format every KMS driver supports
pub const DRM_FORMAT_XRGB8888: u32 = fourcc(b"XR24");

/// Known pixel formats; unknown codes report `NOT FOUND`
pub const FOURCC_FORMATS: CodeTable = CodeTable::new(
    &[
        // indexed / single channel
        (fc(b"C8  "), "DRM_FORMAT_C8"),
        (fc(b"R8  "), "DRM_FORMAT_R8"),
        (fc(b"R16 "), "DRM_FORMAT_R16"),
        (fc(b"RG88"), "DRM_FORMAT_RG88"),
        (fc(b"GR88"), "DRM_FORMAT_GR88"),
        (fc(b"RG32"), "DRM_FORMAT_RG1616"),
        (fc(b"GR32"), "DRM_FORMAT_GR1616"),
        // 8 bpp RGB
        (fc(b"RGB8"), "DRM_FORMAT_RGB332"),
        (fc(b"BGR8"), "DRM_FORMAT_BGR233"),
        // 16 bpp RGB
        (fc(b"XR12"), "DRM_FORMAT_XRGB4444"),
        (fc(b"XB12"), "DRM_FORMAT_XBGR4444"),
        (fc(b"RX12"), "DRM_FORMAT_RGBX4444"),
        (fc(b"BX12"), "DRM_FORMAT_BGRX4444"),
        (fc(b"AR12"), "DRM_FORMAT_ARGB4444"),
        (fc(b"AB12"), "DRM_FORMAT_ABGR4444"),
        (fc(b"RA12"), "DRM_FORMAT_RGBA4444"),
        (fc(b"BA12"), "DRM_FORMAT_BGRA4444"),
        (fc(b"XR15"), "DRM_FORMAT_XRGB1555"),
        (fc(b"XB15"), "DRM_FORMAT_XBGR1555"),
        (fc(b"RX15"), "DRM_FORMAT_RGBX5551"),
        (fc(b"BX15"), "DRM_FORMAT_BGRX5551"),
        (fc(b"AR15"), "DRM_FORMAT_ARGB1555"),
        (fc(b"AB15"), "DRM_FORMAT_ABGR1555"),
        (fc(b"RA15"), "DRM_FORMAT_RGBA5551"),
        (fc(b"BA15"), "DRM_FORMAT_BGRA5551"),
        (fc(b"RG16"), "DRM_FORMAT_RGB565"),
        (fc(b"BG16"), "DRM_FORMAT_BGR565"),
        // 24 bpp RGB
        (fc(b"RG24"), "DRM_FORMAT_RGB888"),
        (fc(b"BG24"), "DRM_FORMAT_BGR888"),
        // 32 bpp RGB
        (fc(b"XR24"), "DRM_FORMAT_XRGB8888"),
        (fc(b"XB24"), "DRM_FORMAT_XBGR8888"),
        (fc(b"RX24"), "DRM_FORMAT_RGBX8888"),
        (fc(b"BX24"), "DRM_FORMAT_BGRX8888"),
        (fc(b"AR24"), "DRM_FORMAT_ARGB8888"),
        (fc(b"AB24"), "DRM_FORMAT_ABGR8888"),
        (fc(b"RA24"), "DRM_FORMAT_RGBA8888"),
        (fc(b"BA24"), "DRM_FORMAT_BGRA8888"),
        (fc(b"XR30"), "DRM_FORMAT_XRGB2101010"),
        (fc(b"XB30"), "DRM_FORMAT_XBGR2101010"),
        (fc(b"RX30"), "DRM_FORMAT_RGBX1010102"),
        (fc(b"BX30"), "DRM_FORMAT_BGRX1010102"),
        (fc(b"AR30"), "DRM_FORMAT_ARGB2101010"),
        (fc(b"AB30"), "DRM_FORMAT_ABGR2101010"),
        (fc(b"RA30"), "DRM_FORMAT_RGBA1010102"),
        (fc(b"BA30"), "DRM_FORMAT_BGRA1010102"),
        // 64 bpp RGB
        (fc(b"XR48"), "DRM_FORMAT_XRGB16161616"),
        (fc(b"XB48"), "DRM_FORMAT_XBGR16161616"),
        (fc(b"AR48"), "DRM_FORMAT_ARGB16161616"),
        (fc(b"AB48"), "DRM_FORMAT_ABGR16161616"),
        (fc(b"XR4H"), "DRM_FORMAT_XRGB16161616F"),
        (fc(b"XB4H"), "DRM_FORMAT_XBGR16161616F"),
        (fc(b"AR4H"), "DRM_FORMAT_ARGB16161616F"),
        (fc(b"AB4H"), "DRM_FORMAT_ABGR16161616F"),
        // packed YCbCr
        (fc(b"YUYV"), "DRM_FORMAT_YUYV"),
        (fc(b"YVYU"), "DRM_FORMAT_YVYU"),
        (fc(b"UYVY"), "DRM_FORMAT_UYVY"),
        (fc(b"VYUY"), "DRM_FORMAT_VYUY"),
        (fc(b"AYUV"), "DRM_FORMAT_AYUV"),
        (fc(b"XYUV"), "DRM_FORMAT_XYUV8888"),
        (fc(b"VU24"), "DRM_FORMAT_VUY888"),
        (fc(b"Y210"), "DRM_FORMAT_Y210"),
        (fc(b"Y410"), "DRM_FORMAT_Y410"),
        // 2 plane YCbCr
        (fc(b"NV12"), "DRM_FORMAT_NV12"),
        (fc(b"NV21"), "DRM_FORMAT_NV21"),
        (fc(b"NV16"), "DRM_FORMAT_NV16"),
        (fc(b"NV61"), "DRM_FORMAT_NV61"),
        (fc(b"NV24"), "DRM_FORMAT_NV24"),
        (fc(b"NV42"), "DRM_FORMAT_NV42"),
        (fc(b"P010"), "DRM_FORMAT_P010"),
        (fc(b"P012"), "DRM_FORMAT_P012"),
        (fc(b"P016"), "DRM_FORMAT_P016"),
        // 3 plane YCbCr
        (fc(b"YUV9"), "DRM_FORMAT_YUV410"),
        (fc(b"YVU9"), "DRM_FORMAT_YVU410"),
        (fc(b"YU11"), "DRM_FORMAT_YUV411"),
        (fc(b"YV11"), "DRM_FORMAT_YVU411"),
        (fc(b"YU12"), "DRM_FORMAT_YUV420"),
        (fc(b"YV12"), "DRM_FORMAT_YVU420"),
        (fc(b"YU16"), "DRM_FORMAT_YUV422"),
        (fc(b"YV16"), "DRM_FORMAT_YVU422"),
        (fc(b"YU24"), "DRM_FORMAT_YUV444"),
        (fc(b"YV24"), "DRM_FORMAT_YVU444"),
    ],
    "NOT FOUND",
);

/// The four characters of a fourcc, with non-printable bytes shown as `.`
pub fn fourcc_ascii(code: u32) -> String {
    code.to_le_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect()
}
