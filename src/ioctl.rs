//! Raw DRM uapi structures and request numbers
//!
//! Layouts mirror `include/uapi/drm/drm.h` and `drm_mode.h`. Pointer
//! fields that the kernel reads as `__u64` are filled with the address of
//! a Rust-owned buffer that outlives the call.

use std::io;
use std::mem::size_of;
use std::os::unix::io::RawFd;

/// IOCTL type/magic number of the DRM subsystem (`'d'`)
pub const DRM_IOCTL_BASE: u32 = 0x64;

/// Object type for CRTCs, as passed to `MODE_OBJ_GETPROPERTIES`
pub const DRM_MODE_OBJECT_CRTC: u32 = 0xcccc_cccc;
/// Object type for connectors
pub const DRM_MODE_OBJECT_CONNECTOR: u32 = 0xc0c0_c0c0;
/// Object type for encoders
pub const DRM_MODE_OBJECT_ENCODER: u32 = 0xe0e0_e0e0;
/// Object type for planes
pub const DRM_MODE_OBJECT_PLANE: u32 = 0xeeee_eeee;

/// Length of the fixed name buffers in modes and properties
pub const DRM_NAME_LEN: usize = 32;

const fn ioc(dir: u32, nr: u32, size: usize) -> u32 {
    (dir << 30) | ((size as u32) << 16) | (DRM_IOCTL_BASE << 8) | nr
}

const fn iowr<T>(nr: u32) -> u32 {
    ioc(3, nr, size_of::<T>())
}

const fn iow<T>(nr: u32) -> u32 {
    ioc(1, nr, size_of::<T>())
}

/// `struct drm_version`
///
/// The string pointers are stored as `usize`, which matches both `size_t`
/// and pointer width on every Linux target.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmVersion {
    pub version_major: libc::c_int,
    pub version_minor: libc::c_int,
    pub version_patchlevel: libc::c_int,
    pub name_len: usize,
    pub name: usize,
    pub date_len: usize,
    pub date: usize,
    pub desc_len: usize,
    pub desc: usize,
}

/// `struct drm_get_cap`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmGetCap {
    pub capability: u64,
    pub value: u64,
}

/// `struct drm_set_client_cap`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmSetClientCap {
    pub capability: u64,
    pub value: u64,
}

/// `struct drm_mode_card_res`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeCardRes {
    pub fb_id_ptr: u64,
    pub crtc_id_ptr: u64,
    pub connector_id_ptr: u64,
    pub encoder_id_ptr: u64,
    pub count_fbs: u32,
    pub count_crtcs: u32,
    pub count_connectors: u32,
    pub count_encoders: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

/// `struct drm_mode_modeinfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeModeInfo {
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
    pub type_: u32,
    pub name: [u8; DRM_NAME_LEN],
}

/// `struct drm_mode_crtc`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeCrtc {
    pub set_connectors_ptr: u64,
    pub count_connectors: u32,
    pub crtc_id: u32,
    pub fb_id: u32,
    pub x: u32,
    pub y: u32,
    pub gamma_size: u32,
    pub mode_valid: u32,
    pub mode: DrmModeModeInfo,
}

/// `struct drm_mode_get_encoder`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeGetEncoder {
    pub encoder_id: u32,
    pub encoder_type: u32,
    pub crtc_id: u32,
    pub possible_crtcs: u32,
    pub possible_clones: u32,
}

/// `struct drm_mode_get_connector`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeGetConnector {
    pub encoders_ptr: u64,
    pub modes_ptr: u64,
    pub props_ptr: u64,
    pub prop_values_ptr: u64,
    pub count_modes: u32,
    pub count_props: u32,
    pub count_encoders: u32,
    pub encoder_id: u32,
    pub connector_id: u32,
    pub connector_type: u32,
    pub connector_type_id: u32,
    pub connection: u32,
    pub mm_width: u32,
    pub mm_height: u32,
    pub subpixel: u32,
    pub pad: u32,
}

/// `struct drm_mode_get_property`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeGetProperty {
    pub values_ptr: u64,
    pub enum_blob_ptr: u64,
    pub prop_id: u32,
    pub flags: u32,
    pub name: [u8; DRM_NAME_LEN],
    pub count_values: u32,
    pub count_enum_blobs: u32,
}

/// `struct drm_mode_get_plane_res`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeGetPlaneRes {
    pub plane_id_ptr: u64,
    pub count_planes: u32,
}

/// `struct drm_mode_get_plane`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeGetPlane {
    pub plane_id: u32,
    pub crtc_id: u32,
    pub fb_id: u32,
    pub possible_crtcs: u32,
    pub gamma_size: u32,
    pub count_format_types: u32,
    pub format_type_ptr: u64,
}

/// `struct drm_mode_obj_get_properties`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DrmModeObjGetProperties {
    pub props_ptr: u64,
    pub prop_values_ptr: u64,
    pub count_props: u32,
    pub obj_id: u32,
    pub obj_type: u32,
}

pub const DRM_IOCTL_VERSION: u32 = iowr::<DrmVersion>(0x00);
pub const DRM_IOCTL_GET_CAP: u32 = iowr::<DrmGetCap>(0x0c);
pub const DRM_IOCTL_SET_CLIENT_CAP: u32 = iow::<DrmSetClientCap>(0x0d);
pub const DRM_IOCTL_MODE_GETRESOURCES: u32 = iowr::<DrmModeCardRes>(0xa0);
pub const DRM_IOCTL_MODE_GETCRTC: u32 = iowr::<DrmModeCrtc>(0xa1);
pub const DRM_IOCTL_MODE_GETENCODER: u32 = iowr::<DrmModeGetEncoder>(0xa6);
pub const DRM_IOCTL_MODE_GETCONNECTOR: u32 = iowr::<DrmModeGetConnector>(0xa7);
pub const DRM_IOCTL_MODE_GETPROPERTY: u32 = iowr::<DrmModeGetProperty>(0xaa);
pub const DRM_IOCTL_MODE_GETPLANERESOURCES: u32 = iowr::<DrmModeGetPlaneRes>(0xb5);
pub const DRM_IOCTL_MODE_GETPLANE: u32 = iowr::<DrmModeGetPlane>(0xb6);
pub const DRM_IOCTL_MODE_OBJ_GETPROPERTIES: u32 = iowr::<DrmModeObjGetProperties>(0xb9);

/// Issue one DRM ioctl, restarting on EINTR/EAGAIN like libdrm does
///
/// # Safety
///
/// `T` must be the argument struct the kernel expects for `request`, and
/// every pointer stored inside `arg` must reference a live buffer of at
/// least the advertised count.
pub unsafe fn drm_ioctl<T>(fd: RawFd, request: u32, arg: &mut T) -> io::Result<()> {
    loop {
        let ret = libc::ioctl(fd, request as _, arg as *mut T);
        if ret >= 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EINTR) | Some(libc::EAGAIN) => {
                log::trace!("ioctl 0x{:08x} interrupted, retrying", request);
            }
            _ => return Err(err),
        }
    }
}

/// Address of a buffer as the kernel's `__u64` user pointer
pub fn user_ptr<T>(buf: &mut [T]) -> u64 {
    if buf.is_empty() {
        0
    } else {
        buf.as_mut_ptr() as usize as u64
    }
}

/// Decode a NUL-padded fixed-size name
pub fn fixed_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
