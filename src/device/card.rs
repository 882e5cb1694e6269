//! `KmsDevice` on a real DRM device node

use super::{
    CardResources, ConnectorRecord, CrtcRecord, DriverVersion, EncoderRecord, KmsDevice, ModeInfo,
    ObjectKind, PlaneRecord, PropertyInfo, PropertyValue,
};
use crate::error::{ProbeError, ProbeResult};
use crate::ioctl::{self, drm_ioctl, user_ptr};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

/// An open DRM device node
#[derive(Debug)]
pub struct Card {
    file: File,
    path: String,
}

impl Card {
    /// Open a device node read/write with close-on-exec
    pub fn open(path: &str) -> ProbeResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_CLOEXEC)
            .open(path)
            .map_err(|source| ProbeError::DeviceOpen {
                path: path.to_string(),
                source,
            })?;

        log::debug!("opened {}", path);
        Ok(Self {
            file,
            path: path.to_string(),
        })
    }

    /// Path this card was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    fn call<T>(&self, request: u32, arg: &mut T) -> io::Result<()> {
        // SAFETY: callers pair each request with its uapi struct and keep
        // every buffer referenced by `arg` alive across the call.
        unsafe { drm_ioctl(self.fd(), request, arg) }
    }
}

impl AsRawFd for Card {
    fn as_raw_fd(&self) -> RawFd {
        self.fd()
    }
}

impl KmsDevice for Card {
    fn driver_version(&self) -> io::Result<DriverVersion> {
        let mut raw = ioctl::DrmVersion::default();
        self.call(ioctl::DRM_IOCTL_VERSION, &mut raw)?;

        let mut name = vec![0u8; raw.name_len];
        let mut date = vec![0u8; raw.date_len];
        let mut desc = vec![0u8; raw.desc_len];
        raw.name = user_ptr(&mut name) as usize;
        raw.date = user_ptr(&mut date) as usize;
        raw.desc = user_ptr(&mut desc) as usize;
        self.call(ioctl::DRM_IOCTL_VERSION, &mut raw)?;

        Ok(DriverVersion {
            major: raw.version_major,
            minor: raw.version_minor,
            patchlevel: raw.version_patchlevel,
            name: ioctl::fixed_name(&name),
            date: ioctl::fixed_name(&date),
            desc: ioctl::fixed_name(&desc),
        })
    }

    fn get_cap(&self, cap: u64) -> io::Result<u64> {
        let mut raw = ioctl::DrmGetCap {
            capability: cap,
            value: 0,
        };
        self.call(ioctl::DRM_IOCTL_GET_CAP, &mut raw)?;
        Ok(raw.value)
    }

    fn set_client_cap(&self, cap: u64, value: u64) -> io::Result<()> {
        let mut raw = ioctl::DrmSetClientCap {
            capability: cap,
            value,
        };
        self.call(ioctl::DRM_IOCTL_SET_CLIENT_CAP, &mut raw)
    }

    fn card_resources(&self) -> io::Result<CardResources> {
        loop {
            let mut counts = ioctl::DrmModeCardRes::default();
            self.call(ioctl::DRM_IOCTL_MODE_GETRESOURCES, &mut counts)?;

            let mut fbs = vec![0u32; counts.count_fbs as usize];
            let mut crtcs = vec![0u32; counts.count_crtcs as usize];
            let mut connectors = vec![0u32; counts.count_connectors as usize];
            let mut encoders = vec![0u32; counts.count_encoders as usize];

            let mut raw = ioctl::DrmModeCardRes {
                fb_id_ptr: user_ptr(&mut fbs),
                crtc_id_ptr: user_ptr(&mut crtcs),
                connector_id_ptr: user_ptr(&mut connectors),
                encoder_id_ptr: user_ptr(&mut encoders),
                count_fbs: counts.count_fbs,
                count_crtcs: counts.count_crtcs,
                count_connectors: counts.count_connectors,
                count_encoders: counts.count_encoders,
                ..Default::default()
            };
            self.call(ioctl::DRM_IOCTL_MODE_GETRESOURCES, &mut raw)?;

            // Hotplug (e.g. a DP MST hub) can grow the lists between passes.
            if raw.count_fbs > counts.count_fbs
                || raw.count_crtcs > counts.count_crtcs
                || raw.count_connectors > counts.count_connectors
                || raw.count_encoders > counts.count_encoders
            {
                log::trace!("resource counts changed, retrying");
                continue;
            }

            fbs.truncate(raw.count_fbs as usize);
            crtcs.truncate(raw.count_crtcs as usize);
            connectors.truncate(raw.count_connectors as usize);
            encoders.truncate(raw.count_encoders as usize);

            return Ok(CardResources {
                framebuffers: fbs,
                crtcs,
                connectors,
                encoders,
                min_width: raw.min_width,
                max_width: raw.max_width,
                min_height: raw.min_height,
                max_height: raw.max_height,
            });
        }
    }

    fn plane_ids(&self) -> io::Result<Vec<u32>> {
        loop {
            let mut counts = ioctl::DrmModeGetPlaneRes::default();
            self.call(ioctl::DRM_IOCTL_MODE_GETPLANERESOURCES, &mut counts)?;

            let mut ids = vec![0u32; counts.count_planes as usize];
            let mut raw = ioctl::DrmModeGetPlaneRes {
                plane_id_ptr: user_ptr(&mut ids),
                count_planes: counts.count_planes,
            };
            self.call(ioctl::DRM_IOCTL_MODE_GETPLANERESOURCES, &mut raw)?;

            if raw.count_planes > counts.count_planes {
                continue;
            }
            ids.truncate(raw.count_planes as usize);
            return Ok(ids);
        }
    }

    fn plane(&self, id: u32) -> io::Result<PlaneRecord> {
        loop {
            let mut counts = ioctl::DrmModeGetPlane {
                plane_id: id,
                ..Default::default()
            };
            self.call(ioctl::DRM_IOCTL_MODE_GETPLANE, &mut counts)?;

            let mut formats = vec![0u32; counts.count_format_types as usize];
            let mut raw = ioctl::DrmModeGetPlane {
                plane_id: id,
                count_format_types: counts.count_format_types,
                format_type_ptr: user_ptr(&mut formats),
                ..Default::default()
            };
            self.call(ioctl::DRM_IOCTL_MODE_GETPLANE, &mut raw)?;

            if raw.count_format_types > counts.count_format_types {
                continue;
            }
            formats.truncate(raw.count_format_types as usize);
            return Ok(PlaneRecord {
                id: raw.plane_id,
                crtc_id: raw.crtc_id,
                fb_id: raw.fb_id,
                possible_crtcs: raw.possible_crtcs,
                gamma_size: raw.gamma_size,
                formats,
            });
        }
    }

    fn object_properties(&self, id: u32, kind: ObjectKind) -> io::Result<Vec<PropertyValue>> {
        loop {
            let mut counts = ioctl::DrmModeObjGetProperties {
                obj_id: id,
                obj_type: kind.code(),
                ..Default::default()
            };
            self.call(ioctl::DRM_IOCTL_MODE_OBJ_GETPROPERTIES, &mut counts)?;

            let mut props = vec![0u32; counts.count_props as usize];
            let mut values = vec![0u64; counts.count_props as usize];
            let mut raw = ioctl::DrmModeObjGetProperties {
                props_ptr: user_ptr(&mut props),
                prop_values_ptr: user_ptr(&mut values),
                count_props: counts.count_props,
                obj_id: id,
                obj_type: kind.code(),
            };
            self.call(ioctl::DRM_IOCTL_MODE_OBJ_GETPROPERTIES, &mut raw)?;

            if raw.count_props > counts.count_props {
                continue;
            }
            let n = raw.count_props as usize;
            return Ok(props
                .into_iter()
                .zip(values)
                .take(n)
                .map(|(id, value)| PropertyValue { id, value })
                .collect());
        }
    }

    fn property(&self, id: u32) -> io::Result<PropertyInfo> {
        // Counts stay zero: only the name and flags are needed, so the
        // kernel skips copying values and enum blobs.
        let mut raw = ioctl::DrmModeGetProperty {
            prop_id: id,
            ..Default::default()
        };
        self.call(ioctl::DRM_IOCTL_MODE_GETPROPERTY, &mut raw)?;
        Ok(PropertyInfo {
            id: raw.prop_id,
            name: ioctl::fixed_name(&raw.name),
            flags: raw.flags,
        })
    }

    fn encoder(&self, id: u32) -> io::Result<EncoderRecord> {
        let mut raw = ioctl::DrmModeGetEncoder {
            encoder_id: id,
            ..Default::default()
        };
        self.call(ioctl::DRM_IOCTL_MODE_GETENCODER, &mut raw)?;
        Ok(EncoderRecord {
            id: raw.encoder_id,
            encoder_type: raw.encoder_type,
            crtc_id: raw.crtc_id,
            possible_crtcs: raw.possible_crtcs,
            possible_clones: raw.possible_clones,
        })
    }

    fn connector(&self, id: u32) -> io::Result<ConnectorRecord> {
        loop {
            // The first pass with count_modes == 0 also makes the kernel
            // probe the connector for fresh modes.
            let mut counts = ioctl::DrmModeGetConnector {
                connector_id: id,
                ..Default::default()
            };
            self.call(ioctl::DRM_IOCTL_MODE_GETCONNECTOR, &mut counts)?;

            let mut encoders = vec![0u32; counts.count_encoders as usize];
            let mut modes = vec![ioctl::DrmModeModeInfo::default(); counts.count_modes as usize];

            let mut raw = connector_request(id, &counts, &mut encoders, &mut modes);
            self.call(ioctl::DRM_IOCTL_MODE_GETCONNECTOR, &mut raw)?;

            if connector_lists_grew(&counts, &raw) {
                log::trace!("connector {} lists changed, retrying", id);
                continue;
            }

            encoders.truncate(raw.count_encoders as usize);
            modes.truncate(raw.count_modes as usize);

            return Ok(ConnectorRecord {
                id: raw.connector_id,
                connector_type: raw.connector_type,
                connector_type_id: raw.connector_type_id,
                connection: raw.connection,
                encoder_id: raw.encoder_id,
                mm_width: raw.mm_width,
                mm_height: raw.mm_height,
                subpixel: raw.subpixel,
                encoders,
                modes: modes.iter().map(ModeInfo::from).collect(),
            });
        }
    }

    fn crtc(&self, id: u32) -> io::Result<CrtcRecord> {
        let mut raw = ioctl::DrmModeCrtc {
            crtc_id: id,
            ..Default::default()
        };
        self.call(ioctl::DRM_IOCTL_MODE_GETCRTC, &mut raw)?;
        Ok(CrtcRecord {
            id: raw.crtc_id,
            fb_id: raw.fb_id,
            x: raw.x,
            y: raw.y,
            gamma_size: raw.gamma_size,
            mode: (raw.mode_valid != 0).then(|| ModeInfo::from(&raw.mode)),
        })
    }
}

/// Second-pass connector request sized from `counts`
///
/// Properties are not requested: `count_props` stays zero and its
/// pointers stay null, so the kernel copies only encoders and modes.
fn connector_request(
    id: u32,
    counts: &ioctl::DrmModeGetConnector,
    encoders: &mut [u32],
    modes: &mut [ioctl::DrmModeModeInfo],
) -> ioctl::DrmModeGetConnector {
    ioctl::DrmModeGetConnector {
        encoders_ptr: user_ptr(encoders),
        modes_ptr: user_ptr(modes),
        count_modes: counts.count_modes,
        count_encoders: counts.count_encoders,
        connector_id: id,
        ..Default::default()
    }
}

fn connector_lists_grew(counts: &ioctl::DrmModeGetConnector, raw: &ioctl::DrmModeGetConnector) -> bool {
    raw.count_modes > counts.count_modes || raw.count_encoders > counts.count_encoders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let err = Card::open("/nonexistent/dri/card0").unwrap_err();
        match err {
            ProbeError::DeviceOpen { path, source } => {
                assert_eq!(path, "/nonexistent/dri/card0");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_connector_request_skips_properties() {
        let counts = ioctl::DrmModeGetConnector {
            count_modes: 2,
            count_props: 9,
            count_encoders: 1,
            ..Default::default()
        };
        let mut encoders = vec![0u32; 1];
        let mut modes = vec![ioctl::DrmModeModeInfo::default(); 2];

        let req = connector_request(71, &counts, &mut encoders, &mut modes);
        assert_eq!(req.connector_id, 71);
        assert_eq!(req.count_props, 0);
        assert_eq!(req.props_ptr, 0);
        assert_eq!(req.prop_values_ptr, 0);
        assert_eq!(req.count_modes, 2);
        assert_eq!(req.count_encoders, 1);
        assert_ne!(req.modes_ptr, 0);
        assert_ne!(req.encoders_ptr, 0);
    }

    #[test]
    fn test_connector_retry_ignores_property_count() {
        let counts = ioctl::DrmModeGetConnector {
            count_modes: 2,
            count_encoders: 1,
            ..Default::default()
        };
        let props_only = ioctl::DrmModeGetConnector {
            count_props: 12,
            ..counts
        };
        assert!(!connector_lists_grew(&counts, &props_only));

        let more_modes = ioctl::DrmModeGetConnector {
            count_modes: 3,
            ..counts
        };
        assert!(connector_lists_grew(&counts, &more_modes));
    }

    #[test]
    fn test_queries_on_regular_file_fail() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let card = Card::open(&path).unwrap();
        assert_eq!(card.path(), path);
        assert!(card.get_cap(0x1).is_err());
        assert!(card.plane_ids().is_err());
        assert!(card.card_resources().is_err());
        assert!(card.driver_version().is_err());
    }
}
