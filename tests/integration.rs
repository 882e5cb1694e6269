#[cfg(test)]
mod integration_tests {
    use kmsprobe::device::{
        CardResources, ConnectorRecord, CrtcRecord, DriverVersion, EncoderRecord, ModeInfo,
        ObjectKind, PlaneRecord, PropertyInfo, PropertyValue,
    };
    use kmsprobe::{KmsDevice, PlaneKind, Probe, ProbeError};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::io;

    const XRGB8888: u32 = 0x3432_5258;
    const ARGB8888: u32 = 0x3432_5241;

    const TYPE_PROP_BASE: u32 = 1000;
    const FB_PROP_BASE: u32 = 2000;

    /// Simulated card that hides non-overlay planes until universal planes
    /// are enabled, like the kernel does.
    struct FakeCard {
        planes: Vec<(PlaneRecord, Option<u64>)>,
        broken_planes: Vec<u32>,
        refuse_atomic: bool,
        universal: Cell<bool>,
        client_caps: RefCell<Vec<u64>>,
    }

    impl FakeCard {
        fn new() -> Self {
            let plane = |id, possible_crtcs, formats: &[u32]| PlaneRecord {
                id,
                possible_crtcs,
                formats: formats.to_vec(),
                ..Default::default()
            };
            Self {
                planes: vec![
                    (plane(31, 0b001, &[XRGB8888, ARGB8888]), Some(1)),
                    (plane(32, 0b011, &[ARGB8888]), Some(0)),
                    (plane(33, 0b001, &[ARGB8888]), Some(2)),
                    (plane(41, 0b010, &[XRGB8888]), Some(1)),
                    (plane(42, 0b010, &[XRGB8888]), Some(0)),
                ],
                broken_planes: Vec::new(),
                refuse_atomic: false,
                universal: Cell::new(false),
                client_caps: RefCell::new(Vec::new()),
            }
        }

        fn lookup(&self, id: u32) -> Option<&(PlaneRecord, Option<u64>)> {
            self.planes.iter().find(|(p, _)| p.id == id)
        }

        fn enoent() -> io::Error {
            io::Error::from_raw_os_error(libc::ENOENT)
        }
    }

    impl KmsDevice for FakeCard {
        fn driver_version(&self) -> io::Result<DriverVersion> {
            Ok(DriverVersion {
                major: 1,
                minor: 0,
                patchlevel: 0,
                name: "fake".into(),
                date: "20240101".into(),
                desc: "Simulated KMS".into(),
            })
        }

        fn get_cap(&self, cap: u64) -> io::Result<u64> {
            match cap {
                0x1 => Ok(1),
                0x8 | 0x9 => Ok(64),
                _ => Err(io::Error::from_raw_os_error(libc::EINVAL)),
            }
        }

        fn set_client_cap(&self, cap: u64, value: u64) -> io::Result<()> {
            if cap == 3 && self.refuse_atomic {
                return Err(io::Error::from_raw_os_error(libc::EOPNOTSUPP));
            }
            self.client_caps.borrow_mut().push(cap);
            if cap == 2 {
                self.universal.set(value != 0);
            }
            Ok(())
        }

        fn card_resources(&self) -> io::Result<CardResources> {
            Ok(CardResources {
                crtcs: vec![51, 52],
                connectors: vec![95],
                encoders: vec![94],
                min_width: 0,
                max_width: 8192,
                min_height: 0,
                max_height: 8192,
                ..Default::default()
            })
        }

        fn plane_ids(&self) -> io::Result<Vec<u32>> {
            let universal = self.universal.get();
            Ok(self
                .planes
                .iter()
                .filter(|(_, kind)| universal || *kind == Some(0) || kind.is_none())
                .map(|(p, _)| p.id)
                .collect())
        }

        fn plane(&self, id: u32) -> io::Result<PlaneRecord> {
            if self.broken_planes.contains(&id) {
                return Err(Self::enoent());
            }
            self.lookup(id).map(|(p, _)| p.clone()).ok_or_else(Self::enoent)
        }

        fn object_properties(&self, id: u32, kind: ObjectKind) -> io::Result<Vec<PropertyValue>> {
            assert_eq!(kind, ObjectKind::Plane);
            let (_, type_value) = self.lookup(id).ok_or_else(Self::enoent)?;
            let mut props = vec![PropertyValue { id: FB_PROP_BASE + id, value: 0 }];
            if let Some(value) = type_value {
                props.push(PropertyValue { id: TYPE_PROP_BASE + id, value: *value });
            }
            Ok(props)
        }

        fn property(&self, id: u32) -> io::Result<PropertyInfo> {
            let name = if id >= FB_PROP_BASE { "FB_ID" } else { "type" };
            Ok(PropertyInfo { id, name: name.into(), flags: 0 })
        }

        fn encoder(&self, id: u32) -> io::Result<EncoderRecord> {
            Ok(EncoderRecord {
                id,
                encoder_type: 2,
                crtc_id: 51,
                possible_crtcs: 0b11,
                possible_clones: 0,
            })
        }

        fn connector(&self, id: u32) -> io::Result<ConnectorRecord> {
            Ok(ConnectorRecord {
                id,
                connector_type: 11,
                connector_type_id: 1,
                connection: 1,
                encoder_id: 94,
                mm_width: 520,
                mm_height: 290,
                subpixel: 0,
                encoders: vec![94],
                modes: vec![ModeInfo {
                    name: "1920x1080".into(),
                    clock: 148_500,
                    hdisplay: 1920,
                    hsync_start: 2008,
                    hsync_end: 2052,
                    htotal: 2200,
                    vdisplay: 1080,
                    vsync_start: 1084,
                    vsync_end: 1089,
                    vtotal: 1125,
                    vrefresh: 60,
                    flags: 0b0101,
                    mode_type: 1 << 3,
                    ..Default::default()
                }],
            })
        }

        fn crtc(&self, id: u32) -> io::Result<CrtcRecord> {
            if id == 52 {
                return Err(Self::enoent());
            }
            Ok(CrtcRecord {
                id,
                fb_id: 0,
                x: 0,
                y: 0,
                gamma_size: 256,
                mode: None,
            })
        }
    }

    fn kinds(planes: &[kmsprobe::PlaneEntry]) -> Vec<(u32, PlaneKind)> {
        planes.iter().map(|p| (p.id, p.kind)).collect()
    }

    #[test]
    fn test_primary_planes_only_after_negotiation() {
        let card = FakeCard::new();
        let mut probe = Probe::new(&card);

        let before = probe.planes().unwrap();
        assert!(before.iter().all(|p| p.kind != PlaneKind::Primary));
        assert_eq!(kinds(&before), vec![(32, PlaneKind::Overlay), (42, PlaneKind::Overlay)]);

        probe.enable_universal_planes().unwrap();
        let after = probe.planes().unwrap();
        let primaries: Vec<u32> = after
            .iter()
            .filter(|p| p.kind == PlaneKind::Primary)
            .map(|p| p.id)
            .collect();
        assert_eq!(primaries, vec![31, 41]);

        // Same answer without renegotiating.
        let again = probe.planes().unwrap();
        assert_eq!(kinds(&again), kinds(&after));
        assert_eq!(*card.client_caps.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_third_of_five_planes_missing() {
        let mut card = FakeCard::new();
        card.broken_planes = vec![33];
        card.universal.set(true);

        let planes = Probe::new(&card).planes().unwrap();
        assert_eq!(planes.len(), 4);
        assert!(planes.iter().all(|p| p.id != 33));
    }

    #[test]
    fn test_plane_without_type_property() {
        let mut card = FakeCard::new();
        card.planes.push((
            PlaneRecord {
                id: 60,
                formats: vec![XRGB8888],
                ..Default::default()
            },
            None,
        ));

        let mut out = Vec::new();
        kmsprobe::list_planes(&card, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("plane 60 [???] format: 0x34325258 DRM_FORMAT_XRGB8888 crtcs: (none)"));
    }

    #[test]
    fn test_atomic_refusal_stops_after_legacy_pass() {
        let mut card = FakeCard::new();
        card.refuse_atomic = true;

        let mut out = Vec::new();
        let err = kmsprobe::run(&card, &mut out).unwrap_err();
        assert!(matches!(err, ProbeError::ClientCap { cap: "DRM_CLIENT_CAP_ATOMIC", .. }));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--WITHOUT UNIVERSAL PLANES--"));
        assert!(!text.contains("--WITH UNIVERSAL PLANES--"));
        assert!(!text.contains("--ENCODERS--"));
    }

    #[test]
    fn test_full_run_output() {
        let card = FakeCard::new();
        let mut out = Vec::new();
        kmsprobe::run(&card, &mut out).unwrap();

        let expected = "
--DRIVER--
driver: fake 1.0.0 (20240101) Simulated KMS

--CAPS--
DRM_CAP_DUMB_BUFFER: 1
DRM_CAP_VBLANK_HIGH_CRTC: unsupported
DRM_CAP_DUMB_PREFERRED_DEPTH: unsupported
DRM_CAP_DUMB_PREFER_SHADOW: unsupported
DRM_CAP_PRIME: unsupported
DRM_CAP_TIMESTAMP_MONOTONIC: unsupported
DRM_CAP_ASYNC_PAGE_FLIP: unsupported
DRM_CAP_CURSOR_WIDTH: 64
DRM_CAP_CURSOR_HEIGHT: 64
DRM_CAP_ADDFB2_MODIFIERS: unsupported
DRM_CAP_PAGE_FLIP_TARGET: unsupported
DRM_CAP_CRTC_IN_VBLANK_EVENT: unsupported
DRM_CAP_SYNCOBJ: unsupported
DRM_CAP_SYNCOBJ_TIMELINE: unsupported
DRM_CAP_ATOMIC_ASYNC_PAGE_FLIP: unsupported

--WITHOUT UNIVERSAL PLANES--
plane 32 [DRM_PLANE_TYPE_OVERLAY] format: 0x34325241 DRM_FORMAT_ARGB8888 crtcs: 0 1
plane 42 [DRM_PLANE_TYPE_OVERLAY] format: 0x34325258 DRM_FORMAT_XRGB8888 crtcs: 1

--WITH UNIVERSAL PLANES--
plane 31 [DRM_PLANE_TYPE_PRIMARY] format: 0x34325258 DRM_FORMAT_XRGB8888 crtcs: 0
plane 31 [DRM_PLANE_TYPE_PRIMARY] format: 0x34325241 DRM_FORMAT_ARGB8888 crtcs: 0
plane 32 [DRM_PLANE_TYPE_OVERLAY] format: 0x34325241 DRM_FORMAT_ARGB8888 crtcs: 0 1
plane 33 [DRM_PLANE_TYPE_CURSOR] format: 0x34325241 DRM_FORMAT_ARGB8888 crtcs: 0
plane 41 [DRM_PLANE_TYPE_PRIMARY] format: 0x34325258 DRM_FORMAT_XRGB8888 crtcs: 1
plane 42 [DRM_PLANE_TYPE_OVERLAY] format: 0x34325258 DRM_FORMAT_XRGB8888 crtcs: 1

--ENCODERS--
encoder 94 [DRM_MODE_ENCODER_TMDS] crtc: 51 possible crtcs: 0 1 possible clones: (none)

--CONNECTORS--
connector 95 [DRM_MODE_CONNECTOR_HDMIA-1] DRM_MODE_CONNECTED encoder: 94 size: 520x290mm subpixel: DRM_MODE_SUBPIXEL_UNKNOWN encoders: 94
  mode \"1920x1080\" 148500kHz 1920 2008 2052 2200 1080 1084 1089 1125 60Hz flags: PHSYNC PVSYNC type: PREFERRED

--CRTCS--
crtc 51 fb: none pos: 0,0 gamma: 256 mode: (none)
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_collect_report() {
        let card = FakeCard::new();
        let report = kmsprobe::collect(&card, "/dev/dri/fake").unwrap();

        assert_eq!(report.device, "/dev/dri/fake");
        assert_eq!(report.planes_legacy.len(), 2);
        assert_eq!(report.planes_universal.len(), 5);
        assert_eq!(report.crtcs.len(), 1);
        assert_eq!(report.resources.max_width, 8192);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["planes_universal"][0]["kind"], "Primary");
        assert_eq!(json["caps"][0]["name"], "DRM_CAP_DUMB_BUFFER");
        assert!(json["caps"][1]["value"].is_null());
    }
}
