//! Encoder, connector and CRTC reports

use crate::device::{CardResources, ConnectorRecord, CrtcRecord, EncoderRecord, KmsDevice, ModeInfo};
use crate::mappings::{
    flag_names, format_bit_indices, CONNECTION_STATES, CONNECTOR_TYPES, ENCODER_TYPES, MODE_FLAGS,
    MODE_TYPES, SUBPIXEL_ORDERS,
};
use std::io::{self, Write};

/// Query each id with `get`, skipping ids the driver does not answer for
fn query_each<T>(ids: &[u32], what: &str, get: impl Fn(u32) -> io::Result<T>) -> Vec<T> {
    ids.iter()
        .filter_map(|&id| match get(id) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("skipping {} {}: {}", what, id, e);
                None
            }
        })
        .collect()
}

pub fn query_encoders<D: KmsDevice>(device: &D, res: &CardResources) -> Vec<EncoderRecord> {
    query_each(&res.encoders, "encoder", |id| device.encoder(id))
}

pub fn query_connectors<D: KmsDevice>(device: &D, res: &CardResources) -> Vec<ConnectorRecord> {
    query_each(&res.connectors, "connector", |id| device.connector(id))
}

pub fn query_crtcs<D: KmsDevice>(device: &D, res: &CardResources) -> Vec<CrtcRecord> {
    query_each(&res.crtcs, "crtc", |id| device.crtc(id))
}

fn object_id(id: u32) -> String {
    if id == 0 {
        "none".to_string()
    } else {
        id.to_string()
    }
}

fn names_or_none(names: Vec<String>) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(" ")
    }
}

/// Timings of a mode on one line
pub fn format_mode(mode: &ModeInfo) -> String {
    format!(
        "\"{}\" {}kHz {} {} {} {} {} {} {} {} {}Hz flags: {} type: {}",
        mode.name,
        mode.clock,
        mode.hdisplay,
        mode.hsync_start,
        mode.hsync_end,
        mode.htotal,
        mode.vdisplay,
        mode.vsync_start,
        mode.vsync_end,
        mode.vtotal,
        mode.vrefresh,
        names_or_none(flag_names(mode.flags, &MODE_FLAGS)),
        names_or_none(flag_names(mode.mode_type, &MODE_TYPES)),
    )
}

pub fn write_encoders<W: Write>(out: &mut W, encoders: &[EncoderRecord]) -> io::Result<()> {
    for enc in encoders {
        writeln!(
            out,
            "encoder {} [{}] crtc: {} possible crtcs: {} possible clones: {}",
            enc.id,
            ENCODER_TYPES.name(enc.encoder_type as u64),
            object_id(enc.crtc_id),
            format_bit_indices(enc.possible_crtcs),
            format_bit_indices(enc.possible_clones),
        )?;
    }
    Ok(())
}

pub fn write_connectors<W: Write>(out: &mut W, connectors: &[ConnectorRecord]) -> io::Result<()> {
    for conn in connectors {
        let encoders: Vec<String> = conn.encoders.iter().map(|e| e.to_string()).collect();
        writeln!(
            out,
            "connector {} [{}-{}] {} encoder: {} size: {}x{}mm subpixel: {} encoders: {}",
            conn.id,
            CONNECTOR_TYPES.name(conn.connector_type as u64),
            conn.connector_type_id,
            CONNECTION_STATES.name(conn.connection as u64),
            object_id(conn.encoder_id),
            conn.mm_width,
            conn.mm_height,
            SUBPIXEL_ORDERS.name(conn.subpixel as u64),
            names_or_none(encoders),
        )?;
        for mode in &conn.modes {
            writeln!(out, "  mode {}", format_mode(mode))?;
        }
    }
    Ok(())
}

pub fn write_crtcs<W: Write>(out: &mut W, crtcs: &[CrtcRecord]) -> io::Result<()> {
    for crtc in crtcs {
        let mode = crtc
            .mode
            .as_ref()
            .map(format_mode)
            .unwrap_or_else(|| "(none)".to_string());
        writeln!(
            out,
            "crtc {} fb: {} pos: {},{} gamma: {} mode: {}",
            crtc.id,
            object_id(crtc.fb_id),
            crtc.x,
            crtc.y,
            crtc.gamma_size,
            mode
        )?;
    }
    Ok(())
}
