//! Code-to-name tables for the DRM uapi enumerations

pub mod caps;
pub mod formats;
pub mod objects;

// Re-exports for convenient usage
pub use caps::{ClientCap, CLIENT_CAPS, DRIVER_CAPS, REPORTED_CAPS};
pub use formats::{fourcc_ascii, FOURCC_FORMATS};
pub use objects::{
    PlaneKind, CONNECTION_STATES, CONNECTOR_TYPES, ENCODER_TYPES, MODE_FLAGS, MODE_TYPES,
    PLANE_TYPES, SUBPIXEL_ORDERS,
};

/// Immutable table of `(code, name)` pairs with a fallback name
///
/// Unknown codes are expected (vendor extensions, newer kernels), so a
/// lookup never fails: it answers with the fallback instead.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    entries: &'static [(u64, &'static str)],
    fallback: &'static str,
}

impl CodeTable {
    /// Build a table; codes must be unique
    pub const fn new(entries: &'static [(u64, &'static str)], fallback: &'static str) -> Self {
        Self { entries, fallback }
    }

    /// Name of `code`, or the fallback when it is not in the table
    pub fn name(&self, code: u64) -> &'static str {
        self.get(code).unwrap_or(self.fallback)
    }

    /// Name of `code` if the table knows it
    pub fn get(&self, code: u64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    /// Label returned for unknown codes
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &'static [(u64, &'static str)] {
        self.entries
    }
}

/// Iterator over the indices of the set bits of a mask, lowest first
#[derive(Debug, Clone)]
pub struct BitIndices {
    mask: u64,
}

impl Iterator for BitIndices {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.mask == 0 {
            return None;
        }
        let idx = self.mask.trailing_zeros();
        self.mask &= self.mask - 1;
        Some(idx)
    }
}

/// Decode a bitmask such as `possible_crtcs` into ascending bit indices
pub fn bit_indices(mask: impl Into<u64>) -> BitIndices {
    BitIndices { mask: mask.into() }
}

/// Space-separated bit indices, or `(none)` for an empty mask
pub fn format_bit_indices(mask: impl Into<u64>) -> String {
    let parts: Vec<String> = bit_indices(mask).map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "(none)".to_string()
    } else {
        parts.join(" ")
    }
}

/// Names of the single-bit flags set in `bits`
///
/// `table` maps bit masks to names. Bits with no name are collected into a
/// trailing hex remainder so nothing is silently dropped.
pub fn flag_names(bits: u32, table: &CodeTable) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = bits;
    for idx in bit_indices(bits) {
        let flag = 1u64 << idx;
        if let Some(name) = table.get(flag) {
            names.push(name.to_string());
            rest &= !(flag as u32);
        }
    }
    if rest != 0 {
        names.push(format!("0x{:x}", rest));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const COLORS: CodeTable = CodeTable::new(&[(1, "red"), (2, "green"), (7, "blue")], "unknown");

    #[rstest]
    #[case(1, "red")]
    #[case(2, "green")]
    #[case(7, "blue")]
    #[case(0, "unknown")]
    #[case(u64::MAX, "unknown")]
    fn test_code_table_lookup(#[case] code: u64, #[case] expected: &str) {
        assert_eq!(COLORS.name(code), expected);
    }

    #[test]
    fn test_get_distinguishes_missing() {
        assert_eq!(COLORS.get(7), Some("blue"));
        assert_eq!(COLORS.get(3), None);
        assert_eq!(COLORS.fallback(), "unknown");
    }

    #[test]
    fn test_bit_indices_ascending_unique() {
        let mask: u32 = (1 << 0) | (1 << 2) | (1 << 5);
        let idx: Vec<u32> = bit_indices(mask).collect();
        assert_eq!(idx, vec![0, 2, 5]);
    }

    #[test]
    fn test_bit_indices_edges() {
        assert_eq!(bit_indices(0u32).count(), 0);
        assert_eq!(bit_indices(u32::MAX).count(), 32);
        assert_eq!(bit_indices(1u64 << 63).collect::<Vec<_>>(), vec![63]);
    }

    #[test]
    fn test_format_bit_indices() {
        assert_eq!(format_bit_indices(0b100101u32), "0 2 5");
        assert_eq!(format_bit_indices(0u32), "(none)");
    }

    #[test]
    fn test_flag_names_keeps_unknown_bits() {
        const FLAGS: CodeTable = CodeTable::new(&[(1 << 0, "A"), (1 << 3, "D")], "");
        assert_eq!(flag_names(0b1001, &FLAGS), vec!["A", "D"]);
        assert_eq!(flag_names(0b0110, &FLAGS), vec!["0x6"]);
        assert!(flag_names(0, &FLAGS).is_empty());
    }
}
