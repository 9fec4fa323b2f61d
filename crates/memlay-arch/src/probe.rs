//! The alignment probe and the [`ArchInfo`] snapshot it produces.

use std::ffi::{c_char, c_void};
use std::fmt;
use std::mem::{offset_of, size_of};

/// Test layout deliberately ordered to force padding at every natural
/// alignment boundary: each narrow field is followed by a wider one, so
/// the compiler must insert a gap wherever the wider type has a stricter
/// alignment requirement. Field order must not change; the measured
/// offsets are what reveal the platform's rules.
#[repr(C)]
struct AlignmentProbe {
    i8_lead: i8,
    i32_mid: i32,
    i64_wide: i64,
    i16_after_wide: i16,
    f64_wide: f64,
    i8_before_ptr: i8,
    ptr: *const c_void,
    u8_lead: u8,
    u32_mid: u32,
    u16_small: u16,
    u64_wide: u64,
    f32_tail: f32,
    charptr: *const c_char,
    sizet: usize,
}

/// Snapshot of ABI facts for the current build and platform.
///
/// Produced on demand by [`ArchInfo::capture`]; a value, not a registry
/// entry. All sizes and offsets are compiler-measured, never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchInfo {
    // Primitive sizes.
    pub int8_size: usize,
    pub int16_size: usize,
    pub int32_size: usize,
    pub int64_size: usize,
    pub uint8_size: usize,
    pub uint16_size: usize,
    pub uint32_size: usize,
    pub uint64_size: usize,
    pub float32_size: usize,
    pub float64_size: usize,
    pub pointer_size: usize,
    pub sizet_size: usize,

    // Measured offsets inside the probe layout.
    pub int8_offset: usize,
    pub int16_offset: usize,
    pub int32_offset: usize,
    pub int64_offset: usize,
    pub uint8_offset: usize,
    pub uint16_offset: usize,
    pub uint32_offset: usize,
    pub uint64_offset: usize,
    pub float32_offset: usize,
    pub float64_offset: usize,
    pub pointer_offset: usize,
    pub charptr_offset: usize,
    pub sizet_offset: usize,

    /// Total probe size, trailing padding included.
    pub probe_size: usize,

    // Alignment requirements deduced from the measured offsets, with the
    // size-equals-alignment rule filling in where the probe happens to
    // place a field with no padding in front of it.
    pub int8_align: usize,
    pub int16_align: usize,
    pub int32_align: usize,
    pub int64_align: usize,
    pub uint8_align: usize,
    pub uint16_align: usize,
    pub uint32_align: usize,
    pub uint64_align: usize,
    pub float32_align: usize,
    pub float64_align: usize,
    pub pointer_align: usize,
    pub sizet_align: usize,

    pub is_64bit: bool,
    pub is_little_endian: bool,
}

impl ArchInfo {
    /// Measure the current platform. Pure computation over compile-time
    /// constants; cannot fail.
    pub fn capture() -> ArchInfo {
        let int8_size = size_of::<i8>();
        let int16_size = size_of::<i16>();
        let int32_size = size_of::<i32>();
        let int64_size = size_of::<i64>();
        let float64_size = size_of::<f64>();
        let pointer_size = size_of::<*const c_void>();

        let int8_offset = offset_of!(AlignmentProbe, i8_lead);
        let int32_offset = offset_of!(AlignmentProbe, i32_mid);
        let int16_offset = offset_of!(AlignmentProbe, i16_after_wide);
        let float64_offset = offset_of!(AlignmentProbe, f64_wide);
        let pointer_offset = offset_of!(AlignmentProbe, ptr);

        // Endianness: write a known pattern, look at the first byte in
        // memory. Little-endian platforms store the least-significant
        // byte first.
        let is_little_endian = 0x0102_0304u32.to_ne_bytes()[0] == 0x04;

        ArchInfo {
            int8_size,
            int16_size,
            int32_size,
            int64_size,
            uint8_size: size_of::<u8>(),
            uint16_size: size_of::<u16>(),
            uint32_size: size_of::<u32>(),
            uint64_size: size_of::<u64>(),
            float32_size: size_of::<f32>(),
            float64_size,
            pointer_size,
            sizet_size: size_of::<usize>(),

            int8_offset,
            int16_offset,
            int32_offset,
            int64_offset: offset_of!(AlignmentProbe, i64_wide),
            uint8_offset: offset_of!(AlignmentProbe, u8_lead),
            uint16_offset: offset_of!(AlignmentProbe, u16_small),
            uint32_offset: offset_of!(AlignmentProbe, u32_mid),
            uint64_offset: offset_of!(AlignmentProbe, u64_wide),
            float32_offset: offset_of!(AlignmentProbe, f32_tail),
            float64_offset,
            pointer_offset,
            charptr_offset: offset_of!(AlignmentProbe, charptr),
            sizet_offset: offset_of!(AlignmentProbe, sizet),

            probe_size: size_of::<AlignmentProbe>(),

            // A gap in front of a field reveals its alignment; where the
            // probe leaves no gap (the field landed naturally aligned),
            // fall back to the size-equals-alignment rule that holds for
            // scalar types on every supported ABI.
            int8_align: alignment_from_offset(0, int8_offset, int8_size),
            int16_align: int16_size,
            int32_align: alignment_from_offset(
                int8_offset + int8_size,
                int32_offset,
                int32_size,
            ),
            int64_align: int64_size,
            uint8_align: size_of::<u8>(),
            uint16_align: size_of::<u16>(),
            uint32_align: size_of::<u32>(),
            uint64_align: size_of::<u64>(),
            float32_align: size_of::<f32>(),
            float64_align: alignment_from_offset(
                int16_offset + int16_size,
                float64_offset,
                float64_size,
            ),
            pointer_align: alignment_from_offset(
                offset_of!(AlignmentProbe, i8_before_ptr) + int8_size,
                pointer_offset,
                pointer_size,
            ),
            sizet_align: size_of::<usize>(),

            is_64bit: pointer_size == 8,
            is_little_endian,
        }
    }
}

impl fmt::Display for ArchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Architecture Information:")?;
        writeln!(
            f,
            "  Platform: {}-bit, Endian: {}",
            if self.is_64bit { 64 } else { 32 },
            if self.is_little_endian { "Little" } else { "Big" }
        )?;
        writeln!(f, "  Primitive Sizes:")?;
        writeln!(f, "    int8:    {} bytes, align: {}", self.int8_size, self.int8_align)?;
        writeln!(f, "    int16:   {} bytes, align: {}", self.int16_size, self.int16_align)?;
        writeln!(f, "    int32:   {} bytes, align: {}", self.int32_size, self.int32_align)?;
        writeln!(f, "    int64:   {} bytes, align: {}", self.int64_size, self.int64_align)?;
        writeln!(f, "    float32: {} bytes, align: {}", self.float32_size, self.float32_align)?;
        writeln!(f, "    float64: {} bytes, align: {}", self.float64_size, self.float64_align)?;
        writeln!(f, "    pointer: {} bytes, align: {}", self.pointer_size, self.pointer_align)?;
        write!(f, "    size_t:  {} bytes, align: {}", self.sizet_size, self.sizet_align)
    }
}

/// Diagnostic helper for one adjacent field pair: the minimum alignment
/// that would explain the gap between the previous field's end and the
/// current field's offset.
///
/// No padding means the requirement was already satisfied and 1 is
/// returned; otherwise the raw gap is reported, deliberately without
/// rounding to a power of two. This reconstructs alignment only for the
/// exact pair it is given; it is not a general alignment solver.
pub fn implied_alignment(prev_end: usize, offset: usize) -> usize {
    if offset <= prev_end {
        return 1;
    }
    offset - prev_end
}

/// Deduce a field's alignment requirement from the padding in front of it.
///
/// Unlike [`implied_alignment`] this variant resolves to a real alignment
/// value: when the gap is at least the field size, the field is
/// self-aligned; otherwise the largest power of two (up to 16) dividing
/// the offset is the answer.
pub fn alignment_from_offset(prev_end: usize, offset: usize, field_size: usize) -> usize {
    if offset <= prev_end {
        return 1;
    }
    let padding = offset - prev_end;
    if field_size <= padding {
        return field_size;
    }
    for align in [16usize, 8, 4, 2] {
        if offset % align == 0 {
            return align;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::align_of;

    #[test]
    fn capture_reports_fixed_width_sizes() {
        let arch = ArchInfo::capture();
        assert_eq!(arch.int8_size, 1);
        assert_eq!(arch.int16_size, 2);
        assert_eq!(arch.int32_size, 4);
        assert_eq!(arch.int64_size, 8);
        assert_eq!(arch.float32_size, 4);
        assert_eq!(arch.float64_size, 8);
        assert_eq!(arch.pointer_size, size_of::<*const c_void>());
        assert_eq!(arch.sizet_size, arch.pointer_size);
    }

    #[test]
    fn probe_offsets_match_the_compiler() {
        let arch = ArchInfo::capture();
        assert_eq!(arch.int8_offset, 0);
        assert_eq!(arch.int32_offset, offset_of!(AlignmentProbe, i32_mid));
        assert_eq!(arch.pointer_offset, offset_of!(AlignmentProbe, ptr));
        assert_eq!(arch.probe_size, size_of::<AlignmentProbe>());
        // The probe's narrow-then-wide ordering forces a gap before i32.
        assert!(arch.int32_offset > arch.int8_offset + arch.int8_size);
    }

    #[test]
    fn deduced_alignments_match_align_of() {
        let arch = ArchInfo::capture();
        assert_eq!(arch.int8_align, align_of::<i8>());
        assert_eq!(arch.int32_align, align_of::<i32>());
        assert_eq!(arch.float64_align, align_of::<f64>());
        assert_eq!(arch.pointer_align, align_of::<*const c_void>());
    }

    #[test]
    fn endianness_flag_matches_target() {
        let arch = ArchInfo::capture();
        assert_eq!(arch.is_little_endian, cfg!(target_endian = "little"));
    }

    #[test]
    fn pointer_width_classifies_platform() {
        let arch = ArchInfo::capture();
        assert_eq!(arch.is_64bit, size_of::<usize>() == 8);
    }

    #[test]
    fn implied_alignment_reports_raw_gap() {
        // int8 at offset 0..1 followed by int32 at offset 4: gap of 3.
        assert_eq!(implied_alignment(1, 4), 3);
        // Adjacent fields need no padding.
        assert_eq!(implied_alignment(4, 4), 1);
        assert_eq!(implied_alignment(8, 8), 1);
    }

    #[test]
    fn alignment_from_offset_resolves_power_of_two() {
        // Gap of 3 before a 4-byte field at offset 4: self-aligned.
        assert_eq!(alignment_from_offset(1, 4, 4), 4);
        // Gap of 6 before an 8-byte field at offset 24: 8-byte alignment.
        assert_eq!(alignment_from_offset(18, 24, 8), 8);
        // Gap at least as wide as the field: field size wins.
        assert_eq!(alignment_from_offset(1, 8, 4), 4);
        // No gap.
        assert_eq!(alignment_from_offset(8, 8, 8), 1);
    }

    #[test]
    fn display_mentions_platform_width() {
        let arch = ArchInfo::capture();
        let dump = arch.to_string();
        assert!(dump.contains("Architecture Information"));
        assert!(dump.contains("int32") && dump.contains("pointer"));
    }
}
