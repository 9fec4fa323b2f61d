//! Offset prediction from type names.
//!
//! Given the measured [`ArchInfo`], standard C layout offsets can be
//! computed for a sequence of scalar field types without compiling the
//! struct. Prediction assumes default alignment rules; it does not model
//! `#pragma pack`, `__attribute__((packed))`, or bitfields — for those,
//! only compiler-measured offsets are trustworthy.

use memlay_core::LayoutError;

use crate::{ArchInfo, CType};

/// Predicts C struct field offsets from the probed platform rules.
#[derive(Debug, Clone)]
pub struct OffsetPredictor {
    arch: ArchInfo,
}

impl OffsetPredictor {
    /// Create a predictor over a captured [`ArchInfo`].
    pub fn new(arch: ArchInfo) -> Self {
        OffsetPredictor { arch }
    }

    /// The snapshot this predictor works from.
    pub fn arch(&self) -> &ArchInfo {
        &self.arch
    }

    /// Round `offset` up to the next multiple of `align`.
    pub fn align_offset(offset: usize, align: usize) -> usize {
        if align <= 1 {
            return offset;
        }
        offset.div_ceil(align) * align
    }

    /// Predict the offset of each field in a struct whose members have the
    /// given C type names, in declaration order.
    ///
    /// A name with no fixed scalar layout is an error rather than a
    /// guessed offset; every offset after it would be wrong.
    pub fn predict(&self, type_names: &[&str]) -> Result<Vec<usize>, LayoutError> {
        let mut offsets = Vec::with_capacity(type_names.len());
        let mut cursor = 0usize;

        for &name in type_names {
            let ctype = CType::parse(name)
                .ok_or_else(|| LayoutError::UnsupportedType(name.to_string()))?;
            cursor = Self::align_offset(cursor, ctype.alignment(&self.arch));
            offsets.push(cursor);
            cursor += ctype.size(&self.arch);
        }

        Ok(offsets)
    }

    /// Predict the total struct size for the given member types: the end
    /// of the last field rounded up to the widest member alignment, which
    /// is where the compiler puts trailing padding.
    pub fn predict_size(&self, type_names: &[&str]) -> Result<usize, LayoutError> {
        let mut cursor = 0usize;
        let mut max_align = 1usize;

        for &name in type_names {
            let ctype = CType::parse(name)
                .ok_or_else(|| LayoutError::UnsupportedType(name.to_string()))?;
            let align = ctype.alignment(&self.arch);
            max_align = max_align.max(align);
            cursor = Self::align_offset(cursor, align) + ctype.size(&self.arch);
        }

        Ok(Self::align_offset(cursor, max_align))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> OffsetPredictor {
        OffsetPredictor::new(ArchInfo::capture())
    }

    #[test]
    fn align_offset_rounds_up() {
        assert_eq!(OffsetPredictor::align_offset(0, 4), 0);
        assert_eq!(OffsetPredictor::align_offset(1, 4), 4);
        assert_eq!(OffsetPredictor::align_offset(4, 4), 4);
        assert_eq!(OffsetPredictor::align_offset(5, 8), 8);
        assert_eq!(OffsetPredictor::align_offset(7, 1), 7);
        assert_eq!(OffsetPredictor::align_offset(7, 0), 7);
    }

    #[test]
    fn predicts_padded_struct() {
        // struct { uint8_t flag; uint32_t id; uint64_t ts; }
        #[repr(C)]
        struct Padded {
            flag: u8,
            id: u32,
            ts: u64,
        }

        let offsets = predictor()
            .predict(&["uint8_t", "uint32_t", "uint64_t"])
            .unwrap();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Padded, flag),
                std::mem::offset_of!(Padded, id),
                std::mem::offset_of!(Padded, ts),
            ]
        );
        assert_eq!(
            predictor().predict_size(&["uint8_t", "uint32_t", "uint64_t"]).unwrap(),
            std::mem::size_of::<Padded>()
        );
    }

    #[test]
    fn predicts_pointer_struct() {
        #[repr(C)]
        struct WithPointer {
            id: u32,
            name: *const std::ffi::c_char,
            value: f32,
        }

        let offsets = predictor().predict(&["uint32_t", "char*", "float"]).unwrap();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(WithPointer, id),
                std::mem::offset_of!(WithPointer, name),
                std::mem::offset_of!(WithPointer, value),
            ]
        );
    }

    #[test]
    fn predicts_wide_to_narrow_without_padding() {
        #[repr(C)]
        struct Reverse {
            ts: u64,
            id: u32,
            flag: u8,
        }

        let offsets = predictor()
            .predict(&["uint64_t", "uint32_t", "uint8_t"])
            .unwrap();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Reverse, ts),
                std::mem::offset_of!(Reverse, id),
                std::mem::offset_of!(Reverse, flag),
            ]
        );
    }

    #[test]
    fn unknown_type_name_is_an_error() {
        let err = predictor().predict(&["uint32_t", "Mystery"]).unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedType("Mystery".to_string()));
    }
}
