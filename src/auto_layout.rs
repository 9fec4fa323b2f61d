//! Predicted layouts from type names alone.

use memlay_arch::{ArchInfo, CType, OffsetPredictor};
use memlay_core::{FieldDescriptor, LayoutError};

/// Compute field descriptors for a standard C struct layout from its
/// member type names, in declaration order, without compiling the struct.
///
/// Offsets follow the default alignment rules measured by the probe, so
/// this holds for plain C structs only - not for `#pragma pack`,
/// `__attribute__((packed))`, or bitfields. For those, build the
/// descriptor at the declaration site with [`layout_of!`] instead.
///
/// Fields are named positionally (`field0`, `field1`, ...) since only
/// types are known here. An unknown type name is an error: every offset
/// after it would be wrong.
///
/// ```
/// use memlay::auto_layout;
///
/// let fields = auto_layout(&["uint32_t", "char*", "float"]).unwrap();
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields[0].offset, 0);
/// ```
///
/// [`layout_of!`]: crate::layout_of
pub fn auto_layout(type_names: &[&str]) -> Result<Vec<FieldDescriptor>, LayoutError> {
    let arch = ArchInfo::capture();
    let mut fields = Vec::with_capacity(type_names.len());
    let mut cursor = 0usize;

    for (i, &name) in type_names.iter().enumerate() {
        let ctype =
            CType::parse(name).ok_or_else(|| LayoutError::UnsupportedType(name.to_string()))?;
        let size = ctype.size(&arch);
        cursor = OffsetPredictor::align_offset(cursor, ctype.alignment(&arch));
        fields.push(FieldDescriptor::from_type_name(
            &format!("field{i}"),
            cursor,
            size,
            name,
            0,
        )?);
        cursor += size;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;
    use std::ffi::c_char;
    use std::mem::offset_of;

    #[test]
    fn auto_layout_matches_compiled_struct() {
        #[repr(C)]
        struct ComplexDevice {
            flag: u8,
            id: u32,
            name: *const c_char,
            value: f64,
            port: u16,
        }

        let fields =
            auto_layout(&["uint8_t", "uint32_t", "char*", "double", "uint16_t"]).unwrap();
        let expected = [
            offset_of!(ComplexDevice, flag),
            offset_of!(ComplexDevice, id),
            offset_of!(ComplexDevice, name),
            offset_of!(ComplexDevice, value),
            offset_of!(ComplexDevice, port),
        ];

        for (field, expected_offset) in fields.iter().zip(expected) {
            assert_eq!(field.offset, expected_offset);
        }
        assert_eq!(fields[2].kind, FieldKind::CString);
        assert_eq!(fields[3].kind, FieldKind::Primitive);
    }

    #[test]
    fn auto_layout_rejects_unknown_names() {
        let err = auto_layout(&["uint32_t", "NotAType"]).unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedType("NotAType".to_string()));
    }
}
