//! Field and struct descriptors.
//!
//! A [`StructDescriptor`] records the compiler-applied layout of one
//! `#[repr(C)]` type: total size, alignment, and an ordered list of
//! [`FieldDescriptor`]s in declaration order. Offsets and sizes must come
//! from `offset_of!`/`size_of` at the declaration site (the `layout_of!`
//! macro in the root crate does this); hand-computed values silently
//! diverge from the real layout under padding rules.
//!
//! Construction goes through [`StructDescriptorBuilder`], which checks the
//! internal-consistency invariants and refuses to produce a descriptor
//! that could mis-describe memory.

use crate::{FieldKind, LayoutError};

/// Layout of one struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Byte offset from the start of the struct, as placed by the compiler.
    pub offset: usize,
    /// Byte width of the field, including any internal padding it owns.
    pub size: usize,
    /// Declared type name, e.g. `"uint32_t"`, `"char*"`, `"Address"`.
    pub type_name: String,
    /// How consumers must interpret the bytes at `offset..offset + size`.
    pub kind: FieldKind,
    /// Element type name for array fields.
    pub elem_type: Option<String>,
    /// Element count for array fields; zero otherwise.
    pub elem_count: usize,
}

impl FieldDescriptor {
    /// Describe a scalar field.
    pub fn primitive(name: &str, offset: usize, size: usize, type_name: &str) -> Self {
        Self::plain(name, offset, size, type_name, FieldKind::Primitive)
    }

    /// Describe an opaque pointer field.
    pub fn pointer(name: &str, offset: usize, size: usize, type_name: &str) -> Self {
        Self::plain(name, offset, size, type_name, FieldKind::Pointer)
    }

    /// Describe a pointer to a null-terminated byte sequence.
    pub fn cstring(name: &str, offset: usize, size: usize) -> Self {
        Self::plain(name, offset, size, "char*", FieldKind::CString)
    }

    /// Describe a nested struct field. `type_name` names the nested type,
    /// whose own descriptor must be registered separately.
    pub fn nested(name: &str, offset: usize, size: usize, type_name: &str) -> Self {
        Self::plain(name, offset, size, type_name, FieldKind::Struct)
    }

    /// Describe a fixed-size array of `elem_count` elements of `elem_type`.
    pub fn array(
        name: &str,
        offset: usize,
        size: usize,
        elem_type: &str,
        elem_count: usize,
    ) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            offset,
            size,
            type_name: elem_type.to_string(),
            kind: FieldKind::Array,
            elem_type: Some(elem_type.to_string()),
            elem_count,
        }
    }

    /// Describe a field from its declared type name alone, classifying it
    /// through [`FieldKind::classify`]. Used by layout prediction, where no
    /// concrete field kind is available.
    pub fn from_type_name(
        name: &str,
        offset: usize,
        size: usize,
        type_name: &str,
        elem_count: usize,
    ) -> Result<Self, LayoutError> {
        let kind = FieldKind::classify(type_name, elem_count)?;
        let elem_type = (kind == FieldKind::Array).then(|| type_name.to_string());
        Ok(FieldDescriptor {
            name: name.to_string(),
            offset,
            size,
            type_name: type_name.to_string(),
            kind,
            elem_type,
            elem_count,
        })
    }

    fn plain(name: &str, offset: usize, size: usize, type_name: &str, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            offset,
            size,
            type_name: type_name.to_string(),
            kind,
            elem_type: None,
            elem_count: 0,
        }
    }

    /// One past the last byte of this field.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Layout of one struct type.
///
/// Created once per type, immutable afterwards. Fields are kept in
/// declaration order; gaps between consecutive fields are compiler padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    name: String,
    size: usize,
    alignment: usize,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// The struct's globally unique type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total size in bytes, including trailing padding.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Natural alignment requirement in bytes.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Number of described fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Validating constructor for [`StructDescriptor`].
#[derive(Debug)]
pub struct StructDescriptorBuilder {
    name: String,
    size: usize,
    alignment: usize,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptorBuilder {
    /// Start a descriptor for `name` with the compiler-measured total size
    /// and alignment (`size_of` / `align_of` of the concrete type).
    pub fn new(name: &str, size: usize, alignment: usize) -> Self {
        StructDescriptorBuilder {
            name: name.to_string(),
            size,
            alignment,
            fields: Vec::new(),
        }
    }

    /// Append the next field in declaration order.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate and produce the descriptor.
    ///
    /// Checks every invariant consumers rely on: alignment is a nonzero
    /// power of two, size is a multiple of alignment, every field fits
    /// inside the struct, fields do not overlap, and array fields have an
    /// element count that divides their size.
    pub fn finish(self) -> Result<StructDescriptor, LayoutError> {
        let StructDescriptorBuilder {
            name,
            size,
            alignment,
            fields,
        } = self;

        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(LayoutError::BadAlignment {
                owner: name,
                alignment,
            });
        }
        if size % alignment != 0 {
            return Err(LayoutError::SizeNotAligned {
                owner: name,
                size,
                alignment,
            });
        }
        if fields.is_empty() {
            return Err(LayoutError::EmptyStruct(name));
        }

        for field in &fields {
            if field.end() > size {
                return Err(LayoutError::FieldOutOfBounds {
                    owner: name,
                    field: field.name.clone(),
                    end: field.end(),
                    size,
                });
            }
            if field.kind == FieldKind::Array
                && (field.elem_count == 0 || field.size % field.elem_count != 0)
            {
                return Err(LayoutError::BadArrayLength {
                    owner: name,
                    field: field.name.clone(),
                    elem_count: field.elem_count,
                    size: field.size,
                });
            }
        }

        // Overlap check over a copy sorted by offset; the original order is
        // declaration order and is preserved in the descriptor.
        let mut by_offset: Vec<&FieldDescriptor> = fields.iter().collect();
        by_offset.sort_by_key(|f| f.offset);
        for pair in by_offset.windows(2) {
            if pair[0].end() > pair[1].offset {
                return Err(LayoutError::OverlappingFields {
                    owner: name,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                    offset: pair[1].offset,
                });
            }
        }

        Ok(StructDescriptor {
            name,
            size,
            alignment,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet_builder() -> StructDescriptorBuilder {
        // Layout of: struct { uint8_t flag; uint32_t id; uint64_t ts; }
        StructDescriptorBuilder::new("Packet", 16, 8)
            .field(FieldDescriptor::primitive("flag", 0, 1, "uint8_t"))
            .field(FieldDescriptor::primitive("id", 4, 4, "uint32_t"))
            .field(FieldDescriptor::primitive("ts", 8, 8, "uint64_t"))
    }

    #[test]
    fn builder_accepts_padded_layout() {
        let desc = packet_builder().finish().unwrap();
        assert_eq!(desc.name(), "Packet");
        assert_eq!(desc.size(), 16);
        assert_eq!(desc.alignment(), 8);
        assert_eq!(desc.field_count(), 3);
        assert_eq!(desc.field("id").unwrap().offset, 4);
    }

    #[test]
    fn fields_fit_inside_struct() {
        let desc = packet_builder().finish().unwrap();
        for field in desc.fields() {
            assert!(field.end() <= desc.size());
        }
    }

    #[test]
    fn builder_rejects_field_past_end() {
        let err = StructDescriptorBuilder::new("Bad", 8, 8)
            .field(FieldDescriptor::primitive("ts", 4, 8, "uint64_t"))
            .finish()
            .unwrap_err();
        assert!(matches!(err, LayoutError::FieldOutOfBounds { end: 12, .. }));
    }

    #[test]
    fn builder_rejects_overlap() {
        let err = StructDescriptorBuilder::new("Bad", 8, 4)
            .field(FieldDescriptor::primitive("a", 0, 4, "uint32_t"))
            .field(FieldDescriptor::primitive("b", 2, 4, "uint32_t"))
            .finish()
            .unwrap_err();
        assert!(matches!(err, LayoutError::OverlappingFields { .. }));
    }

    #[test]
    fn builder_rejects_non_power_of_two_alignment() {
        let err = StructDescriptorBuilder::new("Bad", 12, 3)
            .field(FieldDescriptor::primitive("a", 0, 4, "uint32_t"))
            .finish()
            .unwrap_err();
        assert!(matches!(err, LayoutError::BadAlignment { alignment: 3, .. }));
    }

    #[test]
    fn builder_rejects_misaligned_total_size() {
        let err = StructDescriptorBuilder::new("Bad", 10, 4)
            .field(FieldDescriptor::primitive("a", 0, 4, "uint32_t"))
            .finish()
            .unwrap_err();
        assert!(matches!(err, LayoutError::SizeNotAligned { size: 10, .. }));
    }

    #[test]
    fn builder_rejects_empty_struct() {
        let err = StructDescriptorBuilder::new("Empty", 4, 4).finish().unwrap_err();
        assert_eq!(err, LayoutError::EmptyStruct("Empty".to_string()));
    }

    #[test]
    fn array_field_size_must_divide() {
        let err = StructDescriptorBuilder::new("Bad", 24, 4)
            .field(FieldDescriptor::array("scores", 0, 20, "float", 3))
            .finish()
            .unwrap_err();
        assert!(matches!(err, LayoutError::BadArrayLength { elem_count: 3, .. }));

        let ok = StructDescriptorBuilder::new("Good", 24, 4)
            .field(FieldDescriptor::array("scores", 0, 20, "float", 5))
            .finish()
            .unwrap();
        let scores = ok.field("scores").unwrap();
        assert_eq!(scores.kind, FieldKind::Array);
        assert_eq!(scores.elem_count, 5);
        assert_eq!(scores.size, 5 * 4);
        assert_eq!(scores.elem_type.as_deref(), Some("float"));
    }

    #[test]
    fn from_type_name_classifies() {
        let f = FieldDescriptor::from_type_name("name", 8, 8, "char*", 0).unwrap();
        assert_eq!(f.kind, FieldKind::CString);

        let f = FieldDescriptor::from_type_name("addr", 0, 8, "Address", 0).unwrap();
        assert_eq!(f.kind, FieldKind::Struct);
        assert_eq!(f.type_name, "Address");

        assert!(FieldDescriptor::from_type_name("bad", 0, 4, "???", 0).is_err());
    }
}
