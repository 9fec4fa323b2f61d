//! Field kinds for the five-way layout taxonomy.

use std::fmt;

use num_enum::IntoPrimitive;

use crate::LayoutError;

/// How a consumer must interpret the bytes at a field's offset.
///
/// The `u8` discriminants are stable and visible to external tooling, so
/// they must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive)]
#[repr(u8)]
pub enum FieldKind {
    /// Scalar value read directly at the offset.
    Primitive = 0,
    /// Opaque address read directly at the offset.
    Pointer = 1,
    /// Address of a null-terminated byte sequence, not inline data.
    CString = 2,
    /// `elem_count` contiguous elements of `elem_type`.
    Array = 3,
    /// A nested region described by a separately registered descriptor.
    Struct = 4,
}

/// C scalar type names that classify as [`FieldKind::Primitive`].
const SCALAR_NAMES: &[&str] = &[
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    "char", "short", "int", "long", "long long", "float", "double", "bool", "_Bool", "size_t",
    "uintptr_t",
];

impl FieldKind {
    /// Get the name of this field kind.
    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Primitive => "primitive",
            FieldKind::Pointer => "pointer",
            FieldKind::CString => "string",
            FieldKind::Array => "array",
            FieldKind::Struct => "struct",
        }
    }

    /// Classify a declared type name into the taxonomy.
    ///
    /// `elem_count > 0` forces [`FieldKind::Array`]. `char*` is a string,
    /// any other trailing `*` (or the spellings `pointer` / `void*`) is an
    /// opaque pointer, known C scalar names are primitives, and a bare
    /// identifier is taken as a nested struct type name to be resolved
    /// against the registry. Anything else is an error: a silently
    /// mis-classified field would mis-describe layout to every consumer.
    pub fn classify(type_name: &str, elem_count: usize) -> Result<FieldKind, LayoutError> {
        if elem_count > 0 {
            return Ok(FieldKind::Array);
        }
        if type_name == "char*" {
            return Ok(FieldKind::CString);
        }
        if type_name == "pointer" || type_name.ends_with('*') {
            return Ok(FieldKind::Pointer);
        }
        if SCALAR_NAMES.contains(&type_name) {
            return Ok(FieldKind::Primitive);
        }
        if is_bare_identifier(type_name) {
            return Ok(FieldKind::Struct);
        }
        Err(LayoutError::UnsupportedType(type_name.to_string()))
    }
}

// Hand-written rather than derived: a `TryFromPrimitive` derive would make
// `Self::Primitive` ambiguous between the variant and the trait's
// associated type.
impl TryFrom<u8> for FieldKind {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<FieldKind, LayoutError> {
        match value {
            0 => Ok(FieldKind::Primitive),
            1 => Ok(FieldKind::Pointer),
            2 => Ok(FieldKind::CString),
            3 => Ok(FieldKind::Array),
            4 => Ok(FieldKind::Struct),
            _ => Err(LayoutError::UnsupportedType(format!("field kind {value}"))),
        }
    }
}

fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
