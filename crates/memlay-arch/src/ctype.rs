//! C scalar type names and their measured sizes and alignments.

use std::fmt;

use crate::ArchInfo;

/// The C scalar types layout prediction understands.
///
/// Signedness never changes layout, so signed and unsigned spellings of
/// the same width map to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Pointer,
    SizeT,
}

impl CType {
    /// Parse a C type name. Returns `None` for names with no fixed scalar
    /// layout (struct names, arrays, bitfields).
    pub fn parse(name: &str) -> Option<CType> {
        match name {
            "int8_t" | "uint8_t" | "char" | "bool" | "_Bool" => Some(CType::Int8),
            "int16_t" | "uint16_t" | "short" => Some(CType::Int16),
            "int32_t" | "uint32_t" | "int" => Some(CType::Int32),
            "int64_t" | "uint64_t" | "long" | "long long" => Some(CType::Int64),
            "float" => Some(CType::Float),
            "double" => Some(CType::Double),
            "size_t" | "uintptr_t" => Some(CType::SizeT),
            "pointer" => Some(CType::Pointer),
            _ if name.ends_with('*') => Some(CType::Pointer),
            _ => None,
        }
    }

    /// Measured size of this type on the probed platform.
    pub fn size(self, arch: &ArchInfo) -> usize {
        match self {
            CType::Int8 => arch.int8_size,
            CType::Int16 => arch.int16_size,
            CType::Int32 => arch.int32_size,
            CType::Int64 => arch.int64_size,
            CType::Float => arch.float32_size,
            CType::Double => arch.float64_size,
            CType::Pointer => arch.pointer_size,
            CType::SizeT => arch.sizet_size,
        }
    }

    /// Measured alignment of this type on the probed platform.
    pub fn alignment(self, arch: &ArchInfo) -> usize {
        match self {
            CType::Int8 => arch.int8_align,
            CType::Int16 => arch.int16_align,
            CType::Int32 => arch.int32_align,
            CType::Int64 => arch.int64_align,
            CType::Float => arch.float32_align,
            CType::Double => arch.float64_align,
            CType::Pointer => arch.pointer_align,
            CType::SizeT => arch.sizet_align,
        }
    }

    /// Canonical name for this type.
    pub const fn name(self) -> &'static str {
        match self {
            CType::Int8 => "int8_t",
            CType::Int16 => "int16_t",
            CType::Int32 => "int32_t",
            CType::Int64 => "int64_t",
            CType::Float => "float",
            CType::Double => "double",
            CType::Pointer => "pointer",
            CType::SizeT => "size_t",
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
