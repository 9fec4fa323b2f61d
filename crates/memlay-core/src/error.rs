//! Errors raised while constructing layout descriptors.
//!
//! All variants abort descriptor construction for the offending type: a
//! missing descriptor is recoverable for consumers, a wrong one is not.

use thiserror::Error;

/// Errors that occur while building a [`StructDescriptor`].
///
/// [`StructDescriptor`]: crate::StructDescriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A type name could not be classified into the field-kind taxonomy.
    #[error("unsupported type name: '{0}'")]
    UnsupportedType(String),

    /// A field extends past the end of its struct.
    #[error("field '{field}' of '{owner}' ends at byte {end} but the struct is {size} bytes")]
    FieldOutOfBounds {
        owner: String,
        field: String,
        end: usize,
        size: usize,
    },

    /// Two fields occupy overlapping byte ranges.
    #[error("fields '{first}' and '{second}' of '{owner}' overlap at byte {offset}")]
    OverlappingFields {
        owner: String,
        first: String,
        second: String,
        offset: usize,
    },

    /// The struct's alignment is zero or not a power of two.
    #[error("struct '{owner}' has invalid alignment {alignment}")]
    BadAlignment { owner: String, alignment: usize },

    /// The struct's total size is not a multiple of its alignment.
    #[error("struct '{owner}' has size {size} which is not a multiple of alignment {alignment}")]
    SizeNotAligned {
        owner: String,
        size: usize,
        alignment: usize,
    },

    /// An array field's element count does not divide its byte size.
    #[error("array field '{field}' of '{owner}' has {elem_count} elements but size {size}")]
    BadArrayLength {
        owner: String,
        field: String,
        elem_count: usize,
        size: usize,
    },

    /// A descriptor with no fields was submitted.
    #[error("struct '{0}' has no fields")]
    EmptyStruct(String),
}
