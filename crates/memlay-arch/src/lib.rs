//! Architecture and alignment probe for memlay.
//!
//! Independently measures the platform's real layout rules: primitive
//! sizes, the offsets the compiler assigns inside a deliberately irregular
//! test layout, pointer width, and endianness. Consumers use the resulting
//! [`ArchInfo`] to cross-check the assumptions baked into generated
//! descriptors, and [`OffsetPredictor`] to compute standard C layout
//! offsets from type names alone.

mod ctype;
mod predictor;
mod probe;

pub use ctype::CType;
pub use predictor::OffsetPredictor;
pub use probe::{ArchInfo, alignment_from_offset, implied_alignment};
