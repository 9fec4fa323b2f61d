//! Core layout-descriptor model for memlay.
//!
//! This crate defines the data shapes the rest of the workspace is built on:
//! the five-way [`FieldKind`] taxonomy, [`FieldDescriptor`] and
//! [`StructDescriptor`], and the validating [`StructDescriptorBuilder`].
//! Descriptors carry the offsets and sizes the compiler actually applied to
//! a concrete `#[repr(C)]` type; they are constructed once and read-only
//! thereafter.

mod descriptor;
mod error;
mod field_kind;

pub use descriptor::{FieldDescriptor, StructDescriptor, StructDescriptorBuilder};
pub use error::LayoutError;
pub use field_kind::FieldKind;
