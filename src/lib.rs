//! memlay - runtime struct-layout metadata for cross-language marshalling.
//!
//! External tooling that reads or writes natively-compiled structs needs
//! the layout the compiler actually produced - field offsets, sizes,
//! alignment, padding - not an assumption about it. memlay captures that
//! layout as [`StructDescriptor`]s built from compiler facts
//! (`offset_of!`/`size_of` at the declaration site, via [`layout_of!`]),
//! publishes them in a name-keyed [`LayoutRegistry`], and independently
//! verifies the platform's layout rules with the [`ArchInfo`] probe.
//!
//! # Example
//!
//! ```
//! use memlay::prelude::*;
//! use std::ffi::c_char;
//!
//! #[repr(C)]
//! struct Device {
//!     id: u32,
//!     name: *const c_char,
//!     value: f32,
//! }
//!
//! let descriptor = layout_of! {
//!     Device {
//!         id: u32 => primitive("uint32_t"),
//!         name: *const c_char => cstring,
//!         value: f32 => primitive("float"),
//!     }
//! }
//! .unwrap();
//!
//! let mut registry = LayoutRegistry::new();
//! registry.register(descriptor).unwrap();
//! registry.seal();
//!
//! let device = registry.lookup("Device").unwrap();
//! assert_eq!(device.field("name").unwrap().kind, FieldKind::CString);
//! ```

mod auto_layout;
mod macros;

pub use auto_layout::auto_layout;

pub use memlay_arch::{ArchInfo, CType, OffsetPredictor, alignment_from_offset, implied_alignment};
pub use memlay_core::{
    FieldDescriptor, FieldKind, LayoutError, StructDescriptor, StructDescriptorBuilder,
};
pub use memlay_registry::{
    LayoutRegistry, RegistryError, SharedLayoutRegistry, global, lookup_global, register_global,
    seal_global,
};

pub mod prelude {
    pub use crate::auto_layout::auto_layout;
    pub use crate::layout_of;
    pub use memlay_arch::{ArchInfo, CType, OffsetPredictor, implied_alignment};
    pub use memlay_core::{
        FieldDescriptor, FieldKind, LayoutError, StructDescriptor, StructDescriptorBuilder,
    };
    pub use memlay_registry::{LayoutRegistry, RegistryError, SharedLayoutRegistry};
}
