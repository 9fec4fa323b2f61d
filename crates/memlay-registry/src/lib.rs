//! Name-keyed registry of struct-layout descriptors.
//!
//! Hosts register every [`StructDescriptor`] during an explicit startup
//! phase, seal the registry, and perform lookups by struct name thereafter.
//!
//! [`StructDescriptor`]: memlay_core::StructDescriptor

mod registry;
mod shared;

pub use registry::{LayoutRegistry, RegistryError};
pub use shared::{SharedLayoutRegistry, global, lookup_global, register_global, seal_global};
