//! LayoutRegistry - name-keyed storage for struct descriptors.
//!
//! This module provides [`LayoutRegistry`], the lookup table consumers use
//! to resolve a struct name to its [`StructDescriptor`].
//!
//! # Registration phases
//!
//! A registry goes through two phases:
//!
//! - **Registration phase**: the host application constructs the registry
//!   and registers every descriptor during its own startup, in an order it
//!   controls. Registration is single-threaded here (wrap the registry in
//!   [`SharedLayoutRegistry`] if descriptors arrive from multiple threads,
//!   e.g. from dynamically loaded modules).
//!
//! - **Lookup phase**: after [`seal`](LayoutRegistry::seal) the registry is
//!   read-only; further registration is rejected, and shared references may
//!   be handed to any number of reader threads.
//!
//! Duplicate names are rejected at registration time rather than shadowed:
//! two descriptors under one name means one of them mis-describes memory,
//! and that is worth finding out during startup.
//!
//! [`SharedLayoutRegistry`]: crate::SharedLayoutRegistry

use rustc_hash::FxHashMap;
use thiserror::Error;

use memlay_core::StructDescriptor;

/// Errors that occur while registering a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A descriptor with this name is already registered.
    #[error("duplicate struct descriptor: {0}")]
    Duplicate(String),

    /// The registry has been sealed; no further registration is allowed.
    #[error("registry is sealed, cannot register '{0}'")]
    Sealed(String),
}

/// Name-keyed registry of [`StructDescriptor`]s.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    entries: FxHashMap<String, StructDescriptor>,
    sealed: bool,
}

impl LayoutRegistry {
    /// Create a new empty registry in the registration phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its struct name.
    pub fn register(&mut self, descriptor: StructDescriptor) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed(descriptor.name().to_string()));
        }
        if self.entries.contains_key(descriptor.name()) {
            return Err(RegistryError::Duplicate(descriptor.name().to_string()));
        }
        self.entries.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// End the registration phase. One-way: a sealed registry rejects all
    /// further writes and is safe to share for concurrent reads.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the registration phase has ended.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Look up a descriptor by struct name.
    ///
    /// A missing name is an expected outcome and returns `None`.
    pub fn lookup(&self, name: &str) -> Option<&StructDescriptor> {
        self.entries.get(name)
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all registered descriptors (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = &StructDescriptor> {
        self.entries.values()
    }
}
