//! Process-wide shared registry.
//!
//! [`SharedLayoutRegistry`] wraps a [`LayoutRegistry`] behind a mutex so
//! the write path is synchronized, covering hosts that register
//! descriptors from more than one thread (dynamically loaded modules,
//! late registration). The usual pattern is still register-then-seal;
//! sealing goes through the same lock, after which lookups are
//! contention-free in practice because writers are gone.
//!
//! A lazily initialized process-wide instance is available through
//! [`global`] for hosts that want a singleton rather than threading a
//! registry through their startup code.

use std::sync::Mutex;

use lazy_static::lazy_static;

use memlay_core::StructDescriptor;

use crate::{LayoutRegistry, RegistryError};

/// Mutex-guarded [`LayoutRegistry`] for multi-threaded registration.
#[derive(Debug, Default)]
pub struct SharedLayoutRegistry {
    inner: Mutex<LayoutRegistry>,
}

impl SharedLayoutRegistry {
    /// Create a new empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Same contract as
    /// [`LayoutRegistry::register`], with the write serialized.
    pub fn register(&self, descriptor: StructDescriptor) -> Result<(), RegistryError> {
        self.lock().register(descriptor)
    }

    /// End the registration phase.
    pub fn seal(&self) {
        self.lock().seal();
    }

    /// Whether the registration phase has ended.
    pub fn is_sealed(&self) -> bool {
        self.lock().is_sealed()
    }

    /// Look up a descriptor by name, returning an owned copy.
    pub fn lookup(&self, name: &str) -> Option<StructDescriptor> {
        self.lock().lookup(name).cloned()
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LayoutRegistry> {
        // A poisoned registry means a writer panicked mid-insert; the map
        // itself is still structurally sound, so keep serving it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

lazy_static! {
    static ref GLOBAL: SharedLayoutRegistry = SharedLayoutRegistry::new();
}

/// The process-wide shared registry.
pub fn global() -> &'static SharedLayoutRegistry {
    &GLOBAL
}

/// Register a descriptor with the process-wide registry.
pub fn register_global(descriptor: StructDescriptor) -> Result<(), RegistryError> {
    global().register(descriptor)
}

/// Look up a descriptor in the process-wide registry.
pub fn lookup_global(name: &str) -> Option<StructDescriptor> {
    global().lookup(name)
}

/// Seal the process-wide registry.
pub fn seal_global() {
    global().seal();
}
