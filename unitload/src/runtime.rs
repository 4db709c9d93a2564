//! Module for the host runtime, which remembers every unit resolved through its loader.

use crate::loader::Loader;
use crate::unit::{Handle, UnitName};
use std::collections::hash_map;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type UnitLookup = rustc_hash::FxHashMap<UnitName, Handle>;

/// Registers the units resolved by a loader, so that later requests for the same name return the same handle without
/// resolving it again.
pub struct Runtime {
    loader: Arc<dyn Loader>,
    // Never held while resolving, a resolver may load other units through the same runtime
    units: Mutex<UnitLookup>,
}

impl Runtime {
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            loader,
            units: Default::default(),
        }
    }

    /// The loader that resolves units that were not yet loaded.
    pub fn loader(&self) -> &Arc<dyn Loader> {
        &self.loader
    }

    fn units(&self) -> MutexGuard<'_, UnitLookup> {
        // Entries are only ever inserted, so the lookup is still valid after a panic
        self.units.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gets the unit previously loaded with the specified name.
    pub fn find_loaded(&self, name: &str) -> Option<Handle> {
        self.units().get(name).cloned()
    }

    /// Gets the loaded unit corresponding to the name or resolves it using the loader.
    ///
    /// If two threads resolve the same name at once, the unit registered first is returned to both.
    pub fn load(&self, name: &UnitName) -> crate::Result<Handle> {
        if let Some(unit) = self.find_loaded(name.as_str()) {
            tracing::trace!(unit = %name, "unit was already loaded");
            return Ok(unit);
        }

        let resolved = self.loader.resolve(name)?;
        match self.units().entry(name.clone()) {
            hash_map::Entry::Occupied(occupied) => {
                tracing::debug!(unit = %name, "discarding unit that was concurrently loaded");
                Ok(occupied.get().clone())
            }
            hash_map::Entry::Vacant(vacant) => {
                tracing::debug!(unit = %name, defined_by = resolved.defined_by(), "loaded unit");
                Ok(vacant.insert(resolved).clone())
            }
        }
    }

    /// The names of all loaded units, in sorted order.
    pub fn loaded(&self) -> Vec<UnitName> {
        let mut names: Vec<_> = self.units().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Debug for Runtime {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("loader", &self.loader)
            .field("units", &self.units)
            .finish()
    }
}
