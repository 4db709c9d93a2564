//! Module for the loader at the root of every chain.

use crate::error::{DefineError, NotFoundError};
use crate::loader::Loader;
use crate::unit::{Handle, Unit, UnitName};
use std::collections::hash_map;
use std::sync::Arc;

type UnitLookup = rustc_hash::FxHashMap<UnitName, Handle>;

/// A loader with no parent that only knows a fixed set of builtin units.
#[derive(Debug)]
pub struct Bootstrap {
    label: Arc<str>,
    units: UnitLookup,
}

impl Bootstrap {
    pub const DEFAULT_LABEL: &'static str = "bootstrap";

    /// Creates a bootstrap loader with no builtin units.
    pub fn new() -> Self {
        Self::with_label(Self::DEFAULT_LABEL)
    }

    pub fn with_label<L: Into<Arc<str>>>(label: L) -> Self {
        Self {
            label: label.into(),
            units: Default::default(),
        }
    }

    /// Defines a builtin unit. Each name may only be defined once.
    pub fn define<D: Into<Arc<[u8]>>>(&mut self, name: UnitName, definition: D) -> Result<Handle, DefineError> {
        match self.units.entry(name) {
            hash_map::Entry::Occupied(occupied) => Err(DefineError::AlreadyDefined {
                name: occupied.key().clone(),
                defined_by: self.label.to_string(),
            }),
            hash_map::Entry::Vacant(vacant) => {
                let unit = Unit::define(vacant.key().clone(), definition, self.label.clone())?;
                Ok(vacant.insert(unit).clone())
            }
        }
    }

    pub fn into_shared(self) -> Arc<dyn Loader> {
        Arc::new(self)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for Bootstrap {
    fn label(&self) -> &str {
        &self.label
    }

    fn parent(&self) -> Option<&Arc<dyn Loader>> {
        None
    }

    fn resolve(&self, name: &UnitName) -> crate::Result<Handle> {
        match self.units.get(name) {
            Some(unit) => {
                tracing::trace!(loader = %self.label, unit = %name, "found builtin unit");
                Ok(unit.clone())
            }
            None => Err(NotFoundError::new(name.clone()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn builtins_cannot_be_redefined() {
        let name = UnitName::try_from_str("Builtin").unwrap();
        let mut bootstrap = Bootstrap::with_label("root");
        let builtin = bootstrap.define(name.clone(), b"first".as_slice()).unwrap();

        let error = bootstrap.define(name.clone(), b"second".as_slice()).unwrap_err();
        assert!(matches!(&error, DefineError::AlreadyDefined { defined_by, .. } if defined_by == "root"));
        assert_eq!(error.name(), &name);
        assert!(Arc::ptr_eq(&bootstrap.resolve(&name).unwrap(), &builtin));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let name = UnitName::try_from_str("Missing").unwrap();
        match Bootstrap::default().resolve(&name).unwrap_err().kind() {
            ErrorKind::NotFound(error) => assert_eq!(error.name(), &name),
            error => panic!("unexpected error {:?}", error),
        }
    }
}
