//! Module for the loader that offers each name to a resolver before delegating to its parent.

use crate::error::{GenericError, ResolverError};
use crate::loader::Loader;
use crate::resolver::{self, Answer, Resolver};
use crate::unit::{Handle, Unit, UnitName};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A loader that first asks its resolver for a unit, and only when the resolver declines asks its parent.
///
/// A unit returned by the resolver is authoritative, so the parent is never consulted for that name. Errors raised by
/// the resolver are returned as is, without falling back to the parent.
///
/// The loader does not cache anything, see [`Runtime`] for a cache of resolved units.
///
/// [`Runtime`]: crate::runtime::Runtime
pub struct ResolvingLoader<R> {
    label: Arc<str>,
    parent: Arc<dyn Loader>,
    resolver: R,
}

impl<R: Resolver> ResolvingLoader<R> {
    pub const DEFAULT_LABEL: &'static str = "resolving";

    pub fn new(parent: Arc<dyn Loader>, resolver: R) -> Self {
        Self::with_label(Self::DEFAULT_LABEL, parent, resolver)
    }

    pub fn with_label<L: Into<Arc<str>>>(label: L, parent: Arc<dyn Loader>, resolver: R) -> Self {
        Self {
            label: label.into(),
            parent,
            resolver,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn into_shared(self) -> Arc<dyn Loader>
    where
        R: 'static,
    {
        Arc::new(self)
    }

    fn accept(&self, name: &UnitName, answer: Answer) -> Result<Handle, ResolverError> {
        match answer {
            Answer::Unit(unit) if unit.name() == name => Ok(unit),
            Answer::Unit(unit) => Err(ResolverError::NameMismatch {
                expected: name.clone(),
                actual: unit.name().clone(),
            }),
            Answer::Definition(definition) => Ok(Unit::define(name.clone(), definition, self.label.clone())?),
        }
    }
}

impl ResolvingLoader<resolver::Unsuccessful> {
    /// Creates a loader whose resolver declines every name, making it behave exactly like its parent.
    pub fn without_resolver(parent: Arc<dyn Loader>) -> Self {
        Self::new(parent, resolver::unsuccessful())
    }
}

impl<R: Resolver> Loader for ResolvingLoader<R> {
    fn label(&self) -> &str {
        &self.label
    }

    fn parent(&self) -> Option<&Arc<dyn Loader>> {
        Some(&self.parent)
    }

    fn resolve(&self, name: &UnitName) -> crate::Result<Handle> {
        match self.resolver.resolve(name) {
            Ok(Some(answer)) => {
                let unit = self.accept(name, answer)?;
                tracing::debug!(loader = %self.label, unit = %name, defined_by = unit.defined_by(), "resolver supplied unit");
                Ok(unit)
            }
            Ok(None) => {
                tracing::trace!(loader = %self.label, unit = %name, parent = self.parent.label(), "resolver declined");
                self.parent.resolve(name)
            }
            Err(error) => {
                tracing::debug!(loader = %self.label, unit = %name, %error, "resolver failed");
                Err(ResolverError::Raised(GenericError::new(error)).into())
            }
        }
    }
}

impl<R> Debug for ResolvingLoader<R> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("ResolvingLoader")
            .field("label", &self.label)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
