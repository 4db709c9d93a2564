//! Contains the trait implemented by every loader in a chain, and helpers for walking that chain.

use crate::unit::{Handle, UnitName};
use std::fmt::Debug;
use std::sync::Arc;

/// A loader in a chain of loaders, each of which may resolve a unit itself or delegate to its parent.
///
/// The root of every chain has no parent and signals [`NotFoundError`] for names it does not define.
///
/// [`NotFoundError`]: crate::error::NotFoundError
pub trait Loader: Debug + Send + Sync {
    /// A short name for this loader, used in diagnostics and recorded by the units it defines.
    fn label(&self) -> &str;

    /// The next loader in the chain, or `None` for the root.
    fn parent(&self) -> Option<&Arc<dyn Loader>>;

    /// Resolves the unit corresponding to the specified name, returning a [`NotFoundError`] when no loader in the chain
    /// knows the name.
    ///
    /// [`NotFoundError`]: crate::error::NotFoundError
    fn resolve(&self, name: &UnitName) -> crate::Result<Handle>;
}

/// Iterator over the ancestors of a loader, from its parent up to the root.
///
/// Obtained by calling [`ancestors()`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    next: Option<&'a dyn Loader>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a dyn Loader;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent().map(|parent| parent.as_ref() as &dyn Loader);
        Some(current)
    }
}

pub fn ancestors(loader: &dyn Loader) -> Ancestors<'_> {
    Ancestors {
        next: loader.parent().map(|parent| parent.as_ref() as &dyn Loader),
    }
}

/// Gets the loader at the end of the chain.
pub fn root(loader: &dyn Loader) -> &dyn Loader {
    ancestors(loader).last().unwrap_or(loader)
}
