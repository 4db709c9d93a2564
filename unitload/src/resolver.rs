//! Module for the resolvers that are offered unit names before a loader consults its parent.

use crate::error::GenericError;
use crate::unit::{Handle, UnitName};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

/// The answer a resolver gives for a unit name it recognizes.
#[derive(Clone, Debug)]
pub enum Answer {
    /// A unit that was already built.
    Unit(Handle),
    /// The bytes of a definition, which the loader turns into a unit that it defines.
    Definition(Arc<[u8]>),
}

impl From<Handle> for Answer {
    fn from(unit: Handle) -> Self {
        Self::Unit(unit)
    }
}

impl From<Arc<[u8]>> for Answer {
    fn from(definition: Arc<[u8]>) -> Self {
        Self::Definition(definition)
    }
}

impl From<Vec<u8>> for Answer {
    fn from(definition: Vec<u8>) -> Self {
        Self::Definition(definition.into())
    }
}

impl From<&[u8]> for Answer {
    fn from(definition: &[u8]) -> Self {
        Self::Definition(definition.into())
    }
}

/// Trait for retrieving units from unit names, given the first chance at resolving a name before the parent loader.
///
/// Resolvers may be called from multiple threads at once, and the same name may be requested more than once.
pub trait Resolver: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the unit corresponding to the specified name.
    ///
    /// Returns `Ok(Some)` when a unit is successfully retrieved, `Ok(None)` if the resolver does not recognize the name, or
    /// `Err` if the resolver recognized the name but could not produce the unit.
    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error>;
}

impl<R: Resolver + ?Sized> Resolver for &'_ R {
    type Error = R::Error;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        R::resolve(self, name)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    type Error = R::Error;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        R::resolve(self, name)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    type Error = R::Error;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        R::resolve(self, name)
    }
}

/// A missing resolver declines every name.
impl<R: Resolver> Resolver for Option<R> {
    type Error = R::Error;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        match self {
            Some(resolver) => resolver.resolve(name),
            None => Ok(None),
        }
    }
}

/// A resolver that never successfully retrieves a unit.
///
/// Obtained by calling [`unsuccessful()`].
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct Unsuccessful;

/// Constructs a resolver that never succeeds.
#[must_use]
pub fn unsuccessful() -> Unsuccessful {
    Unsuccessful
}

impl Resolver for Unsuccessful {
    type Error = std::convert::Infallible;

    fn resolve(&self, _: &UnitName) -> Result<Option<Answer>, Self::Error> {
        Ok(None)
    }
}

/// Adapts a closure into a [`Resolver`].
///
/// Obtained by calling [`from_fn()`].
pub struct ResolverClosure<F, E> {
    closure: F,
    error: PhantomData<fn() -> E>,
}

#[must_use]
pub fn from_fn<F, E>(closure: F) -> ResolverClosure<F, E>
where
    F: Fn(&UnitName) -> Result<Option<Answer>, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    ResolverClosure {
        closure,
        error: PhantomData,
    }
}

impl<F, E> Resolver for ResolverClosure<F, E>
where
    F: Fn(&UnitName) -> Result<Option<Answer>, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, E> {
        (self.closure)(name)
    }
}

impl<F, E> Debug for ResolverClosure<F, E> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("ResolverClosure").finish_non_exhaustive()
    }
}

/// A resolver that answers with definitions stored in memory.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    definitions: rustc_hash::FxHashMap<UnitName, Arc<[u8]>>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a definition, returning the definition previously stored for the name.
    pub fn insert<D: Into<Arc<[u8]>>>(&mut self, name: UnitName, definition: D) -> Option<Arc<[u8]>> {
        self.definitions.insert(name, definition.into())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<D: Into<Arc<[u8]>>> Extend<(UnitName, D)> for MapResolver {
    fn extend<I: IntoIterator<Item = (UnitName, D)>>(&mut self, definitions: I) {
        self.definitions
            .extend(definitions.into_iter().map(|(name, definition)| (name, definition.into())))
    }
}

impl<D: Into<Arc<[u8]>>> FromIterator<(UnitName, D)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (UnitName, D)>>(definitions: I) -> Self {
        let mut resolver = Self::new();
        resolver.extend(definitions);
        resolver
    }
}

impl Resolver for MapResolver {
    type Error = std::convert::Infallible;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        Ok(self.definitions.get(name).cloned().map(Answer::Definition))
    }
}

#[repr(transparent)]
struct BoxedResolverInternals<R>(R);

impl<R: Resolver> Resolver for BoxedResolverInternals<R> {
    type Error = GenericError;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        self.0.resolve(name).map_err(GenericError::new)
    }
}

/// A resolver whose concrete type and error type have been erased.
#[repr(transparent)]
pub struct BoxedResolver(Box<dyn Resolver<Error = GenericError>>);

impl Resolver for BoxedResolver {
    type Error = GenericError;

    fn resolve(&self, name: &UnitName) -> Result<Option<Answer>, Self::Error> {
        self.0.resolve(name)
    }
}

impl Debug for BoxedResolver {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_tuple("BoxedResolver").finish()
    }
}

pub fn boxed<R: Resolver + 'static>(resolver: R) -> BoxedResolver {
    BoxedResolver(Box::new(BoxedResolverInternals(resolver)))
}
