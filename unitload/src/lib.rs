//! Library for resolving named units through a pluggable resolver, falling back to a chain of parent loaders.
//!
//! A [`ResolvingLoader`] offers every name to its [`Resolver`] first. A unit supplied by the resolver is returned
//! immediately, while a resolver that declines causes the name to be resolved by the parent loader instead. Every chain
//! ends in a [`Bootstrap`] loader, which reports names it does not know with a
//! [`NotFoundError`](error::NotFoundError).
//!
//! The types provided by this crate are thread-safe, and loaders hold no mutable state.

pub mod bootstrap;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod resolving;
pub mod runtime;
pub mod unit;

pub use bootstrap::Bootstrap;
pub use error::Error;
pub use loader::Loader;
pub use resolver::{Answer, Resolver};
pub use resolving::ResolvingLoader;
pub use runtime::Runtime;
pub use unit::{Handle, Unit, UnitName};

pub type Result<T> = std::result::Result<T, Error>;
