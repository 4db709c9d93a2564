//! Contains types representing errors encountered during unit resolution.

use crate::unit::UnitName;
use std::fmt::{Display, Formatter};

/// A boxed error type, used to carry errors raised by resolvers without changing them.
///
/// Workaround for https://github.com/rust-lang/project-error-handling/issues/16
#[repr(transparent)]
pub struct GenericError(Box<dyn std::error::Error + Send + Sync>);

impl GenericError {
    /// Boxes an error. Errors that are already a [`GenericError`] are not boxed a second time.
    pub fn new<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(error);
        match boxed.downcast::<GenericError>() {
            Ok(generic) => *generic,
            Err(boxed) => Self(boxed),
        }
    }

    /// Returns a reference to the original error if it is of type `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl std::fmt::Debug for GenericError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for GenericError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// The error type used when a string is not a valid unit name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidNameError {
    #[error("unit names must not be empty")]
    Empty,
    #[error("unit name {name:?} contains an empty segment at byte offset {offset}")]
    EmptySegment { name: String, offset: usize },
    #[error("unit name {name:?} contains the invalid character {character:?} at byte offset {offset}")]
    InvalidCharacter { name: String, character: char, offset: usize },
}

/// The error type used when a unit cannot be built from its definition.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DefineError {
    #[error("the definition of unit {name} is empty")]
    EmptyDefinition { name: UnitName },
    #[error("the unit {name} was already defined by {defined_by}")]
    AlreadyDefined { name: UnitName, defined_by: String },
}

impl DefineError {
    /// Gets the name of the unit that could not be defined.
    pub fn name(&self) -> &UnitName {
        match self {
            Self::EmptyDefinition { name } | Self::AlreadyDefined { name, .. } => name,
        }
    }
}

/// Indicates that neither a resolver nor any loader in a chain could provide a unit.
#[derive(Clone, Debug, thiserror::Error)]
#[error("the unit {name} could not be found")]
pub struct NotFoundError {
    name: UnitName,
}

impl NotFoundError {
    pub fn new(name: UnitName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &UnitName {
        &self.name
    }
}

/// Errors that originate from a resolver, either raised by it or caused by an answer that breaks its contract.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolverError {
    /// The error raised by the resolver itself, left unchanged.
    #[error(transparent)]
    Raised(GenericError),
    #[error("resolver answered a request for {expected} with the unit {actual}")]
    NameMismatch { expected: UnitName, actual: UnitName },
    /// The resolver returned a definition that could not be turned into a unit.
    #[error(transparent)]
    Define(#[from] DefineError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// The error type used when resolving a unit fails.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
#[repr(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn new<E: Into<ErrorKind>>(error: E) -> Self {
        Self(Box::new(error.into()))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound(_))
    }

    /// Returns the error raised by a resolver if it is of type `E`.
    pub fn downcast_raised<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self.kind() {
            ErrorKind::Resolver(ResolverError::Raised(error)) => error.downcast_ref(),
            _ => None,
        }
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}
