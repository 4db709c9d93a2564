//! Module for interacting with named units and their definitions.

use crate::error::{DefineError, InvalidNameError};
use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hasher;
use std::sync::Arc;

/// A shared reference to a loaded unit.
pub type Handle = Arc<Unit>;

/// A validated unit name, made up of one or more segments separated by `.`.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct UnitName(Arc<str>);

impl UnitName {
    pub const SEPARATOR: char = '.';

    fn is_invalid_character(c: char) -> bool {
        c.is_whitespace() || matches!(c, '/' | ';' | '[' | '\0')
    }

    pub fn try_from_str(name: &str) -> Result<Self, InvalidNameError> {
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }

        let mut segment_start = 0;
        for (offset, c) in name.char_indices() {
            if c == Self::SEPARATOR {
                if offset == segment_start {
                    return Err(InvalidNameError::EmptySegment {
                        name: name.to_owned(),
                        offset,
                    });
                }
                segment_start = offset + 1;
            } else if Self::is_invalid_character(c) {
                return Err(InvalidNameError::InvalidCharacter {
                    name: name.to_owned(),
                    character: c,
                    offset,
                });
            }
        }

        if segment_start == name.len() {
            return Err(InvalidNameError::EmptySegment {
                name: name.to_owned(),
                offset: segment_start,
            });
        }

        Ok(Self(Arc::from(name)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split(Self::SEPARATOR)
    }

    /// The last segment of the name.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit(Self::SEPARATOR).next().unwrap_or(&self.0)
    }
}

impl TryFrom<&str> for UnitName {
    type Error = InvalidNameError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::try_from_str(name)
    }
}

impl TryFrom<String> for UnitName {
    type Error = InvalidNameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::try_from_str(&name)
    }
}

impl std::str::FromStr for UnitName {
    type Err = InvalidNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(name)
    }
}

impl Borrow<str> for UnitName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Debug for UnitName {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for UnitName {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit that was built from its definition by a loader.
pub struct Unit {
    name: UnitName,
    definition: Arc<[u8]>,
    defined_by: Arc<str>,
    fingerprint: lazy_init::Lazy<u64>,
}

impl Unit {
    /// Builds a unit from the bytes of its definition, recording the label of the loader that defined it.
    pub fn define<D, L>(name: UnitName, definition: D, defined_by: L) -> Result<Handle, DefineError>
    where
        D: Into<Arc<[u8]>>,
        L: Into<Arc<str>>,
    {
        let definition = definition.into();
        if definition.is_empty() {
            return Err(DefineError::EmptyDefinition { name });
        }

        Ok(Arc::new(Self {
            name,
            definition,
            defined_by: defined_by.into(),
            fingerprint: Default::default(),
        }))
    }

    pub fn name(&self) -> &UnitName {
        &self.name
    }

    pub fn definition(&self) -> &[u8] {
        &self.definition
    }

    /// The label of the loader that built this unit.
    pub fn defined_by(&self) -> &str {
        &self.defined_by
    }

    /// A hash of the definition, computed on first use.
    pub fn fingerprint(&self) -> u64 {
        *self.fingerprint.get_or_create(|| {
            let mut hasher = rustc_hash::FxHasher::default();
            hasher.write(&self.definition);
            hasher.finish()
        })
    }
}

impl Debug for Unit {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name)
            .field("length", &self.definition.len())
            .field("defined_by", &self.defined_by)
            .finish()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fingerprint() == other.fingerprint() && self.definition == other.definition
    }
}

impl Eq for Unit {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_names_are_valid() {
        let name = UnitName::try_from_str("user.Foo$Bar").unwrap();
        assert_eq!(name.segments().collect::<Vec<_>>(), ["user", "Foo$Bar"]);
        assert_eq!(name.simple_name(), "Foo$Bar");
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert_eq!(UnitName::try_from_str(""), Err(InvalidNameError::Empty));
        assert!(matches!(
            UnitName::try_from_str("a..b"),
            Err(InvalidNameError::EmptySegment { offset: 2, .. })
        ));
        assert!(matches!(
            UnitName::try_from_str("a.b."),
            Err(InvalidNameError::EmptySegment { offset: 4, .. })
        ));
        assert!(matches!(
            UnitName::try_from_str(".a"),
            Err(InvalidNameError::EmptySegment { offset: 0, .. })
        ));
    }

    #[test]
    fn path_characters_are_rejected() {
        assert!(matches!(
            UnitName::try_from_str("java/lang/Object"),
            Err(InvalidNameError::InvalidCharacter { character: '/', offset: 4, .. })
        ));
    }

    #[test]
    fn empty_definition_is_rejected() {
        let name = UnitName::try_from_str("Empty").unwrap();
        assert!(matches!(
            Unit::define(name, Vec::<u8>::new(), "test"),
            Err(DefineError::EmptyDefinition { .. })
        ));
    }

    #[test]
    fn units_with_same_content_are_equal() {
        let name = UnitName::try_from_str("Foo").unwrap();
        let a = Unit::define(name.clone(), b"foo".as_slice(), "a").unwrap();
        let b = Unit::define(name, b"foo".as_slice(), "b").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
