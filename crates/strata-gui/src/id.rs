//! Stable, scoped widget identifiers.
//!
//! An [`Id`] is `hash_combine(hash(name), parent)`. The same sequence of calls
//! reproduces the same ids every frame, which is what lets [`Storage`] and the
//! interaction tracker recognise a widget across frames without retaining it.
//!
//! Two unrelated widgets with the same name under the same parent collide.
//! That is a caller contract and is not detected.
//!
//! [`Storage`]: crate::Storage

use ahash::AHasher;
use std::hash::{Hash, Hasher};

/// Opaque widget identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

impl Id {
    /// "No widget" / "no parent"
    pub const NONE: Id = Id(0);

    /// Derive an identifier for `name` scoped under `parent`.
    pub fn new<'a>(name: impl Into<IdName<'a>>, parent: Id) -> Id {
        Id(hash_combine(name.into().hash_value(), parent.0))
    }

    /// Root-scoped identifier, equivalent to `Id::new(name, Id::NONE)`
    pub fn root<'a>(name: impl Into<IdName<'a>>) -> Id {
        Self::new(name, Id::NONE)
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derive a child id; shorthand for `Id::new(name, self)`
    pub fn with<'a>(self, name: impl Into<IdName<'a>>) -> Id {
        Id::new(name, self)
    }
}

/// The name half of an identifier
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdName<'a> {
    Int(i64),
    /// Hashed by bit pattern, so `0.0` and `-0.0` differ
    Float(f32),
    Text(&'a str),
}

impl IdName<'_> {
    fn hash_value(&self) -> u64 {
        let mut hasher = AHasher::default();
        match self {
            IdName::Int(v) => {
                0u8.hash(&mut hasher);
                v.hash(&mut hasher);
            }
            IdName::Float(v) => {
                1u8.hash(&mut hasher);
                v.to_bits().hash(&mut hasher);
            }
            IdName::Text(v) => {
                2u8.hash(&mut hasher);
                v.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

impl<'a> From<&'a str> for IdName<'a> {
    fn from(value: &'a str) -> Self {
        IdName::Text(value)
    }
}

impl<'a> From<&'a String> for IdName<'a> {
    fn from(value: &'a String) -> Self {
        IdName::Text(value.as_str())
    }
}

impl From<i64> for IdName<'_> {
    fn from(value: i64) -> Self {
        IdName::Int(value)
    }
}

impl From<i32> for IdName<'_> {
    fn from(value: i32) -> Self {
        IdName::Int(value as i64)
    }
}

impl From<usize> for IdName<'_> {
    fn from(value: usize) -> Self {
        IdName::Int(value as i64)
    }
}

impl From<f32> for IdName<'_> {
    fn from(value: f32) -> Self {
        IdName::Float(value)
    }
}

impl From<Id> for IdName<'_> {
    fn from(value: Id) -> Self {
        IdName::Int(value.0 as i64)
    }
}

/// Mix a name hash into a parent identifier.
///
/// Never returns 0, which is reserved for [`Id::NONE`].
pub(crate) fn hash_combine(hash: u64, parent: u64) -> u64 {
    let mixed = parent
        ^ hash
            .wrapping_add(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(parent << 6)
            .wrapping_add(parent >> 2);
    if mixed == 0 {
        1
    } else {
        mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_stable() {
        let a = Id::root("A");
        let b = Id::root("A");
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn test_parent_disambiguates() {
        let root_a = Id::root("A");
        let scoped_a = Id::new("A", Id::root("B"));
        assert_ne!(root_a, scoped_a);
    }

    #[test]
    fn test_name_kinds_differ() {
        assert_ne!(Id::root(1i64), Id::root(1.0f32));
        assert_ne!(Id::root("1"), Id::root(1i64));
        assert_ne!(Id::root(0.0f32), Id::root(-0.0f32));
    }

    #[test]
    fn test_sibling_order_does_not_matter() {
        let parent = Id::root("list");
        let first = parent.with(0usize);
        let _other = parent.with(7usize);
        assert_eq!(first, Id::new(0i64, parent));
    }

    #[test]
    fn test_never_none() {
        assert_ne!(hash_combine(0, 0), 0);
    }
}
