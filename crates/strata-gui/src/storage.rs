//! Persistent per-widget state
//!
//! `Storage` keeps small pieces of widget state alive across frames: whether a
//! header is open, a scroll offset, which item of a list is selected. Entries
//! are addressed by an owning widget [`Id`] plus a sub-key, so one widget can
//! keep several values without them clashing.
//!
//! Nothing is evicted. A host that tears a viewport down may call
//! [`Storage::clear`].

use crate::id::{Id, IdName};
use ahash::AHashMap;

/// Three independent typed maps keyed by `hash_combine(sub_key, owner)`.
#[derive(Default)]
pub struct Storage {
    bools: AHashMap<Id, bool>,
    numbers: AHashMap<Id, f32>,
    ids: AHashMap<Id, Id>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    fn key<'a>(owner: Id, sub_key: impl Into<IdName<'a>>) -> Id {
        Id::new(sub_key, owner)
    }

    /// Read a flag, returning `default` (without inserting it) on a miss
    pub fn get_bool<'a>(&self, owner: Id, sub_key: impl Into<IdName<'a>>, default: bool) -> bool {
        self.bools
            .get(&Self::key(owner, sub_key))
            .copied()
            .unwrap_or(default)
    }

    pub fn set_bool<'a>(&mut self, owner: Id, sub_key: impl Into<IdName<'a>>, value: bool) {
        self.bools.insert(Self::key(owner, sub_key), value);
    }

    /// Read a number, returning `default` (without inserting it) on a miss
    pub fn get_number<'a>(&self, owner: Id, sub_key: impl Into<IdName<'a>>, default: f32) -> f32 {
        self.numbers
            .get(&Self::key(owner, sub_key))
            .copied()
            .unwrap_or(default)
    }

    pub fn set_number<'a>(&mut self, owner: Id, sub_key: impl Into<IdName<'a>>, value: f32) {
        self.numbers.insert(Self::key(owner, sub_key), value);
    }

    /// Read an identifier, returning `default` (without inserting it) on a miss
    pub fn get_id<'a>(&self, owner: Id, sub_key: impl Into<IdName<'a>>, default: Id) -> Id {
        self.ids
            .get(&Self::key(owner, sub_key))
            .copied()
            .unwrap_or(default)
    }

    pub fn set_id<'a>(&mut self, owner: Id, sub_key: impl Into<IdName<'a>>, value: Id) {
        self.ids.insert(Self::key(owner, sub_key), value);
    }

    /// Flip a stored flag and return the new value
    pub fn toggle_bool<'a>(&mut self, owner: Id, sub_key: impl Into<IdName<'a>>, default: bool) -> bool {
        let entry = self.bools.entry(Self::key(owner, sub_key)).or_insert(default);
        *entry = !*entry;
        *entry
    }

    /// Drop every stored value
    pub fn clear(&mut self) {
        self.bools.clear();
        self.numbers.clear();
        self.ids.clear();
    }

    /// Total number of stored entries across all three maps
    pub fn len(&self) -> usize {
        self.bools.len() + self.numbers.len() + self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("bools", &self.bools.len())
            .field("numbers", &self.numbers.len())
            .field("ids", &self.ids.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_returns_default_without_inserting() {
        let storage = Storage::new();
        let owner = Id::root("panel");

        assert!(storage.get_bool(owner, "open", true));
        assert_eq!(storage.get_number(owner, "scroll_y", 12.5), 12.5);
        assert_eq!(storage.get_id(owner, "selected", Id::NONE), Id::NONE);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_write_overwrites() {
        let mut storage = Storage::new();
        let owner = Id::root("slider");

        storage.set_number(owner, "value", 1.0);
        storage.set_number(owner, "value", 2.0);

        assert_eq!(storage.get_number(owner, "value", 0.0), 2.0);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_maps_are_independent() {
        let mut storage = Storage::new();
        let owner = Id::root("widget");

        storage.set_bool(owner, "x", true);
        storage.set_number(owner, "x", 3.0);
        storage.set_id(owner, "x", Id::root("other"));

        assert!(storage.get_bool(owner, "x", false));
        assert_eq!(storage.get_number(owner, "x", 0.0), 3.0);
        assert_eq!(storage.get_id(owner, "x", Id::NONE), Id::root("other"));
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn test_owners_do_not_clash() {
        let mut storage = Storage::new();
        let a = Id::root("a");
        let b = Id::root("b");

        storage.set_bool(a, "open", true);
        assert!(!storage.get_bool(b, "open", false));
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut storage = Storage::new();
        let owner = Id::root("header");

        assert!(!storage.toggle_bool(owner, "open", true));
        assert!(storage.toggle_bool(owner, "open", true));

        storage.clear();
        assert!(storage.is_empty());
    }
}
