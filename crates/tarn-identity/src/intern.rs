// intern.rs
//
// Symbol and type names, stored once and handed out as `Name`s.

use std::hash::BuildHasher;

use hashbrown::HashTable;
use rustc_hash::FxBuildHasher;

use crate::Name;

/// Every distinct name seen by the table.
///
/// Each string is stored once, in `texts`; the hash table holds only the
/// `Name` and hashes through `texts` when it needs to rehash.
#[derive(Clone, Default)]
pub struct NamePool {
    index: HashTable<Name>,
    texts: Vec<Box<str>>,
    hasher: FxBuildHasher,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `Name` for `text`, adding it on first sight.
    pub fn insert(&mut self, text: &str) -> Name {
        let hash = self.hasher.hash_one(text);
        let texts = &self.texts;
        if let Some(&name) = self.index.find(hash, |&name| &*texts[slot(name)] == text) {
            return name;
        }

        let name = Name::new(self.texts.len() as u32);
        self.texts.push(text.into());
        let (texts, hasher) = (&self.texts, &self.hasher);
        self.index
            .insert_unique(hash, name, |&name| hasher.hash_one(&*texts[slot(name)]));
        name
    }

    /// The `Name` already given to `text`, if any.
    pub fn find(&self, text: &str) -> Option<Name> {
        let hash = self.hasher.hash_one(text);
        self.index
            .find(hash, |&name| &*self.texts[slot(name)] == text)
            .copied()
    }

    pub fn text(&self, name: Name) -> &str {
        &self.texts[slot(name)]
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl std::fmt::Debug for NamePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamePool")
            .field("index", &self.index)
            .field("texts", &self.texts)
            .finish_non_exhaustive()
    }
}

fn slot(name: Name) -> usize {
    name.index() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_share_a_handle() {
        let mut pool = NamePool::new();
        let list = pool.insert("List");
        let dict = pool.insert("Dict");

        assert_eq!(pool.insert("List"), list);
        assert_ne!(list, dict);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.text(dict), "Dict");
    }

    #[test]
    fn find_never_adds() {
        let mut pool = NamePool::new();
        assert_eq!(pool.find("Boolean"), None);
        assert!(pool.is_empty());
        let boolean = pool.insert("Boolean");
        assert_eq!(pool.find("Boolean"), Some(boolean));
    }

    #[test]
    fn handles_survive_growth() {
        let mut pool = NamePool::new();
        let names: Vec<Name> = (0..200).map(|i| pool.insert(&format!("T{i}"))).collect();
        for (i, &name) in names.iter().enumerate() {
            assert_eq!(pool.text(name), format!("T{i}"));
            assert_eq!(pool.find(&format!("T{i}")), Some(name));
        }
    }
}
