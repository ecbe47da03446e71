//! Ordered, keyed descriptor tables with typed ids.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_SCOPE: AtomicU64 = AtomicU64::new(1);

/// Entries stored in a [`Table`] are addressed by a short upper-case key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Position of an entry inside a [`Table`], typed by the entry it points at.
///
/// Ids carry the scope of the table that minted them: two equal ids always
/// denote the same entry of the same table, and an id handed to another table
/// is rejected by [`Table::by_id`] and [`Table::contains_id`].
pub struct Id<T> {
    scope: u64,
    index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn new(scope: u64, index: usize) -> Self {
        Self {
            scope,
            index,
            marker: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({}:{})", self.scope, self.index)
    }
}

/// Insertion-ordered table of descriptors with a key index.
///
/// Every table built by [`Table::from_entries`] gets its own id scope. Clones
/// keep the scope, since they hold the same entries.
#[derive(Debug, Clone)]
pub struct Table<T> {
    name: &'static str,
    scope: u64,
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> Table<T> {
    /// Build a table, rejecting duplicate keys.
    pub fn from_entries(name: &'static str, entries: Vec<T>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_string(), position).is_some() {
                bail!("{} defines key '{}' more than once", name, entry.key());
            }
        }

        Ok(Self {
            name,
            scope: NEXT_TABLE_SCOPE.fetch_add(1, Ordering::Relaxed),
            entries,
            index,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id(&self, key: &str) -> Option<Id<T>> {
        self.index
            .get(key)
            .map(|&position| Id::new(self.scope, position))
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn by_id(&self, id: Id<T>) -> Option<&T> {
        if id.scope != self.scope {
            return None;
        }
        self.entries.get(id.index)
    }

    pub fn contains_id(&self, id: Id<T>) -> bool {
        id.scope == self.scope && id.index < self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }
}

impl<T> Index<Id<T>> for Table<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics when `id` was minted by another table.
    fn index(&self, id: Id<T>) -> &Self::Output {
        assert!(
            id.scope == self.scope,
            "{} cannot resolve an id minted by another table",
            self.name
        );
        &self.entries[id.index]
    }
}
