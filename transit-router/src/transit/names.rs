//! Interned stop and bus names.
//!
//! Graph tags refer to stops and buses by small dense ids. A `NameTable`
//! maps each id back to its name and each name to its id.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Interned stop identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub usize);

/// Interned bus identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusId(pub usize);

impl From<usize> for StopId {
    fn from(idx: usize) -> Self {
        StopId(idx)
    }
}

impl From<StopId> for usize {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl From<usize> for BusId {
    fn from(idx: usize) -> Self {
        BusId(idx)
    }
}

impl From<BusId> for usize {
    fn from(id: BusId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.0)
    }
}

/// Bidirectional name ↔ id table. Ids are assigned densely in first-seen order.
#[derive(Debug, Clone)]
pub struct NameTable<Id> {
    names: Vec<String>,
    ids: HashMap<String, usize>,
    _id: PhantomData<Id>,
}

impl<Id> Default for NameTable<Id> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
            _id: PhantomData,
        }
    }
}

impl<Id> NameTable<Id>
where
    Id: Copy + From<usize> + Into<usize>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from names in id order.
    ///
    /// Returns the first repeated name if the list has duplicates.
    pub fn from_names(names: Vec<String>) -> Result<Self, String> {
        let mut table = Self::new();
        for name in names {
            if table.ids.contains_key(&name) {
                return Err(name);
            }
            table.intern(&name);
        }
        Ok(table)
    }

    /// Returns the id for `name`, assigning the next free id if it's new.
    pub fn intern(&mut self, name: &str) -> Id {
        if let Some(&idx) = self.ids.get(name) {
            return Id::from(idx);
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), idx);
        Id::from(idx)
    }

    pub fn id(&self, name: &str) -> Option<Id> {
        self.ids.get(name).map(|&idx| Id::from(idx))
    }

    pub fn name(&self, id: Id) -> Option<&str> {
        self.names.get(id.into()).map(String::as_str)
    }

    /// Names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<Id> PartialEq for NameTable<Id> {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from `names`
        self.names == other.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_dense_ids() {
        let mut table: NameTable<StopId> = NameTable::new();

        assert_eq!(table.intern("Marushkino"), StopId(0));
        assert_eq!(table.intern("Rasskazovka"), StopId(1));
        assert_eq!(table.intern("Marushkino"), StopId(0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_both_ways() {
        let mut table: NameTable<BusId> = NameTable::new();
        let id = table.intern("750");

        assert_eq!(table.id("750"), Some(id));
        assert_eq!(table.name(id), Some("750"));
        assert_eq!(table.id("256"), None);
        assert_eq!(table.name(BusId(5)), None);
    }

    #[test]
    fn from_names_preserves_order() {
        let table: NameTable<StopId> =
            NameTable::from_names(vec!["B".to_string(), "A".to_string()]).unwrap();

        assert_eq!(table.id("B"), Some(StopId(0)));
        assert_eq!(table.id("A"), Some(StopId(1)));
        assert_eq!(table.names(), &["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn from_names_rejects_duplicates() {
        let result: Result<NameTable<StopId>, _> =
            NameTable::from_names(vec!["A".to_string(), "B".to_string(), "A".to_string()]);

        assert_eq!(result.unwrap_err(), "A");
    }

    #[test]
    fn empty_table() {
        let table: NameTable<StopId> = NameTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn id_debug() {
        assert_eq!(format!("{:?}", StopId(3)), "StopId(3)");
        assert_eq!(format!("{:?}", BusId(0)), "BusId(0)");
    }
}
