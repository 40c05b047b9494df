//! Shared mutable tables.
//!
//! A [`Table`] is a reference to a name-to-value mapping. Tables are the
//! only mutable kind in the value model and they double as metatables:
//! every value, tables included, points at exactly one table describing
//! its behavior.
//!
//! The root metatable is the single self-referential table. It is built in
//! two phases with [`Arc::new_cyclic`]: the allocation is reserved first,
//! then a weak handle to it is stored as its own metatable link. The weak
//! handle keeps the cycle from leaking; every other link in the model is
//! strong and points strictly toward the root.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::value::Value;

/// Entries of a table: names mapped to values.
pub type Entries = im::HashMap<Arc<str>, Value>;

/// A shared, mutable table of named values.
///
/// Cloning a `Table` clones the reference, not the contents. Equality is
/// identity.
#[derive(Clone)]
pub struct Table(Arc<TableObject>);

struct TableObject {
    entries: RwLock<Entries>,
    parent: Option<Table>,
    metatable: MetatableLink,
}

enum MetatableLink {
    /// An ordinary metatable reference.
    Shared(Table),
    /// The root metatable's link to itself.
    Itself(Weak<TableObject>),
}

impl Table {
    /// Allocates the root metatable, whose metatable is itself.
    pub(crate) fn new_root() -> Self {
        Self(Arc::new_cyclic(|this| TableObject {
            entries: RwLock::new(Entries::new()),
            parent: None,
            metatable: MetatableLink::Itself(this.clone()),
        }))
    }

    /// Allocates a table with the given metatable and optional parent.
    pub(crate) fn new(metatable: Table, parent: Option<Table>) -> Self {
        Self(Arc::new(TableObject {
            entries: RwLock::new(Entries::new()),
            parent,
            metatable: MetatableLink::Shared(metatable),
        }))
    }

    /// Returns this table's metatable.
    #[must_use]
    pub fn metatable(&self) -> Table {
        match &self.0.metatable {
            MetatableLink::Shared(table) => table.clone(),
            // `self` holds the allocation alive, so the upgrade always succeeds.
            MetatableLink::Itself(this) => this.upgrade().map_or_else(|| self.clone(), Table),
        }
    }

    /// Returns true if this table is its own metatable.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.0.metatable, MetatableLink::Itself(_))
    }

    /// Returns the parent consulted by [`Table::lookup`], if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Table> {
        self.0.parent.as_ref()
    }

    /// Returns true if both handles refer to the same table.
    #[must_use]
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Gets a value stored directly in this table.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.entries.read().get(name).cloned()
    }

    /// Stores a value under `name`, returning the previous value.
    pub fn set(&self, name: impl Into<Arc<str>>, value: Value) -> Option<Value> {
        self.0.entries.write().insert(name.into(), value)
    }

    /// Removes the entry for `name`, returning its value.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.0.entries.write().remove(name)
    }

    /// Returns true if `name` is stored directly in this table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.entries.read().contains_key(name)
    }

    /// Returns the number of entries stored directly in this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.entries.read().len()
    }

    /// Returns true if this table has no entries of its own.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.entries.read().is_empty()
    }

    /// Returns the names stored directly in this table, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<Arc<str>> {
        let mut keys: Vec<_> = self.0.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns a point-in-time copy of the entries.
    ///
    /// The copy shares structure with the table and is O(1) to take.
    #[must_use]
    pub fn snapshot(&self) -> Entries {
        self.0.entries.read().clone()
    }

    /// Looks up `name` here, then in each ancestor.
    ///
    /// # Errors
    /// Returns [`ErrorKind::UndefinedName`](crate::ErrorKind::UndefinedName)
    /// if no table in the chain defines `name`.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        let mut table = self;
        loop {
            if let Some(value) = table.get(name) {
                return Ok(value);
            }
            match table.parent() {
                Some(parent) => table = parent,
                None => return Err(Error::undefined_name(name)),
            }
        }
    }

    /// Replaces `name` in the nearest table of the chain that defines it.
    ///
    /// # Errors
    /// Returns [`ErrorKind::UndefinedName`](crate::ErrorKind::UndefinedName)
    /// if no table in the chain defines `name`.
    pub fn assign(&self, name: &str, value: Value) -> Result<()> {
        let mut table = self;
        loop {
            {
                let mut entries = table.0.entries.write();
                if let Some(slot) = entries.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
            }
            match table.parent() {
                Some(parent) => table = parent,
                None => return Err(Error::undefined_name(name)),
            }
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Table {}

// Never follows the metatable link: the root would recurse forever.
impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("address", &Arc::as_ptr(&self.0))
            .field("len", &self.len())
            .field("root", &self.is_root())
            .field("has_parent", &self.parent().is_some())
            .finish()
    }
}
