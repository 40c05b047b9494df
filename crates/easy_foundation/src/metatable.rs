//! The metatable registry.
//!
//! [`Metatables::bootstrap`] is the one-time initialization of the value
//! model. It allocates the root metatable (whose metatable is itself) and
//! then one default metatable per primitive kind, each pointing at the
//! root. All value constructors are methods on the registry, so a value
//! cannot be built before bootstrap has run.
//!
//! After bootstrap the registry is never mutated structurally. Cloning it
//! is cheap, and a clone can be handed to other threads once bootstrap has
//! returned.

use std::sync::Arc;

use tracing::debug;

use crate::table::Table;
use crate::types::{Arity, Kind};
use crate::value::{Form, FormVariant, Function, NativeFn, Value};

/// Per-kind default metatables, rooted in a self-referential table.
#[derive(Clone, Debug)]
pub struct Metatables {
    root: Table,
    nil: Table,
    boolean: Table,
    number: Table,
    string: Table,
    form: Table,
}

impl Metatables {
    /// Builds the root metatable and the default metatable of every kind.
    #[must_use]
    pub fn bootstrap() -> Self {
        let root = Table::new_root();
        let derived = || Table::new(root.clone(), None);
        let metatables = Self {
            nil: derived(),
            boolean: derived(),
            number: derived(),
            string: derived(),
            form: derived(),
            root,
        };
        debug!(kinds = Kind::ALL.len(), "metatables bootstrapped");
        metatables
    }

    /// Returns the root metatable: the metatable of every table by default,
    /// and of itself.
    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Returns the default metatable for values of `kind`.
    ///
    /// Tables default to the root. Functions share the form metatable.
    #[must_use]
    pub fn metatable_for(&self, kind: Kind) -> &Table {
        match kind {
            Kind::Nil => &self.nil,
            Kind::Boolean => &self.boolean,
            Kind::Number => &self.number,
            Kind::String => &self.string,
            Kind::Table => &self.root,
            Kind::Form => &self.form,
        }
    }

    /// Creates nil.
    #[must_use]
    pub fn make_nil(&self) -> Value {
        Value::Nil(self.nil.clone())
    }

    /// Creates a boolean.
    #[must_use]
    pub fn make_boolean(&self, b: bool) -> Value {
        Value::Boolean(b, self.boolean.clone())
    }

    /// Creates a number.
    #[must_use]
    pub fn make_number(&self, n: f64) -> Value {
        Value::Number(n, self.number.clone())
    }

    /// Creates a string.
    #[must_use]
    pub fn make_string(&self, s: impl Into<Arc<str>>) -> Value {
        Value::String(s.into(), self.string.clone())
    }

    /// Creates an empty table whose metatable is the root.
    #[must_use]
    pub fn make_table(&self) -> Value {
        self.make_table_with_metatable(self.root.clone())
    }

    /// Creates an empty table with an explicit metatable.
    #[must_use]
    pub fn make_table_with_metatable(&self, metatable: Table) -> Value {
        Value::Table(Table::new(metatable, None))
    }

    /// Creates an empty table whose lookups fall back to `parent`.
    #[must_use]
    pub fn make_child_table(&self, parent: &Table) -> Value {
        Value::Table(Table::new(self.root.clone(), Some(parent.clone())))
    }

    /// Creates a syntactic form.
    #[must_use]
    pub fn make_syntax_form(&self, name: impl Into<Arc<str>>) -> Value {
        Value::Form(Form::new(name, FormVariant::Syntax), self.form.clone())
    }

    /// Creates a function: a form with a native body.
    #[must_use]
    pub fn make_function(&self, name: impl Into<Arc<str>>, arity: Arity, body: NativeFn) -> Value {
        let variant = FormVariant::Function(Function { arity, body });
        Value::Form(Form::new(name, variant), self.form.clone())
    }
}

/// Returns the metatable of `value`.
///
/// Always defined: no value can be constructed without one.
#[must_use]
pub fn metatable_of(value: &Value) -> Table {
    value.metatable()
}
