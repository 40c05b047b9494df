//! Core value type for all Easy data.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::metatable::Metatables;
use crate::table::Table;
use crate::types::{Arity, Kind};

/// A runtime value.
///
/// Every variant carries exactly one metatable reference. For tables the
/// reference lives inside the table itself, which is what lets the root
/// metatable point at itself.
///
/// Values are cheaply cloneable: payloads are either `Copy` or shared.
/// Construct them through [`Metatables`](crate::Metatables), which owns the
/// per-kind default metatables.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil(Table),
    /// Boolean value.
    Boolean(bool, Table),
    /// 64-bit floating point number.
    Number(f64, Table),
    /// Immutable string.
    String(Arc<str>, Table),
    /// Shared mutable table; its metatable is stored in the table.
    Table(Table),
    /// Syntactic or callable form.
    Form(Form, Table),
}

/// Native function body callable from Easy.
///
/// The registry is passed in so the body can construct its result.
pub type NativeFn = fn(&Metatables, &[Value]) -> Result<Value>;

/// A syntactic or callable form.
///
/// A form whose variant is [`FormVariant::Function`] is a function: it is
/// usable anywhere a form is expected and additionally carries an
/// invocable body. Equality is identity.
#[derive(Clone)]
pub struct Form(Arc<FormObject>);

struct FormObject {
    name: Arc<str>,
    variant: FormVariant,
}

/// Distinguishes plain syntactic forms from functions.
#[derive(Clone, Copy)]
pub enum FormVariant {
    /// Receives its operands unevaluated. The form carries no handler of its
    /// own: an evaluator supplies one by dispatching on [`Form::name`], and
    /// [`Form::call`] rejects it with `NotCallable`.
    Syntax,
    /// Receives evaluated arguments and runs a native body.
    Function(Function),
}

/// Invocation data of a function form.
#[derive(Clone, Copy)]
pub struct Function {
    /// Accepted argument counts.
    pub arity: Arity,
    /// The body run by [`Form::call`].
    pub body: NativeFn,
}

impl Form {
    pub(crate) fn new(name: impl Into<Arc<str>>, variant: FormVariant) -> Self {
        Self(Arc::new(FormObject {
            name: name.into(),
            variant,
        }))
    }

    /// Returns the form's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the variant tag and its data.
    #[must_use]
    pub fn variant(&self) -> &FormVariant {
        &self.0.variant
    }

    /// Returns the function data if this form is a function.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match &self.0.variant {
            FormVariant::Function(function) => Some(function),
            FormVariant::Syntax => None,
        }
    }

    /// Returns true if this form is a function.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.as_function().is_some()
    }

    /// Invokes a function form with already-evaluated arguments.
    ///
    /// # Errors
    /// Returns `NotCallable` for syntactic forms, `ArityMismatch` if the
    /// argument count is rejected, or whatever the body returns. Errors
    /// from a function carry its name as a call frame.
    pub fn call(&self, metatables: &Metatables, args: &[Value]) -> Result<Value> {
        let Some(function) = self.as_function() else {
            return Err(Error::not_callable(Kind::Form));
        };
        if !function.arity.accepts(args.len()) {
            return Err(Error::arity_mismatch(function.arity, args.len()).in_frame(self.name()));
        }
        (function.body)(metatables, args).map_err(|err| err.in_frame(self.name()))
    }

    /// Returns true if both handles refer to the same form.
    #[must_use]
    pub fn ptr_eq(&self, other: &Form) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.variant {
            FormVariant::Syntax => write!(f, "Form({})", self.name()),
            FormVariant::Function(function) => {
                write!(f, "Function({}/{})", self.name(), function.arity)
            }
        }
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Nil(_) => Kind::Nil,
            Self::Boolean(..) => Kind::Boolean,
            Self::Number(..) => Kind::Number,
            Self::String(..) => Kind::String,
            Self::Table(_) => Kind::Table,
            Self::Form(..) => Kind::Form,
        }
    }

    /// Returns this value's metatable.
    #[must_use]
    pub fn metatable(&self) -> Table {
        match self {
            Self::Table(table) => table.metatable(),
            Self::Nil(mt)
            | Self::Boolean(_, mt)
            | Self::Number(_, mt)
            | Self::String(_, mt)
            | Self::Form(_, mt) => mt.clone(),
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil(_))
    }

    /// Returns true if this value is a function form.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.as_form().is_some_and(Form::is_function)
    }

    /// Returns true if this value is truthy.
    ///
    /// Nil, `false`, zero, the empty string and the empty table are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil(_) => false,
            Self::Boolean(b, _) => *b,
            Self::Number(n, _) => *n != 0.0,
            Self::String(s, _) => !s.is_empty(),
            Self::Table(table) => !table.is_empty(),
            Self::Form(..) => true,
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b, _) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a table reference.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Attempts to extract a form reference.
    #[must_use]
    pub const fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form(form, _) => Some(form),
            _ => None,
        }
    }

    /// Attempts to extract function data.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        self.as_form().and_then(Form::as_function)
    }

    /// Extracts a number or reports what was found instead.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if this value is not a number.
    pub fn expect_number(&self) -> Result<f64> {
        self.as_number()
            .ok_or_else(|| Error::type_mismatch(Kind::Number, self.kind()))
    }

    /// Extracts a string or reports what was found instead.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if this value is not a string.
    pub fn expect_str(&self) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| Error::type_mismatch(Kind::String, self.kind()))
    }

    /// Returns the source-like representation: strings are quoted and escaped.
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::String(s, _) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    match c {
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\r' => out.push_str("\\r"),
                        '\0' => out.push_str("\\0"),
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        c => out.push(c),
                    }
                }
                out.push('"');
                out
            }
            other => other.to_string(),
        }
    }
}

// Payload equality; tables and forms compare by identity, metatables are
// not consulted.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil(_), Self::Nil(_)) => true,
            (Self::Boolean(a, _), Self::Boolean(b, _)) => a == b,
            (Self::Number(a, _), Self::Number(b, _)) => a == b,
            (Self::String(a, _), Self::String(b, _)) => a == b,
            (Self::Table(a), Self::Table(b)) => a.ptr_eq(b),
            (Self::Form(a, _), Self::Form(b, _)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil(_) => write!(f, "nil"),
            Self::Boolean(b, _) => write!(f, "{b}"),
            Self::Number(n, _) => write!(f, "{n}"),
            Self::String(s, _) => write!(f, "{s:?}"),
            Self::Table(table) => write!(f, "{table:?}"),
            Self::Form(form, _) => write!(f, "{form:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil(_) => write!(f, "nil"),
            Self::Boolean(b, _) => write!(f, "{b}"),
            Self::Number(n, _) => write!(f, "{n}"),
            Self::String(s, _) => write!(f, "{s}"),
            Self::Table(table) => write!(f, "<table {}>", table.len()),
            Self::Form(form, _) if form.is_function() => write!(f, "<function {}>", form.name()),
            Self::Form(form, _) => write!(f, "<form {}>", form.name()),
        }
    }
}
