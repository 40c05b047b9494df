//! Runtime values and metatables for Easy.
//!
//! This crate provides:
//! - [`Value`] - The tagged runtime value; every value references a metatable
//! - [`Table`] - Shared mutable tables, which also serve as metatables
//! - [`Form`] - Syntactic forms and their invocable specialization, functions
//! - [`Metatables`] - The bootstrap registry and the only way to build values
//! - [`Kind`] / [`Arity`] - Descriptors for values and functions
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod metatable;
pub mod table;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use metatable::{Metatables, metatable_of};
pub use table::{Entries, Table};
pub use types::{Arity, Kind};
pub use value::{Form, FormVariant, Function, NativeFn, Value};
