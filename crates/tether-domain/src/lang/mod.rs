//! Type model
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Class`] | A declared class with type variables, supertypes and constructors |
//! | [`TypeTemplate`] | Generic type expression used inside class declarations |
//! | [`Type`] | A class with actual type arguments, upper-bound flag and array dimensions |
//! | [`Constructor`], [`Method`] | Declared executables the container can invoke |

/// Built-in class catalogue
pub mod builtin;
/// Class declarations
pub mod class;
/// Constructors and methods
pub mod executable;
/// Generic types and assignability
pub mod types;

pub use class::{Class, ClassBuilder, ClassKind, TypeTemplate, TypeVariable};
pub use executable::{Constructor, Invoke, Method};
pub use types::Type;
