//! # Domain Layer
//!
//! The value model of the Tether container. Nothing here holds state or
//! performs resolution; the infrastructure crate builds the container on
//! top of these types and ports.
//!
//! ## Organization
//!
//! - **[`lang`]** - Declared classes, generic types and executables
//! - **[`value_objects`]** - Names, instances, locators, dependencies, permanences
//! - **[`ports`]** - Scope, supplier and injector traits
//! - **[`error`]** - Error taxonomy
//! - **[`constants`]** - Built-in scope names

/// Domain layer constants
pub mod constants;
/// Error handling types
pub mod error;
/// Type model
pub mod lang;
/// Type-erased values
pub mod object;
/// Port traits
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use lang::{Class, Constructor, Method, Type, TypeTemplate};
pub use object::{Object, array, as_array, downcast, object};
pub use ports::{Controller, Generator, Injector, InjectorExt, Provider, Scope, Supplier};
pub use value_objects::{
    ConstructorStrategy, DeclarationType, Dependency, Hint, Injection, Instance, Locator, Name,
    ScopePermanence, Source, Target,
};
