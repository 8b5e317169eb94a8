//! Bindings
//!
//! Modules declare [`Binding`]s into [`Bindings`]; [`disambiguate()`] reduces
//! them to the set a container is built from.

pub mod binding;
pub mod bindings;
pub mod disambiguate;
pub mod module;
pub mod supply;

pub use binding::{Binding, BindingType};
pub use bindings::Bindings;
pub use disambiguate::disambiguate;
pub use module::Module;
pub use supply::{
    ConstantSupplier, ConstructorSupplier, ElementsSupplier, MethodSupplier, ReferenceSupplier,
    RequiredSupplier,
};
