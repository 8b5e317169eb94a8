//! Domain Port Interfaces
//!
//! Traits at the seams between the value model and the runtime.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Scope`] | Lifecycle and caching policy |
//! | [`Controller`] | Allocation of explicit scope contexts |
//! | [`Provider`] | Lazy instance creation handed to scopes |
//! | [`Supplier`] | Produces the value of a binding |
//! | [`Generator`] | A resolved binding generating through its scope |
//! | [`Injector`] | Resolution API of a container |
//! | [`Initialiser`] | Post construction hook |
//! | [`InitialiserSorter`] | Order of applicable initialisers |

/// Post construction hooks
pub mod initialiser;
/// Injector, generator and supplier ports
pub mod injector;
/// Scope SPI
pub mod scope;

pub use initialiser::{
    Initialiser, InitialiserSorter, as_initialiser, as_sorter, initialiser_object, sorter_object,
};
pub use injector::{Generator, Injector, InjectorExt, Supplier};
pub use scope::{Controller, Provider, Scope};
