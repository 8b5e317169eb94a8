//! # Infrastructure Layer
//!
//! The runtime of the Tether container, built on the domain value model.
//!
//! ## Module Categories
//!
//! ### Declaration
//! | Module | Description |
//! |--------|-------------|
//! | [`bind`] | Bindings, modules, suppliers and disambiguation |
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | Bootstrap, container, resources and injection sites |
//! | [`scope`] | Built-in scopes and the scope registry |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration from defaults, TOML and environment |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |

pub mod bind;
pub mod config;
pub mod constants;
pub mod container;
pub mod error_ext;
pub mod logging;
pub mod scope;

// Re-export commonly used types
pub use bind::{Binding, BindingType, Bindings, Module};
pub use config::{ConfigBuilder, ConfigLoader, ContainerConfig};
pub use container::{Bootstrap, Container, ProviderHandle, injector};
pub use error_ext::ErrorContext;
pub use scope::Scopes;
