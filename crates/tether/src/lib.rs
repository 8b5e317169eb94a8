//! # Tether
//!
//! A dependency injection container. Modules declare bindings for named,
//! typed instances; the container resolves dependencies along their
//! injection path and hands out instances through scopes.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use tether::domain::lang::builtin::INTEGER;
//! use tether::domain::{DeclarationType, Dependency, InjectorExt, Instance, Source, object};
//! use tether::infrastructure::{Bindings, Module, injector};
//!
//! struct Answer;
//!
//! impl Module for Answer {
//!     fn declare(&self, bindings: &mut Bindings) -> tether::domain::Result<()> {
//!         bindings.add_constant(
//!             Instance::of_class(&INTEGER),
//!             object(42_i32),
//!             Source::of::<Self>(DeclarationType::Explicit),
//!         )
//!     }
//! }
//!
//! let container = injector(&[Arc::new(Answer)])?;
//! let answer = container.resolve_as::<i32>(&Dependency::of_class(&INTEGER))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type model, names, instances, dependency paths, ports and errors
//! - `infrastructure` - bindings, disambiguation, scopes, container, config and logging

/// Domain layer - type model, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tether_domain::*;
}

/// Infrastructure layer - bindings, scopes, container and configuration
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use tether_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the container entry points at the crate root
pub use infrastructure::{Bootstrap, Container, Module, injector};
