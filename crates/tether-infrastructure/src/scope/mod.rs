//! Scopes
//!
//! | Scope | Instances |
//! |-------|-----------|
//! | `@ref`, `injection` | [`InjectionScope`]: new on every request |
//! | `container`, `application` | [`ApplicationScope`]: one per container |
//! | `thread` | [`ThreadScope`]: one per thread |
//! | `worker` | [`WorkerScope`]: one per allocated thread context |
//! | `dependency`, `dependency-type`, `dependency-instance`, `target-instance` | [`DependencyScope`]: one per key |
//!
//! [`Scopes`] maps scope names to their implementation and permanence.

pub mod application;
pub mod dependent;
pub mod injection;
pub mod registry;
mod slot;
pub mod thread;
pub mod worker;

pub use application::ApplicationScope;
pub use dependent::DependencyScope;
pub use injection::InjectionScope;
pub use registry::Scopes;
pub use thread::ThreadScope;
pub use worker::WorkerScope;
