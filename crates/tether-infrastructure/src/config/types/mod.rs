//! Configuration types module

pub mod app;
pub mod bootstrap;
pub mod logging;
pub mod scopes;

// Re-export main types
pub use app::*;
