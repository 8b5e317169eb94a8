//! Domain Value Objects
//!
//! Immutable values that identify what is bound, what is requested and
//! how long instances live.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Name`] | Qualifier with wildcard, pattern and namespace support |
//! | [`Instance`] | A type qualified by a name |
//! | [`Target`] | The context a binding is restricted to |
//! | [`Locator`] | The full key of a binding |
//! | [`Dependency`] | A request plus its injection path |
//! | [`ScopePermanence`] | Lifetime class of a scope and its legal nestings |
//! | [`Source`] | Declaration provenance used for disambiguation |
//! | [`Hint`] | How a constructor or method argument is obtained |
//! | [`ConstructorStrategy`] | Which declared constructor to use |

/// Requests and injection paths
pub mod dependency;
/// Argument hints
pub mod hint;
/// Named typed instances
pub mod instance;
/// Qualifier names
pub mod name;
/// Scope permanence
pub mod permanence;
/// Declaration provenance
pub mod source;
/// Constructor selection strategies
pub mod strategy;
/// Targets and locators
pub mod target;

pub use dependency::{Dependency, Injection};
pub use hint::Hint;
pub use instance::Instance;
pub use name::Name;
pub use permanence::ScopePermanence;
pub use source::{DeclarationType, Source};
pub use strategy::ConstructorStrategy;
pub use target::{Locator, Target};
