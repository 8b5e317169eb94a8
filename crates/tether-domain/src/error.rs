//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Tether
///
/// Every variant is fatal to the bootstrap or resolve call that produced it.
/// Nothing is retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Bindings that contradict each other or are malformed (bootstrap time)
    #[error("Inconsistent binding: {message}")]
    InconsistentBinding {
        /// Description naming the offending binding(s)
        message: String,
    },

    /// No resource matches the dependency, or required types are unsatisfied
    #[error("No resource for dependency: {dependency}\navailable are (for same raw type): {candidates}")]
    NoResourceForDependency {
        /// The dependency (or list of required types) that could not be served
        dependency: String,
        /// Rendered list of near-miss candidates
        candidates: String,
    },

    /// More than one maximal resource matches the dependency
    #[error("Ambiguous dependency: {dependency}\nequally qualified candidates: {candidates}")]
    AmbiguousDependency {
        /// The dependency that matched several resources
        dependency: String,
        /// Rendered list of the tied candidates
        candidates: String,
    },

    /// Direct access to a binding that only allows indirect (interface) access
    #[error("Illegal direct access to {locator} from {dependency}")]
    IllegalAccess {
        /// The indirect-only locator
        locator: String,
        /// The dependency attempting the access
        dependency: String,
    },

    /// The injection path refers back to itself
    #[error("Cycle detected: {path}")]
    DependencyCycle {
        /// Full injection path including the repeated step
        path: String,
    },

    /// A shorter living instance would be injected into a longer living one
    #[error("Cannot inject {injected} {injected_scope} into {parent} {parent_scope}")]
    UnstableDependency {
        /// The instance being injected
        injected: String,
        /// Scope of the instance being injected
        injected_scope: String,
        /// The instance injected into
        parent: String,
        /// Scope of the instance injected into
        parent_scope: String,
    },

    /// A thread bound scope was used before it was allocated
    #[error("Scope {scope} is not allocated for the current thread")]
    ScopeNotAllocated {
        /// Name of the scope
        scope: String,
    },

    /// Type construction with illegal arguments
    #[error("Invalid type: {message}")]
    InvalidType {
        /// Description of the violated constraint
        message: String,
    },

    /// A type is not assignable to the requested supertype
    #[error("Cannot cast {from} to {to}")]
    ClassCast {
        /// The actual type
        from: String,
        /// The requested type
        to: String,
    },

    /// A supplier failed to produce a value
    #[error("Supply error: {message}")]
    Supply {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Declaration errors
impl Error {
    /// Create an inconsistent binding error
    pub fn inconsistent<S: Into<String>>(message: S) -> Self {
        Self::InconsistentBinding {
            message: message.into(),
        }
    }

    /// Two bindings for the same locator whose declarations clash
    pub fn clash(a: impl std::fmt::Display, b: impl std::fmt::Display) -> Self {
        Self::inconsistent(format!(
            "Detected bindings that clash with each other:\n\t{a}\n\t{b}"
        ))
    }

    /// A binding was added before a supplier was attached
    pub fn adding_incomplete(binding: impl std::fmt::Display) -> Self {
        Self::inconsistent(format!("Attempt to add an incomplete binding: {binding}"))
    }

    /// A binding was completed with a binding type that cannot complete it
    pub fn illegal_completion(
        binding: impl std::fmt::Display,
        binding_type: impl std::fmt::Debug,
    ) -> Self {
        Self::inconsistent(format!(
            "Attempt to complete a binding with illegal type {binding_type:?}: {binding}"
        ))
    }

    /// A binding refers to itself
    pub fn self_referential(
        bound: impl std::fmt::Display,
        linked: impl std::fmt::Display,
    ) -> Self {
        Self::inconsistent(format!(
            "Detected a self-referential binding: \n\t{bound} => {linked}"
        ))
    }

    /// Create an invalid type error
    pub fn invalid_type<S: Into<String>>(message: S) -> Self {
        Self::InvalidType {
            message: message.into(),
        }
    }

    /// Create a class cast error
    pub fn class_cast(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::ClassCast {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

// Resolution errors
impl Error {
    /// Create a no resource error for a dependency and its candidates
    pub fn no_resource(
        dependency: impl std::fmt::Display,
        candidates: impl Into<String>,
    ) -> Self {
        Self::NoResourceForDependency {
            dependency: dependency.to_string(),
            candidates: candidates.into(),
        }
    }

    /// Create an ambiguous dependency error
    pub fn ambiguous(dependency: impl std::fmt::Display, candidates: impl Into<String>) -> Self {
        Self::AmbiguousDependency {
            dependency: dependency.to_string(),
            candidates: candidates.into(),
        }
    }

    /// Create a scope not allocated error
    pub fn scope_not_allocated(scope: impl std::fmt::Display) -> Self {
        Self::ScopeNotAllocated {
            scope: scope.to_string(),
        }
    }

    /// Create a supply error
    pub fn supply<S: Into<String>>(message: S) -> Self {
        Self::Supply {
            message: message.into(),
            source: None,
        }
    }

    /// Create a supply error with source
    pub fn supply_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Supply {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }
}

// Classification
impl Error {
    /// Bootstrap-time declaration problems
    pub fn is_inconsistent_declaration(&self) -> bool {
        matches!(
            self,
            Self::InconsistentBinding { .. } | Self::InvalidType { .. }
        )
    }

    /// Resolve-time problems: missing, ambiguous, cyclic or unstable dependencies
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            Self::NoResourceForDependency { .. }
                | Self::AmbiguousDependency { .. }
                | Self::IllegalAccess { .. }
                | Self::DependencyCycle { .. }
                | Self::UnstableDependency { .. }
                | Self::ScopeNotAllocated { .. }
        )
    }
}
