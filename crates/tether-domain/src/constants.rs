//! Domain layer constants
//!
//! Names of the built-in scopes and the qualifiers the container treats
//! specially. Infrastructure-specific constants remain in
//! `tether_infrastructure::constants`.

// ============================================================================
// SCOPE NAMES
// ============================================================================

/// Placeholder resolved to the configured default scope at bootstrap
pub const SCOPE_AUTO: &str = "@auto";

/// Pass-through scope of reference bindings
pub const SCOPE_REFERENCE: &str = "@ref";

/// One instance per container, created eagerly
pub const SCOPE_CONTAINER: &str = "container";

/// One instance per container, created on first use
pub const SCOPE_APPLICATION: &str = "application";

/// A new instance for every injection
pub const SCOPE_INJECTION: &str = "injection";

/// One instance per thread
pub const SCOPE_THREAD: &str = "thread";

/// One instance per explicitly allocated worker context
pub const SCOPE_WORKER: &str = "worker";

/// One instance per full dependency (instance and injection path)
pub const SCOPE_DEPENDENCY: &str = "dependency";

/// One instance per requested type
pub const SCOPE_DEPENDENCY_TYPE: &str = "dependency-type";

/// One instance per requested instance (name and type)
pub const SCOPE_DEPENDENCY_INSTANCE: &str = "dependency-instance";

/// One instance per requested instance and the instance it is injected into
pub const SCOPE_TARGET_INSTANCE: &str = "target-instance";

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Separator between the steps of a rendered injection path
pub const PATH_SEPARATOR: &str = " :: ";
