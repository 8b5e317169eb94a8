//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tether.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tether";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TETHER";

/// Separator between the prefix and nested keys of environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// BOOTSTRAP CONSTANTS
// ============================================================================

/// Scope used for bindings declared in `@auto`
pub const DEFAULT_SCOPE: &str = tether_domain::constants::SCOPE_APPLICATION;

/// Whether eager resources are created while bootstrapping
pub const DEFAULT_EAGER_INITIALISATION: bool = true;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "TETHER_LOG";

/// File name stem of rolled log files
pub const LOG_FILE_STEM: &str = "tether";
