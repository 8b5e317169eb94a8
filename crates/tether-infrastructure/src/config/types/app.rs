//! Main container configuration

use serde::{Deserialize, Serialize};

pub use super::bootstrap::BootstrapConfig;
pub use super::logging::LoggingConfig;
pub use super::scopes::ScopesConfig;

/// Container configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Bootstrap configuration
    pub bootstrap: BootstrapConfig,

    /// Scope configuration
    pub scopes: ScopesConfig,
}
