//! Bootstrap configuration types

use serde::{Deserialize, Serialize};
use tether_domain::value_objects::ConstructorStrategy;

use crate::constants::{DEFAULT_EAGER_INITIALISATION, DEFAULT_SCOPE};

/// How a container is built from its modules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Scope that bindings declared in `@auto` end up in
    pub default_scope: String,

    /// Create the instances of eager scopes while bootstrapping
    pub eager: bool,

    /// Constructor selection used by constructor bindings
    pub constructor_strategy: ConstructorStrategy,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            default_scope: DEFAULT_SCOPE.to_string(),
            eager: DEFAULT_EAGER_INITIALISATION,
            constructor_strategy: ConstructorStrategy::default(),
        }
    }
}
