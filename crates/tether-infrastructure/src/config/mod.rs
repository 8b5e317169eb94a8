//! Configuration
//!
//! | Item | Description |
//! |------|-------------|
//! | [`ContainerConfig`] | Root of the configuration tree |
//! | [`ConfigLoader`] | Figment based loading from defaults, TOML and environment |

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{BootstrapConfig, ContainerConfig, LoggingConfig, ScopesConfig};
