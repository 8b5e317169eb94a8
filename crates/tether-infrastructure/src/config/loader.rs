//! Loading [`ContainerConfig`]
//!
//! Later sources win:
//!
//! 1. `ContainerConfig::default()`
//! 2. a TOML file: the explicit path, else the first of `./tether.toml`,
//!    `./tether/tether.toml` and `<config dir>/tether/tether.toml`
//! 3. environment variables such as `TETHER__BOOTSTRAP__DEFAULT_SCOPE`
//!
//! The merged result is validated before it is handed out, so a
//! [`Bootstrap`](crate::container::Bootstrap) never sees a malformed
//! configuration from here.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tether_domain::error::{Error, Result};
use tether_domain::value_objects::ConstructorStrategy;

use crate::config::{BootstrapConfig, ContainerConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Reads container configuration from file and environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Reads `path` instead of searching the default locations
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Reads `<prefix>__SECTION__KEY` variables instead of `TETHER__...`
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merges and validates all sources
    pub fn load(&self) -> Result<ContainerConfig> {
        let config: ContainerConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract container configuration")?;
        validate_container_config(&config)?;
        Ok(config)
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ContainerConfig::default()));
        match &self.file {
            Some(file) if file.exists() => {
                figment = figment.merge(Toml::file(file));
                log_config_loaded(file, true);
            }
            Some(file) => log_config_loaded(file, false),
            None => {
                if let Some(file) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&file));
                    log_config_loaded(&file, true);
                }
            }
        }
        figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        )
    }

    /// Writes `config` as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ContainerConfig, path: P) -> Result<()> {
        let rendered = toml::to_string_pretty(config)
            .config_context("Failed to render container configuration as TOML")?;
        std::fs::write(path.as_ref(), rendered).io_context(format!(
            "Failed to write container configuration to {}",
            path.as_ref().display()
        ))
    }

    /// The explicit configuration file, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let cwd = env::current_dir().ok()?;
        [
            Some(cwd.join(DEFAULT_CONFIG_FILENAME)),
            Some(cwd.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
    }
}

/// Validate container configuration
pub fn validate_container_config(config: &ContainerConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_bootstrap_config(&config.bootstrap)?;
    validate_scopes_config(config)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_bootstrap_config(config: &BootstrapConfig) -> Result<()> {
    if config.default_scope.trim().is_empty() {
        return Err(Error::configuration("Default scope cannot be empty"));
    }
    Ok(())
}

fn validate_scopes_config(config: &ContainerConfig) -> Result<()> {
    for (scope, nestings) in &config.scopes.nesting {
        if scope.trim().is_empty() {
            return Err(Error::configuration("Scope nesting has an empty scope name"));
        }
        if nestings.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "Scope nesting of {scope} contains an empty scope name"
            )));
        }
    }
    Ok(())
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`ContainerConfig`] in code, starting from the defaults
pub struct ConfigBuilder {
    config: ContainerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Replace the logging section
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the scope `@auto` bindings end up in
    pub fn with_default_scope<S: Into<String>>(mut self, scope: S) -> Self {
        self.config.bootstrap.default_scope = scope.into();
        self
    }

    /// Enable or disable eager initialisation
    pub fn with_eager(mut self, eager: bool) -> Self {
        self.config.bootstrap.eager = eager;
        self
    }

    /// Set the constructor selection strategy
    pub fn with_constructor_strategy(mut self, strategy: ConstructorStrategy) -> Self {
        self.config.bootstrap.constructor_strategy = strategy;
        self
    }

    /// Allow instances of `scope` inside instances of `into`
    pub fn with_nesting<S: Into<String>, I: Into<String>>(mut self, scope: S, into: I) -> Self {
        self.config
            .scopes
            .nesting
            .entry(scope.into())
            .or_default()
            .push(into.into());
        self
    }

    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
