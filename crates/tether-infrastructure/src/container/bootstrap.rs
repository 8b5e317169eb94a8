//! Container bootstrap
//!
//! Composition root: modules declare bindings, the bindings are
//! disambiguated, resolved against the configured scopes and turned into a
//! [`Container`].
//!
//! ```text
//! ContainerConfig → Bindings::declare_from → disambiguate → Container::new
//!                                                              ↓
//!                                                     initialise_eager
//! ```

use std::sync::Arc;

use tether_domain::error::Result;
use tether_domain::value_objects::Name;
use tracing::info;

use super::injector::Container;
use crate::bind::{Binding, Bindings, Module, disambiguate};
use crate::config::ContainerConfig;
use crate::config::loader::validate_container_config;
use crate::scope::Scopes;

/// Builds containers from modules according to a [`ContainerConfig`]
pub struct Bootstrap {
    config: ContainerConfig,
    scopes: Scopes,
}

impl Bootstrap {
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            config,
            scopes: Scopes::defaults(),
        }
    }

    /// Replaces the built-in scopes; configured nestings still apply
    ///
    /// Containers built afterwards share the scopes added with
    /// [`Scopes::with_scope`] and get their own instances of the others.
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// The disambiguated bindings of `modules`
    pub fn bindings(&self, modules: &[Arc<dyn Module>]) -> Result<Vec<Binding>> {
        let mut bindings = Bindings::with_strategy(self.config.bootstrap.constructor_strategy);
        bindings.declare_from(modules)?;
        disambiguate(bindings.into_bindings())
    }

    /// Declares, disambiguates and builds a container
    pub fn injector(&self, modules: &[Arc<dyn Module>]) -> Result<Container> {
        validate_container_config(&self.config)?;
        let declared = self.bindings(modules)?;
        let bindings = declared.len();
        let scopes = self.scopes.clone().configured(&self.config.scopes)?;
        let container = Container::new(
            declared,
            &scopes,
            &Name::named(&self.config.bootstrap.default_scope),
        )?;
        let eager = if self.config.bootstrap.eager {
            container.initialise_eager()?
        } else {
            0
        };
        info!(
            modules = modules.len(),
            bindings,
            resources = container.resources().len(),
            eager,
            "Container bootstrapped"
        );
        Ok(container)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}

/// Builds a container from `modules` with the default configuration
pub fn injector(modules: &[Arc<dyn Module>]) -> Result<Container> {
    Bootstrap::default().injector(modules)
}
