//! Lazy handles for `Provider<T>` dependencies

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use tether_domain::error::{Error, Result};
use tether_domain::object::{Object, downcast};
use tether_domain::ports::Injector;
use tether_domain::value_objects::Dependency;

use super::injector::{Container, ContainerInner};

/// What a `Provider<T>` dependency resolves to
///
/// Every [`ProviderHandle::provide`] resolves `T` again. Stability checks
/// are disabled along the captured path, so a handle may be held by
/// instances that live longer than the instances it yields. The handle
/// does not keep its container alive.
#[derive(Clone)]
pub struct ProviderHandle {
    container: Weak<ContainerInner>,
    dependency: Dependency,
}

impl ProviderHandle {
    pub(crate) fn new(container: Weak<ContainerInner>, dependency: Dependency) -> Self {
        Self {
            container,
            dependency,
        }
    }

    /// The dependency resolved on each call
    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    /// Resolves a fresh (or scoped) instance
    pub fn provide(&self) -> Result<Object> {
        let inner = self.container.upgrade().ok_or_else(|| {
            Error::supply(format!("Container dropped before providing {}", self.dependency))
        })?;
        Container::from_inner(inner).resolve(&self.dependency)
    }

    /// Resolves and downcasts
    pub fn provide_as<V: Any + Send + Sync>(&self) -> Result<Arc<V>> {
        downcast(&self.provide()?)
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderHandle({})", self.dependency)
    }
}
