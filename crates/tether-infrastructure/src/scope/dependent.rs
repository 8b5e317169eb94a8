//! Scopes keyed by parts of the requesting dependency

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tether_domain::error::Result;
use tether_domain::lang::Type;
use tether_domain::object::Object;
use tether_domain::ports::{Provider, Scope};
use tether_domain::value_objects::{Dependency, Instance};

use super::slot::fill;

/// One instance per resource and key derived from the dependency
///
/// All four built-in keyings share this implementation:
///
/// | Constructor | Key |
/// |-------------|-----|
/// | [`DependencyScope::dependency`] | the full dependency including its path |
/// | [`DependencyScope::dependency_type`] | the requested type |
/// | [`DependencyScope::dependency_instance`] | the requested name and type |
/// | [`DependencyScope::target_instance`] | the requested instance and the instance it is injected into |
pub struct DependencyScope<K> {
    key: fn(&Dependency) -> K,
    instances: DashMap<(usize, K), Arc<OnceCell<Object>>>,
}

impl<K: Eq + Hash> DependencyScope<K> {
    pub fn keyed_by(key: fn(&Dependency) -> K) -> Self {
        Self {
            key,
            instances: DashMap::new(),
        }
    }

    /// Number of instances created so far
    pub fn created(&self) -> usize {
        self.instances
            .iter()
            .filter(|slot| slot.value().get().is_some())
            .count()
    }
}

impl DependencyScope<Dependency> {
    pub fn dependency() -> Self {
        Self::keyed_by(Dependency::clone)
    }
}

impl DependencyScope<Type> {
    pub fn dependency_type() -> Self {
        Self::keyed_by(|dependency| dependency.ty().clone())
    }
}

impl DependencyScope<Instance> {
    pub fn dependency_instance() -> Self {
        Self::keyed_by(|dependency| dependency.instance().clone())
    }
}

impl DependencyScope<(Instance, Instance)> {
    pub fn target_instance() -> Self {
        Self::keyed_by(|dependency| (dependency.instance().clone(), dependency.target(0)))
    }
}

impl<K> Scope for DependencyScope<K>
where
    K: Eq + Hash + Send + Sync,
{
    fn provide(
        &self,
        serial_id: usize,
        _resources: usize,
        dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object> {
        let slot = Arc::clone(
            self.instances
                .entry((serial_id, (self.key)(dependency)))
                .or_default()
                .value(),
        );
        fill(&slot, dependency, provider)
    }
}
