//! Scope registry

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tether_domain::constants::{
    SCOPE_APPLICATION, SCOPE_CONTAINER, SCOPE_DEPENDENCY, SCOPE_DEPENDENCY_INSTANCE,
    SCOPE_DEPENDENCY_TYPE, SCOPE_INJECTION, SCOPE_REFERENCE, SCOPE_TARGET_INSTANCE, SCOPE_THREAD,
    SCOPE_WORKER,
};
use tether_domain::error::{Error, Result};
use tether_domain::ports::{Controller, Scope};
use tether_domain::value_objects::{Name, ScopePermanence};
use tracing::debug;

use super::{ApplicationScope, DependencyScope, InjectionScope, ThreadScope, WorkerScope};
use crate::config::ScopesConfig;

type Instantiate = Arc<dyn Fn() -> Instances + Send + Sync>;

#[derive(Clone)]
struct Instances {
    scope: Arc<dyn Scope>,
    controller: Option<Arc<dyn Controller>>,
}

#[derive(Clone)]
struct Entry {
    permanence: ScopePermanence,
    instances: Instances,
    /// Present for scopes every container owns a fresh instance of
    instantiate: Option<Instantiate>,
}

/// The scopes known to a container, by name
///
/// Scopes added with [`Scopes::with_scope`] are shared by every container
/// built from this registry. Scopes added with
/// [`Scopes::with_container_scope`] hold per container state; each
/// [`Container`](crate::Container) calls [`Scopes::for_container`] and gets
/// its own instances. All caching built-in scopes are of the latter kind.
#[derive(Clone, Default)]
pub struct Scopes {
    entries: BTreeMap<Name, Entry>,
}

impl Scopes {
    /// An empty registry; bindings can only use scopes added afterwards
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in scopes
    pub fn defaults() -> Self {
        let singleton = ScopePermanence::singleton();
        let unstable = ScopePermanence::unstable();
        Self::new()
            .with_scope(ScopePermanence::reference(), Arc::new(InjectionScope))
            .with_container_scope(ScopePermanence::container(), || {
                Arc::new(ApplicationScope::new())
            })
            .with_container_scope(singleton.derive(Name::named(SCOPE_APPLICATION)), || {
                Arc::new(ApplicationScope::new())
            })
            .with_scope(
                unstable
                    .derive(Name::named(SCOPE_INJECTION))
                    .can_be_injected_into(Name::named(SCOPE_INJECTION)),
                Arc::new(InjectionScope),
            )
            .with_container_scope(
                unstable
                    .derive(Name::named(SCOPE_THREAD))
                    .can_be_injected_into(Name::named(SCOPE_THREAD))
                    .can_be_injected_into(Name::named(SCOPE_WORKER))
                    .can_be_injected_into(Name::named(SCOPE_INJECTION)),
                || Arc::new(ThreadScope::new()),
            )
            .with_controlled_container_scope(
                unstable
                    .derive(Name::named(SCOPE_WORKER))
                    .can_be_injected_into(Name::named(SCOPE_WORKER))
                    .can_be_injected_into(Name::named(SCOPE_INJECTION)),
                || Arc::new(WorkerScope::new()),
            )
            .with_container_scope(singleton.derive(Name::named(SCOPE_DEPENDENCY)), || {
                Arc::new(DependencyScope::dependency())
            })
            .with_container_scope(singleton.derive(Name::named(SCOPE_DEPENDENCY_TYPE)), || {
                Arc::new(DependencyScope::dependency_type())
            })
            .with_container_scope(
                singleton.derive(Name::named(SCOPE_DEPENDENCY_INSTANCE)),
                || Arc::new(DependencyScope::dependency_instance()),
            )
            .with_container_scope(singleton.derive(Name::named(SCOPE_TARGET_INSTANCE)), || {
                Arc::new(DependencyScope::target_instance())
            })
    }

    /// Registers `scope` under the scope name of `permanence`, replacing
    /// any scope of that name
    ///
    /// The same `scope` serves every container built from this registry.
    pub fn with_scope(self, permanence: ScopePermanence, scope: Arc<dyn Scope>) -> Self {
        self.with_entry(
            permanence,
            Instances {
                scope,
                controller: None,
            },
            None,
        )
    }

    /// Registers a shared scope whose contexts are allocated explicitly
    pub fn with_controlled_scope<S>(self, permanence: ScopePermanence, scope: Arc<S>) -> Self
    where
        S: Scope + Controller + 'static,
    {
        self.with_entry(permanence, controlled(scope), None)
    }

    /// Registers a scope that `create` instantiates once per container
    pub fn with_container_scope<F>(self, permanence: ScopePermanence, create: F) -> Self
    where
        F: Fn() -> Arc<dyn Scope> + Send + Sync + 'static,
    {
        let instantiate: Instantiate = Arc::new(move || Instances {
            scope: create(),
            controller: None,
        });
        self.with_entry(permanence, instantiate(), Some(instantiate))
    }

    /// Like [`Scopes::with_container_scope`] for explicitly allocated scopes
    pub fn with_controlled_container_scope<S, F>(
        self,
        permanence: ScopePermanence,
        create: F,
    ) -> Self
    where
        S: Scope + Controller + 'static,
        F: Fn() -> Arc<S> + Send + Sync + 'static,
    {
        let instantiate: Instantiate = Arc::new(move || controlled(create()));
        self.with_entry(permanence, instantiate(), Some(instantiate))
    }

    fn with_entry(
        mut self,
        permanence: ScopePermanence,
        instances: Instances,
        instantiate: Option<Instantiate>,
    ) -> Self {
        self.entries.insert(
            permanence.scope().clone(),
            Entry {
                permanence,
                instances,
                instantiate,
            },
        );
        self
    }

    /// A copy with fresh instances of every container owned scope
    ///
    /// Shared scopes are carried over as they are.
    pub fn for_container(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| {
                let instances = entry
                    .instantiate
                    .as_ref()
                    .map_or_else(|| entry.instances.clone(), |instantiate| instantiate());
                let entry = Entry {
                    permanence: entry.permanence.clone(),
                    instances,
                    instantiate: entry.instantiate.clone(),
                };
                (name.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Lets instances of `scope` be injected into instances of `into`
    pub fn with_nesting(mut self, scope: &str, into: &str) -> Result<Self> {
        let entry = self
            .entries
            .get_mut(&Name::named(scope))
            .ok_or_else(|| Error::configuration(format!("Unknown scope in nesting: {scope}")))?;
        entry.permanence = entry.permanence.can_be_injected_into(Name::named(into));
        debug!(scope, into, "Scope nesting added");
        Ok(self)
    }

    /// Applies the configured nestings
    pub fn configured(self, config: &ScopesConfig) -> Result<Self> {
        config.nesting.iter().try_fold(self, |scopes, (scope, intos)| {
            intos
                .iter()
                .try_fold(scopes, |scopes, into| scopes.with_nesting(scope, into))
        })
    }

    pub fn scope(&self, name: &Name) -> Option<Arc<dyn Scope>> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(&entry.instances.scope))
    }

    pub fn permanence(&self, name: &Name) -> Option<&ScopePermanence> {
        self.entries.get(name).map(|entry| &entry.permanence)
    }

    pub fn controller(&self, name: &Name) -> Option<Arc<dyn Controller>> {
        self.entries
            .get(name)
            .and_then(|entry| entry.instances.controller.clone())
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.values().map(|entry| &entry.permanence))
            .finish()
    }
}

fn controlled<S>(scope: Arc<S>) -> Instances
where
    S: Scope + Controller + 'static,
{
    let controller: Arc<dyn Controller> = Arc::clone(&scope) as Arc<dyn Controller>;
    Instances {
        scope,
        controller: Some(controller),
    }
}
