//! The container
//!
//! Resolution looks at the resources bound for the raw type of the
//! requested dependency, keeps those whose locator matches and asks the
//! single most qualified one to generate the instance through its scope.
//! Two dependencies are answered without any binding:
//!
//! - `Injector` resolves to the container itself
//! - `Provider<T>` resolves to a [`ProviderHandle`] for `T`
//!
//! Array dependencies without a binding of their own are assembled from
//! every resource matching the element type.
//!
//! Instances created by constructors and factory methods pass through the
//! `Initialiser<T>` bindings whose `T` their actual type is assignable to.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use itertools::Itertools;
use tether_domain::constants::SCOPE_AUTO;
use tether_domain::error::{Error, Result};
use tether_domain::lang::Type;
use tether_domain::lang::builtin::{INITIALISER, INITIALISER_SORTER, INJECTOR, PROVIDER};
use tether_domain::object::{Object, array, object};
use tether_domain::ports::{
    Controller, Generator, Initialiser, InitialiserSorter, Injector, as_initialiser, as_sorter,
};
use tether_domain::value_objects::{DeclarationType, Dependency, Instance, Name};
use tracing::{debug, trace};

use super::provider::ProviderHandle;
use super::resource::Resource;
use crate::bind::Binding;
use crate::scope::Scopes;

type Initialisers = Arc<[Arc<dyn Initialiser>]>;

pub(crate) struct ContainerInner {
    resources: Vec<Arc<Resource>>,
    by_raw_type: HashMap<String, Vec<usize>>,
    scopes: Scopes,
    initialisers: DashMap<Type, Initialisers>,
}

thread_local! {
    /// Actual types whose initialisers are being collected on this thread,
    /// with the address of the collecting container
    static COLLECTING: RefCell<HashSet<(usize, Type)>> = RefCell::new(HashSet::new());
}

struct CollectingGuard {
    key: (usize, Type),
}

impl CollectingGuard {
    fn enter(key: (usize, Type)) -> Option<Self> {
        let entered = COLLECTING.with(|collecting| collecting.borrow_mut().insert(key.clone()));
        entered.then_some(Self { key })
    }
}

impl Drop for CollectingGuard {
    fn drop(&mut self) {
        COLLECTING.with(|collecting| {
            collecting.borrow_mut().remove(&self.key);
        });
    }
}

/// An immutable set of resources able to resolve dependencies
///
/// Cloning is cheap; clones share the resources and every scoped instance.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// Turns disambiguated bindings into resources
    ///
    /// Bindings in `@auto` end up in `default_scope`. Required bindings are
    /// markers only and never become resources. Container owned scopes of
    /// `scopes` are instantiated afresh, see [`Scopes::for_container`].
    pub fn new(bindings: Vec<Binding>, scopes: &Scopes, default_scope: &Name) -> Result<Self> {
        let scopes = scopes.for_container();
        if !scopes.contains(default_scope) {
            return Err(Error::configuration(format!(
                "Unknown default scope: {default_scope}"
            )));
        }
        let bindings = bindings
            .into_iter()
            .filter(|b| b.declaration_type() != DeclarationType::Required)
            .collect::<Vec<_>>();
        let count = bindings.len();
        let mut resources = Vec::with_capacity(count);
        let mut by_raw_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (serial_id, binding) in bindings.iter().enumerate() {
            let scope_name = if binding.scope.as_str() == SCOPE_AUTO {
                default_scope
            } else {
                &binding.scope
            };
            let (Some(scope), Some(permanence)) =
                (scopes.scope(scope_name), scopes.permanence(scope_name))
            else {
                return Err(Error::inconsistent(format!(
                    "Unknown scope {scope_name} of binding {binding}"
                )));
            };
            let supplier = binding
                .supplier
                .clone()
                .ok_or_else(|| Error::adding_incomplete(binding))?;
            resources.push(Arc::new(Resource::new(
                serial_id,
                count,
                binding,
                supplier,
                permanence.clone(),
                scope,
            )));
            by_raw_type
                .entry(binding.ty().raw_class().name().to_string())
                .or_default()
                .push(serial_id);
        }
        debug!(resources = count, "Container created");
        Ok(Self {
            inner: Arc::new(ContainerInner {
                resources,
                by_raw_type,
                scopes,
                initialisers: DashMap::new(),
            }),
        })
    }

    pub(crate) fn from_inner(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// All resources in serial order
    pub fn resources(&self) -> &[Arc<Resource>] {
        &self.inner.resources
    }

    pub fn scopes(&self) -> &Scopes {
        &self.inner.scopes
    }

    /// The controller of an explicitly allocated scope such as `worker`
    pub fn controller(&self, scope: &str) -> Option<Arc<dyn Controller>> {
        self.inner.scopes.controller(&Name::named(scope))
    }

    /// The resource that would serve `dependency`
    ///
    /// `Ok(None)` when nothing matches; [`Error::AmbiguousDependency`] when
    /// several equally qualified resources match.
    pub fn resource_for(&self, dependency: &Dependency) -> Result<Option<Arc<Resource>>> {
        let matching: Vec<&Arc<Resource>> = self
            .group(dependency.ty().raw_class().name())
            .filter(|resource| resource.is_matching(dependency))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        let maximal: Vec<&Arc<Resource>> = matching
            .iter()
            .copied()
            .filter(|resource| {
                !matching
                    .iter()
                    .any(|other| other.locator().more_qualified_than(resource.locator()))
            })
            .collect();
        match maximal.as_slice() {
            [single] => Ok(Some(Arc::clone(*single))),
            [] => Err(Error::ambiguous(dependency, matching.iter().join("\n\t"))),
            tied => Err(Error::ambiguous(dependency, tied.iter().join("\n\t"))),
        }
    }

    /// Creates every eager resource that is available everywhere
    ///
    /// Indirect resources are left to the first resolution through one of
    /// their interfaces.
    pub fn initialise_eager(&self) -> Result<usize> {
        let mut created = 0;
        for resource in self.resources() {
            let target = &resource.locator().target;
            if resource.is_eager() && target.is_any() && !target.indirect {
                let dependency = Dependency::of_instance(resource.locator().instance.clone());
                resource.generate(&dependency, self)?;
                created += 1;
            }
        }
        debug!(created, "Eager resources initialised");
        Ok(created)
    }

    /// The initialisers applying to instances of `actual`, in the order they
    /// run
    ///
    /// Collected once per actual type. An initialiser that needs an instance
    /// of a type it initialises fails with [`Error::DependencyCycle`].
    pub fn initialisers_for(&self, actual: &Type) -> Result<Initialisers> {
        if let Some(known) = self.inner.initialisers.get(actual) {
            return Ok(Arc::clone(known.value()));
        }
        let key = (Arc::as_ptr(&self.inner) as usize, actual.clone());
        let Some(_guard) = CollectingGuard::enter(key) else {
            return Err(Error::DependencyCycle {
                path: format!("initialisers of {actual}"),
            });
        };
        let mut applicable: Vec<Arc<dyn Initialiser>> = Vec::new();
        for resource in self.group(INITIALISER.name()) {
            let Ok(initialised) = resource.locator().ty().parameter(0) else {
                continue;
            };
            if !actual.is_assignable_to(&initialised) {
                continue;
            }
            let dependency = Dependency::of_instance(resource.locator().instance.clone());
            let initialiser = as_initialiser(&resource.generate(&dependency, self)?)?;
            if initialiser.accepts(actual.raw_class()) {
                applicable.push(initialiser);
            }
        }
        if applicable.len() > 1
            && let Some(sorter) = self.initialiser_sorter()?
        {
            applicable = sorter.sort(actual, applicable);
        }
        debug!(actual = %actual, initialisers = applicable.len(), "Initialisers collected");
        let applicable: Initialisers = Arc::from(applicable);
        self.inner
            .initialisers
            .insert(actual.clone(), Arc::clone(&applicable));
        Ok(applicable)
    }

    fn initialiser_sorter(&self) -> Result<Option<Arc<dyn InitialiserSorter>>> {
        let dependency = Dependency::of_class(&INITIALISER_SORTER);
        match self.resource_for(&dependency)? {
            Some(resource) => Ok(Some(as_sorter(&resource.generate(&dependency, self)?)?)),
            None => Ok(None),
        }
    }

    fn group<'a>(&'a self, raw_type: &str) -> impl Iterator<Item = &'a Arc<Resource>> + use<'a> {
        self.inner
            .by_raw_type
            .get(raw_type)
            .into_iter()
            .flatten()
            .map(|&serial_id| &self.inner.resources[serial_id])
    }

    fn resolve_array(&self, dependency: &Dependency) -> Result<Option<Object>> {
        let Some(element_type) = dependency.ty().element_type() else {
            return Ok(None);
        };
        let name = if dependency.name().is_default() {
            Name::any()
        } else {
            dependency.name().clone()
        };
        let element = dependency.instanced(Instance::new(name, element_type));
        let elements = self
            .group(element.ty().raw_class().name())
            .filter(|resource| resource.is_matching(&element))
            .map(|resource| resource.generate(&element, self))
            .collect::<Result<Vec<_>>>()?;
        trace!(dependency = %dependency, elements = elements.len(), "Array assembled");
        Ok(Some(array(elements)))
    }

    fn no_resource(&self, dependency: &Dependency) -> Error {
        let candidates = self
            .group(dependency.ty().raw_class().name())
            .map(|resource| resource.locator().to_string())
            .join("\n\t");
        let candidates = if candidates.is_empty() {
            "none".to_string()
        } else {
            format!("\n\t{candidates}")
        };
        Error::no_resource(dependency, candidates)
    }
}

impl Injector for Container {
    fn resolve(&self, dependency: &Dependency) -> Result<Object> {
        trace!(dependency = %dependency, "Resolving");
        let ty = dependency.ty();
        if !ty.is_array() {
            if ty.raw_class() == &*INJECTOR {
                return Ok(object(self.clone()));
            }
            if ty.raw_class() == &*PROVIDER {
                let provided = dependency.on_type_parameter()?.ignored_scoping();
                return Ok(object(ProviderHandle::new(
                    Arc::downgrade(&self.inner),
                    provided,
                )));
            }
        }
        if let Some(resource) = self.resource_for(dependency)? {
            return resource.generate(dependency, self);
        }
        self.resolve_array(dependency)?
            .ok_or_else(|| self.no_resource(dependency))
    }

    fn generator_for(&self, dependency: &Dependency) -> Result<Arc<dyn Generator>> {
        match self.resource_for(dependency)? {
            Some(resource) => Ok(resource),
            None => Err(self.no_resource(dependency)),
        }
    }

    fn initialise(&self, target: Object, actual: &Type) -> Result<Object> {
        self.initialisers_for(actual)?
            .iter()
            .try_fold(target, |target, initialiser| initialiser.init(target, self))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("resources", &self.inner.resources.len())
            .field("scopes", &self.inner.scopes)
            .finish()
    }
}
