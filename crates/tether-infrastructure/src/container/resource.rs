//! Resources

use std::fmt;
use std::sync::Arc;

use tether_domain::error::Result;
use tether_domain::lang::builtin::{INITIALISER, INITIALISER_SORTER};
use tether_domain::object::Object;
use tether_domain::ports::{Generator, Injector, Scope, Supplier};
use tether_domain::value_objects::{Dependency, Locator, ScopePermanence, Source};

use crate::bind::{Binding, BindingType};

/// A binding made executable: its supplier combined with its scope
pub struct Resource {
    serial_id: usize,
    resources: usize,
    locator: Locator,
    binding_type: BindingType,
    source: Source,
    permanence: ScopePermanence,
    scope: Arc<dyn Scope>,
    supplier: Arc<dyn Supplier>,
    /// Initialisers and sorters are never initialised themselves
    hook: bool,
}

impl Resource {
    pub fn new(
        serial_id: usize,
        resources: usize,
        binding: &Binding,
        supplier: Arc<dyn Supplier>,
        permanence: ScopePermanence,
        scope: Arc<dyn Scope>,
    ) -> Self {
        let raw_class = binding.ty().raw_class();
        let hook = raw_class == &*INITIALISER || raw_class == &*INITIALISER_SORTER;
        Self {
            serial_id,
            resources,
            locator: binding.locator.clone(),
            binding_type: binding.binding_type,
            source: binding.source.clone(),
            permanence,
            scope,
            supplier,
            hook,
        }
    }

    pub fn serial_id(&self) -> usize {
        self.serial_id
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn binding_type(&self) -> BindingType {
        self.binding_type
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn is_matching(&self, dependency: &Dependency) -> bool {
        self.locator.is_matching(dependency)
    }

    pub fn is_eager(&self) -> bool {
        self.permanence.is_eager()
    }
}

impl Generator for Resource {
    fn generate(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object> {
        dependency.ensure_no_illegal_direct_access_of(&self.locator)?;
        let injected = dependency.injecting_into(self.locator.clone(), self.permanence.clone())?;
        self.scope
            .provide(self.serial_id, self.resources, dependency, &|| {
                let created = self.supplier.supply(&injected, injector)?;
                match self.supplier.produces() {
                    Some(actual) if !self.hook => injector.initialise(created, actual),
                    _ => Ok(created),
                }
            })
    }

    fn permanence(&self) -> &ScopePermanence {
        &self.permanence
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {:?} [{}] {}",
            self.serial_id, self.locator, self.binding_type, self.permanence, self.source
        )
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({self})")
    }
}
