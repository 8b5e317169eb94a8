//! Built-in suppliers

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tether_domain::error::{Error, Result};
use tether_domain::lang::{Constructor, Method, Type};
use tether_domain::object::{Object, array};
use tether_domain::ports::{Injector, Supplier};
use tether_domain::value_objects::{Dependency, Hint, Instance};

use crate::container::InjectionSite;

/// Always supplies the same shared value
pub struct ConstantSupplier {
    value: Object,
}

impl ConstantSupplier {
    pub fn new(value: Object) -> Self {
        Self { value }
    }
}

impl Supplier for ConstantSupplier {
    fn supply(&self, _dependency: &Dependency, _injector: &dyn Injector) -> Result<Object> {
        Ok(Arc::clone(&self.value))
    }

    fn as_constant(&self) -> Option<&Object> {
        Some(&self.value)
    }
}

/// Resolves another instance on the same path
pub struct ReferenceSupplier {
    to: Instance,
}

impl ReferenceSupplier {
    pub fn new(to: Instance) -> Self {
        Self { to }
    }
}

impl Supplier for ReferenceSupplier {
    fn supply(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object> {
        injector.resolve(&dependency.instanced(self.to.clone()))
    }
}

/// Assembles an array from constants and references
///
/// References are resolved one level up, as if the array itself was not
/// part of the path.
pub struct ElementsSupplier {
    elements: Vec<Hint>,
}

impl ElementsSupplier {
    pub fn new(elements: Vec<Hint>) -> Self {
        Self { elements }
    }
}

impl Supplier for ElementsSupplier {
    fn supply(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object> {
        let outer = dependency.uninject();
        let values = self
            .elements
            .iter()
            .map(|hint| match hint {
                Hint::Constant { value, .. } => Ok(Arc::clone(value)),
                Hint::Relative { reference, .. } => {
                    injector.resolve(&outer.instanced(reference.clone()))
                }
                Hint::Absolute { dependency, .. } => injector.resolve(dependency),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(array(values))
    }
}

/// Reuses the injection site while the dependency stays the same
struct SiteCache {
    hints: Arc<[Hint]>,
    site: ArcSwapOption<InjectionSite>,
}

impl SiteCache {
    fn new(hints: Vec<Hint>) -> Self {
        Self {
            hints: Arc::from(hints),
            site: ArcSwapOption::empty(),
        }
    }

    fn args(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Arc<[Object]>> {
        let cached = self.site.load_full();
        let site = match cached {
            Some(site) if site.dependency() == dependency => site,
            _ => {
                let site = Arc::new(InjectionSite::new(
                    injector,
                    dependency.clone(),
                    Arc::clone(&self.hints),
                )?);
                self.site.store(Some(Arc::clone(&site)));
                site
            }
        };
        site.args(injector)
    }
}

/// Invokes a declared constructor of `constructed` with injected arguments
pub struct ConstructorSupplier {
    constructed: Type,
    constructor: Constructor,
    cache: SiteCache,
}

impl ConstructorSupplier {
    pub fn new(constructed: Type, constructor: Constructor, hints: Vec<Hint>) -> Self {
        Self {
            constructed,
            constructor,
            cache: SiteCache::new(hints),
        }
    }
}

impl Supplier for ConstructorSupplier {
    fn supply(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object> {
        let args = self.cache.args(dependency, injector)?;
        self.constructor.invoke(&args)
    }

    fn produces(&self) -> Option<&Type> {
        Some(&self.constructed)
    }
}

/// Invokes a declared factory method with injected arguments
pub struct MethodSupplier {
    method: Method,
    cache: SiteCache,
}

impl MethodSupplier {
    pub fn new(method: Method, hints: Vec<Hint>) -> Self {
        Self {
            method,
            cache: SiteCache::new(hints),
        }
    }
}

impl Supplier for MethodSupplier {
    fn supply(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object> {
        let args = self.cache.args(dependency, injector)?;
        self.method.invoke(&args)
    }

    fn produces(&self) -> Option<&Type> {
        Some(self.method.returns())
    }
}

/// Placeholder of required bindings; never reaches a container
pub struct RequiredSupplier;

impl Supplier for RequiredSupplier {
    fn supply(&self, dependency: &Dependency, _injector: &dyn Injector) -> Result<Object> {
        Err(Error::no_resource(dependency, "required but never bound"))
    }
}
