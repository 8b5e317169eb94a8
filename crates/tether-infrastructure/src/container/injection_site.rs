//! Injection sites
//!
//! The arguments of a constructor or method invocation for one particular
//! dependency. Whatever can be resolved once is resolved when the site is
//! created; everything else is resolved again for every invocation.

use std::sync::Arc;

use tether_domain::error::Result;
use tether_domain::lang::builtin::{INJECTOR, PROVIDER};
use tether_domain::object::{Object, object};
use tether_domain::ports::{Generator, Injector};
use tether_domain::value_objects::{Dependency, Hint};

enum Lazy {
    /// Arrays are assembled from whatever matches at invocation time
    Array(Dependency),
    /// Generators of scopes whose instances may change
    Generated(Dependency, Arc<dyn Generator>),
}

pub struct InjectionSite {
    site: Dependency,
    args: Arc<[Object]>,
    lazy: Box<[(usize, Lazy)]>,
}

impl InjectionSite {
    /// Pre-resolves the arguments `hints` describe for `site`
    ///
    /// `site` is the dependency of the instance being created, its path
    /// already including the step into the binding that creates it.
    pub fn new(injector: &dyn Injector, site: Dependency, hints: Arc<[Hint]>) -> Result<Self> {
        let mut args = Vec::with_capacity(hints.len());
        let mut lazy = Vec::new();
        for (i, hint) in hints.iter().enumerate() {
            let arg = match hint {
                Hint::Constant { value, .. } => Arc::clone(value),
                Hint::Absolute { dependency, .. } => injector.resolve(dependency)?,
                Hint::Relative { reference, .. } => {
                    let parameter = site.instanced(reference.clone());
                    let ty = parameter.ty();
                    let raw = ty.raw_class();
                    if ty.array_dimensions() == 1 {
                        lazy.push((i, Lazy::Array(parameter)));
                        object(())
                    } else if ty.is_array() || (raw != &*INJECTOR && raw != &*PROVIDER) {
                        let generator = injector.generator_for(&parameter)?;
                        let permanence = generator.permanence();
                        if permanence.is_permanent() && !permanence.is_ignore() {
                            generator.generate(&parameter, injector)?
                        } else {
                            lazy.push((i, Lazy::Generated(parameter, generator)));
                            object(())
                        }
                    } else {
                        injector.resolve(&parameter)?
                    }
                }
            };
            args.push(arg);
        }
        Ok(Self {
            site,
            args: Arc::from(args),
            lazy: lazy.into_boxed_slice(),
        })
    }

    pub fn dependency(&self) -> &Dependency {
        &self.site
    }

    /// The arguments for the next invocation
    ///
    /// Sites without lazy arguments hand out the same argument array every
    /// time.
    pub fn args(&self, injector: &dyn Injector) -> Result<Arc<[Object]>> {
        if self.lazy.is_empty() {
            return Ok(Arc::clone(&self.args));
        }
        let mut args = self.args.to_vec();
        for (i, lazy) in &self.lazy {
            args[*i] = match lazy {
                Lazy::Array(dependency) => injector.resolve(dependency)?,
                Lazy::Generated(dependency, generator) => {
                    generator.generate(dependency, injector)?
                }
            };
        }
        Ok(Arc::from(args))
    }

    pub fn has_lazy_arguments(&self) -> bool {
        !self.lazy.is_empty()
    }
}
