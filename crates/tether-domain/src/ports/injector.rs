//! Injector and supplier ports

use std::any::Any;
use std::sync::Arc;

use crate::error::Result;
use crate::lang::{Class, Type};
use crate::object::{Object, downcast};
use crate::value_objects::{Dependency, Instance, Name, ScopePermanence};

/// Produces the value of a binding for a dependency
pub trait Supplier: Send + Sync {
    fn supply(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object>;

    /// The shared value of a constant supplier
    fn as_constant(&self) -> Option<&Object> {
        None
    }

    /// The actual type of the instances this supplier constructs
    ///
    /// Only constructed instances are passed to initialisers.
    fn produces(&self) -> Option<&Type> {
        None
    }
}

/// A resolved binding able to generate instances through its scope
pub trait Generator: Send + Sync {
    fn generate(&self, dependency: &Dependency, injector: &dyn Injector) -> Result<Object>;

    fn permanence(&self) -> &ScopePermanence;
}

/// The read API of a container
pub trait Injector: Send + Sync {
    /// Resolves `dependency` to an instance
    fn resolve(&self, dependency: &Dependency) -> Result<Object>;

    /// The generator that would serve `dependency`
    fn generator_for(&self, dependency: &Dependency) -> Result<Arc<dyn Generator>>;

    /// Applies the initialisers bound for `actual` to a new instance
    fn initialise(&self, target: Object, _actual: &Type) -> Result<Object> {
        Ok(target)
    }
}

/// Convenience overloads over [`Injector::resolve`]
pub trait InjectorExt: Injector {
    fn resolve_type(&self, ty: &Type) -> Result<Object> {
        self.resolve(&Dependency::of_type(ty.clone()))
    }

    fn resolve_class(&self, class: &Class) -> Result<Object> {
        self.resolve(&Dependency::of_class(class))
    }

    fn resolve_named<N: Into<Name>>(&self, name: N, ty: &Type) -> Result<Object> {
        self.resolve(&Dependency::of_instance(Instance::named(name, ty.clone())))
    }

    fn resolve_instance(&self, instance: Instance) -> Result<Object> {
        self.resolve(&Dependency::of_instance(instance))
    }

    /// Resolves and downcasts to the concrete value type
    fn resolve_as<V: Any + Send + Sync>(&self, dependency: &Dependency) -> Result<Arc<V>> {
        downcast(&self.resolve(dependency)?)
    }
}

impl<I: Injector + ?Sized> InjectorExt for I {}
