//! Post construction hooks

use std::sync::Arc;

use super::injector::Injector;
use crate::error::Result;
use crate::lang::{Class, Type};
use crate::object::{Object, downcast, object};

/// Runs after the container constructed an instance
///
/// An initialiser bound as `Initialiser<T>` applies to every instance whose
/// actual type is assignable to `T`. Constants and references are never
/// initialised, only instances created by constructors and factory methods.
pub trait Initialiser: Send + Sync {
    /// The initialised instance; usually `target` itself, a decorator
    /// otherwise
    fn init(&self, target: Object, injector: &dyn Injector) -> Result<Object>;

    /// Narrows the classes this initialiser applies to below what `T` covers
    fn accepts(&self, _actual: &Class) -> bool {
        true
    }
}

/// Orders the initialisers applying to one actual type
///
/// Called once per actual type. Without a bound sorter initialisers run in
/// declaration order.
pub trait InitialiserSorter: Send + Sync {
    fn sort(
        &self,
        actual: &Type,
        initialisers: Vec<Arc<dyn Initialiser>>,
    ) -> Vec<Arc<dyn Initialiser>>;
}

/// Wraps an initialiser as the value of an `Initialiser<T>` binding
pub fn initialiser_object(initialiser: Arc<dyn Initialiser>) -> Object {
    object(initialiser)
}

pub fn as_initialiser(value: &Object) -> Result<Arc<dyn Initialiser>> {
    downcast::<Arc<dyn Initialiser>>(value).map(|initialiser| Arc::clone(&*initialiser))
}

/// Wraps a sorter as the value of an `InitialiserSorter` binding
pub fn sorter_object(sorter: Arc<dyn InitialiserSorter>) -> Object {
    object(sorter)
}

pub fn as_sorter(value: &Object) -> Result<Arc<dyn InitialiserSorter>> {
    downcast::<Arc<dyn InitialiserSorter>>(value).map(|sorter| Arc::clone(&*sorter))
}
