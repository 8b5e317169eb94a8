//! Type-erased values
//!
//! Everything the container hands out is an [`Object`]. Arrays are objects
//! holding a `Vec<Object>`.

use std::any::Any;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A shared, type-erased value
pub type Object = Arc<dyn Any + Send + Sync>;

/// Wraps a value as an [`Object`]
pub fn object<V: Any + Send + Sync>(value: V) -> Object {
    Arc::new(value)
}

/// Wraps elements as an array [`Object`]
pub fn array(elements: Vec<Object>) -> Object {
    Arc::new(elements)
}

/// The elements of an array object
pub fn as_array(value: &Object) -> Option<&[Object]> {
    value.downcast_ref::<Vec<Object>>().map(Vec::as_slice)
}

/// Downcasts a shared value without copying it
pub fn downcast<V: Any + Send + Sync>(value: &Object) -> Result<Arc<V>> {
    Arc::clone(value)
        .downcast::<V>()
        .map_err(|_| Error::class_cast("object", std::any::type_name::<V>()))
}
