//! Scope SPI

use crate::error::Result;
use crate::object::Object;
use crate::value_objects::Dependency;

/// Lazily creates a fresh instance
pub trait Provider {
    fn provide(&self) -> Result<Object>;
}

impl<F> Provider for F
where
    F: Fn() -> Result<Object>,
{
    fn provide(&self) -> Result<Object> {
        self()
    }
}

/// A lifecycle and caching policy
///
/// `serial_id` identifies the resource within a container of `resources`
/// resources. A scope calls `provider` at most once per cache slot it
/// defines and returns the cached instance afterwards. Implementations are
/// shared between threads and responsible for their own synchronisation.
pub trait Scope: Send + Sync {
    fn provide(
        &self,
        serial_id: usize,
        resources: usize,
        dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object>;
}

/// Explicit lifecycle of a thread bound scope context
///
/// Scopes whose contexts are neither per container nor per thread implicitly
/// hand one of these out. Allocating twice on the same thread is a no-op;
/// deallocating discards every instance of the context.
pub trait Controller: Send + Sync {
    fn allocate(&self);

    fn deallocate(&self);

    fn is_allocated(&self) -> bool;
}
