//! Pass-through scope

use tether_domain::error::Result;
use tether_domain::object::Object;
use tether_domain::ports::{Provider, Scope};
use tether_domain::value_objects::Dependency;

/// Creates a new instance on every request
///
/// Serves both the injection scope and the reference scope, which only
/// forwards to whatever scope the referenced binding lives in.
#[derive(Debug, Default)]
pub struct InjectionScope;

impl Scope for InjectionScope {
    fn provide(
        &self,
        _serial_id: usize,
        _resources: usize,
        _dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object> {
        provider.provide()
    }
}
