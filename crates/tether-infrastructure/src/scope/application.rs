//! Container wide singletons

use once_cell::sync::OnceCell;
use tether_domain::error::{Error, Result};
use tether_domain::object::Object;
use tether_domain::ports::{Provider, Scope};
use tether_domain::value_objects::Dependency;

use super::slot::fill;

/// One instance per resource for the lifetime of the container
///
/// The slot table is sized on first use by the number of resources of the
/// container. Concurrent first requests for a resource block until the
/// winning provider finished, so the provider runs exactly once. A provider
/// requesting its own resource again fails with a dependency cycle.
#[derive(Default)]
pub struct ApplicationScope {
    instances: OnceCell<Box<[OnceCell<Object>]>>,
}

impl ApplicationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances created so far
    pub fn created(&self) -> usize {
        self.instances
            .get()
            .map_or(0, |slots| slots.iter().filter(|slot| slot.get().is_some()).count())
    }
}

impl Scope for ApplicationScope {
    fn provide(
        &self,
        serial_id: usize,
        resources: usize,
        dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object> {
        let slots = self
            .instances
            .get_or_init(|| (0..resources).map(|_| OnceCell::new()).collect());
        let slot = slots.get(serial_id).ok_or_else(|| {
            Error::supply(format!(
                "Resource #{serial_id} is out of range ({} resources) for {dependency}",
                slots.len()
            ))
        })?;
        fill(slot, dependency, provider)
    }
}
