//! Explicitly allocated per thread contexts

use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use tether_domain::constants::SCOPE_WORKER;
use tether_domain::error::{Error, Result};
use tether_domain::object::Object;
use tether_domain::ports::{Controller, Provider, Scope};
use tether_domain::value_objects::Dependency;
use tracing::trace;

type Context = Arc<DashMap<usize, Object>>;

/// Instances live from [`Controller::allocate`] to [`Controller::deallocate`]
/// on the calling thread
///
/// Resolving a worker scoped resource on a thread without an allocated
/// context fails with [`Error::ScopeNotAllocated`].
#[derive(Default)]
pub struct WorkerScope {
    contexts: DashMap<ThreadId, Context>,
}

impl WorkerScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<Context> {
        self.contexts
            .get(&thread::current().id())
            .map(|context| Arc::clone(context.value()))
            .ok_or_else(|| Error::scope_not_allocated(SCOPE_WORKER))
    }
}

impl Scope for WorkerScope {
    fn provide(
        &self,
        serial_id: usize,
        _resources: usize,
        _dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object> {
        let context = self.context()?;
        if let Some(existing) = context.get(&serial_id) {
            return Ok(Arc::clone(existing.value()));
        }
        let created = provider.provide()?;
        Ok(Arc::clone(context.entry(serial_id).or_insert(created).value()))
    }
}

impl Controller for WorkerScope {
    fn allocate(&self) {
        let id = thread::current().id();
        self.contexts.entry(id).or_default();
        trace!(thread = ?id, "Worker context allocated");
    }

    fn deallocate(&self) {
        let id = thread::current().id();
        if self.contexts.remove(&id).is_some() {
            trace!(thread = ?id, "Worker context deallocated");
        }
    }

    fn is_allocated(&self) -> bool {
        self.contexts.contains_key(&thread::current().id())
    }
}
