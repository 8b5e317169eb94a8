//! Filling of cached instance slots

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tether_domain::error::{Error, Result};
use tether_domain::object::Object;
use tether_domain::ports::Provider;
use tether_domain::value_objects::Dependency;

thread_local! {
    /// Slots whose provider is running on this thread
    static FILLING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

struct FillingGuard {
    slot: usize,
}

impl Drop for FillingGuard {
    fn drop(&mut self) {
        FILLING.with(|filling| {
            filling.borrow_mut().remove(&self.slot);
        });
    }
}

/// The instance of `slot`, created by `provider` on first use
///
/// A provider that asks for its own slot again (a resource whose creation
/// requires itself under a different name, so the path check cannot see it)
/// fails with [`Error::DependencyCycle`] instead of blocking forever.
pub(super) fn fill(
    slot: &OnceCell<Object>,
    dependency: &Dependency,
    provider: &dyn Provider,
) -> Result<Object> {
    if let Some(existing) = slot.get() {
        return Ok(Arc::clone(existing));
    }
    let address = slot as *const OnceCell<Object> as usize;
    let entered = FILLING.with(|filling| filling.borrow_mut().insert(address));
    if !entered {
        return Err(Error::DependencyCycle {
            path: dependency.to_string(),
        });
    }
    let _guard = FillingGuard { slot: address };
    slot.get_or_try_init(|| provider.provide()).map(Arc::clone)
}
