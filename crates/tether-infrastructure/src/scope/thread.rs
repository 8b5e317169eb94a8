//! Per thread instances

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use tether_domain::error::Result;
use tether_domain::object::Object;
use tether_domain::ports::{Provider, Scope};
use tether_domain::value_objects::Dependency;

static NEXT_SCOPE_ID: AtomicUsize = AtomicUsize::new(0);

/// The instances one [`ThreadScope`] created on the current thread
struct Table {
    owner: Weak<()>,
    instances: HashMap<usize, Object>,
}

thread_local! {
    static TABLES: RefCell<HashMap<usize, Table>> = RefCell::new(HashMap::new());
}

/// One instance per resource and thread
///
/// Instances are stored with the thread and dropped when it exits. A pooled
/// thread keeps its instances from one task to the next. Tables of scopes
/// that no longer exist are pruned the next time the thread stores an
/// instance.
pub struct ThreadScope {
    id: usize,
    alive: Arc<()>,
}

impl ThreadScope {
    pub fn new() -> Self {
        Self {
            id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
            alive: Arc::new(()),
        }
    }

    /// Number of instances created on the current thread
    pub fn created(&self) -> usize {
        TABLES.with(|tables| {
            tables
                .borrow()
                .get(&self.id)
                .map_or(0, |table| table.instances.len())
        })
    }

    fn existing(&self, serial_id: usize) -> Option<Object> {
        TABLES.with(|tables| {
            tables
                .borrow()
                .get(&self.id)
                .and_then(|table| table.instances.get(&serial_id).cloned())
        })
    }

    fn store(&self, serial_id: usize, created: Object) -> Object {
        let (stored, stale) = TABLES.with(|tables| {
            let mut tables = tables.borrow_mut();
            let stale: Vec<Table> = tables
                .extract_if(|_, table| table.owner.strong_count() == 0)
                .map(|(_, table)| table)
                .collect();
            let table = tables.entry(self.id).or_insert_with(|| Table {
                owner: Arc::downgrade(&self.alive),
                instances: HashMap::new(),
            });
            let stored = Arc::clone(table.instances.entry(serial_id).or_insert(created));
            (stored, stale)
        });
        // Instances may resolve from the container while being dropped
        drop(stale);
        stored
    }
}

impl Default for ThreadScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope for ThreadScope {
    fn provide(
        &self,
        serial_id: usize,
        _resources: usize,
        _dependency: &Dependency,
        provider: &dyn Provider,
    ) -> Result<Object> {
        if let Some(existing) = self.existing(serial_id) {
            return Ok(existing);
        }
        // The provider may resolve further thread scoped resources, so the
        // table is not borrowed while it runs.
        let created = provider.provide()?;
        Ok(self.store(serial_id, created))
    }
}
