//! Scope Tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tether_domain::Error;
use tether_domain::constants::SCOPE_WORKER;
use tether_domain::lang::Type;
use tether_domain::lang::builtin::{INTEGER, STRING};
use tether_domain::object::{Object, downcast, object};
use tether_domain::ports::{Controller, Scope};
use tether_domain::value_objects::{Dependency, Instance, Locator, ScopePermanence};
use tether_infrastructure::scope::{
    ApplicationScope, DependencyScope, InjectionScope, ThreadScope, WorkerScope,
};

/// Supplies consecutive numbers
#[derive(Default)]
struct Sequence(AtomicUsize);

impl Sequence {
    fn next(&self) -> tether_domain::Result<Object> {
        Ok(object(self.0.fetch_add(1, Ordering::SeqCst)))
    }

    fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn string() -> Dependency {
    Dependency::of_class(&STRING)
}

fn value(object: &Object) -> usize {
    *downcast::<usize>(object).unwrap()
}

#[test]
fn test_injection_scope_always_provides() {
    let scope = InjectionScope;
    let sequence = Sequence::default();

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();

    assert_eq!(value(&a), 0);
    assert_eq!(value(&b), 1);
}

#[test]
fn test_application_scope_provides_once_per_resource() {
    let scope = ApplicationScope::new();
    let sequence = Sequence::default();

    let a = scope.provide(0, 2, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 2, &string(), &|| sequence.next()).unwrap();
    let c = scope.provide(1, 2, &string(), &|| sequence.next()).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(sequence.calls(), 2);
    assert_eq!(scope.created(), 2);
}

#[test]
fn test_application_scope_rejects_unknown_resource() {
    let scope = ApplicationScope::new();
    let sequence = Sequence::default();

    let result = scope.provide(3, 2, &string(), &|| sequence.next());

    assert!(matches!(result, Err(Error::Supply { .. })));
    assert_eq!(sequence.calls(), 0);
}

#[test]
fn test_application_scope_provides_once_under_contention() {
    let scope = ApplicationScope::new();
    let sequence = Sequence::default();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| scope.provide(0, 1, &string(), &|| sequence.next()).unwrap());
        }
    });

    assert_eq!(sequence.calls(), 1);
}

#[test]
fn test_failed_provision_is_not_cached() {
    let scope = ApplicationScope::new();
    let sequence = Sequence::default();

    let failing = || -> tether_domain::Result<Object> { Err(Error::supply("not yet")) };
    let failed = scope.provide(0, 1, &string(), &failing);
    let provided = scope.provide(0, 1, &string(), &|| sequence.next());

    assert!(failed.is_err());
    assert_eq!(value(&provided.unwrap()), 0);
}

#[test]
fn test_provider_requesting_its_own_slot_is_a_cycle() {
    let scope = ApplicationScope::new();
    let sequence = Sequence::default();

    let nested = scope.provide(0, 1, &string(), &|| {
        scope.provide(0, 1, &string(), &|| sequence.next())
    });
    let afterwards = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();

    assert!(matches!(nested, Err(Error::DependencyCycle { .. })));
    assert_eq!(sequence.calls(), 1);
    assert_eq!(value(&afterwards), 0);
}

#[test]
fn test_dependency_scope_detects_reentrant_key() {
    let scope = DependencyScope::dependency_type();
    let sequence = Sequence::default();

    let nested = scope.provide(0, 1, &string(), &|| -> tether_domain::Result<Object> {
        let other = scope.provide(1, 2, &string(), &|| sequence.next())?;
        scope.provide(0, 1, &string(), &|| Ok(other.clone()))
    });

    assert!(matches!(nested, Err(Error::DependencyCycle { .. })));
    assert_eq!(scope.created(), 1);
}

#[test]
fn test_thread_scope_separates_threads() {
    let scope = ThreadScope::new();
    let sequence = Sequence::default();

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let other = thread::scope(|s| {
        s.spawn(|| scope.provide(0, 1, &string(), &|| sequence.next()).unwrap())
            .join()
            .unwrap()
    });

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &other));
    assert_eq!(sequence.calls(), 2);
}

#[test]
fn test_thread_scope_releases_instances_when_thread_exits() {
    let scope = ThreadScope::new();
    let sequence = Sequence::default();

    let (released, created) = thread::scope(|s| {
        s.spawn(|| {
            let instance = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
            (Arc::downgrade(&instance), scope.created())
        })
        .join()
        .unwrap()
    });

    assert_eq!(created, 1);
    assert!(released.upgrade().is_none());
    assert_eq!(scope.created(), 0);
}

#[test]
fn test_dropped_thread_scope_is_pruned() {
    let dropped = ThreadScope::new();
    let sequence = Sequence::default();
    let instance = dropped.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let released = Arc::downgrade(&instance);
    drop(instance);
    drop(dropped);

    let scope = ThreadScope::new();
    scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();

    assert!(released.upgrade().is_none());
}

#[test]
fn test_worker_scope_requires_allocation() {
    let scope = WorkerScope::new();
    let sequence = Sequence::default();

    let result = scope.provide(0, 1, &string(), &|| sequence.next());

    match result {
        Err(Error::ScopeNotAllocated { scope }) => assert_eq!(scope, SCOPE_WORKER),
        other => panic!("expected an unallocated scope, got {other:?}"),
    }
    assert_eq!(sequence.calls(), 0);
}

#[test]
fn test_worker_scope_lives_until_deallocated() {
    let scope = WorkerScope::new();
    let sequence = Sequence::default();

    scope.allocate();
    scope.allocate();
    assert!(scope.is_allocated());
    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    scope.deallocate();
    assert!(!scope.is_allocated());
    scope.allocate();
    let c = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(value(&c), 1);
}

#[test]
fn test_worker_contexts_are_per_thread() {
    let scope = WorkerScope::new();
    scope.allocate();

    let allocated_elsewhere = thread::scope(|s| s.spawn(|| scope.is_allocated()).join().unwrap());

    assert!(!allocated_elsewhere);
}

#[test]
fn test_dependency_type_scope_ignores_names() {
    let scope = DependencyScope::dependency_type();
    let sequence = Sequence::default();
    let named = Dependency::of_instance(Instance::named("a", Type::raw(&STRING)));

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &named, &|| sequence.next()).unwrap();
    let c = scope
        .provide(0, 1, &Dependency::of_class(&INTEGER), &|| sequence.next())
        .unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(scope.created(), 2);
}

#[test]
fn test_dependency_instance_scope_separates_names() {
    let scope = DependencyScope::dependency_instance();
    let sequence = Sequence::default();
    let named = Dependency::of_instance(Instance::named("a", Type::raw(&STRING)));

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &named, &|| sequence.next()).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_dependency_scope_separates_paths() {
    let scope = DependencyScope::dependency();
    let sequence = Sequence::default();
    let within = string()
        .injecting_into(
            Locator::untargeted(Instance::of_class(&INTEGER)),
            ScopePermanence::singleton(),
        )
        .unwrap();

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &within, &|| sequence.next()).unwrap();
    let c = scope.provide(0, 1, &within, &|| sequence.next()).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&b, &c));
}

#[test]
fn test_target_instance_scope_separates_targets() {
    let scope = DependencyScope::target_instance();
    let sequence = Sequence::default();
    let within = string()
        .injecting_into(
            Locator::untargeted(Instance::of_class(&INTEGER)),
            ScopePermanence::singleton(),
        )
        .unwrap();

    let a = scope.provide(0, 1, &string(), &|| sequence.next()).unwrap();
    let b = scope.provide(0, 1, &within, &|| sequence.next()).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}
