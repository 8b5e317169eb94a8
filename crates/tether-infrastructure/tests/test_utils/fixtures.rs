//! Test fixtures

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tether_domain::error::Result;
use tether_domain::lang::{Class, Constructor, Type};
use tether_domain::object::{downcast, object};
use tether_domain::value_objects::{DeclarationType, Instance, Source};
use tether_infrastructure::bind::{Bindings, Module};

/// A module declaring whatever its closure declares
pub struct Declare<F>(pub F);

impl<F> Module for Declare<F>
where
    F: Fn(&mut Bindings) -> Result<()> + Send + Sync + 'static,
{
    fn declare(&self, bindings: &mut Bindings) -> Result<()> {
        (self.0)(bindings)
    }

    fn is_multimodal(&self) -> bool {
        true
    }
}

pub fn module<F>(declare: F) -> Arc<dyn Module>
where
    F: Fn(&mut Bindings) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(Declare(declare))
}

pub fn source() -> Source {
    Source::new("test", DeclarationType::Explicit)
}

pub fn source_of(declaration_type: DeclarationType) -> Source {
    Source::new("test", declaration_type)
}

/// Counts constructor invocations
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

pub struct Bar {
    pub serial: usize,
}

pub struct Foo {
    pub bar: Arc<Bar>,
}

/// `Bar()`, numbering its instances with `counter`
pub fn bar_class(counter: &Counter) -> Class {
    let counter = counter.clone();
    Class::builder("Bar")
        .constructor(Constructor::new(Vec::new(), move |_| {
            Ok(object(Bar {
                serial: counter.next(),
            }))
        }))
        .build()
}

/// `Foo(Bar)`
pub fn foo_class(bar: &Class) -> Class {
    Class::builder("Foo")
        .constructor(Constructor::new(vec![Type::raw(bar)], |args| {
            Ok(object(Foo {
                bar: downcast::<Bar>(&args[0])?,
            }))
        }))
        .build()
}

pub fn instance_of(class: &Class) -> Instance {
    Instance::of_class(class)
}
