//! Built-in class catalogue
//!
//! The classes every container knows about: the root, common value classes,
//! their primitives, the two classes the container resolves specially and
//! the initialiser hooks.

use once_cell::sync::Lazy;

use super::class::{Class, TypeTemplate};

pub static OBJECT: Lazy<Class> = Lazy::new(|| Class::root("Object"));

pub static SERIALIZABLE: Lazy<Class> = Lazy::new(|| Class::interface("Serializable").build());

pub static COMPARABLE: Lazy<Class> =
    Lazy::new(|| Class::interface("Comparable").type_variable("T").build());

pub static CHAR_SEQUENCE: Lazy<Class> = Lazy::new(|| Class::interface("CharSequence").build());

pub static NUMBER: Lazy<Class> = Lazy::new(|| {
    Class::builder("Number")
        .abstract_class()
        .implements(TypeTemplate::of(&SERIALIZABLE))
        .build()
});

pub static INTEGER: Lazy<Class> = Lazy::new(|| comparable_number("Integer"));

pub static LONG: Lazy<Class> = Lazy::new(|| comparable_number("Long"));

pub static DOUBLE: Lazy<Class> = Lazy::new(|| comparable_number("Double"));

pub static BOOLEAN: Lazy<Class> = Lazy::new(|| {
    Class::builder("Boolean")
        .implements(TypeTemplate::of(&SERIALIZABLE))
        .implements(TypeTemplate::of_args(&COMPARABLE, vec![TypeTemplate::SelfType]))
        .build()
});

pub static STRING: Lazy<Class> = Lazy::new(|| {
    Class::builder("String")
        .implements(TypeTemplate::of(&SERIALIZABLE))
        .implements(TypeTemplate::of_args(&COMPARABLE, vec![TypeTemplate::SelfType]))
        .implements(TypeTemplate::of(&CHAR_SEQUENCE))
        .build()
});

pub static COLLECTION: Lazy<Class> =
    Lazy::new(|| Class::interface("Collection").type_variable("E").build());

pub static LIST: Lazy<Class> = Lazy::new(|| {
    Class::interface("List")
        .type_variable("E")
        .implements(TypeTemplate::of_args(&COLLECTION, vec![TypeTemplate::var(0)]))
        .build()
});

pub static INT: Lazy<Class> = Lazy::new(|| Class::primitive("int", &INTEGER));

pub static LONG_PRIMITIVE: Lazy<Class> = Lazy::new(|| Class::primitive("long", &LONG));

pub static DOUBLE_PRIMITIVE: Lazy<Class> = Lazy::new(|| Class::primitive("double", &DOUBLE));

pub static BOOLEAN_PRIMITIVE: Lazy<Class> = Lazy::new(|| Class::primitive("boolean", &BOOLEAN));

/// `Provider<T>`: resolving it yields a lazy handle for `T`
pub static PROVIDER: Lazy<Class> =
    Lazy::new(|| Class::interface("Provider").type_variable("T").build());

/// Resolving `Injector` yields the container itself
pub static INJECTOR: Lazy<Class> = Lazy::new(|| Class::interface("Injector").build());

/// `Initialiser<T>` bindings run after instances of `T` are constructed
pub static INITIALISER: Lazy<Class> =
    Lazy::new(|| Class::interface("Initialiser").type_variable("T").build());

pub static INITIALISER_SORTER: Lazy<Class> =
    Lazy::new(|| Class::interface("InitialiserSorter").build());

fn comparable_number(name: &str) -> Class {
    Class::builder(name)
        .extends(TypeTemplate::of(&NUMBER))
        .implements(TypeTemplate::of_args(&COMPARABLE, vec![TypeTemplate::SelfType]))
        .build()
}
