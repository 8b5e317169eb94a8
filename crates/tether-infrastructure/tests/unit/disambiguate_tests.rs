//! Disambiguation Tests

use std::sync::Arc;

use tether_domain::Error;
use tether_domain::lang::Type;
use tether_domain::lang::builtin::{INTEGER, LONG, STRING};
use tether_domain::object::{Object, object};
use tether_domain::value_objects::{DeclarationType, Instance};
use tether_infrastructure::bind::{Binding, Bindings, disambiguate};

use crate::test_utils::{source, source_of};

fn constant(value: Object, declaration_type: DeclarationType) -> Binding {
    Binding::constant(
        Instance::of_class(&STRING),
        value,
        source_of(declaration_type),
    )
}

fn declared(bindings: Vec<Binding>) -> Vec<Binding> {
    let mut declared = Bindings::new();
    for binding in bindings {
        declared.add(binding).unwrap();
    }
    declared.into_bindings()
}

#[test]
fn test_explicit_bindings_for_same_locator_clash() {
    let bindings = declared(vec![
        constant(object("a"), DeclarationType::Explicit),
        constant(object("b"), DeclarationType::Explicit),
    ]);

    let result = disambiguate(bindings);

    match result {
        Err(Error::InconsistentBinding { message }) => {
            assert!(message.contains("clash"));
            assert_eq!(message.matches("String").count(), 2);
        }
        other => panic!("expected a clash, got {other:?}"),
    }
}

#[test]
fn test_explicit_and_multi_bindings_clash() {
    let bindings = declared(vec![
        constant(object("a"), DeclarationType::Multi),
        constant(object("b"), DeclarationType::Explicit),
    ]);

    assert!(disambiguate(bindings).is_err());
}

#[test]
fn test_default_is_replaced_by_explicit() {
    let bindings = declared(vec![
        constant(object("default"), DeclarationType::Default),
        constant(object("explicit"), DeclarationType::Explicit),
    ]);

    let result = disambiguate(bindings).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].declaration_type(), DeclarationType::Explicit);
}

#[test]
fn test_two_auto_bindings_cancel_out() {
    let bindings = declared(vec![
        constant(object("a"), DeclarationType::Auto),
        constant(object("b"), DeclarationType::Auto),
    ]);

    let result = disambiguate(bindings).unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_identical_multi_constants_collapse() {
    let value = object("shared");
    let bindings = declared(vec![
        constant(Arc::clone(&value), DeclarationType::Multi),
        constant(value, DeclarationType::Multi),
    ]);

    let result = disambiguate(bindings).unwrap();

    assert_eq!(result.len(), 1);
}

#[test]
fn test_distinct_multi_constants_are_kept() {
    let bindings = declared(vec![
        constant(object("a"), DeclarationType::Multi),
        constant(object("b"), DeclarationType::Multi),
    ]);

    let result = disambiguate(bindings).unwrap();

    assert_eq!(result.len(), 2);
}

#[test]
fn test_different_locators_are_all_kept() {
    let bindings = declared(vec![
        constant(object("a"), DeclarationType::Explicit),
        Binding::constant(Instance::named("other", Type::raw(&STRING)), object("b"), source()),
        Binding::constant(Instance::of_class(&INTEGER), object(1), source()),
    ]);

    let result = disambiguate(bindings).unwrap();

    assert_eq!(result.len(), 3);
}

#[test]
fn test_required_type_bound_elsewhere_is_satisfied() {
    let mut bindings = Bindings::new();
    bindings.require(Type::raw(&STRING), &source()).unwrap();
    bindings
        .add_constant(Instance::of_class(&STRING), object("a"), source())
        .unwrap();

    let result = disambiguate(bindings.into_bindings()).unwrap();

    assert_eq!(result.len(), 2);
}

#[test]
fn test_unsatisfied_required_types_are_listed() {
    let mut bindings = Bindings::new();
    bindings.require(Type::raw(&INTEGER), &source()).unwrap();
    bindings.require(Type::raw(&LONG), &source()).unwrap();
    bindings
        .add_constant(Instance::of_class(&STRING), object("a"), source())
        .unwrap();

    let result = disambiguate(bindings.into_bindings());

    match result {
        Err(Error::NoResourceForDependency { dependency, .. }) => {
            assert!(dependency.contains("Integer"));
            assert!(dependency.contains("Long"));
            assert!(!dependency.contains("String"));
        }
        other => panic!("expected unsatisfied required types, got {other:?}"),
    }
}

#[test]
fn test_provided_binding_without_requirement_is_pruned() {
    let bindings = declared(vec![constant(object("stub"), DeclarationType::Provided)]);

    let result = disambiguate(bindings).unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_provided_binding_satisfies_requirement() {
    let mut bindings = Bindings::new();
    bindings.require(Type::raw(&STRING), &source()).unwrap();
    bindings
        .add(constant(object("stub"), DeclarationType::Provided))
        .unwrap();

    let result = disambiguate(bindings.into_bindings()).unwrap();

    assert!(
        result
            .iter()
            .any(|b| b.declaration_type() == DeclarationType::Provided)
    );
}

#[test]
fn test_disambiguation_is_idempotent() {
    let mut bindings = Bindings::new();
    bindings.require(Type::raw(&STRING), &source()).unwrap();
    for binding in [
        constant(object("default"), DeclarationType::Default),
        constant(object("explicit"), DeclarationType::Explicit),
        Binding::constant(
            Instance::of_class(&INTEGER),
            object(1),
            source_of(DeclarationType::Multi),
        ),
        Binding::constant(
            Instance::of_class(&INTEGER),
            object(2),
            source_of(DeclarationType::Multi),
        ),
        Binding::constant(
            Instance::of_class(&LONG),
            object(3_i64),
            source_of(DeclarationType::Provided),
        ),
    ] {
        bindings.add(binding).unwrap();
    }

    let once = disambiguate(bindings.into_bindings()).unwrap();
    let twice = disambiguate(once.clone()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.len(), 4);
}
