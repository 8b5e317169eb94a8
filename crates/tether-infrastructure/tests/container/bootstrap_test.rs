//! Bootstrap Tests

use std::sync::Arc;

use tether_domain::Error;
use tether_domain::lang::builtin::{INTEGER, STRING};
use tether_domain::lang::{Class, Constructor, Type};
use tether_domain::object::{Object, downcast, object};
use tether_domain::ports::InjectorExt;
use tether_domain::value_objects::{ConstructorStrategy, DeclarationType, Hint, Instance, Name};
use tether_infrastructure::config::ConfigBuilder;
use tether_infrastructure::scope::Scopes;
use tether_infrastructure::{Bootstrap, Container, Module};

use crate::test_utils::{Counter, Foo, bar_class, foo_class, instance_of, module, source};

fn strings() -> Arc<dyn Module> {
    module(|bindings| {
        bindings.add_elements(
            Instance::default_instance_of(Type::raw(&STRING).add_array_dimension()),
            vec![Hint::constant(object("a".to_string()), Type::raw(&STRING))],
            source(),
        )
    })
}

fn resolve_strings(container: &Container) -> Object {
    container
        .resolve_type(&Type::raw(&STRING).add_array_dimension())
        .unwrap()
}

#[test]
fn test_unknown_default_scope_is_rejected() {
    let bootstrap = Bootstrap::new(ConfigBuilder::new().with_default_scope("session").build());

    let result = bootstrap.injector(&[strings()]);

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_invalid_configuration_is_rejected_before_declaring() {
    let bootstrap = Bootstrap::new(ConfigBuilder::new().with_nesting("thread", " ").build());

    let result = bootstrap.injector(&[module(|_| panic!("modules must not be declared"))]);

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_auto_scope_follows_default_scope() {
    let shared = Bootstrap::default().injector(&[strings()]).unwrap();
    let fresh = Bootstrap::new(ConfigBuilder::new().with_default_scope("injection").build())
        .injector(&[strings()])
        .unwrap();

    assert!(Arc::ptr_eq(
        &resolve_strings(&shared),
        &resolve_strings(&shared)
    ));
    assert!(!Arc::ptr_eq(
        &resolve_strings(&fresh),
        &resolve_strings(&fresh)
    ));
}

#[test]
fn test_containers_of_one_bootstrap_do_not_share_instances() {
    let bootstrap = Bootstrap::default();
    let first = bootstrap.injector(&[strings()]).unwrap();
    let second = bootstrap.injector(&[strings()]).unwrap();

    assert!(!Arc::ptr_eq(
        &resolve_strings(&first),
        &resolve_strings(&second)
    ));
}

#[test]
fn test_containers_with_the_same_scopes_keep_their_own_singletons() {
    let bootstrap = Bootstrap::default().with_scopes(Scopes::defaults());
    let first = bootstrap
        .injector(&[module(|bindings| {
            bindings.add_constant(Instance::of_class(&STRING), object("a".to_string()), source())
        })])
        .unwrap();
    let second = bootstrap
        .injector(&[module(|bindings| {
            bindings.add_constant(Instance::of_class(&INTEGER), object(42), source())
        })])
        .unwrap();

    let a = first.resolve_class(&STRING).unwrap();
    let answer = second.resolve_class(&INTEGER).unwrap();

    assert_eq!(downcast::<String>(&a).unwrap().as_str(), "a");
    assert_eq!(*downcast::<i32>(&answer).unwrap(), 42);
}

#[test]
fn test_unbound_required_type_aborts_bootstrap() {
    let result = Bootstrap::default().injector(&[module(|bindings| {
        bindings.require(Type::raw(&INTEGER), &source())
    })]);

    match result {
        Err(Error::NoResourceForDependency { dependency, .. }) => {
            assert!(dependency.contains("Integer"));
        }
        other => panic!("expected an unbound required type, got {other:?}"),
    }
}

#[test]
fn test_required_type_bound_by_another_module() {
    let container = Bootstrap::default()
        .injector(&[
            module(|bindings| bindings.require(Type::raw(&INTEGER), &source())),
            module(|bindings| {
                bindings.add_constant(Instance::of_class(&INTEGER), object(3), source())
            }),
        ])
        .unwrap();

    let three = container.resolve_class(&INTEGER).unwrap();

    assert_eq!(*downcast::<i32>(&three).unwrap(), 3);
    assert_eq!(container.resources().len(), 1);
}

#[test]
fn test_configured_nesting_permits_injection() {
    let bar = bar_class(&Counter::default());
    let foo = foo_class(&bar);
    let requested = instance_of(&foo);
    let bootstrap = Bootstrap::new(
        ConfigBuilder::new()
            .with_nesting("injection", "application")
            .build(),
    );

    let container = bootstrap
        .injector(&[module(move |bindings| {
            bindings.construct(instance_of(&foo), &foo, &[], Name::named("application"), source())?;
            bindings.construct(instance_of(&bar), &bar, &[], Name::named("injection"), source())
        })])
        .unwrap();

    let resolved = container.resolve_instance(requested).unwrap();
    assert!(downcast::<Foo>(&resolved).is_ok());
}

#[test]
fn test_constructor_strategy_is_configurable() {
    let text = Class::builder("Text")
        .constructor(Constructor::new(Vec::new(), |_| Ok(object("first".to_string()))))
        .constructor(Constructor::new(vec![Type::raw(&INTEGER)], |_| {
            Ok(object("longest".to_string()))
        }))
        .build();
    let declare = move || {
        let text = text.clone();
        module(move |bindings| {
            bindings.add_constant(Instance::of_class(&INTEGER), object(1), source())?;
            bindings.construct(instance_of(&text), &text, &[], Name::named("injection"), source())
        })
    };
    let chosen = |strategy: ConstructorStrategy| {
        let container = Bootstrap::new(
            ConfigBuilder::new()
                .with_constructor_strategy(strategy)
                .build(),
        )
        .injector(&[declare()])
        .unwrap();
        let text = container
            .resolve_instance(Instance::default_instance_of(Type::raw(
                &Class::builder("Text").build(),
            )))
            .unwrap();
        downcast::<String>(&text).unwrap().as_ref().clone()
    };

    assert_eq!(chosen(ConstructorStrategy::FirstDeclared), "first");
    assert_eq!(chosen(ConstructorStrategy::LongestParameterList), "longest");
}

#[test]
fn test_bindings_are_disambiguated_before_building() {
    let bootstrap = Bootstrap::default();

    let bindings = bootstrap
        .bindings(&[
            module(|bindings| {
                bindings.add_constant(
                    Instance::of_class(&STRING),
                    object("default".to_string()),
                    source().typed(DeclarationType::Default),
                )
            }),
            module(|bindings| {
                bindings.add_constant(
                    Instance::of_class(&STRING),
                    object("explicit".to_string()),
                    source(),
                )
            }),
        ])
        .unwrap();

    assert_eq!(bindings.len(), 1);
    assert_eq!(bootstrap.config().bootstrap.default_scope, "application");
}
