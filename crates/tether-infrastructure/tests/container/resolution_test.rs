//! Resolution Tests

use std::sync::Arc;

use tether_domain::Error;
use tether_domain::constants::SCOPE_CONTAINER;
use tether_domain::lang::builtin::{INJECTOR, INTEGER, LONG, NUMBER, STRING};
use tether_domain::lang::{Class, Constructor, Method, Type, TypeTemplate};
use tether_domain::object::{as_array, downcast, object};
use tether_domain::ports::{Injector, InjectorExt};
use tether_domain::value_objects::{Dependency, Hint, Instance, Locator, Name, Target};
use tether_infrastructure::bind::{Binding, BindingType, ConstantSupplier};
use tether_infrastructure::error_ext::ErrorContext;
use tether_infrastructure::{Container, injector};

use crate::test_utils::{instance_of, module, source};

fn integers() -> Container {
    injector(&[module(|bindings| {
        bindings.add_constant(Instance::named("one", Type::raw(&INTEGER)), object(1), source())?;
        bindings.add_constant(Instance::named("two", Type::raw(&INTEGER)), object(2), source())
    })])
    .unwrap()
}

struct Greeter {
    greeting: Arc<String>,
}

fn greeter_class() -> Class {
    Class::builder("Greeter")
        .constructor(Constructor::new(vec![Type::raw(&STRING)], |args| {
            Ok(object(Greeter {
                greeting: downcast::<String>(&args[0])?,
            }))
        }))
        .build()
}

#[test]
fn test_named_instance_is_resolved() {
    let container = integers();

    let two = container.resolve_named("two", &Type::raw(&INTEGER)).unwrap();

    assert_eq!(*downcast::<i32>(&two).unwrap(), 2);
}

#[test]
fn test_equally_qualified_candidates_are_ambiguous() {
    let container = integers();

    let result = container.resolve_instance(Instance::any_of(Type::raw(&INTEGER)));

    match result {
        Err(Error::AmbiguousDependency { candidates, .. }) => {
            assert!(candidates.contains("one"));
            assert!(candidates.contains("two"));
        }
        other => panic!("expected an ambiguous dependency, got {other:?}"),
    }
}

#[test]
fn test_missing_resource_lists_candidates_of_same_raw_type() {
    let container = integers();

    let result = container.resolve_class(&INTEGER);

    match result {
        Err(Error::NoResourceForDependency { candidates, .. }) => {
            assert!(candidates.contains("one Integer"));
            assert!(candidates.contains("two Integer"));
        }
        other => panic!("expected no resource, got {other:?}"),
    }
}

#[test]
fn test_missing_resource_without_candidates() {
    let container = integers();

    let result = container.resolve_class(&LONG);

    match result {
        Err(Error::NoResourceForDependency { candidates, .. }) => assert_eq!(candidates, "none"),
        other => panic!("expected no resource, got {other:?}"),
    }
}

#[test]
fn test_targeted_binding_beats_untargeted() {
    let greeter = greeter_class();
    let declared = greeter.clone();
    let container = injector(&[module(move |bindings| {
        bindings.add_constant(
            Instance::of_class(&STRING),
            object("hello".to_string()),
            source(),
        )?;
        bindings.add(Binding::new(
            Locator::new(
                Instance::of_class(&STRING),
                Target::targeting(instance_of(&declared)),
            ),
            BindingType::Predefined,
            Some(Arc::new(ConstantSupplier::new(object("hi greeter".to_string())))),
            Name::named(SCOPE_CONTAINER),
            source(),
        ))?;
        bindings.construct(
            instance_of(&declared),
            &declared,
            &[],
            Name::named("application"),
            source(),
        )
    })])
    .unwrap();

    let greeter = downcast::<Greeter>(&container.resolve_class(&greeter).unwrap()).unwrap();
    let plain = downcast::<String>(&container.resolve_class(&STRING).unwrap()).unwrap();

    assert_eq!(greeter.greeting.as_str(), "hi greeter");
    assert_eq!(plain.as_str(), "hello");
}

#[test]
fn test_array_is_assembled_from_element_resources() {
    let container = integers();

    let array = container
        .resolve_type(&Type::raw(&INTEGER).add_array_dimension())
        .unwrap();
    let values: Vec<i32> = as_array(&array)
        .unwrap()
        .iter()
        .map(|element| *downcast::<i32>(element).unwrap())
        .collect();

    assert_eq!(values, vec![1, 2]);
}

#[test]
fn test_array_without_elements_is_empty() {
    let container = integers();

    let array = container
        .resolve_type(&Type::raw(&STRING).add_array_dimension())
        .unwrap();

    assert!(as_array(&array).unwrap().is_empty());
}

#[test]
fn test_elements_may_refer_to_other_instances() {
    let strings = Type::raw(&STRING).add_array_dimension();
    let elements = strings.clone();
    let container = injector(&[module(move |bindings| {
        bindings.add_constant(
            Instance::named("greeting", Type::raw(&STRING)),
            object("hello".to_string()),
            source(),
        )?;
        bindings.add_elements(
            Instance::default_instance_of(elements.clone()),
            vec![
                Hint::relative_reference_to(Instance::named("greeting", Type::raw(&STRING))),
                Hint::constant(object("world".to_string()), Type::raw(&STRING)),
            ],
            source(),
        )
    })])
    .unwrap();

    let array = container.resolve_type(&strings).unwrap();
    let values: Vec<String> = as_array(&array)
        .unwrap()
        .iter()
        .map(|element| downcast::<String>(element).unwrap().as_ref().clone())
        .collect();

    assert_eq!(values, vec!["hello".to_string(), "world".to_string()]);
}

#[test]
fn test_injector_resolves_to_the_container() {
    let container = integers();

    let resolved = downcast::<Container>(&container.resolve_class(&INJECTOR).unwrap()).unwrap();

    assert_eq!(resolved.resources().len(), container.resources().len());
    let one = resolved.resolve_named("one", &Type::raw(&INTEGER)).unwrap();
    assert_eq!(*downcast::<i32>(&one).unwrap(), 1);
}

#[test]
fn test_cycle_is_reported_with_its_path() {
    let b_ref = Class::builder("B").build();
    let a = Class::builder("A")
        .constructor(Constructor::new(vec![Type::raw(&b_ref)], |_| Ok(object(()))))
        .build();
    let b = Class::builder("B")
        .constructor(Constructor::new(vec![Type::raw(&a)], |_| Ok(object(()))))
        .build();
    let requested = a.clone();
    let container = injector(&[module(move |bindings| {
        bindings.construct(instance_of(&a), &a, &[], Name::named("application"), source())?;
        bindings.construct(instance_of(&b), &b, &[], Name::named("application"), source())
    })])
    .unwrap();

    let result = container.resolve_class(&requested);

    match result {
        Err(Error::DependencyCycle { path }) => {
            assert!(path.contains('A'));
            assert!(path.contains('B'));
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_self_dependency_under_another_name_is_a_cycle() {
    let node_ref = Class::builder("Node").build();
    let node = Class::builder("Node")
        .constructor(Constructor::new(vec![Type::raw(&node_ref)], |_| Ok(object(()))))
        .build();
    let requested = Type::raw(&node);
    let container = injector(&[module(move |bindings| {
        bindings.construct(
            Instance::new(Name::any(), Type::raw(&node)),
            &node,
            &[Hint::relative_reference_to(Instance::named("b", Type::raw(&node)))],
            Name::named("application"),
            source(),
        )
    })])
    .unwrap();

    let result = container.resolve_named("a", &requested);

    match result {
        Err(Error::DependencyCycle { path }) => assert!(path.contains("Node")),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_indirect_binding_is_only_reachable_through_interfaces() {
    let greeting = Class::interface("Greeting").build();
    let english = Class::builder("English")
        .implements(TypeTemplate::of(&greeting))
        .build();
    let declared = (greeting.clone(), english.clone());
    let container = injector(&[module(move |bindings| {
        let (greeting, english) = &declared;
        bindings.add(Binding::new(
            Locator::untargeted(instance_of(english)).indirect(),
            BindingType::Predefined,
            Some(Arc::new(ConstantSupplier::new(object("hello".to_string())))),
            Name::named(SCOPE_CONTAINER),
            source(),
        ))?;
        bindings.add_reference(instance_of(greeting), instance_of(english), source())
    })])
    .unwrap();

    let direct = container.resolve_class(&english);
    let through_interface = container.resolve_class(&greeting).unwrap();

    assert!(matches!(direct, Err(Error::IllegalAccess { .. })));
    assert_eq!(downcast::<String>(&through_interface).unwrap().as_str(), "hello");
}

#[test]
fn test_method_binding_receives_injected_arguments() {
    let answer = Method::new(
        "length",
        Type::raw(&INTEGER),
        vec![Type::raw(&STRING)],
        |args| {
            let text = downcast::<String>(&args[0])?;
            Ok(object(i32::try_from(text.len()).unwrap_or(i32::MAX)))
        },
    );
    let container = injector(&[module(move |bindings| {
        bindings.add_constant(
            Instance::of_class(&STRING),
            object("forty-two".to_string()),
            source(),
        )?;
        bindings.add_method(
            Instance::named("length", Type::raw(&INTEGER)),
            answer.clone(),
            &[],
            Name::named("injection"),
            source(),
        )
    })])
    .unwrap();

    let length = container.resolve_named("length", &Type::raw(&INTEGER)).unwrap();

    assert_eq!(*downcast::<i32>(&length).unwrap(), 9);
}

#[test]
fn test_method_with_unrelated_return_type_is_rejected() {
    let method = Method::new("text", Type::raw(&STRING), Vec::new(), |_| Ok(object(())));

    let result = injector(&[module(move |bindings| {
        bindings.add_method(
            Instance::of_class(&INTEGER),
            method.clone(),
            &[],
            Name::named("injection"),
            source(),
        )
    })]);

    assert!(matches!(result, Err(Error::ClassCast { .. })));
}

#[test]
fn test_abstract_class_cannot_be_constructed() {
    let result = injector(&[module(|bindings| {
        bindings.construct(
            Instance::of_class(&NUMBER),
            &NUMBER,
            &[],
            Name::named("application"),
            source(),
        )
    })]);

    assert!(result.unwrap_err().is_inconsistent_declaration());
}

#[test]
fn test_failing_constructor_surfaces_as_supply_error() {
    let settings = Class::builder("Settings")
        .constructor(Constructor::new(vec![], |_| {
            let text = std::fs::read_to_string("/nonexistent/tether/settings.toml")
                .context("reading settings")?;
            Ok(object(text))
        }))
        .build();
    let container = injector(&[module(move |bindings| {
        bindings.construct(
            Instance::of_class(&settings),
            &settings,
            &[],
            Name::named("injection"),
            source(),
        )
    })])
    .unwrap();
    let dependency = Dependency::of_instance(container.resources()[0].locator().instance.clone());

    match container.resolve(&dependency) {
        Err(Error::Supply { message, source }) => {
            assert!(message.starts_with("reading settings"));
            assert!(source.is_some());
        }
        other => panic!("expected a supply error, got {other:?}"),
    }
}

#[test]
fn test_generator_for_matches_resolution() {
    let container = integers();
    let dependency = Dependency::of_instance(Instance::named("two", Type::raw(&INTEGER)));

    let generator = container.generator_for(&dependency).unwrap();
    let resource = container.resource_for(&dependency).unwrap().unwrap();

    assert!(generator.permanence().is_permanent());
    assert_eq!(resource.locator().instance.name, Name::named("two"));
    assert!(container.resource_for(&Dependency::of_class(&LONG)).unwrap().is_none());
}
