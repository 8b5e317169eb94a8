//! Unit tests for qualifier names

use tether_domain::value_objects::Name;

#[test]
fn test_any_is_compatible_with_everything() {
    let any = Name::any();

    assert!(any.is_any());
    assert!(any.is_compatible_with(&Name::named("foo")));
    assert!(any.is_compatible_with(&Name::default_name()));
    assert!(Name::named("foo").is_compatible_with(&any));
}

#[test]
fn test_concrete_names() {
    assert!(Name::named("foo").is_compatible_with(&Name::named("foo")));
    assert!(!Name::named("foo").is_compatible_with(&Name::named("bar")));
    assert!(!Name::default_name().is_compatible_with(&Name::named("foo")));
}

#[test]
fn test_patterns() {
    let pattern = Name::named("disk:*");

    assert!(pattern.is_pattern());
    assert!(!Name::any().is_pattern());
    assert!(pattern.is_compatible_with(&Name::named("disk:cache")));
    assert!(Name::named("disk:cache").is_compatible_with(&pattern));
    assert!(!pattern.is_compatible_with(&Name::named("memory:cache")));
    assert!(Name::named("a*c*e").is_compatible_with(&Name::named("abcde")));
    assert!(!Name::named("a*c*e").is_compatible_with(&Name::named("abcd")));
}

#[test]
fn test_namespace() {
    let name = Name::in_namespace("disk", "cache");

    assert_eq!(name.as_str(), "disk:cache");
    assert_eq!(name.namespace(), Some("disk"));
    assert_eq!(name.value(), "cache");
    assert_eq!(Name::named("plain").namespace(), None);
    assert_eq!(Name::named("plain").value(), "plain");
}

#[test]
fn test_qualification() {
    let concrete = Name::named("disk:cache");
    let short = Name::named("d*");
    let long = Name::named("disk:*");
    let any = Name::any();

    assert!(concrete.more_qualified_than(&long));
    assert!(long.more_qualified_than(&short));
    assert!(short.more_qualified_than(&any));
    assert!(!any.more_qualified_than(&concrete));
    assert!(!concrete.more_qualified_than(&Name::named("other")));

    assert_eq!(concrete.qualification_rank(), 0);
    assert_eq!(long.qualification_rank(), 1);
    assert_eq!(any.qualification_rank(), 2);
}

#[test]
fn test_default() {
    assert!(Name::default().is_default());
    assert_eq!(Name::default(), Name::default_name());
    assert_eq!(Name::from("x"), Name::named("x"));
}
