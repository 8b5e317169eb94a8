//! Unit tests for type-erased values

use std::sync::Arc;

use tether_domain::object::{array, as_array, downcast, object};
use tether_domain::Error;

#[test]
fn test_downcast_shares_the_value() {
    let value = object(String::from("hello"));
    let text = downcast::<String>(&value).unwrap();

    assert_eq!(text.as_str(), "hello");
    assert_eq!(Arc::strong_count(&value), 2);
}

#[test]
fn test_downcast_to_wrong_type() {
    let value = object(42_i32);

    assert!(matches!(
        downcast::<String>(&value),
        Err(Error::ClassCast { .. })
    ));
}

#[test]
fn test_arrays() {
    let value = array(vec![object(1_i32), object(2_i32)]);
    let elements = as_array(&value).unwrap();

    assert_eq!(elements.len(), 2);
    assert_eq!(*downcast::<i32>(&elements[1]).unwrap(), 2);
    assert!(as_array(&object(1_i32)).is_none());
}
