//! Error Extension Tests

use std::io;

use tether_domain::error::{Error, Result};
use tether_infrastructure::error_ext::ErrorContext;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("expected an Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context() {
    let parse_error = "x".parse::<u32>().unwrap_err();

    let result: Result<u32> = Err(parse_error).config_context("bad nesting");

    assert!(matches!(result, Err(Error::Configuration { source: Some(_), .. })));
}

#[test]
fn test_context_becomes_supply_error() {
    let io_error = io::Error::other("constructor failed");

    let result: Result<()> = Err(io_error).context("creating Foo");

    match result {
        Err(Error::Supply { message, .. }) => assert!(message.starts_with("creating Foo")),
        other => panic!("expected a supply error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy_on_success() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);

    let value = ok
        .with_context(|| -> String { panic!("context evaluated on success") })
        .unwrap();

    assert_eq!(value, 1);
}
