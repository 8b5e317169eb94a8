//! Error extension utilities
//!
//! Host code running inside constructors and factory methods fails with its
//! own error types. [`ErrorContext`] folds those into [`Error::Supply`] so
//! the container can report them along with the dependency being created.
//! The configuration loader uses the same trait for figment, TOML and file
//! system failures.

use std::fmt;

use tether_domain::error::{Error, Result};

type Boxed = Box<dyn std::error::Error + Send + Sync>;

/// Attaches a description to foreign errors while converting them
///
/// ```ignore
/// use tether_infrastructure::error_ext::ErrorContext;
///
/// let pool = Constructor::new(vec![Type::raw(&STRING)], |args| {
///     let url = downcast::<String>(&args[0])?;
///     let pool = Pool::connect(&url).context("opening the connection pool")?;
///     Ok(object(pool))
/// });
/// ```
pub trait ErrorContext<T> {
    /// Converts the error into [`Error::Supply`]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Like [`ErrorContext::context`]; `f` only runs on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;

    /// Converts the error into [`Error::Io`]
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Converts the error into [`Error::Configuration`]
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

fn wrap<T, E, C>(
    result: std::result::Result<T, E>,
    context: C,
    into: fn(String, Boxed) -> Error,
) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
    C: fmt::Display,
{
    result.map_err(|err| into(format!("{context}: {err}"), Box::new(err)))
}

fn supply(message: String, source: Boxed) -> Error {
    Error::Supply {
        message,
        source: Some(source),
    }
}

fn io(message: String, source: Boxed) -> Error {
    Error::Io {
        message,
        source: Some(source),
    }
}

fn configuration(message: String, source: Boxed) -> Error {
    Error::Configuration {
        message,
        source: Some(source),
    }
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        wrap(self, context, supply)
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => wrap(Err(err), f(), supply),
        }
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        wrap(self, context, io)
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        wrap(self, context, configuration)
    }
}
