//! Declared constructors and factory methods
//!
//! The container never inspects code. A constructor or method is its
//! formal parameter types plus a function that turns resolved arguments
//! into a value.

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use super::types::Type;
use crate::error::Result;
use crate::object::Object;

/// Function invoked with the resolved arguments
pub type Invoke = Arc<dyn Fn(&[Object]) -> Result<Object> + Send + Sync>;

/// A declared constructor
#[derive(Clone)]
pub struct Constructor {
    parameters: Arc<[Type]>,
    annotated: bool,
    invoke: Invoke,
}

impl Constructor {
    pub fn new<F>(parameters: Vec<Type>, invoke: F) -> Self
    where
        F: Fn(&[Object]) -> Result<Object> + Send + Sync + 'static,
    {
        Self {
            parameters: Arc::from(parameters),
            annotated: false,
            invoke: Arc::new(invoke),
        }
    }

    /// Marks this constructor as the one to prefer when selecting by annotation
    pub fn annotated(mut self) -> Self {
        self.annotated = true;
        self
    }

    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn invoke(&self, args: &[Object]) -> Result<Object> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({})", self.parameters.iter().join(", "))
    }
}

/// A declared factory method producing values of its return type
#[derive(Clone)]
pub struct Method {
    name: String,
    returns: Type,
    parameters: Arc<[Type]>,
    invoke: Invoke,
}

impl Method {
    pub fn new<S, F>(name: S, returns: Type, parameters: Vec<Type>, invoke: F) -> Self
    where
        S: Into<String>,
        F: Fn(&[Object]) -> Result<Object> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            returns,
            parameters: Arc::from(parameters),
            invoke: Arc::new(invoke),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns(&self) -> &Type {
        &self.returns
    }

    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }

    pub fn invoke(&self, args: &[Object]) -> Result<Object> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.returns,
            self.name,
            self.parameters.iter().join(", ")
        )
    }
}
