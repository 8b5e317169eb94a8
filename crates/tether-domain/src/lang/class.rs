//! Declared classes
//!
//! Without runtime reflection every class that takes part in resolution is
//! declared once through a [`ClassBuilder`]. A declaration carries the
//! information assignability needs: kind, type variables, the generic
//! superclass and the generic interfaces. Declared constructors are what
//! constructor strategies choose from.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::executable::Constructor;
use super::types::Type;

/// What kind of class a declaration describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassKind {
    /// A concrete or abstract class
    Class,
    /// An interface (may only be implemented, never instantiated directly)
    Interface,
    /// A primitive that is normalised to its wrapper class
    Primitive,
}

/// A declared type variable such as `T` or `E extends Comparable<E>`
#[derive(Debug, Clone)]
pub struct TypeVariable {
    /// Name used in diagnostics
    pub name: String,
    /// Optional upper bound; may refer to the declaring class's variables
    pub bound: Option<TypeTemplate>,
}

/// Generic type expression inside a class declaration
#[derive(Debug, Clone)]
pub enum TypeTemplate {
    /// Reference to the declaring class's type variable at this index
    Var(usize),
    /// A class with (possibly templated) type arguments
    Of(Class, Vec<TypeTemplate>),
    /// `? extends` the inner template
    UpperBound(Box<TypeTemplate>),
    /// One array dimension added to the inner template
    Array(Box<TypeTemplate>),
    /// The declaring class parameterised by its own variables
    SelfType,
}

impl TypeTemplate {
    /// Raw use of a class
    pub fn of(class: &Class) -> Self {
        Self::Of(class.clone(), Vec::new())
    }

    /// A class with type arguments
    pub fn of_args(class: &Class, args: Vec<TypeTemplate>) -> Self {
        Self::Of(class.clone(), args)
    }

    /// Reference to a type variable of the declaring class
    pub fn var(index: usize) -> Self {
        Self::Var(index)
    }

    /// `? extends` this template
    pub fn upper_bound(self) -> Self {
        Self::UpperBound(Box::new(self))
    }

    /// This template with one more array dimension
    pub fn array(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Substitutes the actual type arguments of `declaring`
    ///
    /// Variables without an actual argument become the wildcard.
    pub fn resolve(&self, declaring: &Class, actual: &[Type]) -> Type {
        match self {
            Self::Var(index) => actual.get(*index).cloned().unwrap_or_else(Type::wildcard),
            Self::Of(class, args) => Type::unchecked(
                class.clone(),
                args.iter().map(|a| a.resolve(declaring, actual)).collect(),
            ),
            Self::UpperBound(inner) => inner.resolve(declaring, actual).as_upper_bound(),
            Self::Array(inner) => inner.resolve(declaring, actual).add_array_dimension(),
            Self::SelfType => Type::unchecked(declaring.clone(), actual.to_vec()),
        }
    }

    /// The class this template names, if it names one directly
    fn named_class<'a>(&'a self, declaring: &'a Class) -> Option<&'a Class> {
        match self {
            Self::Of(class, _) => Some(class),
            Self::SelfType => Some(declaring),
            Self::UpperBound(inner) => inner.named_class(declaring),
            Self::Var(_) | Self::Array(_) => None,
        }
    }
}

#[derive(Debug)]
struct ClassInfo {
    name: String,
    kind: ClassKind,
    root: bool,
    is_abstract: bool,
    type_variables: Vec<TypeVariable>,
    superclass: Option<TypeTemplate>,
    interfaces: Vec<TypeTemplate>,
    wrapper: Option<Class>,
    constructors: Vec<Constructor>,
}

/// A declared class; cheap to clone and compared by name
#[derive(Clone)]
pub struct Class(Arc<ClassInfo>);

impl Class {
    /// Start declaring a (concrete) class
    pub fn builder<S: Into<String>>(name: S) -> ClassBuilder {
        ClassBuilder::new(name.into(), ClassKind::Class)
    }

    /// Start declaring an interface
    pub fn interface<S: Into<String>>(name: S) -> ClassBuilder {
        ClassBuilder::new(name.into(), ClassKind::Interface)
    }

    /// Declare a primitive that normalises to `wrapper`
    pub fn primitive<S: Into<String>>(name: S, wrapper: &Class) -> Class {
        let mut builder = ClassBuilder::new(name.into(), ClassKind::Primitive);
        builder.info.wrapper = Some(wrapper.clone());
        builder.build()
    }

    /// Declare the root of the class hierarchy
    pub(crate) fn root<S: Into<String>>(name: S) -> Class {
        let mut builder = ClassBuilder::new(name.into(), ClassKind::Class);
        builder.info.root = true;
        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> ClassKind {
        self.0.kind
    }

    pub fn is_interface(&self) -> bool {
        self.0.kind == ClassKind::Interface
    }

    pub fn is_primitive(&self) -> bool {
        self.0.kind == ClassKind::Primitive
    }

    pub fn is_abstract(&self) -> bool {
        self.0.is_abstract || self.is_interface()
    }

    /// True for the root of the hierarchy (`Object`)
    pub fn is_root(&self) -> bool {
        self.0.root
    }

    /// The wrapper of a primitive, the class itself otherwise
    pub fn boxed(&self) -> Class {
        self.0.wrapper.clone().unwrap_or_else(|| self.clone())
    }

    pub fn type_variables(&self) -> &[TypeVariable] {
        &self.0.type_variables
    }

    /// Number of declared type variables
    pub fn arity(&self) -> usize {
        self.0.type_variables.len()
    }

    /// Declared generic superclass; `None` for interfaces, the root and
    /// classes that implicitly extend the root
    pub fn superclass(&self) -> Option<&TypeTemplate> {
        self.0.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[TypeTemplate] {
        &self.0.interfaces
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.0.constructors
    }

    /// Raw assignability: is a value of class `other` also a `self`?
    pub fn is_assignable_from(&self, other: &Class) -> bool {
        let other = other.boxed();
        if *self == other || self.is_root() {
            return true;
        }
        if let Some(superclass) = other.superclass()
            && let Some(class) = superclass.named_class(&other)
            && self.is_assignable_from(class)
        {
            return true;
        }
        other
            .interfaces()
            .iter()
            .filter_map(|i| i.named_class(&other))
            .any(|i| self.is_assignable_from(i))
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name && self.0.kind == other.0.kind)
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl PartialOrd for Class {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Class {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .name
            .cmp(&other.0.name)
            .then_with(|| self.0.kind.cmp(&other.0.kind))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.0.name)
    }
}

/// Builder for [`Class`] declarations
#[derive(Debug)]
pub struct ClassBuilder {
    info: ClassInfo,
}

impl ClassBuilder {
    fn new(name: String, kind: ClassKind) -> Self {
        Self {
            info: ClassInfo {
                name,
                kind,
                root: false,
                is_abstract: false,
                type_variables: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                wrapper: None,
                constructors: Vec::new(),
            },
        }
    }

    /// Declare an unbounded type variable
    pub fn type_variable<S: Into<String>>(mut self, name: S) -> Self {
        self.info.type_variables.push(TypeVariable {
            name: name.into(),
            bound: None,
        });
        self
    }

    /// Declare a type variable with an upper bound
    pub fn bounded_type_variable<S: Into<String>>(mut self, name: S, bound: TypeTemplate) -> Self {
        self.info.type_variables.push(TypeVariable {
            name: name.into(),
            bound: Some(bound),
        });
        self
    }

    pub fn extends(mut self, superclass: TypeTemplate) -> Self {
        self.info.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeTemplate) -> Self {
        self.info.interfaces.push(interface);
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.info.is_abstract = true;
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.info.constructors.push(constructor);
        self
    }

    pub fn build(self) -> Class {
        Class(Arc::new(self.info))
    }
}
