//! Generic types
//!
//! A [`Type`] is a declared [`Class`] together with its actual type
//! arguments, an upper-bound (`? extends`) flag and the number of array
//! dimensions. Types are immutable values compared structurally.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use itertools::Itertools;

use super::builtin;
use super::class::{Class, TypeVariable};
use crate::error::{Error, Result};

/// A generic, array-aware type
#[derive(Clone)]
pub struct Type {
    raw: Class,
    params: Arc<[Type]>,
    upper_bound: bool,
    dims: usize,
}

// Construction
impl Type {
    /// Wraps a class without type arguments; primitives become their wrapper
    pub fn raw(class: &Class) -> Self {
        Self {
            raw: class.boxed(),
            params: Arc::from(Vec::new()),
            upper_bound: false,
            dims: 0,
        }
    }

    /// The class parameterised with the wildcard bounds of its variables
    pub fn class_type(class: &Class) -> Self {
        let raw = class.boxed();
        let params = raw
            .type_variables()
            .iter()
            .map(|v| wildcard_of(&raw, v))
            .collect::<Vec<_>>();
        Self {
            raw,
            params: Arc::from(params),
            upper_bound: false,
            dims: 0,
        }
    }

    /// `?`, the upper bound of everything
    pub fn wildcard() -> Self {
        Self::object().as_upper_bound()
    }

    /// The root type
    pub fn object() -> Self {
        Self::raw(&builtin::OBJECT)
    }

    /// Builds a type without validating the arguments against the bounds
    pub(crate) fn unchecked(raw: Class, params: Vec<Type>) -> Self {
        Self {
            raw: raw.boxed(),
            params: Arc::from(params),
            upper_bound: false,
            dims: 0,
        }
    }

    /// This type with `params` as its actual type arguments
    ///
    /// An empty list yields the raw type. Otherwise the number of arguments
    /// must match the declared type variables and each argument must be
    /// assignable to its variable's bound.
    pub fn parametized(&self, params: Vec<Type>) -> Result<Self> {
        if !params.is_empty() {
            self.check_type_parameters(&params)?;
        }
        Ok(Self {
            raw: self.raw.clone(),
            params: Arc::from(params),
            upper_bound: self.upper_bound,
            dims: self.dims,
        })
    }

    /// Shorthand for `Type::raw(class).parametized(params)`
    pub fn of(class: &Class, params: Vec<Type>) -> Result<Self> {
        Self::raw(class).parametized(params)
    }

    fn check_type_parameters(&self, params: &[Type]) -> Result<()> {
        let variables = self.raw.type_variables();
        if variables.len() != params.len() {
            return Err(Error::invalid_type(format!(
                "Invalid number of type arguments - {} has type variables [{}] but got: [{}]",
                self.raw,
                variables.iter().map(|v| &v.name).join(", "),
                params.iter().join(", ")
            )));
        }
        for (variable, param) in variables.iter().zip(params) {
            if let Some(bound) = &variable.bound {
                let bound = bound.resolve(&self.raw, params);
                if !bound.raw.is_root() && !param.is_assignable_to(&bound) {
                    return Err(Error::invalid_type(format!(
                        "{param} is not assignable to the type variable: {} extends {bound}",
                        variable.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// `? extends` this type
    pub fn as_upper_bound(&self) -> Self {
        Self {
            upper_bound: true,
            ..self.clone()
        }
    }

    /// This type without the upper-bound flag
    pub fn as_exact_type(&self) -> Self {
        Self {
            upper_bound: false,
            ..self.clone()
        }
    }

    /// This type with one more array dimension (`T[]`)
    pub fn add_array_dimension(&self) -> Self {
        Self {
            dims: self.dims + 1,
            ..self.clone()
        }
    }

    /// This type without any array dimension
    pub fn base_type(&self) -> Self {
        Self {
            dims: 0,
            ..self.clone()
        }
    }

    /// The component type of an array type
    pub fn element_type(&self) -> Option<Self> {
        (self.dims > 0).then(|| Self {
            dims: self.dims - 1,
            ..self.clone()
        })
    }

    /// Replaces each exact type argument with its upper bound
    pub fn parametized_as_upper_bounds(&self) -> Self {
        if !self.is_parameterized() {
            if !self.is_raw_type() {
                return self.clone();
            }
            let params = self
                .raw
                .type_variables()
                .iter()
                .map(|v| wildcard_of(&self.raw, v))
                .collect::<Vec<_>>();
            return Self {
                params: Arc::from(params),
                ..self.clone()
            };
        }
        if self.is_parameterized_as_upper_bound() {
            return self.clone();
        }
        Self {
            params: self.params.iter().map(Self::as_upper_bound).collect(),
            ..self.clone()
        }
    }
}

// Inspection
impl Type {
    pub fn raw_class(&self) -> &Class {
        &self.raw
    }

    pub fn parameters(&self) -> &[Type] {
        &self.params
    }

    pub fn is_upper_bound(&self) -> bool {
        self.upper_bound
    }

    pub fn array_dimensions(&self) -> usize {
        self.dims
    }

    pub fn is_array(&self) -> bool {
        self.dims > 0
    }

    pub fn is_interface(&self) -> bool {
        self.dims == 0 && self.raw.is_interface()
    }

    pub fn is_abstract(&self) -> bool {
        self.dims == 0 && self.raw.is_abstract()
    }

    /// True when the class declares type variables
    pub fn has_type_parameter(&self) -> bool {
        self.raw.arity() > 0
    }

    /// True when actual type arguments are present
    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }

    /// A generic class used without its type arguments
    pub fn is_raw_type(&self) -> bool {
        self.has_type_parameter() && !self.is_parameterized()
    }

    /// True when every type argument is an upper bound
    pub fn is_parameterized_as_upper_bound(&self) -> bool {
        self.is_parameterized() && self.params.iter().all(|p| p.upper_bound)
    }

    /// True for the wildcard `?`
    pub fn is_wildcard(&self) -> bool {
        self.upper_bound && self.dims == 0 && self.raw.is_root()
    }

    /// The actual type argument at `index`; raw types answer the wildcard
    pub fn parameter(&self, index: usize) -> Result<Self> {
        if index >= self.raw.arity() {
            return Err(Error::invalid_type(format!(
                "{self} has no type parameter at index {index}"
            )));
        }
        Ok(self
            .params
            .get(index)
            .cloned()
            .unwrap_or_else(|| wildcard_of(&self.raw, &self.raw.type_variables()[index])))
    }

    /// Lower numbers are more specific; used for a total order of bindings
    pub fn qualification_rank(&self) -> usize {
        usize::from(self.upper_bound)
            + usize::from(self.is_raw_type())
            + self
                .params
                .iter()
                .map(Type::qualification_rank)
                .sum::<usize>()
    }
}

// Assignability
impl Type {
    fn is_raw_assignable_to(&self, other: &Type) -> bool {
        if other.dims == 0 && other.raw.is_root() {
            return true;
        }
        self.dims == other.dims && other.raw.is_assignable_from(&self.raw)
    }

    /// Covariant generic assignability of `self` to `other`
    pub fn is_assignable_to(&self, other: &Type) -> bool {
        if !self.is_raw_assignable_to(other) {
            return false;
        }
        if self.dims > 0 || other.dims > 0 {
            return other.dims == 0 || self.base_type().is_assignable_to(&other.base_type());
        }
        if !self.is_parameterized() || !other.is_parameterized() {
            return true;
        }
        if self.raw == other.raw {
            return self.all_parameters_are_assignable_to(other);
        }
        Type::supertype(&other.raw, self)
            .is_ok_and(|as_other| as_other.all_parameters_are_assignable_to(other))
    }

    /// Pairwise parameter assignability of two types with the same raw class
    pub fn all_parameters_are_assignable_to(&self, other: &Type) -> bool {
        self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(other.params.iter())
                .all(|(p, o)| p.as_parameter_assignable_to(o))
    }

    /// Assignability of `self` used as a type argument to the argument `other`
    ///
    /// Exact arguments must be equal, an upper-bound argument accepts any
    /// assignable argument.
    pub fn as_parameter_assignable_to(&self, other: &Type) -> bool {
        if self.raw == other.raw && self.dims == other.dims {
            return !self.is_parameterized()
                || !other.is_parameterized()
                || self.all_parameters_are_assignable_to(other);
        }
        other.upper_bound && self.is_assignable_to(&other.as_exact_type())
    }

    /// Strict partial order: is `self` more specific than `other`?
    pub fn more_qualified_than(&self, other: &Type) -> bool {
        if !other.is_raw_assignable_to(self) {
            return true;
        }
        if self.is_raw_type() || (self.upper_bound && !other.upper_bound) {
            return false;
        }
        if other.is_raw_type() || (!self.upper_bound && other.upper_bound) {
            return true;
        }
        if self.raw == other.raw {
            return self.more_qualified_parameters_than(other);
        }
        match Type::supertype(&self.raw, other) {
            Ok(as_self) => self.more_qualified_parameters_than(&as_self),
            Err(_) => false,
        }
    }

    fn more_qualified_parameters_than(&self, other: &Type) -> bool {
        if self.params.len() != other.params.len() || self.params.is_empty() {
            return false;
        }
        let more = self
            .params
            .iter()
            .zip(other.params.iter())
            .filter(|(p, o)| p.more_qualified_than(o))
            .count();
        more > self.params.len() - more
    }
}

// Supertypes
impl Type {
    /// All supertypes with actual type arguments substituted
    ///
    /// The root comes first for classes, then the interfaces of each class
    /// followed by its superclass, walking up the chain.
    pub fn supertypes(&self) -> Vec<Type> {
        if self.dims > 0 {
            return vec![Type::object()];
        }
        let mut result = Vec::new();
        if !self.raw.is_interface() && !self.raw.is_root() {
            result.push(Type::object());
        }
        collect_supertypes(&self.raw, &self.params, &mut result);
        result
    }

    /// `ty` viewed as its supertype of class `supertype`
    pub fn supertype(supertype: &Class, ty: &Type) -> Result<Type> {
        if supertype.arity() == 0 {
            return Ok(Type::raw(supertype));
        }
        if ty.raw == *supertype && ty.dims == 0 {
            return Ok(ty.clone());
        }
        ty.supertypes()
            .into_iter()
            .find(|s| s.raw == *supertype)
            .ok_or_else(|| Error::class_cast(ty, supertype))
    }

    /// Casts `self` to the given supertype
    pub fn to_supertype(&self, supertype: &Type) -> Result<Type> {
        if self.is_assignable_to(supertype) {
            Ok(supertype.clone())
        } else {
            Err(Error::class_cast(self, supertype))
        }
    }
}

fn wildcard_of(declaring: &Class, variable: &TypeVariable) -> Type {
    match &variable.bound {
        Some(bound) => bound.resolve(declaring, &[]).as_upper_bound(),
        None => Type::wildcard(),
    }
}

fn collect_supertypes(class: &Class, actual: &[Type], result: &mut Vec<Type>) {
    let push = |ty: Type, result: &mut Vec<Type>| {
        if !ty.raw.is_root() && !result.contains(&ty) {
            result.push(ty);
        }
    };
    for interface in class.interfaces() {
        let ty = interface.resolve(class, actual);
        push(ty.clone(), result);
        collect_supertypes(&ty.raw, &ty.params, result);
    }
    if let Some(superclass) = class.superclass() {
        let ty = superclass.resolve(class, actual);
        push(ty.clone(), result);
        collect_supertypes(&ty.raw, &ty.params, result);
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
            && self.upper_bound == other.upper_bound
            && self.dims == other.dims
            && self.params == other.params
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
        self.dims.hash(state);
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw
            .cmp(&other.raw)
            .then(self.upper_bound.cmp(&other.upper_bound))
            .then(self.dims.cmp(&other.dims))
            .then_with(|| self.params.iter().cmp(other.params.iter()))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return f.write_str("?");
        }
        if self.upper_bound {
            f.write_str("? extends ")?;
        }
        write!(f, "{}", self.raw)?;
        if self.is_parameterized() {
            write!(f, "<{}>", self.params.iter().join(","))?;
        }
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

impl From<&Class> for Type {
    fn from(class: &Class) -> Self {
        Type::raw(class)
    }
}
