//! Named typed instances

use std::cmp::Ordering;
use std::fmt;

use super::name::Name;
use crate::lang::{Class, Type};

/// What is wanted or bound: a [`Type`] qualified by a [`Name`]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Instance {
    pub name: Name,
    pub ty: Type,
}

impl Instance {
    pub fn new(name: Name, ty: Type) -> Self {
        Self { name, ty }
    }

    /// Any name, any type
    pub fn any() -> Self {
        Self::new(Name::any(), Type::wildcard())
    }

    /// Any name of the given type
    pub fn any_of(ty: Type) -> Self {
        Self::new(Name::any(), ty)
    }

    /// The unnamed instance of the given type
    pub fn default_instance_of(ty: Type) -> Self {
        Self::new(Name::default_name(), ty)
    }

    /// The unnamed instance of a class
    pub fn of_class(class: &Class) -> Self {
        Self::default_instance_of(Type::raw(class))
    }

    pub fn named<N: Into<Name>>(name: N, ty: Type) -> Self {
        Self::new(name.into(), ty)
    }

    pub fn is_any(&self) -> bool {
        self.name.is_any() && self.ty.is_wildcard()
    }

    /// Same name, different type
    pub fn typed(&self, ty: Type) -> Self {
        Self::new(self.name.clone(), ty)
    }

    /// Same type, different name
    pub fn with_name(&self, name: Name) -> Self {
        Self::new(name, self.ty.clone())
    }

    /// Is `other` acceptable where `self` is asked for?
    pub fn is_compatible_with(&self, other: &Instance) -> bool {
        self.is_any()
            || (self.name.is_compatible_with(&other.name) && other.ty.is_assignable_to(&self.ty))
    }

    /// Type decides first; names only when the types are equal
    pub fn more_qualified_than(&self, other: &Instance) -> bool {
        if self.ty == other.ty {
            self.name.more_qualified_than(&other.name)
        } else {
            self.ty.more_qualified_than(&other.ty)
        }
    }

    /// Lower is more qualified
    pub fn qualification_rank(&self) -> (usize, usize) {
        (self.ty.qualification_rank(), self.name.qualification_rank())
    }
}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty.cmp(&other.ty).then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return f.write_str("*");
        }
        if self.name.is_default() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.name, self.ty)
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({self})")
    }
}

impl From<Type> for Instance {
    fn from(ty: Type) -> Self {
        Self::default_instance_of(ty)
    }
}
