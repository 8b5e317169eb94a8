//! Argument hints for constructors and methods

use std::fmt;

use super::dependency::Dependency;
use super::instance::Instance;
use crate::error::{Error, Result};
use crate::lang::Type;
use crate::object::Object;

/// How a single formal parameter gets its argument
#[derive(Clone)]
pub enum Hint {
    /// A fixed value
    Constant { value: Object, as_type: Type },
    /// Resolved relative to the injection site's path
    Relative { reference: Instance, as_type: Type },
    /// Resolved exactly as the given dependency
    Absolute { dependency: Dependency, as_type: Type },
}

impl Hint {
    pub fn constant(value: Object, as_type: Type) -> Self {
        Self::Constant { value, as_type }
    }

    pub fn relative_reference_to(reference: Instance) -> Self {
        let as_type = reference.ty.clone();
        Self::Relative { reference, as_type }
    }

    /// The unnamed instance of `ty`
    pub fn relative_reference_to_type(ty: Type) -> Self {
        Self::relative_reference_to(Instance::default_instance_of(ty))
    }

    pub fn absolute_reference_to(dependency: Dependency) -> Self {
        let as_type = dependency.ty().clone();
        Self::Absolute {
            dependency,
            as_type,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Self::Constant { as_type, .. }
            | Self::Relative { as_type, .. }
            | Self::Absolute { as_type, .. } => as_type,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant { .. })
    }

    /// The instance this hint refers to, if it is a reference
    pub fn reference(&self) -> Option<&Instance> {
        match self {
            Self::Constant { .. } => None,
            Self::Relative { reference, .. } => Some(reference),
            Self::Absolute { dependency, .. } => Some(dependency.instance()),
        }
    }

    /// This hint viewed as one of its supertypes
    pub fn typed(&self, supertype: &Type) -> Result<Self> {
        let as_type = self.ty().to_supertype(supertype)?;
        Ok(match self.clone() {
            Self::Constant { value, .. } => Self::Constant { value, as_type },
            Self::Relative { reference, .. } => Self::Relative { reference, as_type },
            Self::Absolute { dependency, .. } => Self::Absolute {
                dependency,
                as_type,
            },
        })
    }

    /// Assigns `hints` to the parameters they are assignable to
    ///
    /// Each hint takes the first free parameter its type is assignable to.
    /// Parameters left without a hint refer to the unnamed instance of their
    /// type. A hint that fits no parameter makes the declaration inconsistent.
    pub fn match_types(types: &[Type], hints: &[Hint]) -> Result<Vec<Hint>> {
        let mut args: Vec<Option<Hint>> = vec![None; types.len()];
        for hint in hints {
            let index = types
                .iter()
                .zip(&args)
                .position(|(ty, arg)| arg.is_none() && hint.ty().is_assignable_to(ty))
                .ok_or_else(|| {
                    Error::inconsistent(format!("Hint {hint} matches none of the parameters"))
                })?;
            args[index] = Some(hint.clone());
        }
        Ok(args
            .into_iter()
            .zip(types)
            .map(|(arg, ty)| arg.unwrap_or_else(|| Hint::relative_reference_to_type(ty.clone())))
            .collect())
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { as_type, .. } => write!(f, "value as {as_type}"),
            Self::Relative { reference, as_type } => write!(f, "ref to {reference} as {as_type}"),
            Self::Absolute {
                dependency,
                as_type,
            } => write!(f, "ref to {dependency} as {as_type}"),
        }
    }
}

impl fmt::Debug for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hint({self})")
    }
}
