//! Resolution requests
//!
//! A [`Dependency`] is what is asked for plus the path of injections that
//! led to the request. The path is never mutated: every step creates a new
//! dependency sharing nothing but the values it copies.

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use super::instance::Instance;
use super::name::Name;
use super::permanence::ScopePermanence;
use super::target::Locator;
use crate::constants::PATH_SEPARATOR;
use crate::error::{Error, Result};
use crate::lang::{Class, Type};

/// One step of an injection path
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Injection {
    /// The instance that was requested
    pub dependency: Instance,
    /// The binding that served the request
    pub target: Locator,
    /// Permanence of the binding's scope
    pub permanence: ScopePermanence,
}

impl Injection {
    pub fn new(dependency: Instance, target: Locator, permanence: ScopePermanence) -> Self {
        Self {
            dependency,
            target,
            permanence,
        }
    }

    /// Structural equality of instance and locator; permanence is ignored
    pub fn equal_to(&self, other: &Injection) -> bool {
        self.dependency == other.dependency && self.target == other.target
    }

    fn ignored_scoping(&self) -> Self {
        Self {
            permanence: self.permanence.ignored(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Injection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)
    }
}

impl fmt::Debug for Injection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Injection({} -> {} {})", self.dependency, self.target, self.permanence)
    }
}

/// A request for an instance together with its injection path
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    instance: Instance,
    hierarchy: Arc<[Injection]>,
}

impl Dependency {
    /// The unnamed instance of `ty`, untargeted
    pub fn of_type(ty: Type) -> Self {
        Self::of_instance(Instance::default_instance_of(ty))
    }

    /// The unnamed instance of `class`, untargeted
    pub fn of_class(class: &Class) -> Self {
        Self::of_type(Type::raw(class))
    }

    pub fn of_instance(instance: Instance) -> Self {
        Self {
            instance,
            hierarchy: Arc::from(Vec::new()),
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn ty(&self) -> &Type {
        &self.instance.ty
    }

    pub fn name(&self) -> &Name {
        &self.instance.name
    }

    /// Same path, different type
    pub fn typed(&self, ty: Type) -> Self {
        self.instanced(self.instance.typed(ty))
    }

    /// Same path, different name
    pub fn named<N: Into<Name>>(&self, name: N) -> Self {
        self.instanced(self.instance.with_name(name.into()))
    }

    /// Same path, different instance
    pub fn instanced(&self, instance: Instance) -> Self {
        Self {
            instance,
            hierarchy: Arc::clone(&self.hierarchy),
        }
    }

    /// Same instance, empty path
    pub fn untargeted(&self) -> Self {
        Self::of_instance(self.instance.clone())
    }

    /// Same instance and path with every stability check disabled
    pub fn ignored_scoping(&self) -> Self {
        if self.hierarchy.is_empty() {
            return self.clone();
        }
        Self {
            instance: self.instance.clone(),
            hierarchy: self.hierarchy.iter().map(Injection::ignored_scoping).collect(),
        }
    }

    /// Requests the first type argument instead
    pub fn on_type_parameter(&self) -> Result<Self> {
        Ok(self.typed(self.ty().parameter(0)?))
    }

    pub fn is_untargeted(&self) -> bool {
        self.hierarchy.is_empty()
    }

    /// The instance injected into `level` steps up; [`Instance::any`] beyond the path
    pub fn target(&self, level: usize) -> Instance {
        self.hierarchy
            .len()
            .checked_sub(level + 1)
            .and_then(|index| self.hierarchy.get(index))
            .map_or_else(Instance::any, |injection| injection.target.instance.clone())
    }

    pub fn injection_depth(&self) -> usize {
        self.hierarchy.len()
    }

    /// Path steps, outermost first
    pub fn iter(&self) -> std::slice::Iter<'_, Injection> {
        self.hierarchy.iter()
    }

    /// Extends the path by one step
    ///
    /// Fails with [`Error::DependencyCycle`] when the step already occurs on
    /// the path and with [`Error::UnstableDependency`] when `permanence` is
    /// not consistent in the permanence of every step on the path.
    pub fn injecting_into(&self, target: Locator, permanence: ScopePermanence) -> Result<Self> {
        let injection = Injection::new(self.instance.clone(), target, permanence);
        if !self.hierarchy.is_empty() {
            self.ensure_no_dependency_cycle(&injection)?;
            self.ensure_stable_scope_nesting(&injection)?;
        }
        let mut hierarchy = self.hierarchy.to_vec();
        hierarchy.push(injection);
        Ok(Self {
            instance: self.instance.clone(),
            hierarchy: Arc::from(hierarchy),
        })
    }

    /// Steps into `instance` without a binding and without stability checks
    pub fn injecting_into_instance(&self, instance: Instance) -> Result<Self> {
        self.injecting_into(Locator::untargeted(instance), ScopePermanence::ignore())
    }

    /// Drops the innermost step
    pub fn uninject(&self) -> Self {
        if self.hierarchy.len() <= 1 {
            return self.untargeted();
        }
        Self {
            instance: self.instance.clone(),
            hierarchy: Arc::from(&self.hierarchy[..self.hierarchy.len() - 1]),
        }
    }

    fn ensure_no_dependency_cycle(&self, injection: &Injection) -> Result<()> {
        if self.hierarchy.iter().any(|e| e.equal_to(injection)) {
            return Err(Error::DependencyCycle {
                path: format!("{self}{PATH_SEPARATOR}{}", injection.target),
            });
        }
        Ok(())
    }

    fn ensure_stable_scope_nesting(&self, injection: &Injection) -> Result<()> {
        match self
            .hierarchy
            .iter()
            .find(|e| !injection.permanence.is_consistent_in(&e.permanence))
        {
            Some(unstable) => Err(Error::UnstableDependency {
                injected: injection.target.to_string(),
                injected_scope: injection.permanence.scope().to_string(),
                parent: unstable.target.to_string(),
                parent_scope: unstable.permanence.scope().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Refuses to hand out an indirect-only binding to a caller that does
    /// not reach it through an interface
    pub fn ensure_no_illegal_direct_access_of(&self, locator: &Locator) -> Result<()> {
        if !locator.target.indirect {
            return Ok(());
        }
        let required = self.ty();
        if required.raw_class().is_interface() {
            return Ok(());
        }
        for level in 0..self.injection_depth() {
            let parent = self.target(level);
            if !required.is_assignable_to(&parent.ty) {
                break;
            }
            if parent.ty.raw_class().is_interface() {
                return Ok(());
            }
        }
        Err(Error::IllegalAccess {
            locator: locator.to_string(),
            dependency: self.to_string(),
        })
    }
}

impl<'a> IntoIterator for &'a Dependency {
    type Item = &'a Injection;
    type IntoIter = std::slice::Iter<'a, Injection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instance)?;
        if !self.hierarchy.is_empty() {
            write!(
                f,
                "{PATH_SEPARATOR}{}",
                self.hierarchy.iter().rev().join(PATH_SEPARATOR)
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency({self})")
    }
}

impl From<Type> for Dependency {
    fn from(ty: Type) -> Self {
        Self::of_type(ty)
    }
}

impl From<Instance> for Dependency {
    fn from(instance: Instance) -> Self {
        Self::of_instance(instance)
    }
}
