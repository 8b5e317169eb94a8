//! Injection targets and binding locators

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use super::dependency::Dependency;
use super::instance::Instance;
use crate::lang::Type;

/// The context a binding is restricted to
///
/// `instance` is the instance injected into, `parents` further instances
/// that must occur (in order) higher up the injection path. An `indirect`
/// target may only be reached through an interface.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub instance: Instance,
    pub parents: Arc<[Instance]>,
    pub indirect: bool,
}

impl Target {
    /// Available everywhere
    pub fn any() -> Self {
        Self::targeting(Instance::any())
    }

    /// Only available when injected into `instance`
    pub fn targeting(instance: Instance) -> Self {
        Self {
            instance,
            parents: Arc::from(Vec::new()),
            indirect: false,
        }
    }

    /// Additionally requires `parent` further up the path
    pub fn within(&self, parent: Instance) -> Self {
        let mut parents = self.parents.to_vec();
        parents.push(parent);
        Self {
            parents: Arc::from(parents),
            ..self.clone()
        }
    }

    /// Marks the target as reachable through interfaces only
    pub fn indirect(&self, indirect: bool) -> Self {
        Self {
            indirect,
            ..self.clone()
        }
    }

    pub fn is_any(&self) -> bool {
        self.instance.is_any() && self.parents.is_empty()
    }

    pub fn is_available_for(&self, dependency: &Dependency) -> bool {
        self.is_accessible_for(dependency) && self.are_parents_matching(dependency)
    }

    fn is_accessible_for(&self, dependency: &Dependency) -> bool {
        self.instance.is_any() || self.instance.is_compatible_with(&dependency.target(0))
    }

    fn are_parents_matching(&self, dependency: &Dependency) -> bool {
        if self.parents.is_empty() {
            return true;
        }
        let mut remaining = self.parents.iter().peekable();
        for level in 1..dependency.injection_depth() {
            let Some(parent) = remaining.peek() else {
                return true;
            };
            if parent.is_compatible_with(&dependency.target(level)) {
                remaining.next();
            }
        }
        remaining.peek().is_none()
    }

    /// A specific target instance beats `*`, then more parents win
    pub fn more_qualified_than(&self, other: &Target) -> bool {
        match (self.instance.is_any(), other.instance.is_any()) {
            (false, true) => return true,
            (true, false) => return false,
            _ => {}
        }
        if self.instance.more_qualified_than(&other.instance) {
            return true;
        }
        if other.instance.more_qualified_than(&self.instance) {
            return false;
        }
        self.parents.len() > other.parents.len()
    }

    /// Lower is more qualified
    pub fn qualification_rank(&self) -> (bool, (usize, usize), usize) {
        (
            self.instance.is_any(),
            self.instance.qualification_rank(),
            usize::MAX - self.parents.len(),
        )
    }
}

impl PartialOrd for Target {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Target {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instance
            .cmp(&other.instance)
            .then_with(|| self.parents.iter().cmp(other.parents.iter()))
            .then(self.indirect.cmp(&other.indirect))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instance)?;
        if !self.parents.is_empty() {
            write!(f, " within {}", self.parents.iter().join(" within "))?;
        }
        if self.indirect {
            f.write_str(" (indirect)")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({self})")
    }
}

/// The full key of a binding: what is bound, and where it is available
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub instance: Instance,
    pub target: Target,
}

impl Locator {
    pub fn new(instance: Instance, target: Target) -> Self {
        Self { instance, target }
    }

    /// Bound for every target
    pub fn untargeted(instance: Instance) -> Self {
        Self::new(instance, Target::any())
    }

    pub fn ty(&self) -> &Type {
        &self.instance.ty
    }

    /// Same target, different bound type
    pub fn typed(&self, ty: Type) -> Self {
        Self::new(self.instance.typed(ty), self.target.clone())
    }

    /// Only available through interfaces
    pub fn indirect(&self) -> Self {
        Self::new(self.instance.clone(), self.target.indirect(true))
    }

    /// Structural equality
    pub fn equal_to(&self, other: &Locator) -> bool {
        self == other
    }

    /// Instances decide first, targets break ties
    pub fn more_qualified_than(&self, other: &Locator) -> bool {
        if self.instance.more_qualified_than(&other.instance) {
            return true;
        }
        if other.instance.more_qualified_than(&self.instance) {
            return false;
        }
        self.target.more_qualified_than(&other.target)
    }

    /// Can a binding with this locator serve `dependency`?
    pub fn is_matching(&self, dependency: &Dependency) -> bool {
        self.target.is_available_for(dependency)
            && dependency.instance().is_compatible_with(&self.instance)
    }
}

impl PartialOrd for Locator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instance
            .cmp(&other.instance)
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instance)?;
        if !self.target.is_any() || self.target.indirect {
            write!(f, " @ {}", self.target)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({self})")
    }
}

impl From<Instance> for Locator {
    fn from(instance: Instance) -> Self {
        Self::untargeted(instance)
    }
}
