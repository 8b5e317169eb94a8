//! Scope permanence
//!
//! Every scope has a permanence describing how long its instances live and
//! into which other scopes they may be injected. A shorter living instance
//! injected into a longer living one would silently outlive its scope,
//! which the dependency path refuses.

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use super::name::Name;
use crate::constants::{SCOPE_CONTAINER, SCOPE_REFERENCE};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScopePermanence {
    scope: Name,
    permanent: bool,
    eager: bool,
    ignore: bool,
    nestings: Arc<[Name]>,
}

impl ScopePermanence {
    fn template(permanent: bool, ignore: bool) -> Self {
        Self {
            scope: Name::any(),
            permanent,
            eager: false,
            ignore,
            nestings: Arc::from(Vec::new()),
        }
    }

    /// Instances live as long as the container
    pub fn singleton() -> Self {
        Self::template(true, false)
    }

    /// Instances may change between resolutions
    pub fn unstable() -> Self {
        Self::template(false, false)
    }

    /// Disables stability checks entirely
    pub fn ignore() -> Self {
        Self::template(true, true)
    }

    /// The container scope: permanent and created eagerly
    pub fn container() -> Self {
        Self::singleton().derive(Name::named(SCOPE_CONTAINER)).eager()
    }

    /// Pass-through scope of reference bindings
    pub fn reference() -> Self {
        Self::ignore().derive(Name::named(SCOPE_REFERENCE))
    }

    /// This permanence for another scope
    pub fn derive(&self, scope: Name) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    /// Instances of this scope are created when the container is built
    pub fn eager(&self) -> Self {
        Self {
            eager: true,
            ..self.clone()
        }
    }

    /// Allows instances of this scope inside instances of `scope`
    pub fn can_be_injected_into(&self, scope: Name) -> Self {
        if self.nestings.contains(&scope) {
            return self.clone();
        }
        let mut nestings = self.nestings.to_vec();
        nestings.push(scope);
        Self {
            nestings: Arc::from(nestings),
            ..self.clone()
        }
    }

    pub fn scope(&self) -> &Name {
        &self.scope
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    pub fn is_eager(&self) -> bool {
        self.eager
    }

    pub fn is_ignore(&self) -> bool {
        self.ignore
    }

    pub fn nestings(&self) -> &[Name] {
        &self.nestings
    }

    /// Same scope and flags but stability checks disabled
    pub fn ignored(&self) -> Self {
        Self {
            ignore: true,
            ..self.clone()
        }
    }

    /// May an instance of this permanence be injected into one of `other`?
    pub fn is_consistent_in(&self, other: &ScopePermanence) -> bool {
        self.ignore
            || other.ignore
            || self.permanent
            || self.nestings.contains(&other.scope)
    }
}

impl fmt::Display for ScopePermanence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope)?;
        if self.ignore {
            f.write_str(" (ignore)")
        } else if self.permanent {
            f.write_str(" (permanent)")
        } else if self.nestings.is_empty() {
            Ok(())
        } else {
            write!(f, " (nests in {})", self.nestings.iter().join(", "))
        }
    }
}

impl fmt::Debug for ScopePermanence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopePermanence({self})")
    }
}
