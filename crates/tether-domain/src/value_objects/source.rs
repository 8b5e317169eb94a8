//! Declaration provenance

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// How a binding was declared
///
/// Declaration types only decide which of several bindings for the same
/// locator survives disambiguation. Variants are ordered from weakest to
/// strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationType {
    /// Declared by the container itself
    Implicit,
    /// A default that any other declaration replaces
    Default,
    /// Derived automatically; two of them for the same locator cancel out
    Auto,
    /// Only kept when some module requires the type
    Provided,
    /// A type that must be bound by some other declaration
    Required,
    /// One of several bindings contributing to the same locator
    Multi,
    /// A regular binding; two of them for the same locator clash
    Explicit,
}

impl DeclarationType {
    /// Two bindings for the same locator with these types cannot coexist
    pub fn clashes_with(self, other: DeclarationType) -> bool {
        self as usize + other as usize > DeclarationType::Multi as usize * 2
    }

    /// Two bindings for the same locator with these types are both dropped
    pub fn dropped_with(self, other: DeclarationType) -> bool {
        self == DeclarationType::Auto && other == DeclarationType::Auto
    }

    /// A binding of this type is discarded when one of type `other` exists
    /// for the same locator
    pub fn replaced_by(self, other: DeclarationType) -> bool {
        self < other || (self == other && self != DeclarationType::Multi)
    }
}

impl fmt::Display for DeclarationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Implicit => "implicit",
            Self::Default => "default",
            Self::Auto => "auto",
            Self::Provided => "provided",
            Self::Required => "required",
            Self::Multi => "multi",
            Self::Explicit => "explicit",
        };
        f.write_str(name)
    }
}

/// Where a binding was declared: the module, how, and in which order
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub ident: Arc<str>,
    pub declaration_type: DeclarationType,
    pub declaration_no: usize,
}

impl Source {
    pub fn new<S: AsRef<str>>(ident: S, declaration_type: DeclarationType) -> Self {
        Self {
            ident: Arc::from(ident.as_ref()),
            declaration_type,
            declaration_no: 0,
        }
    }

    /// The source of a module type
    pub fn of<M: ?Sized>(declaration_type: DeclarationType) -> Self {
        Self::new(std::any::type_name::<M>(), declaration_type)
    }

    pub fn typed(&self, declaration_type: DeclarationType) -> Self {
        Self {
            declaration_type,
            ..self.clone()
        }
    }

    /// The same source for the `declaration_no`-th declaration
    pub fn numbered(&self, declaration_no: usize) -> Self {
        Self {
            declaration_no,
            ..self.clone()
        }
    }

    /// Stronger declarations are more qualified
    pub fn more_qualified_than(&self, other: &Source) -> bool {
        self.declaration_type > other.declaration_type
    }
}

impl PartialOrd for Source {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Source {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ident
            .cmp(&other.ident)
            .then(self.declaration_no.cmp(&other.declaration_no))
            .then(self.declaration_type.cmp(&other.declaration_type))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} [{}]",
            self.ident, self.declaration_no, self.declaration_type
        )
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source({self})")
    }
}
