//! Qualifier names

use std::fmt;
use std::sync::Arc;

/// A qualifier for instances and scopes
///
/// Besides plain names there is the wildcard [`Name::any`], the empty
/// [`Name::default_name`], patterns containing `*` (`disk:*`) and namespaced
/// names (`namespace:value`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Wildcard character used in patterns
    pub const WILDCARD: char = '*';

    /// Separator between namespace and value
    pub const NAMESPACE_SEPARATOR: char = ':';

    /// The name compatible with every other name
    pub fn any() -> Self {
        Self(Arc::from("*"))
    }

    /// The name of unnamed instances
    pub fn default_name() -> Self {
        Self(Arc::from(""))
    }

    pub fn named<S: AsRef<str>>(name: S) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// A name within a namespace: `namespace:value`
    pub fn in_namespace(namespace: &str, value: &str) -> Self {
        Self::named(format!("{namespace}{}{value}", Self::NAMESPACE_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        &*self.0 == "*"
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// True for names containing a wildcard, except [`Name::any`] itself
    pub fn is_pattern(&self) -> bool {
        !self.is_any() && self.0.contains(Self::WILDCARD)
    }

    /// The part before the first `:`, if any
    pub fn namespace(&self) -> Option<&str> {
        self.0
            .split_once(Self::NAMESPACE_SEPARATOR)
            .map(|(namespace, _)| namespace)
    }

    /// The part after the first `:`, or the whole name
    pub fn value(&self) -> &str {
        self.0
            .split_once(Self::NAMESPACE_SEPARATOR)
            .map_or(&*self.0, |(_, value)| value)
    }

    /// Can an instance named `self` serve a request for `other` (or vice versa)?
    pub fn is_compatible_with(&self, other: &Name) -> bool {
        self.is_any()
            || other.is_any()
            || self == other
            || (self.is_pattern() && glob_matches(&self.0, &other.0))
            || (other.is_pattern() && glob_matches(&other.0, &self.0))
    }

    /// Concrete names beat patterns, patterns beat [`Name::any`], and a
    /// longer pattern beats a shorter one.
    pub fn more_qualified_than(&self, other: &Name) -> bool {
        if self.is_any() {
            return false;
        }
        if other.is_any() {
            return true;
        }
        match (self.is_pattern(), other.is_pattern()) {
            (false, true) => true,
            (true, true) => self.0.len() > other.0.len(),
            _ => false,
        }
    }

    /// Lower is more qualified; consistent with [`Name::more_qualified_than`]
    pub fn qualification_rank(&self) -> usize {
        if self.is_any() {
            2
        } else {
            usize::from(self.is_pattern())
        }
    }
}

/// Matches `value` against a pattern where `*` stands for any sequence
fn glob_matches(pattern: &str, value: &str) -> bool {
    let mut parts = pattern.split(Name::WILDCARD);
    let Some(first) = parts.next() else {
        return value.is_empty();
    };
    let Some(mut rest) = value.strip_prefix(first) else {
        return false;
    };
    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        return rest.is_empty();
    };
    for part in middle {
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

impl Default for Name {
    fn default() -> Self {
        Self::default_name()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}
