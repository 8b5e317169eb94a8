//! Constructor selection

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lang::{Class, Constructor};

/// Which declared constructor a constructor binding uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructorStrategy {
    /// The first constructor in declaration order
    FirstDeclared,
    /// The annotated constructor, otherwise the first declared one
    #[default]
    Annotated,
    /// The constructor taking the most parameters; earlier wins on ties
    LongestParameterList,
}

impl ConstructorStrategy {
    pub fn select(self, class: &Class) -> Result<Constructor> {
        if class.is_abstract() {
            return Err(Error::inconsistent(format!(
                "Cannot construct abstract class {class}"
            )));
        }
        let constructors = class.constructors();
        let selected = match self {
            Self::FirstDeclared => constructors.first(),
            Self::Annotated => constructors
                .iter()
                .find(|c| c.is_annotated())
                .or_else(|| constructors.first()),
            Self::LongestParameterList => constructors
                .iter()
                .rev()
                .max_by_key(|c| c.arity()),
        };
        selected
            .cloned()
            .ok_or_else(|| Error::inconsistent(format!("No constructor declared for {class}")))
    }
}
