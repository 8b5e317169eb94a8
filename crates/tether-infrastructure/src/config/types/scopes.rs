//! Scope configuration types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Additional scope nestings
///
/// Maps a scope name to further scopes its instances may be injected into,
/// on top of the built-in nesting relation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopesConfig {
    pub nesting: BTreeMap<String, Vec<String>>,
}
