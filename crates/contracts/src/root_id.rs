//! Markup root identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identity of a carousel markup root, e.g. `rotator`.
///
/// Cloned into the registry's root set, snapshots and log fields. Hashes like
/// the plain string so root sets and maps can be queried with `&str`.
///
/// ```
/// use contracts::RootId;
///
/// let id: RootId = "rotator".into();
/// assert_eq!(id, "rotator");
/// assert_eq!(id.as_str(), "rotator");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootId(Arc<str>);

impl RootId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RootId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for RootId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for RootId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for RootId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
