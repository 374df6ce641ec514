//! Item identity.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;

/// Unique item name: the catalog key and the ledger's item reference.
///
/// Names are trimmed on construction and never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, IntegrityError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntegrityError::EmptyItemName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemName {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
