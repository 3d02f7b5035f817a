//! Product catalog categories
//!
//! The set is closed: the database enforces the same four values with a
//! CHECK constraint, so adding a variant means a schema change too.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed category label attached to every product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Furniture,
    Electronic,
    Food,
    Fashion,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown catalog '{0}'")]
pub struct ParseCatalogError(pub String);

impl Catalog {
    pub const ALL: [Catalog; 4] = [
        Catalog::Furniture,
        Catalog::Electronic,
        Catalog::Food,
        Catalog::Fashion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Catalog::Furniture => "furniture",
            Catalog::Electronic => "electronic",
            Catalog::Food => "food",
            Catalog::Fashion => "fashion",
        }
    }
}

impl FromStr for Catalog {
    type Err = ParseCatalogError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "furniture" => Ok(Catalog::Furniture),
            "electronic" => Ok(Catalog::Electronic),
            "food" => Ok(Catalog::Food),
            "fashion" => Ok(Catalog::Fashion),
            _ => Err(ParseCatalogError(s.to_string())),
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
