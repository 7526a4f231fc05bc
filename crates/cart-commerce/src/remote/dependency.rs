//! Tags for the remote services the cart depends on.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The remote services consulted by the cart.
///
/// Each tag carries a default timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTag {
    /// Product metadata lookups.
    Catalog,
    /// Available-stock lookups.
    Stock,
}

impl ServiceTag {
    /// Get the default timeout for this service.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(3000),
            Self::Stock => Duration::from_millis(2000),
        }
    }

    /// Get the name of this service.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Stock => "stock",
        }
    }
}

impl std::fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
