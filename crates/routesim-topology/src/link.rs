//! Directed weighted links between routers.

use std::fmt;

/// Link cost. Integer, with no sign restriction enforced by the store.
pub type Weight = i64;

/// Largest magnitude a link weight may have.
///
/// Keeps the cost of any simple path far below `i64::MAX`, so route sums
/// cannot overflow.
pub const MAX_WEIGHT: Weight = 1_000_000_000;

/// A directed link `from -> to` carrying a weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    /// Originating router
    pub from: String,
    /// Receiving router
    pub to: String,
    /// Cost of traversing the link
    pub weight: Weight,
}

impl Link {
    /// Create a new link.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: Weight) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Whether this link connects the ordered pair `(from, to)`.
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    /// Whether either endpoint is `router`.
    pub fn touches(&self, router: &str) -> bool {
        self.from == router || self.to == router
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}
