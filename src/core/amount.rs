//! Queue amounts: a positive repeat count or an unbounded sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Amount {
    Finite(u64),
    Unbounded,
}

impl Amount {
    /// The count as an upper bound for batching (None = no bound).
    pub fn limit(&self) -> Option<u64> {
        match self {
            Amount::Finite(n) => Some(*n),
            Amount::Unbounded => None,
        }
    }

    /// Decrements by `count`, saturating at zero. Unbounded amounts never change.
    pub fn decrement(self, count: u64) -> Self {
        match self {
            Amount::Finite(n) => Amount::Finite(n.saturating_sub(count)),
            Amount::Unbounded => Amount::Unbounded,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Amount::Finite(0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Finite(n) => write!(f, "{n}"),
            Amount::Unbounded => write!(f, "∞"),
        }
    }
}
