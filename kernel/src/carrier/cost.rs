//! Path cost with a distinguished infinity.
//!
//! Costs are integers: positions are integral and the only edge weight is
//! Manhattan distance, so no float ever enters the run state. Unreached
//! nodes carry [`Cost::INFINITE`].

/// An integer path cost, or +infinity.
///
/// Arithmetic saturates at infinity: `INFINITE + x == INFINITE`, which keeps
/// `f == g + h` true for unreached nodes (`g = inf, h = 0, f = inf`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(i64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// +infinity. Sorts after every finite cost.
    pub const INFINITE: Cost = Cost(i64::MAX);

    /// A finite cost. `i64::MAX` is reserved for [`Cost::INFINITE`].
    #[must_use]
    pub const fn finite(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn is_infinite(self) -> bool {
        self.0 == i64::MAX
    }

    /// The finite value, or `None` for infinity.
    #[must_use]
    pub const fn value(self) -> Option<i64> {
        if self.is_infinite() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Addition that saturates at infinity.
    #[must_use]
    pub const fn saturating_add(self, other: Cost) -> Cost {
        if self.is_infinite() || other.is_infinite() {
            return Self::INFINITE;
        }
        match self.0.checked_add(other.0) {
            Some(v) => Cost(v),
            None => Self::INFINITE,
        }
    }

    /// JSON projection: integer, or `null` for infinity.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        match self.value() {
            Some(v) => serde_json::Value::from(v),
            None => serde_json::Value::Null,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::INFINITE
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("inf"),
        }
    }
}
