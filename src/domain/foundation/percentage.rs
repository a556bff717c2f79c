//! Percentage value object for vote shares.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of a whole on a 0-100 scale.
///
/// Not rounded: callers that display it pick their own precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Share of `part` in `total`; zero when `total` is zero.
    pub fn of(part: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let value = part as f64 / total as f64 * 100.0;
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_yields_zero() {
        assert_eq!(Percentage::of(0, 0), Percentage::ZERO);
        assert_eq!(Percentage::of(5, 0), Percentage::ZERO);
    }

    #[test]
    fn full_share_is_hundred() {
        assert_eq!(Percentage::of(3, 3).value(), 100.0);
    }

    #[test]
    fn half_share_is_fifty() {
        assert_eq!(Percentage::of(1, 2).value(), 50.0);
    }

    #[test]
    fn thirds_sum_to_hundred_within_rounding() {
        let sum: f64 = [1, 1, 1].iter().map(|c| Percentage::of(*c, 3).value()).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn displays_one_decimal() {
        assert_eq!(Percentage::of(1, 3).to_string(), "33.3%");
    }

    #[test]
    fn serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Percentage::of(1, 4)).unwrap(), "25.0");
    }
}
