//! Class labeling of engagement ratings.
//!
//! A rating maps to a discrete engagement class through an ordered table of
//! interval rules. Ratings outside every interval are left unlabeled by
//! policy, never treated as an error.

use serde::{Deserialize, Serialize};

/// One class interval rule.
///
/// The upper bound is always inclusive; the lower bound is inclusive or
/// exclusive per rule, so adjacent intervals can share a boundary value
/// without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassRule {
    pub lower: f64,
    pub lower_inclusive: bool,
    pub upper: f64,
    pub label: u8,
}

impl ClassRule {
    /// Check whether `rating` falls inside this rule's interval.
    pub fn contains(&self, rating: f64) -> bool {
        let above_lower = if self.lower_inclusive {
            rating >= self.lower
        } else {
            rating > self.lower
        };
        above_lower && rating <= self.upper
    }
}

/// Default engagement class mapping: `[-2, 1]` is class 0, `(1, 2]` is
/// class 1. Anything outside `[-2, 2]` is unlabeled.
pub const DEFAULT_RULES: &[ClassRule] = &[
    ClassRule {
        lower: -2.0,
        lower_inclusive: true,
        upper: 1.0,
        label: 0,
    },
    ClassRule {
        lower: 1.0,
        lower_inclusive: false,
        upper: 2.0,
        label: 1,
    },
];

/// Ordered table of class rules. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTable {
    rules: Vec<ClassRule>,
}

impl ClassTable {
    /// Build a table from an explicit rule list.
    pub fn new(rules: Vec<ClassRule>) -> Self {
        Self { rules }
    }

    /// Map a rating to its class, or `None` if no interval contains it.
    pub fn label(&self, rating: f64) -> Option<u8> {
        self.rules
            .iter()
            .find(|rule| rule.contains(rating))
            .map(|rule| rule.label)
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[ClassRule] {
        &self.rules
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

/// Map a rating to its class using the default table.
pub fn label(rating: f64) -> Option<u8> {
    DEFAULT_RULES
        .iter()
        .find(|rule| rule.contains(rating))
        .map(|rule| rule.label)
}
