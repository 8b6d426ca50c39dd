//! Spatial lookup operators.

use serde::Serialize;

/// A spatial predicate expressed as a two-argument SQL function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpatialOperator {
    pub func: &'static str,
}

impl SpatialOperator {
    pub const fn new(func: &'static str) -> Self {
        Self { func }
    }

    /// Render the predicate as `func(lhs, rhs)`.
    pub fn render(&self, lhs: &str, rhs: &str) -> String {
        format!("{}({}, {})", self.func, lhs, rhs)
    }
}
