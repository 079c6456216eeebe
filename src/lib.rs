//! Finds where two user-supplied functions of `x` intersect.
//!
//! Function text goes through [`equation`] (validation, domain checks and
//! evaluation), is sampled over a grid by [`sampling`], and the samples are
//! classified into crossing points and overlap intervals by
//! [`intersection`]. [`report`] renders the result as a table.

pub mod equation;
pub mod intersection;
pub mod report;
pub mod sampling;

#[cfg(test)]
mod test_utils;

pub use crate::equation::{Expression, FunctionExpression, NumericConstant, Operator};
pub use crate::intersection::{
    IntersectionInterval, IntersectionPoint, Intersections, find_intersections,
};
pub use crate::sampling::{DomainPolicy, SettingsError, SolveError, SolveSettings, Solution, solve};
