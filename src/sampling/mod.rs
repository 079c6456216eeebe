//! # Sampling and Solving
//!
//! Turns two function texts into sampled curves and their intersections.
//!
//! A solve runs in order: check settings, validate both texts, build the
//! grid, look for the first domain restriction, sample both curves, apply
//! the [`DomainPolicy`], search for intersections and round them to the
//! display precision.
//!
//! ```rust
//! use curvecross::sampling::{DomainPolicy, SolveSettings, solve};
//!
//! let settings = SolveSettings { points: 100, ..SolveSettings::default() };
//! let solution = solve("x", "x^2", &settings, DomainPolicy::RestrictToValid).unwrap();
//!
//! assert_eq!(solution.intersections.points.len(), 2);
//! assert!(solution.restriction.is_none());
//! ```

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equation::{FunctionExpression, Restriction, ValidationError};
use crate::intersection::{DEFAULT_TOLERANCE, Intersections, find_intersections};

/// Largest accepted display precision, in decimal places.
pub const MAX_PRECISION: u32 = 15;

/// How undefined samples are treated once a domain restriction is found.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Keep the full grid; undefined values become `NaN` placeholders.
    Unrestricted,
    /// Drop every sample where either curve is undefined.
    #[default]
    RestrictToValid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveSettings {
    pub start: f64,
    pub end: f64,
    pub points: usize,
    pub precision: u32,
    pub tolerance: f64,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            start: -10.0,
            end: 10.0,
            points: 1000,
            precision: 2,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("Domain bounds must be finite, got [{start}, {end}]")]
    NonFiniteBounds { start: f64, end: f64 },

    #[error("Domain start ({start}) must be less than domain end ({end})")]
    EmptyDomain { start: f64, end: f64 },

    #[error("At least 2 points are required, got {0}")]
    TooFewPoints(usize),

    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Precision must be at most {MAX_PRECISION} decimal places, got {0}")]
    PrecisionTooLarge(u32),
}

impl SolveSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Self {
            start,
            end,
            points,
            precision,
            tolerance,
        } = *self;

        if !start.is_finite() || !end.is_finite() {
            return Err(SettingsError::NonFiniteBounds { start, end });
        }
        if start >= end {
            return Err(SettingsError::EmptyDomain { start, end });
        }
        if points < 2 {
            return Err(SettingsError::TooFewPoints(points));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(SettingsError::InvalidTolerance(tolerance));
        }
        if precision > MAX_PRECISION {
            return Err(SettingsError::PrecisionTooLarge(precision));
        }
        Ok(())
    }

    /// The sample grid these settings describe.
    pub fn grid(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("Please enter both functions")]
    MissingFunction,

    #[error("Function {index}: {source}")]
    InvalidFunction {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
///
/// The last value is exactly `end`. `n == 1` yields `[start]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Values of both curves at one grid position; `None` is undefined.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub first: Option<f64>,
    pub second: Option<f64>,
}

impl Sample {
    pub fn is_defined(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }
}

pub fn sample(first: &FunctionExpression, second: &FunctionExpression, xs: &[f64]) -> Vec<Sample> {
    xs.iter()
        .map(|&x| Sample {
            x,
            first: first.sample(x),
            second: second.sample(x),
        })
        .collect()
}

/// The first grid position where either function is domain restricted.
///
/// The first function is checked before the second at each position.
pub fn first_restriction(
    first: &FunctionExpression,
    second: &FunctionExpression,
    xs: &[f64],
) -> Option<(f64, Restriction)> {
    xs.iter().find_map(|&x| {
        first
            .domain_check(x)
            .or_else(|| second.domain_check(x))
            .map(|restriction| (x, restriction))
    })
}

/// Aligned sample sequences after a domain policy has been applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curves {
    pub xs: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

impl Curves {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

pub fn apply_policy(samples: &[Sample], policy: DomainPolicy) -> Curves {
    let (xs, first, second): (Vec<f64>, Vec<f64>, Vec<f64>) = match policy {
        DomainPolicy::RestrictToValid => samples
            .iter()
            .filter_map(|s| Some((s.x, s.first?, s.second?)))
            .multiunzip(),
        DomainPolicy::Unrestricted => samples
            .iter()
            .map(|s| {
                (
                    s.x,
                    s.first.unwrap_or(f64::NAN),
                    s.second.unwrap_or(f64::NAN),
                )
            })
            .multiunzip(),
    };
    Curves { xs, first, second }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub xs: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    /// The first restriction met on the grid, with its position.
    pub restriction: Option<(f64, Restriction)>,
    /// The policy actually applied to the samples.
    pub policy: DomainPolicy,
    /// Intersections rounded to the display precision.
    pub intersections: Intersections,
}

fn parse_function(index: usize, text: &str) -> Result<FunctionExpression, SolveError> {
    let function = FunctionExpression::new(text)
        .map_err(|source| SolveError::InvalidFunction { index, source })?;
    if !function.is_well_formed() {
        warn!(
            "Function {} ('{}') does not parse; all of its samples are undefined",
            index, text
        );
    }
    Ok(function)
}

/// Samples both functions over the settings grid and finds where they meet.
///
/// `policy` only takes effect when a domain restriction is found somewhere
/// on the grid. Without one, samples that fail to evaluate (such as `1/x`
/// at zero) are dropped.
pub fn solve(
    first: &str,
    second: &str,
    settings: &SolveSettings,
    policy: DomainPolicy,
) -> Result<Solution, SolveError> {
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return Err(SolveError::MissingFunction);
    }

    settings.validate()?;
    let f1 = parse_function(1, first)?;
    let f2 = parse_function(2, second)?;

    let grid = settings.grid();
    let restriction = first_restriction(&f1, &f2, &grid);
    let policy = match restriction {
        Some((x, restriction)) => {
            warn!("{} (first met at x = {})", restriction.describe(), x);
            policy
        }
        None => DomainPolicy::RestrictToValid,
    };

    let samples = sample(&f1, &f2, &grid);
    let defined = samples.iter().filter(|s| s.is_defined()).count();
    let curves = apply_policy(&samples, policy);
    debug!(
        "{} of {} samples defined, {} kept under {:?}",
        defined,
        grid.len(),
        curves.len(),
        policy
    );

    let found = find_intersections(&curves.xs, &curves.first, &curves.second, settings.tolerance);
    info!(
        "'{}' and '{}': {} point(s), {} interval(s)",
        f1,
        f2,
        found.points.len(),
        found.intervals.len()
    );

    Ok(Solution {
        xs: curves.xs,
        first: curves.first,
        second: curves.second,
        restriction,
        policy,
        intersections: found.rounded(settings.precision),
    })
}
