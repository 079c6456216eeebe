//! # Intersection Detection
//!
//! Classifies where two sampled curves meet. The input is three aligned
//! sequences `xs`, `y1s`, `y2s`; a `NaN` in either value sequence marks an
//! undefined sample, which never contributes to a result.
//!
//! The scan is a single left-to-right pass driven by a two-state machine:
//!
//! - **Scanning**: look at sample `i`. If the curves are within tolerance, a
//!   run starts and the machine moves to *InRun*. Otherwise, if the
//!   difference changes sign between `i` and `i + 1`, a crossing point is
//!   reported at the midpoint of the two samples.
//! - **InRun**: extend the run while samples stay defined and within
//!   tolerance. A run of [`MIN_INTERVAL_SAMPLES`] or more samples is
//!   reported as an interval and the scan resumes after it; a shorter run
//!   reports its first sample as a point and the scan resumes at the next
//!   sample.
//!
//! Only indices `0 .. len - 1` start a step, so the final sample can extend
//! a run but is never examined on its own.
//!
//! ## Heuristics
//!
//! Two behaviours are deliberately coarse and kept as they are:
//!
//! - The interval threshold of three samples is a fixed constant, not
//!   derived from the sample spacing or the tolerance.
//! - A crossing point is the plain midpoint `((x[i] + x[i+1]) / 2,
//!   (y1[i] + y2[i]) / 2)`, not the root of the linear interpolant. Its
//!   error is bounded by the sample spacing.
//!
//! ## Example
//!
//! ```rust
//! use curvecross::intersection::{DEFAULT_TOLERANCE, find_intersections};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let y1 = [0.0, 1.0, 2.0, 3.0];
//! let y2 = [3.0, 2.0, 1.0, 0.0];
//!
//! let found = find_intersections(&xs, &y1, &y2, DEFAULT_TOLERANCE);
//! assert_eq!(found.points.len(), 1);
//! assert_eq!(found.points[0].x, 1.5);
//! assert!(found.intervals.is_empty());
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

/// Largest absolute difference still treated as equal.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Runs with at least this many samples are reported as intervals.
pub const MIN_INTERVAL_SAMPLES: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub x: f64,
    pub y: f64,
}

impl IntersectionPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(&self, precision: u32) -> Self {
        Self::new(round_to(self.x, precision), round_to(self.y, precision))
    }
}

/// A maximal run of in-tolerance samples, by its first and last sample.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionInterval {
    pub start: IntersectionPoint,
    pub end: IntersectionPoint,
}

impl IntersectionInterval {
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            start: self.start.rounded(precision),
            end: self.end.rounded(precision),
        }
    }
}

/// Points and intervals, each in the order the scan met them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intersections {
    pub points: Vec<IntersectionPoint>,
    pub intervals: Vec<IntersectionInterval>,
}

impl Intersections {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.intervals.is_empty()
    }

    /// Rounds every coordinate to `precision` decimal places.
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rounded(precision)).collect(),
            intervals: self
                .intervals
                .iter()
                .map(|i| i.rounded(precision))
                .collect(),
        }
    }
}

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() { rounded } else { value }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ScanState {
    Scanning,
    InRun { start: usize },
}

struct Curves<'a> {
    xs: &'a [f64],
    y1s: &'a [f64],
    y2s: &'a [f64],
    tolerance: f64,
}

impl Curves<'_> {
    fn len(&self) -> usize {
        self.xs.len().min(self.y1s.len()).min(self.y2s.len())
    }

    fn is_defined(&self, i: usize) -> bool {
        !self.y1s[i].is_nan() && !self.y2s[i].is_nan()
    }

    fn difference(&self, i: usize) -> f64 {
        self.y1s[i] - self.y2s[i]
    }

    fn is_equal(&self, i: usize) -> bool {
        self.is_defined(i) && self.difference(i).abs() <= self.tolerance
    }

    fn changes_sign(&self, i: usize) -> bool {
        self.is_defined(i + 1) && self.difference(i) * self.difference(i + 1) < 0.0
    }

    fn on_first(&self, i: usize) -> IntersectionPoint {
        IntersectionPoint::new(self.xs[i], self.y1s[i])
    }

    fn midpoint(&self, i: usize) -> IntersectionPoint {
        IntersectionPoint::new(
            (self.xs[i] + self.xs[i + 1]) / 2.0,
            (self.y1s[i] + self.y2s[i]) / 2.0,
        )
    }
}

/// Finds point and interval intersections of two sampled curves.
///
/// Sequences of different lengths are scanned up to the shortest one.
/// The function is pure: calling it twice on the same input yields the
/// same output.
pub fn find_intersections(xs: &[f64], y1s: &[f64], y2s: &[f64], tolerance: f64) -> Intersections {
    let curves = Curves {
        xs,
        y1s,
        y2s,
        tolerance,
    };
    let len = curves.len();
    let mut found = Intersections::default();
    let mut state = ScanState::Scanning;
    let mut i = 0;

    loop {
        match state {
            ScanState::Scanning => {
                if i + 1 >= len {
                    break;
                }
                if !curves.is_defined(i) {
                    i += 1;
                } else if curves.is_equal(i) {
                    state = ScanState::InRun { start: i };
                    i += 1;
                } else {
                    if curves.changes_sign(i) {
                        debug!("sign change between samples {} and {}", i, i + 1);
                        found.points.push(curves.midpoint(i));
                    }
                    i += 1;
                }
            }
            ScanState::InRun { start } => {
                if i < len && curves.is_equal(i) {
                    i += 1;
                    continue;
                }

                let run = i - start;
                if run >= MIN_INTERVAL_SAMPLES {
                    debug!("interval over samples {}..{}", start, i - 1);
                    found.intervals.push(IntersectionInterval {
                        start: curves.on_first(start),
                        end: curves.on_first(i - 1),
                    });
                } else {
                    debug!("touch point at sample {} (run of {})", start, run);
                    found.points.push(curves.on_first(start));
                    i = start + 1;
                }
                state = ScanState::Scanning;
            }
        }
    }

    found
}
