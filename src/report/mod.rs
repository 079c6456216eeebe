//! Tabular rendering of intersections.
//!
//! One row per result: points first, then intervals, each in scan order.
//! Points show `-` in the end column.

use std::fmt;

use serde::Serialize;

use crate::intersection::{IntersectionPoint, Intersections};

pub const HEADERS: [&str; 3] = ["Type", "Start (x, y)", "End (x, y)"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum RowKind {
    Point,
    Interval,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Point => write!(f, "Point"),
            RowKind::Interval => write!(f, "Interval"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub kind: RowKind,
    pub start: String,
    pub end: String,
}

/// Formats a point as `(x, y)` with `precision` decimal places.
pub fn format_point(point: &IntersectionPoint, precision: u32) -> String {
    let precision = precision as usize;
    format!("({:.*}, {:.*})", precision, point.x, precision, point.y)
}

pub fn rows(intersections: &Intersections, precision: u32) -> Vec<Row> {
    let points = intersections.points.iter().map(|p| Row {
        kind: RowKind::Point,
        start: format_point(p, precision),
        end: "-".to_string(),
    });
    let intervals = intersections.intervals.iter().map(|i| Row {
        kind: RowKind::Interval,
        start: format_point(&i.start, precision),
        end: format_point(&i.end, precision),
    });
    points.chain(intervals).collect()
}

/// Renders the rows as a left-aligned plain text table.
pub fn render(intersections: &Intersections, precision: u32) -> String {
    let rows = rows(intersections, precision);
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| [row.kind.to_string(), row.start.clone(), row.end.clone()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:<w1$}  {}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
    };

    let mut out = line(HEADERS);
    out.push('\n');
    for row in &cells {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
        out.push('\n');
    }
    out
}
