//! Visual identity of strategies and facets.
//!
//! Colour and marker depend only on the strategy, so a strategy looks the
//! same in every chart. The line pattern depends only on the fixed value,
//! so charts of the same facet can be told apart when laid side by side.

use plotters::element::{Drawable, PointCollection};
use plotters::style::{RGBColor, ShapeStyle};
use plotters_backend::{BackendCoord, DrawingBackend, DrawingErrorKind};

use crate::data::Strategy;

/// Stroke width of series lines in pixels
pub const LINE_WIDTH: u32 = 2;

/// Marker radius in pixels
pub const MARKER_RADIUS: i32 = 3;

/// Opacity of series lines and markers
pub const SERIES_ALPHA: f64 = 0.95;

/// Point marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
}

impl Marker {
    /// Polygon approximating the marker around `center`, in pixel coordinates
    pub fn outline(self, center: (i32, i32), radius: i32) -> Vec<(i32, i32)> {
        let (cx, cy) = center;
        let r = radius as f64;
        let at = |dx: f64, dy: f64| (cx + dx.round() as i32, cy + dy.round() as i32);

        match self {
            Marker::Circle => (0..16)
                .map(|i| {
                    let angle = i as f64 * std::f64::consts::PI / 8.0;
                    at(r * angle.cos(), r * angle.sin())
                })
                .collect(),
            Marker::Square => {
                let h = r * 0.9;
                vec![at(-h, -h), at(h, -h), at(h, h), at(-h, h)]
            }
            // Pixel y grows downwards, so the apex has negative dy
            Marker::TriangleUp => {
                let w = r * 3f64.sqrt() / 2.0;
                vec![at(0.0, -r), at(w, r / 2.0), at(-w, r / 2.0)]
            }
        }
    }
}

/// Colour and marker of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyStyle {
    pub color: RGBColor,
    pub marker: Marker,
}

impl StrategyStyle {
    pub fn of(strategy: Strategy) -> Self {
        match strategy {
            Strategy::TwoCopy => Self {
                color: RGBColor(0x1f, 0x77, 0xb4),
                marker: Marker::Circle,
            },
            Strategy::OneCopy => Self {
                color: RGBColor(0x2c, 0xa0, 0x2c),
                marker: Marker::Square,
            },
            Strategy::ZeroCopy => Self {
                color: RGBColor(0xd6, 0x27, 0x28),
                marker: Marker::TriangleUp,
            },
        }
    }
}

/// Stroke pattern of a series line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LinePattern {
    const BY_POSITION: [LinePattern; 4] = [
        LinePattern::Solid,
        LinePattern::Dashed,
        LinePattern::DashDot,
        LinePattern::Dotted,
    ];

    /// Pattern for the fixed value at `position` in its canonical set
    pub fn at(position: usize) -> Self {
        Self::BY_POSITION[position % Self::BY_POSITION.len()]
    }

    /// Alternating on/off run lengths in pixels; empty means a continuous line
    pub fn dashes(self) -> &'static [u32] {
        match self {
            LinePattern::Solid => &[],
            LinePattern::Dashed => &[8, 4],
            LinePattern::DashDot => &[12, 4, 2, 4],
            LinePattern::Dotted => &[2, 4],
        }
    }
}

/// Split a pixel polyline into the visible runs of a dash pattern.
///
/// The pattern restarts at the first point and carries over vertices, so
/// dashes bend around corners instead of restarting at each segment.
pub fn dash_polyline(points: &[(i32, i32)], dashes: &[u32]) -> Vec<Vec<(i32, i32)>> {
    if points.len() < 2 {
        return Vec::new();
    }
    if dashes.is_empty() {
        return vec![points.to_vec()];
    }

    let run = |i: usize| f64::from(dashes[i % dashes.len()].max(1));
    let to_pixel = |(x, y): (f64, f64)| (x.round() as i32, y.round() as i32);

    let mut runs = Vec::new();
    let mut current: Vec<(i32, i32)> = vec![points[0]];
    let mut index = 0;
    let mut remaining = run(index);

    for pair in points.windows(2) {
        let (x0, y0) = (f64::from(pair[0].0), f64::from(pair[0].1));
        let (x1, y1) = (f64::from(pair[1].0), f64::from(pair[1].1));
        let length = (x1 - x0).hypot(y1 - y0);
        let mut travelled = 0.0;

        while length - travelled > remaining {
            travelled += remaining;
            let t = travelled / length;
            let point = to_pixel((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));

            if index % 2 == 0 {
                current.push(point);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![point];
            }

            index += 1;
            remaining = run(index);
        }

        remaining -= length - travelled;
        if index % 2 == 0 {
            current.push(pair[1]);
        }
    }

    if index % 2 == 0 {
        runs.push(current);
    }

    runs.retain(|r| r.len() >= 2);
    runs
}

/// A polyline in pixel coordinates stroked with a dash pattern
#[derive(Debug, Clone)]
pub struct DashedLine {
    runs: Vec<Vec<BackendCoord>>,
    style: ShapeStyle,
}

impl DashedLine {
    pub fn new(points: &[BackendCoord], dashes: &[u32], style: ShapeStyle) -> Self {
        Self {
            runs: dash_polyline(points, dashes),
            style,
        }
    }

    pub fn runs(&self) -> &[Vec<BackendCoord>] {
        &self.runs
    }
}

impl<'a> PointCollection<'a, BackendCoord> for &'a DashedLine {
    type Point = &'a BackendCoord;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Vec<BackendCoord>>>;

    fn point_iter(self) -> Self::IntoIter {
        self.runs.iter().flatten()
    }
}

impl<DB: DrawingBackend> Drawable<DB> for DashedLine {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut points: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        // Points arrive flattened (and possibly offset); regroup them by run
        for run in &self.runs {
            let mapped: Vec<BackendCoord> = points.by_ref().take(run.len()).collect();
            backend.draw_path(mapped, &self.style)?;
        }
        Ok(())
    }
}
