// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width profiles: stroke width as a function of position along a path.

use smallvec::SmallVec;

use crate::Error;

/// One control point of a [`WidthProfile`].
///
/// `position` is a normalized length fraction along the path, nominally in
/// [0, 1]; `factor` is the stroke-width multiplier there, nominally in
/// [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfilePoint {
    /// Normalized position along the path.
    pub position: f64,
    /// Stroke-width multiplier at `position`.
    pub factor: f64,
}

/// A piecewise-linear pressure profile over a sparse control-point set.
///
/// The profile maps a normalized position along a path to a stroke-width
/// factor, modeling pen pressure. Control points are conventionally sorted
/// ascending by position; this is not enforced (see [`width_at`] for the
/// exact lookup rule), but [`is_sorted`] is available as a validity check.
///
/// A profile is immutable once constructed.
///
/// [`width_at`]: WidthProfile::width_at
/// [`is_sorted`]: WidthProfile::is_sorted
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthProfile {
    points: SmallVec<[ProfilePoint; 8]>,
}

impl WidthProfile {
    /// Create a profile from `(position, factor)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWidthProfile`] when given no points at all;
    /// a profile with nothing in it cannot describe a width.
    pub fn new<I>(points: I) -> Result<WidthProfile, Error>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: SmallVec<[ProfilePoint; 8]> = points
            .into_iter()
            .map(|(position, factor)| ProfilePoint { position, factor })
            .collect();
        if points.is_empty() {
            return Err(Error::InvalidWidthProfile);
        }
        Ok(WidthProfile { points })
    }

    /// The control points, in construction order.
    #[inline]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Whether the control points are sorted ascending by position with no
    /// duplicates.
    ///
    /// Lookup is well defined either way, but only sorted profiles produce
    /// the natural piecewise-linear interpolation.
    pub fn is_sorted(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].position < w[1].position)
    }

    /// The width factor at normalized position `t`.
    ///
    /// Scans the control-point segments and evaluates the line equation of
    /// the last scanned segment whose upper position bound is at least `t`;
    /// the scan runs from the last segment to the first, so on a sorted
    /// profile this is ordinary piecewise-linear interpolation (with the
    /// first segment extrapolated for `t` below the first knot). On an
    /// unsorted or duplicate-position profile the same rule applies
    /// literally, which may extrapolate a surprising segment; that behavior
    /// is kept for compatibility with profiles produced by older tools.
    ///
    /// Returns `None` when no segment matches: `t` beyond the last knot,
    /// or a single-point profile (which has no segments). Callers treat
    /// `None` as zero width.
    ///
    /// `t` is not clamped.
    pub fn width_at(&self, t: f64) -> Option<f64> {
        let pts = &self.points;
        let mut width = None;
        for i in (1..pts.len()).rev() {
            let (p0, p1) = (pts[i - 1], pts[i]);
            if t <= p1.position {
                let m = (p1.factor - p0.factor) / (p1.position - p0.position);
                let b = p1.factor - m * p1.position;
                width = Some(t * m + b);
            }
        }
        width
    }
}
