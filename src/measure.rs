// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc-length parameterized path queries.

use alloc::vec::Vec;

use crate::{CubicBez, Error, ParamCurve, ParamCurveArclen, PenPath, Point, Vec2};

/// Arc-length queries against a base path.
///
/// This is the capability the adaptive sampler consumes. It is a trait so
/// the sampler does not care which path-math backend answers the queries;
/// [`MeasuredPath`] is the built-in implementation, and tests can supply a
/// fake.
pub trait PathMetrics {
    /// Total arc length of the path.
    fn length(&self) -> f64;

    /// The point at `length` along the path.
    ///
    /// Lengths outside `[0, length()]` are clamped.
    fn point_at(&self, length: f64) -> Point;

    /// The unit tangent at `length` along the path, or the zero vector
    /// where the path is degenerate there.
    fn tangent_at(&self, length: f64) -> Vec2;

    /// The unit normal at `length` along the path.
    ///
    /// By default this is the tangent turned 90 degrees, which for the
    /// zero tangent is again the zero vector.
    fn normal_at(&self, length: f64) -> Vec2 {
        self.tangent_at(length).turn_90()
    }
}

/// A pen path measured for arc-length queries.
///
/// Construction walks the path once, computing each cubic segment's arc
/// length to the requested accuracy; queries then locate the segment by
/// prefix sum and invert arc length within it.
#[derive(Clone, Debug)]
pub struct MeasuredPath {
    segments: Vec<CubicBez>,
    /// `prefix[i]` is the arc length before segment `i`; the last entry is
    /// the total.
    prefix: Vec<f64>,
    accuracy: f64,
}

impl MeasuredPath {
    /// Measure a pen path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientPathData`] when the path has fewer
    /// than two commands, no cubic segment, or zero total arc length; such
    /// a path cannot be arc-length parameterized.
    pub fn new(path: &PenPath, accuracy: f64) -> Result<MeasuredPath, Error> {
        if path.len() < 2 {
            return Err(Error::InsufficientPathData);
        }
        let segments: Vec<CubicBez> = path.segments().collect();
        let mut prefix = Vec::with_capacity(segments.len() + 1);
        let mut total = 0.0;
        prefix.push(0.0);
        for seg in &segments {
            total += seg.arclen(accuracy);
            prefix.push(total);
        }
        if segments.is_empty() || total <= 0.0 {
            return Err(Error::InsufficientPathData);
        }
        Ok(MeasuredPath {
            segments,
            prefix,
            accuracy,
        })
    }

    /// Locate the segment containing `length` and the parameter within it.
    fn locate(&self, length: f64) -> (usize, f64) {
        let total = *self.prefix.last().unwrap();
        let length = length.clamp(0.0, total);
        // Number of segments is small; a linear scan beats bookkeeping.
        let mut i = 0;
        while i + 1 < self.segments.len() && self.prefix[i + 1] < length {
            i += 1;
        }
        let seg_len = self.prefix[i + 1] - self.prefix[i];
        if seg_len <= 0.0 {
            return (i, 0.0);
        }
        let t = self.segments[i].inv_arclen(length - self.prefix[i], self.accuracy);
        (i, t)
    }

    /// Unit tangent of a segment, probing just inside the parameter range
    /// when the derivative vanishes at the query point (coincident control
    /// points at an endpoint).
    fn unit_tangent(seg: &CubicBez, t: f64) -> Vec2 {
        let d = seg.tangent(t);
        if d.hypot2() > 0.0 {
            return d.normalize();
        }
        for probe in [t + 1e-4, t - 1e-4] {
            if (0.0..=1.0).contains(&probe) {
                let d = seg.tangent(probe);
                if d.hypot2() > 0.0 {
                    return d.normalize();
                }
            }
        }
        Vec2::ZERO
    }
}

impl PathMetrics for MeasuredPath {
    #[inline]
    fn length(&self) -> f64 {
        *self.prefix.last().unwrap()
    }

    fn point_at(&self, length: f64) -> Point {
        let (i, t) = self.locate(length);
        self.segments[i].eval(t)
    }

    fn tangent_at(&self, length: f64) -> Vec2 {
        let (i, t) = self.locate(length);
        Self::unit_tangent(&self.segments[i], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(len: f64) -> PenPath {
        let third = len / 3.0;
        let mut path = PenPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((third, 0.0), (2.0 * third, 0.0), (len, 0.0));
        path
    }

    #[test]
    fn straight_path_metrics() {
        let m = MeasuredPath::new(&straight(200.0), 1e-6).unwrap();
        assert!((m.length() - 200.0).abs() < 1e-6);
        let mid = m.point_at(100.0);
        assert!((mid - Point::new(100.0, 0.0)).hypot() < 1e-4);
        assert!((m.tangent_at(100.0) - Vec2::new(1.0, 0.0)).hypot() < 1e-9);
        assert!((m.normal_at(100.0) - Vec2::new(0.0, 1.0)).hypot() < 1e-9);
    }

    #[test]
    fn queries_clamp_to_ends() {
        let m = MeasuredPath::new(&straight(100.0), 1e-6).unwrap();
        assert!((m.point_at(-5.0) - Point::new(0.0, 0.0)).hypot() < 1e-9);
        assert!((m.point_at(1000.0) - Point::new(100.0, 0.0)).hypot() < 1e-4);
    }

    #[test]
    fn multi_segment_prefix() {
        let mut path = PenPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((100.0 / 3.0, 0.0), (200.0 / 3.0, 0.0), (100.0, 0.0));
        path.curve_to((100.0, 100.0 / 3.0), (100.0, 200.0 / 3.0), (100.0, 100.0));
        let m = MeasuredPath::new(&path, 1e-6).unwrap();
        assert!((m.length() - 200.0).abs() < 1e-6);
        // A point in the second segment.
        let p = m.point_at(150.0);
        assert!((p - Point::new(100.0, 50.0)).hypot() < 1e-4);
        assert!((m.tangent_at(150.0) - Vec2::new(0.0, 1.0)).hypot() < 1e-9);
    }

    #[test]
    fn tangent_probe_at_degenerate_start() {
        // cp1 coincides with the start point, so the derivative vanishes
        // at t = 0; the probe should still find the direction of travel.
        let mut path = PenPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 0.0), (50.0, 0.0), (100.0, 0.0));
        let m = MeasuredPath::new(&path, 1e-6).unwrap();
        let tan = m.tangent_at(0.0);
        assert!((tan - Vec2::new(1.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn too_little_data_is_an_error() {
        let empty = PenPath::new();
        assert!(matches!(
            MeasuredPath::new(&empty, 1e-6),
            Err(Error::InsufficientPathData)
        ));

        let mut only_move = PenPath::new();
        only_move.move_to((0.0, 0.0));
        assert!(matches!(
            MeasuredPath::new(&only_move, 1e-6),
            Err(Error::InsufficientPathData)
        ));

        let mut two_moves = PenPath::new();
        two_moves.move_to((0.0, 0.0));
        two_moves.move_to((10.0, 10.0));
        assert!(matches!(
            MeasuredPath::new(&two_moves, 1e-6),
            Err(Error::InsufficientPathData)
        ));

        // Two commands but zero extent.
        let mut degenerate = PenPath::new();
        degenerate.move_to((5.0, 5.0));
        degenerate.curve_to((5.0, 5.0), (5.0, 5.0), (5.0, 5.0));
        assert!(matches!(
            MeasuredPath::new(&degenerate, 1e-6),
            Err(Error::InsufficientPathData)
        ));
    }
}
