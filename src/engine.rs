// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path-math capability consumed by the pressure pipeline.

use crate::{
    fit_points, Error, MeasuredPath, OutlineEl, OutlinePath, PathMetrics, PenPath, Point, Vec2,
};

/// The geometry services the sampler and outline assembler need from a
/// path-math backend.
///
/// The pipeline is written against this trait rather than any concrete
/// backend, so the geometry engine is an explicit, swappable capability
/// instead of ambient state. [`BezEngine`] is the built-in implementation.
pub trait PathEngine {
    /// The arc-length view this engine produces for a base path.
    type Measured: PathMetrics;

    /// Measure a pen path for arc-length queries.
    ///
    /// # Errors
    ///
    /// Implementations report [`Error::InsufficientPathData`] for paths
    /// they cannot measure.
    fn measure(&self, path: &PenPath) -> Result<Self::Measured, Error>;

    /// Fit a smooth curve through an ordered point sequence.
    ///
    /// The result must begin with a move to the first point (an empty
    /// input produces an empty outline).
    fn fit(&self, points: &[Point]) -> OutlinePath;

    /// An arc element connecting `from` to `to`, as used for stroke end
    /// caps.
    fn arc(&self, from: Point, to: Point) -> OutlineEl;
}

/// The built-in path-math engine, backed by this crate's own Bézier
/// machinery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezEngine {
    /// Accuracy of arc-length computation over the base path.
    pub arclen_accuracy: f64,
    /// Error tolerance of the outline curve fit.
    pub fit_error: f64,
}

impl Default for BezEngine {
    fn default() -> Self {
        BezEngine {
            arclen_accuracy: 1e-6,
            fit_error: 2.5,
        }
    }
}

impl BezEngine {
    /// Builder method for setting the arc-length accuracy.
    #[must_use]
    pub fn with_arclen_accuracy(mut self, accuracy: f64) -> Self {
        self.arclen_accuracy = accuracy;
        self
    }

    /// Builder method for setting the fit error tolerance.
    #[must_use]
    pub fn with_fit_error(mut self, error: f64) -> Self {
        self.fit_error = error;
        self
    }
}

impl PathEngine for BezEngine {
    type Measured = MeasuredPath;

    fn measure(&self, path: &PenPath) -> Result<MeasuredPath, Error> {
        MeasuredPath::new(path, self.arclen_accuracy)
    }

    fn fit(&self, points: &[Point]) -> OutlinePath {
        let mut path = OutlinePath::new();
        if let Some(&first) = points.first() {
            path.move_to(first);
            for seg in fit_points(points, self.fit_error) {
                path.curve_to(seg.p1, seg.p2, seg.p3);
            }
        }
        path
    }

    /// The cap arc: a semicircle bulging outwards, i.e. radii of half the
    /// endpoint distance, positive sweep, minor arc.
    fn arc(&self, from: Point, to: Point) -> OutlineEl {
        let radius = from.distance(to) * 0.5;
        OutlineEl::ArcTo {
            radii: Vec2::splat(radius),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_starts_with_move() {
        let engine = BezEngine::default();
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
        ];
        let path = engine.fit(&points);
        assert_eq!(path.elements().first(), Some(&OutlineEl::MoveTo(points[0])));
        assert!(path.elements().len() >= 2);

        assert!(engine.fit(&[]).elements().is_empty());
    }

    #[test]
    fn cap_arc_is_a_semicircle() {
        let engine = BezEngine::default();
        let el = engine.arc(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        let OutlineEl::ArcTo {
            radii,
            large_arc,
            sweep,
            to,
            ..
        } = el
        else {
            panic!("expected an arc");
        };
        assert_eq!(radii, Vec2::splat(5.0));
        assert!(!large_arc);
        assert!(sweep);
        assert_eq!(to, Point::new(0.0, 10.0));
    }

    #[test]
    fn measure_uses_configured_accuracy() {
        let mut pen = PenPath::new();
        pen.move_to((0.0, 0.0));
        pen.curve_to((100.0, 0.0), (200.0, 0.0), (300.0, 0.0));
        let engine = BezEngine::default().with_arclen_accuracy(1e-3);
        let measured = engine.measure(&pen).unwrap();
        assert!((measured.length() - 300.0).abs() < 1e-3);
    }
}
