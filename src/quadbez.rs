// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use crate::{ParamCurve, Point, Vec2};

/// A single quadratic Bézier segment.
///
/// In this crate it mostly arises as the derivative of a [`CubicBez`],
/// which is why its points may be read as vectors.
///
/// [`CubicBez`]: crate::CubicBez
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadBez {
    /// The start point.
    pub p0: Point,
    /// The control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let d = self.p1 - self.p0;
        let dd = self.p2 - self.p1;
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        // Derivative at t0, scaled to the new parameter range.
        let dt = d.lerp(dd, t0) * (t1 - t0);
        let p1 = p0 + dt;
        QuadBez { p0, p1, p2 }
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }
}

impl QuadBez {
    /// The derivative vector at parameter `t`.
    ///
    /// Evaluated directly rather than through [`ParamCurveDeriv`], since
    /// the derivative of a quadratic is a line and nothing downstream needs
    /// it as a curve.
    ///
    /// [`ParamCurveDeriv`]: crate::ParamCurveDeriv
    #[inline]
    pub fn deriv_at(&self, t: f64) -> Vec2 {
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        2.0 * d0.lerp(d1, t)
    }
}
