// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Least-squares cubic fitting of an ordered point sequence.
//!
//! This is the smoothing step of the outline pipeline: the adaptive
//! sampler produces offset polylines that are dense where the outline
//! bends, and fitting them with as few cubic segments as the error
//! tolerance allows is what turns them into smooth strokes. The algorithm
//! is the classic Schneider curve fit: chord-length parameterization, a
//! least-squares solve for the two handle lengths, Newton–Raphson
//! reparameterization when the first attempt is close, and recursive
//! splitting at the worst point otherwise.

use alloc::vec::Vec;

use crate::{CubicBez, ParamCurve, ParamCurveDeriv, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Fit a sequence of cubic Bézier segments through `points`.
///
/// The returned segments are continuous, start at the first point and end
/// at the last, and deviate from the input points by no more than roughly
/// `error` (the bound is per fitted parameter, as usual for this
/// algorithm, not a Hausdorff distance).
///
/// Consecutive duplicate points are ignored. Fewer than two distinct
/// points yield no segments.
pub fn fit_points(points: &[Point], error: f64) -> Vec<CubicBez> {
    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if distinct.last() != Some(&p) {
            distinct.push(p);
        }
    }
    let mut result = Vec::new();
    if distinct.len() < 2 {
        return result;
    }
    let n = distinct.len();
    let tan1 = (distinct[1] - distinct[0]).normalize();
    let tan2 = (distinct[n - 2] - distinct[n - 1]).normalize();
    fit_cubic(&distinct, 0, n - 1, tan1, tan2, error, &mut result);
    result
}

/// Fit one run of points, splitting recursively on failure.
fn fit_cubic(
    points: &[Point],
    first: usize,
    last: usize,
    tan1: Vec2,
    tan2: Vec2,
    error: f64,
    result: &mut Vec<CubicBez>,
) {
    // Two points: handles at a third of the chord, no error to measure.
    if last - first == 1 {
        let p0 = points[first];
        let p3 = points[last];
        let dist = p0.distance(p3) / 3.0;
        result.push(CubicBez::new(p0, p0 + tan1 * dist, p3 + tan2 * dist, p3));
        return;
    }

    let mut u = chord_length_parameterize(points, first, last);
    let mut bez = generate_bezier(points, first, last, &u, tan1, tan2);
    let (mut max_error, mut split) = compute_max_error(points, first, last, &bez, &u);
    if max_error < error {
        result.push(bez);
        return;
    }

    // If the first attempt is not wildly off, a few rounds of
    // reparameterization often pull it under the tolerance.
    if max_error < 4.0 * error {
        const MAX_ITERATIONS: usize = 4;
        for _ in 0..MAX_ITERATIONS {
            reparameterize(points, first, last, &mut u, &bez);
            bez = generate_bezier(points, first, last, &u, tan1, tan2);
            let (e, s) = compute_max_error(points, first, last, &bez, &u);
            max_error = e;
            split = s;
            if max_error < error {
                result.push(bez);
                return;
            }
        }
    }

    // Split at the worst point and fit both halves.
    let split = split.clamp(first + 1, last - 1);
    let tan_center = center_tangent(points, split);
    fit_cubic(points, first, split, tan1, tan_center, error, result);
    fit_cubic(points, split, last, -tan_center, tan2, error, result);
}

/// The tangent to use at an interior split point, pointing backwards along
/// the sequence.
fn center_tangent(points: &[Point], split: usize) -> Vec2 {
    let d = points[split - 1] - points[split + 1];
    if d.hypot2() > 0.0 {
        return d.normalize();
    }
    // The neighbors coincide (a spike); use the incoming direction turned
    // 90 degrees, which at least keeps the handles out of the spike.
    let d = points[split - 1] - points[split];
    d.turn_90().normalize()
}

/// Assign a parameter in [0, 1] to each point, proportional to chord
/// length.
fn chord_length_parameterize(points: &[Point], first: usize, last: usize) -> Vec<f64> {
    let mut u = Vec::with_capacity(last - first + 1);
    u.push(0.0);
    for i in first + 1..=last {
        let prev = *u.last().unwrap();
        u.push(prev + points[i].distance(points[i - 1]));
    }
    let total = *u.last().unwrap();
    for v in &mut u {
        *v /= total;
    }
    u
}

/// Least-squares solve for the two handle lengths given fixed endpoints
/// and tangent directions.
fn generate_bezier(
    points: &[Point],
    first: usize,
    last: usize,
    u: &[f64],
    tan1: Vec2,
    tan2: Vec2,
) -> CubicBez {
    let p0 = points[first];
    let p3 = points[last];
    let mut c00 = 0.0;
    let mut c01 = 0.0;
    let mut c11 = 0.0;
    let mut x0 = 0.0;
    let mut x1 = 0.0;
    for (i, &t) in u.iter().enumerate() {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * t * mt * mt;
        let b2 = 3.0 * t * t * mt;
        let b3 = t * t * t;
        let a1 = tan1 * b1;
        let a2 = tan2 * b2;
        let tmp = points[first + i] - (p0.to_vec2() * (b0 + b1) + p3.to_vec2() * (b2 + b3)).to_point();
        c00 += a1.dot(a1);
        c01 += a1.dot(a2);
        c11 += a2.dot(a2);
        x0 += a1.dot(tmp);
        x1 += a2.dot(tmp);
    }
    let det_c0_c1 = c00 * c11 - c01 * c01;
    let (mut alpha1, mut alpha2) = if det_c0_c1.abs() > 1e-12 {
        (
            (x0 * c11 - x1 * c01) / det_c0_c1,
            (c00 * x1 - c01 * x0) / det_c0_c1,
        )
    } else {
        (0.0, 0.0)
    };

    // Degenerate or unusable alphas: fall back to the Wu/Barsky heuristic
    // of a third of the chord length.
    let seg_length = p0.distance(p3);
    let epsilon = 1e-6 * seg_length;
    if alpha1 < epsilon || alpha2 < epsilon {
        alpha1 = seg_length / 3.0;
        alpha2 = alpha1;
    }
    CubicBez::new(p0, p0 + tan1 * alpha1, p3 + tan2 * alpha2, p3)
}

/// Improve each interior parameter with one Newton–Raphson step towards
/// the nearest point on the curve.
fn reparameterize(points: &[Point], first: usize, last: usize, u: &mut [f64], bez: &CubicBez) {
    let deriv = bez.deriv();
    for (i, v) in u.iter_mut().enumerate().take(last - first).skip(1) {
        let point = points[first + i];
        let d = bez.eval(*v) - point;
        let d1 = deriv.eval(*v).to_vec2();
        let d2 = deriv.deriv_at(*v);
        let numerator = d.dot(d1);
        let denominator = d1.hypot2() + d.dot(d2);
        if denominator.abs() > 1e-12 {
            *v = (*v - numerator / denominator).clamp(0.0, 1.0);
        }
    }
}

/// The worst distance between an interior point and the curve at its
/// parameter, and where it occurs.
fn compute_max_error(
    points: &[Point],
    first: usize,
    last: usize,
    bez: &CubicBez,
    u: &[f64],
) -> (f64, usize) {
    let mut max_dist = 0.0;
    let mut split = (last - first + 1) / 2 + first;
    for i in first + 1..last {
        let dist = bez.eval(u[i - first]).distance(points[i]);
        if dist >= max_dist {
            max_dist = dist;
            split = i;
        }
    }
    (max_dist, split)
}
