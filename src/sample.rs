// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curvature-adaptive sampling of a path under a width profile.

use alloc::vec;
use alloc::vec::Vec;

use crate::{PathMetrics, Point, Vec2, WidthProfile};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// One evaluated point along the base path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Arc-length-normalized fraction in [0, 1] of the total path length.
    pub position: f64,
    /// The point on the base path at that length.
    pub point: Point,
    /// Direction of travel, in radians.
    pub tangent_angle: f64,
    /// Perpendicular to the tangent, in radians.
    pub normal_angle: f64,
    /// Displacement from `point` to the outline, along the normal; its
    /// magnitude is half the interpolated width times the base stroke
    /// width.
    pub offset: Vec2,
}

impl Sample {
    /// The sample's base point displaced by its offset.
    #[inline]
    pub fn offset_point(&self) -> Point {
        self.point + self.offset
    }

    /// Whether this sample's tangent can anchor a refinement comparison.
    ///
    /// A tangent angle of exactly zero is treated as undefined. That folds
    /// the genuinely degenerate case (a vanished tangent vector, whose
    /// angle comes out as atan2(0, 0) = 0) together with exact travel
    /// along +x; both are excluded from refinement, matching the behavior
    /// outlines have always had.
    #[inline]
    fn has_defined_tangent(&self) -> bool {
        self.tangent_angle != 0.0 && self.tangent_angle.is_finite()
    }
}

/// Tolerances and limits for [`sample_path`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOptions {
    /// Maximum difference allowed between adjacent tangent angles, in
    /// radians.
    pub tangent_tolerance: f64,
    /// Maximum distance allowed between adjacent offset points.
    pub distance_tolerance: f64,
    /// Hard cap on the number of evaluated lengths; reaching it terminates
    /// sampling with whatever has been accepted so far.
    pub max_samples: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        SampleOptions {
            tangent_tolerance: 0.1,
            distance_tolerance: 50.0,
            max_samples: 10_000,
        }
    }
}

impl SampleOptions {
    /// Builder method for setting the tangent-angle tolerance.
    #[must_use]
    pub fn with_tangent_tolerance(mut self, tolerance: f64) -> Self {
        self.tangent_tolerance = tolerance;
        self
    }

    /// Builder method for setting the offset-point distance tolerance.
    #[must_use]
    pub fn with_distance_tolerance(mut self, tolerance: f64) -> Self {
        self.distance_tolerance = tolerance;
        self
    }

    /// Builder method for setting the evaluation cap.
    #[must_use]
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }
}

/// The result of an adaptive sampling pass.
#[derive(Clone, Debug)]
pub struct Sampling {
    /// Accepted samples, in strictly increasing position order from the
    /// start of the path to its end.
    pub samples: Vec<Sample>,
    /// True when the evaluation cap cut sampling short; the samples are
    /// then a best-effort prefix rather than a converged sequence.
    pub capped: bool,
}

/// Adaptively sample a path under a width profile.
///
/// The walk starts from the two path endpoints and recursively inserts the
/// midpoint of any interval whose two samples disagree by more than
/// [`SampleOptions::tangent_tolerance`] in tangent angle or by more than
/// [`SampleOptions::distance_tolerance`] between offset points, refining
/// the most recently failing interval first. The dual criterion is what
/// keeps both failure modes in check: a sharp corner over a short interval
/// trips the angle test, a gentle curve over a long interval trips the
/// distance test.
///
/// Refinement stops deterministically once an interval has no
/// representable interior midpoint, and [`SampleOptions::max_samples`]
/// bounds the total work; hitting the cap is reported via
/// [`Sampling::capped`] rather than silently truncating.
pub fn sample_path(
    metrics: &impl PathMetrics,
    profile: &WidthProfile,
    base_width: f64,
    options: &SampleOptions,
) -> Sampling {
    let total = metrics.length();
    let mut samples: Vec<Sample> = Vec::new();
    // Lengths still to evaluate, popped from the top.
    let mut stack = vec![total, 0.0];
    let mut evaluated = 0usize;
    let mut capped = false;

    while let Some(length) = stack.pop() {
        if evaluated >= options.max_samples {
            capped = true;
            break;
        }
        evaluated += 1;

        let sample = evaluate_at(metrics, profile, base_width, length, total);
        if let Some(prev) = samples.last() {
            if prev.has_defined_tangent() && exceeds_tolerance(prev, &sample, options) {
                let prev_length = prev.position * total;
                let mid = 0.5 * (prev_length + length);
                if prev_length < mid && mid < length {
                    // Revisit the current length after the midpoint.
                    stack.push(length);
                    stack.push(mid);
                    continue;
                }
            }
        }
        samples.push(sample);
    }

    Sampling { samples, capped }
}

fn evaluate_at(
    metrics: &impl PathMetrics,
    profile: &WidthProfile,
    base_width: f64,
    length: f64,
    total: f64,
) -> Sample {
    let point = metrics.point_at(length);
    let tangent_angle = metrics.tangent_at(length).atan2();
    let normal_angle = metrics.normal_at(length).atan2();
    let position = length / total;
    let width = profile.width_at(position).unwrap_or(0.0);
    let offset = Vec2::from_angle(normal_angle) * (width * 0.5 * base_width);
    Sample {
        position,
        point,
        tangent_angle,
        normal_angle,
        offset,
    }
}

fn exceeds_tolerance(prev: &Sample, current: &Sample, options: &SampleOptions) -> bool {
    let tangent_difference = (current.tangent_angle - prev.tangent_angle).abs();
    let offset_distance = prev.offset_point().distance(current.offset_point());
    offset_distance > options.distance_tolerance || tangent_difference > options.tangent_tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeasuredPath, PenPath};

    fn measured(d: &str) -> MeasuredPath {
        let path = PenPath::from_svg(d).unwrap();
        MeasuredPath::new(&path, 1e-6).unwrap()
    }

    fn constant_profile() -> WidthProfile {
        WidthProfile::new([(0.0, 1.0), (1.0, 1.0)]).unwrap()
    }

    #[test]
    fn straight_constant_width_keeps_endpoints_only() {
        let m = measured("M0,0 C67,0 133,0 200,0");
        let sampling = sample_path(&m, &constant_profile(), 100.0, &SampleOptions::default());
        assert!(!sampling.capped);
        assert_eq!(sampling.samples.len(), 2);
        assert_eq!(sampling.samples[0].position, 0.0);
        assert_eq!(sampling.samples[1].position, 1.0);
        // Half of factor 1.0 times base width 100.
        assert!((sampling.samples[0].offset.hypot() - 50.0).abs() < 1e-9);
        assert!((sampling.samples[1].offset.hypot() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn linear_ramp_midpoint_width() {
        // Vertical line of length 500: the tangent angle is nonzero, so
        // the growing offset triggers refinement and the midpoint gets
        // evaluated.
        let m = measured("M0,0 C0,167 0,333 0,500");
        let profile = WidthProfile::new([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let sampling = sample_path(&m, &profile, 100.0, &SampleOptions::default());
        assert!(!sampling.capped);
        let mid = sampling
            .samples
            .iter()
            .find(|s| (s.position - 0.5).abs() < 1e-6)
            .expect("midpoint sample");
        assert!((mid.offset.hypot() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn positions_strictly_increase_and_span_path() {
        let m = measured("M100,300 C150,100 250,100 300,300");
        let sampling = sample_path(&m, &constant_profile(), 40.0, &SampleOptions::default());
        assert!(!sampling.capped);
        let samples = &sampling.samples;
        assert!(samples.len() >= 2);
        assert_eq!(samples[0].position, 0.0);
        assert_eq!(samples[samples.len() - 1].position, 1.0);
        for pair in samples.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }

    #[test]
    fn refinement_invariant_holds_post_hoc() {
        let m = measured("M100,300 C150,100 250,100 300,300");
        let options = SampleOptions::default();
        let sampling = sample_path(&m, &constant_profile(), 40.0, &options);
        assert!(!sampling.capped);
        for pair in sampling.samples.windows(2) {
            if pair[0].tangent_angle == 0.0 {
                continue;
            }
            let angle = (pair[1].tangent_angle - pair[0].tangent_angle).abs();
            let dist = pair[0].offset_point().distance(pair[1].offset_point());
            assert!(
                angle <= options.tangent_tolerance || dist <= options.distance_tolerance,
                "unrefined pair at {} .. {}: angle {angle}, dist {dist}",
                pair[0].position,
                pair[1].position,
            );
        }
    }

    #[test]
    fn curved_path_gets_refined() {
        let m = measured("M100,300 C150,100 250,100 300,300");
        let sampling = sample_path(&m, &constant_profile(), 40.0, &SampleOptions::default());
        assert!(sampling.samples.len() > 2, "expected refinement to kick in");
    }

    #[test]
    fn cap_reports_truncation() {
        let m = measured("M100,300 C150,100 250,100 300,300");
        let options = SampleOptions::default().with_max_samples(4);
        let sampling = sample_path(&m, &constant_profile(), 40.0, &options);
        assert!(sampling.capped);
        assert!(sampling.samples.len() <= 4);
        for pair in sampling.samples.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }

    /// An analytic half circle, standing in for an external path-math
    /// backend.
    struct HalfCircle {
        radius: f64,
    }

    impl PathMetrics for HalfCircle {
        fn length(&self) -> f64 {
            core::f64::consts::PI * self.radius
        }

        fn point_at(&self, length: f64) -> Point {
            let th = length / self.radius;
            let (s, c) = th.sin_cos();
            Point::new(self.radius * c, self.radius * s)
        }

        fn tangent_at(&self, length: f64) -> Vec2 {
            let th = length / self.radius;
            let (s, c) = th.sin_cos();
            Vec2::new(-s, c)
        }
    }

    #[test]
    fn injected_metrics_refine_by_angle() {
        let m = HalfCircle { radius: 100.0 };
        let options = SampleOptions::default();
        let sampling = sample_path(&m, &constant_profile(), 20.0, &options);
        assert!(!sampling.capped);
        // The tangent turns through π, so the angle criterion alone forces
        // at least π / 0.1 intervals.
        assert!(sampling.samples.len() >= 30, "{}", sampling.samples.len());
        for pair in sampling.samples.windows(2) {
            let angle = (pair[1].tangent_angle - pair[0].tangent_angle).abs();
            let dist = pair[0].offset_point().distance(pair[1].offset_point());
            assert!(angle <= options.tangent_tolerance || dist <= options.distance_tolerance);
        }
    }

    #[test]
    fn adversarial_profile_terminates() {
        use rand::Rng;
        let m = measured("M100,300 C150,100 250,100 300,300");
        let mut rng = rand::rng();
        for _ in 0..3 {
            let points: Vec<(f64, f64)> = (0..50)
                .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
                .collect();
            let profile = WidthProfile::new(points).unwrap();
            let options = SampleOptions::default().with_max_samples(1000);
            let sampling = sample_path(&m, &profile, 500.0, &options);
            assert!(sampling.samples.len() <= options.max_samples);
            for pair in sampling.samples.windows(2) {
                assert!(pair[0].position < pair[1].position);
            }
        }
    }
}
