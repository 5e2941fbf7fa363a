// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembling sampled offsets into a closed outline curve.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::{Error, PathEngine, Point, Sample, Vec2};

/// One element of an outline curve.
///
/// Outlines are emitted with SVG path semantics: moves, cubic Béziers,
/// endpoint-parameterized elliptical arcs (for the end caps), and a
/// closing element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlineEl {
    /// Move directly to a point without drawing.
    MoveTo(Point),
    /// Draw a cubic Bézier to the third point, using the first two as
    /// control points.
    CurveTo(Point, Point, Point),
    /// Draw an elliptical arc to `to`.
    ArcTo {
        /// The arc's radii, x before rotation, then y.
        radii: Vec2,
        /// How much the ellipse is rotated, in radians.
        x_rotation: f64,
        /// Does this arc sweep through more than π radians?
        large_arc: bool,
        /// Does the arc begin moving at positive angles?
        sweep: bool,
        /// The arc's end point.
        to: Point,
    },
    /// Close the current subpath with a straight line.
    ClosePath,
}

/// A curve assembled from outline elements.
///
/// This is the output side of the crate: it is built from fitted cubics
/// and cap arcs and serialized to an SVG path string. It is not parsed
/// back; the input side only ever deals in [`PenPath`] commands.
///
/// [`PenPath`]: crate::PenPath
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlinePath(Vec<OutlineEl>);

impl OutlinePath {
    /// Create a new, empty outline.
    #[inline]
    pub fn new() -> OutlinePath {
        OutlinePath(Vec::new())
    }

    /// The element sequence.
    #[inline]
    pub fn elements(&self) -> &[OutlineEl] {
        &self.0
    }

    /// Push a raw element onto the outline.
    pub fn push(&mut self, el: OutlineEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the outline.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.0.push(OutlineEl::MoveTo(p.into()));
    }

    /// Push a "curve to" element onto the outline.
    pub fn curve_to<P: Into<Point>>(&mut self, cp1: P, cp2: P, end: P) {
        self.0
            .push(OutlineEl::CurveTo(cp1.into(), cp2.into(), end.into()));
    }

    /// Push a "close path" element onto the outline.
    pub fn close_path(&mut self) {
        self.0.push(OutlineEl::ClosePath);
    }

    /// Append elements from an iterator.
    pub fn extend<I: IntoIterator<Item = OutlineEl>>(&mut self, elements: I) {
        self.0.extend(elements);
    }

    /// Convert the outline to an SVG path string.
    ///
    /// Coordinates (and arc radii) are rounded to integers.
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        for el in &self.0 {
            if !result.is_empty() {
                result.push(' ');
            }
            match *el {
                OutlineEl::MoveTo(p) => {
                    let p = p.round();
                    write!(result, "M{},{}", p.x, p.y).unwrap();
                }
                OutlineEl::CurveTo(cp1, cp2, end) => {
                    let (cp1, cp2, end) = (cp1.round(), cp2.round(), end.round());
                    write!(
                        result,
                        "C{},{} {},{} {},{}",
                        cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
                    )
                    .unwrap();
                }
                OutlineEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let radii = radii.round();
                    let to = to.round();
                    write!(
                        result,
                        "A{},{} {} {} {} {},{}",
                        radii.x,
                        radii.y,
                        x_rotation,
                        i32::from(large_arc),
                        i32::from(sweep),
                        to.x,
                        to.y
                    )
                    .unwrap();
                }
                OutlineEl::ClosePath => result.push('Z'),
            }
        }
        result
    }
}

/// A variable-width stroke outline: the sample sequences for both sides of
/// the base path, and the closed curve through their offset points.
#[derive(Clone, Debug)]
pub struct Outline {
    /// Samples along the top side, in path order.
    pub top: Vec<Sample>,
    /// The top samples mirrored to the other side of the path: offsets
    /// negated, order reversed.
    pub bottom: Vec<Sample>,
    /// The closed outline curve.
    pub curve: OutlinePath,
}

/// Assemble a closed outline from an adaptive sampling of the base path.
///
/// The top offset points are fitted into a smooth curve, an arc caps the
/// far end over to the mirrored bottom sequence, the bottom offset points
/// are fitted independently (fitting after the join would distort the
/// cap), and a second arc returns to the start before closing the loop.
///
/// # Errors
///
/// Returns [`Error::InsufficientSamples`] for fewer than two samples;
/// there is no outline to speak of, and the caps would connect undefined
/// points.
pub fn outline(samples: &[Sample], engine: &impl PathEngine) -> Result<Outline, Error> {
    if samples.len() < 2 {
        return Err(Error::InsufficientSamples);
    }
    let bottom: Vec<Sample> = samples
        .iter()
        .rev()
        .map(|s| Sample {
            offset: -s.offset,
            ..*s
        })
        .collect();

    let top_points: Vec<Point> = samples.iter().map(Sample::offset_point).collect();
    let bottom_points: Vec<Point> = bottom.iter().map(Sample::offset_point).collect();

    let mut curve = engine.fit(&top_points);
    curve.push(engine.arc(top_points[top_points.len() - 1], bottom_points[0]));

    let bottom_curve = engine.fit(&bottom_points);
    // The cap arc already ends at the bottom's first point; splice the
    // fitted elements in without their leading move.
    curve.extend(bottom_curve.elements().iter().skip(1).copied());

    curve.push(engine.arc(bottom_points[bottom_points.len() - 1], top_points[0]));
    curve.close_path();

    Ok(Outline {
        top: samples.to_vec(),
        bottom,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample_path, BezEngine, MeasuredPath, PenPath, SampleOptions, WidthProfile};

    fn sampled(d: &str) -> Vec<Sample> {
        let path = PenPath::from_svg(d).unwrap();
        let measured = MeasuredPath::new(&path, 1e-6).unwrap();
        let profile = WidthProfile::new([(0.0, 0.3), (0.5, 1.0), (1.0, 0.3)]).unwrap();
        sample_path(&measured, &profile, 60.0, &SampleOptions::default()).samples
    }

    #[test]
    fn rejects_too_few_samples() {
        let engine = BezEngine::default();
        assert!(matches!(
            outline(&[], &engine),
            Err(Error::InsufficientSamples)
        ));
        let samples = sampled("M100,300 C150,100 250,100 300,300");
        assert!(matches!(
            outline(&samples[..1], &engine),
            Err(Error::InsufficientSamples)
        ));
    }

    #[test]
    fn bottom_is_mirrored_and_reversed() {
        let samples = sampled("M100,300 C150,100 250,100 300,300");
        let engine = BezEngine::default();
        let result = outline(&samples, &engine).unwrap();
        assert_eq!(result.bottom.len(), samples.len());
        for (i, b) in result.bottom.iter().enumerate() {
            let s = &samples[samples.len() - 1 - i];
            assert_eq!(b.offset, -s.offset);
            assert_eq!(b.point, s.point);
            assert_eq!(b.position, s.position);
        }
    }

    #[test]
    fn curve_is_one_closed_loop_with_two_caps() {
        let samples = sampled("M100,300 C150,100 250,100 300,300");
        let engine = BezEngine::default();
        let result = outline(&samples, &engine).unwrap();
        let els = result.curve.elements();

        assert_eq!(els[0], OutlineEl::MoveTo(samples[0].offset_point()));
        assert_eq!(els[els.len() - 1], OutlineEl::ClosePath);
        let moves = els
            .iter()
            .filter(|el| matches!(el, OutlineEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 1, "splicing must not introduce extra subpaths");
        let arcs: Vec<&OutlineEl> = els
            .iter()
            .filter(|el| matches!(el, OutlineEl::ArcTo { .. }))
            .collect();
        assert_eq!(arcs.len(), 2);

        // The first cap lands exactly on the bottom curve's start, the
        // second back on the outline's start.
        let OutlineEl::ArcTo { to: cap1, .. } = arcs[0] else {
            unreachable!()
        };
        let OutlineEl::ArcTo { to: cap2, .. } = arcs[1] else {
            unreachable!()
        };
        assert_eq!(*cap1, result.bottom[0].offset_point());
        assert_eq!(*cap2, samples[0].offset_point());
    }

    #[test]
    fn svg_output_shape() {
        let samples = sampled("M100,300 C150,100 250,100 300,300");
        let engine = BezEngine::default();
        let result = outline(&samples, &engine).unwrap();
        let d = result.curve.to_svg();
        assert!(d.starts_with('M'), "got {d}");
        assert!(d.ends_with('Z'), "got {d}");
        assert_eq!(d.matches('A').count(), 2, "got {d}");
    }
}
