// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pressure-stroke pipeline: parse, measure, sample, assemble.

use alloc::vec::Vec;
use core::fmt;

use crate::{
    outline, sample_path, BezEngine, OutlinePath, PathEngine, PenPath, Sample, SampleOptions,
    SvgParseError, WidthProfile,
};

/// The error type for pressure-path computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The path definition failed to parse.
    Parse(SvgParseError),
    /// The width profile has no control points.
    InvalidWidthProfile,
    /// The path has too few commands (or no extent) to be sampled.
    InsufficientPathData,
    /// Too few samples to assemble an outline from.
    InsufficientSamples,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "invalid path definition: {e}"),
            Error::InvalidWidthProfile => write!(f, "width profile has no control points"),
            Error::InsufficientPathData => {
                write!(f, "path needs at least two commands and nonzero length")
            }
            Error::InsufficientSamples => write!(f, "too few samples to build an outline"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SvgParseError> for Error {
    fn from(e: SvgParseError) -> Self {
        Error::Parse(e)
    }
}

/// A computed pressure stroke.
#[derive(Clone, Debug)]
pub struct PressurePath {
    /// The closed outline curve.
    pub outline: OutlinePath,
    /// All samples the outline was built from: the top side in path order,
    /// followed by the mirrored bottom side. Useful for diagnostic
    /// visualization of the sampling density.
    pub samples: Vec<Sample>,
    /// True when sampling hit its evaluation cap; the outline is then a
    /// best-effort approximation of a prefix of the path.
    pub capped: bool,
}

/// Compute the outline of a pressure stroke.
///
/// `d` is the base path in the `M`/`C` SVG subset, `profile` maps
/// normalized position along the path to a width factor, and `base_width`
/// is the stroke width at factor 1. The result is a pure function of these
/// three inputs; nothing is cached between calls.
///
/// # Errors
///
/// See [`Error`] for the failure modes: unparseable definitions, paths
/// too short to sample, and sample sequences too short to outline.
pub fn pressure_path(
    d: &str,
    profile: &WidthProfile,
    base_width: f64,
) -> Result<PressurePath, Error> {
    pressure_path_with(
        &BezEngine::default(),
        d,
        profile,
        base_width,
        &SampleOptions::default(),
    )
}

/// Compute the outline of a pressure stroke with an explicit engine and
/// sampling options.
///
/// # Errors
///
/// As [`pressure_path`].
pub fn pressure_path_with<E: PathEngine>(
    engine: &E,
    d: &str,
    profile: &WidthProfile,
    base_width: f64,
    options: &SampleOptions,
) -> Result<PressurePath, Error> {
    let path = PenPath::from_svg(d)?;
    let measured = engine.measure(&path)?;
    let sampling = sample_path(&measured, profile, base_width, options);
    let assembled = outline(&sampling.samples, engine)?;
    let mut samples = assembled.top;
    samples.extend(assembled.bottom);
    Ok(PressurePath {
        outline: assembled.curve,
        samples,
        capped: sampling.capped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_profile() -> WidthProfile {
        WidthProfile::new([(0.0, 0.2), (0.5, 1.0), (1.0, 0.2)]).unwrap()
    }

    #[test]
    fn end_to_end_outline() {
        let stroke =
            pressure_path("M100,300 C150,100 250,100 300,300", &ramp_profile(), 40.0).unwrap();
        assert!(!stroke.capped);

        let d = stroke.outline.to_svg();
        assert!(d.starts_with('M'), "got {d}");
        assert!(d.ends_with('Z'), "got {d}");
        assert_eq!(d.matches('A').count(), 2, "two end caps: {d}");

        // Diagnostics carry both sides: top in increasing position order,
        // bottom reversed.
        assert_eq!(stroke.samples.len() % 2, 0);
        let half = stroke.samples.len() / 2;
        assert!(half >= 2);
        for pair in stroke.samples[..half].windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
        for pair in stroke.samples[half..].windows(2) {
            assert!(pair[0].position > pair[1].position);
        }
        assert_eq!(stroke.samples[0].position, 0.0);
        assert_eq!(stroke.samples[half - 1].position, 1.0);
    }

    #[test]
    fn straight_constant_stroke_is_minimal() {
        let profile = WidthProfile::new([(0.0, 1.0), (1.0, 1.0)]).unwrap();
        let stroke = pressure_path("M0,0 C67,0 133,0 200,0", &profile, 100.0).unwrap();
        // Two endpoint samples per side.
        assert_eq!(stroke.samples.len(), 4);
        for s in &stroke.samples {
            assert!((s.offset.hypot() - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn parse_errors_propagate() {
        let err = pressure_path("Q1,2 3,4", &ramp_profile(), 10.0).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn short_paths_are_rejected() {
        let err = pressure_path("M10,10", &ramp_profile(), 10.0).unwrap_err();
        assert_eq!(err, Error::InsufficientPathData);
    }

    #[test]
    fn capped_sampling_still_produces_a_result() {
        let options = SampleOptions::default().with_max_samples(8);
        let stroke = pressure_path_with(
            &BezEngine::default(),
            "M100,300 C150,100 250,100 300,300",
            &ramp_profile(),
            40.0,
            &options,
        )
        .unwrap();
        assert!(stroke.capped);
        assert!(!stroke.outline.elements().is_empty());
    }

    #[test]
    fn error_display() {
        let e = Error::InsufficientPathData;
        assert!(!e.to_string().is_empty());
        let e = Error::Parse(SvgParseError::UnexpectedEof);
        assert!(e.to_string().contains("invalid path definition"));
    }
}
