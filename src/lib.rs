// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable-width stroke outlines for 2D Bézier paths.
//!
//! Premo models a pressure-sensitive pen stroke. Given a base path built
//! from move/cubic commands, a [`WidthProfile`] mapping normalized position
//! along the path to a stroke-width factor, and a base stroke width, it
//! computes a curvature-adaptive sequence of [`Sample`]s along the path and
//! assembles their offset points on both sides of the path into a single
//! closed [`OutlinePath`].
//!
//! The sampling is adaptive: extra evaluation points are inserted wherever
//! successive samples disagree too much in tangent angle or in offset-point
//! distance, so straight runs stay sparse while sharp turns and fast width
//! changes get dense coverage.
//!
//! # Example
//!
//! ```
//! use premo::{pressure_path, WidthProfile};
//!
//! # fn run() -> Result<(), premo::Error> {
//! let profile = WidthProfile::new([(0.0, 0.25), (0.5, 1.0), (1.0, 0.1)])?;
//! let stroke = pressure_path("M100,300 C150,100 250,100 300,300", &profile, 40.0)?;
//! // One closed loop: top side, end cap, bottom side, start cap.
//! assert!(stroke.outline.to_svg().starts_with('M'));
//! assert!(stroke.samples.len() >= 4);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! The sampler and assembler consume their geometry through the
//! [`PathMetrics`] and [`PathEngine`] traits, so a different path-math
//! backend (or a test fake) can be injected via [`pressure_path_with`];
//! [`BezEngine`] is the built-in implementation.
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. However, note that the `libm` crate is not as
//! efficient as the standard library, and that this crate still uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::unreadable_literal, clippy::many_single_char_names)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("premo requires either the `std` or `libm` feature");

extern crate alloc;

mod common;
mod cubicbez;
mod engine;
mod fit;
mod measure;
mod outline;
mod param_curve;
mod penpath;
mod point;
mod pressure;
mod profile;
mod quadbez;
mod sample;
mod svg;
mod vec2;

pub use crate::cubicbez::*;
pub use crate::engine::*;
pub use crate::fit::*;
pub use crate::measure::*;
pub use crate::outline::*;
pub use crate::param_curve::*;
pub use crate::penpath::*;
pub use crate::point::*;
pub use crate::pressure::*;
pub use crate::profile::*;
pub use crate::quadbez::*;
pub use crate::sample::*;
pub use crate::svg::*;
pub use crate::vec2::*;
