// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pen paths: move/cubic command sequences and pen-tool editing.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::{CubicBez, Point, Vec2};

/// One command of a pen path, in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCmd {
    /// Move directly to a point without drawing.
    MoveTo(Point),
    /// Draw a cubic Bézier from the current point to the third point,
    /// using the first two as control points.
    CurveTo(Point, Point, Point),
}

impl PathCmd {
    /// The end point of this command.
    #[inline]
    pub fn end(&self) -> Point {
        match *self {
            PathCmd::MoveTo(p) => p,
            PathCmd::CurveTo(_, _, p) => p,
        }
    }

    /// The second control point, if this is a curve.
    #[inline]
    pub fn cp2(&self) -> Option<Point> {
        match *self {
            PathCmd::MoveTo(_) => None,
            PathCmd::CurveTo(_, cp2, _) => Some(cp2),
        }
    }
}

/// A path drawn with a Bézier pen tool: an ordered sequence of move and
/// cubic commands.
///
/// This is the base-path representation the pressure pipeline consumes. A
/// well-formed path starts with a [`PathCmd::MoveTo`]; editing operations
/// never mutate in place but return a new sequence, so adjacent commands
/// sharing a mirrored control point cannot alias.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenPath(Vec<PathCmd>);

impl PenPath {
    /// Create a new, empty path.
    #[inline]
    pub fn new() -> PenPath {
        PenPath(Vec::new())
    }

    /// Create a path from a vector of commands.
    #[inline]
    pub fn from_commands(commands: Vec<PathCmd>) -> PenPath {
        PenPath(commands)
    }

    /// The command sequence.
    #[inline]
    pub fn commands(&self) -> &[PathCmd] {
        &self.0
    }

    /// The number of commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Push a "move to" command onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.0.push(PathCmd::MoveTo(p.into()));
    }

    /// Push a "curve to" command onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, cp1: P, cp2: P, end: P) {
        self.0
            .push(PathCmd::CurveTo(cp1.into(), cp2.into(), end.into()));
    }

    /// Iterate over the cubic segments of the path.
    ///
    /// Each `CurveTo` yields one segment starting at the previous command's
    /// end point. A curve issued before any move starts at the origin.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            commands: self.0.iter(),
            current: Point::ORIGIN,
        }
    }

    /// Append a new cubic command ending at `coords`, returning the
    /// extended path.
    ///
    /// The new command's first control point is the mirror of the previous
    /// command's second control point through the previous end point, so
    /// the join stays smooth. When the previous command has no control
    /// points (it is the initial move), `initial_cp` is used when supplied,
    /// and otherwise the control point collapses onto the previous end
    /// point, giving a straight join.
    ///
    /// Appending to an empty path produces the initial move.
    #[must_use]
    pub fn append_point(&self, coords: Point, initial_cp: Option<Point>) -> PenPath {
        let mut commands = self.0.clone();
        let cmd = match commands.last() {
            None => PathCmd::MoveTo(coords),
            Some(last) => {
                let cp1 = match last.cp2() {
                    Some(cp2) => cp2.reflect(last.end()).round(),
                    None => initial_cp.unwrap_or_else(|| last.end()),
                };
                PathCmd::CurveTo(cp1, coords, coords)
            }
        };
        commands.push(cmd);
        PenPath(commands)
    }

    /// Set the second control point of the command at `index` to `coords`
    /// (mirrored through that command's end point when `mirror` is set),
    /// and the next command's first control point to the complementary
    /// mirror, returning the edited path.
    ///
    /// This is the conventional pen-tool drag: both handles around an
    /// anchor stay collinear. The operation is a no-op on move commands
    /// and out-of-range indices.
    #[must_use]
    pub fn set_control_point(&self, coords: Point, index: usize, mirror: bool) -> PenPath {
        let mut commands = self.0.clone();
        let Some(&PathCmd::CurveTo(cp1, _, end)) = commands.get(index) else {
            return PenPath(commands);
        };
        let new_cp2 = coords.round();
        let mirrored = new_cp2.reflect(end).round();
        commands[index] = PathCmd::CurveTo(cp1, if mirror { mirrored } else { new_cp2 }, end);
        if let Some(&PathCmd::CurveTo(_, next_cp2, next_end)) = commands.get(index + 1) {
            commands[index + 1] = PathCmd::CurveTo(
                if mirror { new_cp2 } else { mirrored },
                next_cp2,
                next_end,
            );
        }
        PenPath(commands)
    }

    /// Translate the anchor at `index` by `delta`, returning the edited
    /// path.
    ///
    /// Moves the command's end point together with its trailing control
    /// point and the next command's leading control point, so the local
    /// curve shape travels with the anchor. No-op on out-of-range indices.
    #[must_use]
    pub fn translate_point(&self, index: usize, delta: Vec2) -> PenPath {
        let mut commands = self.0.clone();
        let Some(&cmd) = commands.get(index) else {
            return PenPath(commands);
        };
        commands[index] = match cmd {
            PathCmd::MoveTo(end) => PathCmd::MoveTo(end + delta),
            PathCmd::CurveTo(cp1, cp2, end) => PathCmd::CurveTo(cp1, cp2 + delta, end + delta),
        };
        if let Some(&PathCmd::CurveTo(next_cp1, next_cp2, next_end)) = commands.get(index + 1) {
            commands[index + 1] = PathCmd::CurveTo(next_cp1 + delta, next_cp2, next_end);
        }
        PenPath(commands)
    }

    /// Convert the path to an SVG path string.
    ///
    /// Only `M` and `C` commands are produced, space-separated, with
    /// coordinates rounded to integers.
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        for cmd in &self.0 {
            if !result.is_empty() {
                result.push(' ');
            }
            match *cmd {
                PathCmd::MoveTo(p) => {
                    let p = p.round();
                    write!(result, "M{},{}", p.x, p.y).unwrap();
                }
                PathCmd::CurveTo(cp1, cp2, end) => {
                    let (cp1, cp2, end) = (cp1.round(), cp2.round(), end.round());
                    write!(
                        result,
                        "C{},{} {},{} {},{}",
                        cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
                    )
                    .unwrap();
                }
            }
        }
        result
    }
}

impl FromIterator<PathCmd> for PenPath {
    fn from_iter<T: IntoIterator<Item = PathCmd>>(iter: T) -> Self {
        PenPath(iter.into_iter().collect())
    }
}

/// An iterator over the cubic segments of a [`PenPath`].
#[derive(Debug)]
pub struct Segments<'a> {
    commands: core::slice::Iter<'a, PathCmd>,
    current: Point,
}

impl Iterator for Segments<'_> {
    type Item = CubicBez;

    fn next(&mut self) -> Option<CubicBez> {
        for cmd in self.commands.by_ref() {
            match *cmd {
                PathCmd::MoveTo(p) => self.current = p,
                PathCmd::CurveTo(cp1, cp2, end) => {
                    let seg = CubicBez::new(self.current, cp1, cp2, end);
                    self.current = end;
                    return Some(seg);
                }
            }
        }
        None
    }
}
