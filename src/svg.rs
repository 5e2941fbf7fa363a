// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing the SVG path subset used for pen paths.

use core::fmt;

use crate::{PenPath, Point};

impl PenPath {
    /// Parse a path from the `M`/`C` subset of SVG path syntax.
    ///
    /// Only absolute "move to" and "cubic curve to" commands are accepted;
    /// this is exactly the subset [`PenPath::to_svg`] produces. A `C` may
    /// be followed by further coordinate triples without repeating the
    /// letter.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed numbers, truncated input, or any
    /// other command letter.
    pub fn from_svg(data: &str) -> Result<PenPath, SvgParseError> {
        let mut lexer = SvgLexer::new(data);
        let mut path = PenPath::new();
        let mut last_cmd = 0;
        while let Some(c) = lexer.get_cmd(last_cmd) {
            match c {
                b'M' => {
                    let pt = lexer.get_point()?;
                    path.move_to(pt);
                    // A bare coordinate after a move would be an implicit
                    // "line to", which this subset does not include.
                    last_cmd = 0;
                }
                b'C' => {
                    let p1 = lexer.get_point()?;
                    let p2 = lexer.get_point()?;
                    let p3 = lexer.get_point()?;
                    path.curve_to(p1, p2, p3);
                    last_cmd = c;
                }
                _ => return Err(SvgParseError::UnsupportedCommand(c as char)),
            }
        }
        lexer.expect_end()?;
        Ok(path)
    }
}

/// An error which can be returned when parsing an SVG path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SvgParseError {
    /// A number was expected.
    Wrong,
    /// The input string ended while still expecting input.
    UnexpectedEof,
    /// A command other than the supported `M`/`C` subset was found.
    UnsupportedCommand(char),
}

impl fmt::Display for SvgParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgParseError::Wrong => write!(f, "invalid number"),
            SvgParseError::UnexpectedEof => write!(f, "unexpected EOF"),
            SvgParseError::UnsupportedCommand(c) => write!(f, "unsupported command {c:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SvgParseError {}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> SvgLexer<'a> {
    fn new(data: &'a str) -> SvgLexer<'a> {
        SvgLexer { data, ix: 0 }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn get_cmd(&mut self, last_cmd: u8) -> Option<u8> {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c.is_ascii_alphabetic() {
                return Some(c);
            } else if last_cmd != 0 && (c == b'-' || c == b'.' || c.is_ascii_digit()) {
                // Plausible number start; repeat the last command.
                self.unget();
                return Some(last_cmd);
            } else {
                self.unget();
            }
        }
        None
    }

    fn get_byte(&mut self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).map(|&c| {
            self.ix += 1;
            c
        })
    }

    fn unget(&mut self) {
        self.ix -= 1;
    }

    fn get_number(&mut self) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        let c = self.get_byte().ok_or(SvgParseError::UnexpectedEof)?;
        if !(c == b'-' || c == b'+') {
            self.unget();
        }
        let mut digit_count = 0;
        let mut seen_period = false;
        while let Some(c) = self.get_byte() {
            if c.is_ascii_digit() {
                digit_count += 1;
            } else if c == b'.' && !seen_period {
                seen_period = true;
            } else {
                self.unget();
                break;
            }
        }
        if digit_count > 0 {
            self.data[start..self.ix]
                .parse()
                .map_err(|_| SvgParseError::Wrong)
        } else {
            Err(SvgParseError::Wrong)
        }
    }

    fn get_point(&mut self) -> Result<Point, SvgParseError> {
        let x = self.get_number()?;
        self.opt_comma();
        let y = self.get_number()?;
        self.opt_comma();
        Ok(Point::new(x, y))
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c != b',' {
                self.unget();
            }
        }
    }

    fn expect_end(&mut self) -> Result<(), SvgParseError> {
        self.skip_ws();
        match self.data.as_bytes().get(self.ix) {
            None => Ok(()),
            Some(&c) => Err(SvgParseError::UnsupportedCommand(c as char)),
        }
    }
}
