// Copyright 2025 the Premo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render a pressure stroke as an SVG document on stdout, showing the
//! base path, the adaptive samples, and the assembled outline.

use premo::{pressure_path, WidthProfile};

fn main() {
    let d = "M100,300 C150,100 250,100 300,300 C350,500 450,500 500,300";
    let profile = WidthProfile::new([(0.0, 0.1), (0.3, 1.0), (0.7, 0.4), (1.0, 0.9)])
        .expect("profile has points");
    let stroke = pressure_path(d, &profile, 60.0).expect("valid path");

    println!("<svg width='600' height='600' xmlns='http://www.w3.org/2000/svg'>");
    println!(
        "  <path d='{}' fill='#8c8' stroke='none'/>",
        stroke.outline.to_svg()
    );
    println!("  <path d='{d}' stroke='#000' fill='none' stroke-width='1'/>");
    for s in &stroke.samples {
        let p = s.offset_point();
        println!(
            "  <circle cx='{:.1}' cy='{:.1}' r='1.5' fill='#c44'/>",
            p.x, p.y
        );
    }
    println!("</svg>");
}
