// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinnabar Geometry: ellipse math for curved seal text.
//!
//! This crate provides the small amount of pure geometry that curved-text
//! seal rendering needs:
//!
//! - [`Ellipse`]: an origin-centered, axis-aligned ellipse with
//!   [`Ellipse::point_at`] and [`Ellipse::tangent_angle_at`].
//! - [`ArcSpan`]: the angular range a run of characters occupies, chosen
//!   from the character count via [`ArcSpan::for_char_count`].
//! - [`distribute`]: evenly spaced [`Anchor`]s along an elliptical arc,
//!   one per character, each carrying the local tangent angle.
//!
//! # Angles
//!
//! All public angles are in **degrees**. Spans produced by
//! [`ArcSpan::for_char_count`] intentionally run past 360° (for example
//! `[140°, 400°]`); `sin`/`cos` are periodic, so anchor evaluation feeds
//! the raw degree values into the trigonometric functions without
//! normalizing them into `[0°, 360°)`. Consumers must carry raw degree
//! values the same way.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`, `atan`, `sin`, `cos`
use kurbo::Point;

/// Guard band around the major-axis vertices where the tangent-slope
/// formula divides by a vanishing `y`.
pub const TANGENT_EPSILON: f64 = 1e-4;

/// An axis-aligned ellipse centered on the origin.
///
/// The curve is `x = a·cos θ`, `y = b·sin θ` with `a` the semi-major and
/// `b` the semi-minor axis. Seal rendering uses two of these per stamp:
/// the stroked border ellipse and a smaller placement ellipse that curved
/// text follows; the two are independent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    /// Semi-axis along X (`a`).
    pub semi_major: f64,
    /// Semi-axis along Y (`b`).
    pub semi_minor: f64,
}

impl Ellipse {
    /// Create an ellipse from its semi-axes.
    #[inline]
    pub const fn new(semi_major: f64, semi_minor: f64) -> Self {
        Self {
            semi_major,
            semi_minor,
        }
    }

    /// The point on the ellipse at the given parameter angle, in degrees.
    ///
    /// Pure and total; angles outside `[0°, 360°)` are fine because
    /// `sin`/`cos` are periodic.
    #[inline]
    pub fn point_at(&self, angle_deg: f64) -> Point {
        let radians = angle_deg.to_radians();
        Point::new(
            self.semi_major * radians.cos(),
            self.semi_minor * radians.sin(),
        )
    }

    /// The angle of the tangent line at an ellipse point, in degrees.
    ///
    /// The tangent slope at `(x, y)` is `−(b²·x)/(a²·y)`; the result is
    /// `atan` of that slope and therefore lies in `(−90°, 90°)`.
    ///
    /// Near the major-axis vertices (`|y| <` [`TANGENT_EPSILON`]) the
    /// slope formula is undefined; the policy there is to return `+90°`
    /// when `x > 0` and `−90°` otherwise. This is a deliberate
    /// singularity guard rather than a general tangent solution: it only
    /// distinguishes the two vertices by the sign of `x`, which is
    /// adequate because anchors with `y ≈ 0` occur at the horizontal
    /// extremes of the text arc.
    pub fn tangent_angle_at(&self, point: Point) -> f64 {
        if point.y.abs() < TANGENT_EPSILON {
            return if point.x > 0.0 { 90.0 } else { -90.0 };
        }
        let slope = -(self.semi_minor * self.semi_minor * point.x)
            / (self.semi_major * self.semi_major * point.y);
        slope.atan().to_degrees()
    }
}

/// Angular range a run of curved characters occupies on an ellipse.
///
/// The end angle may exceed 360°; see the crate docs on angle handling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcSpan {
    /// Angle of the first anchor, in degrees.
    pub start_deg: f64,
    /// Angle of the last anchor, in degrees.
    pub end_deg: f64,
}

impl ArcSpan {
    /// Create a span from explicit start and end angles in degrees.
    #[inline]
    pub const fn new(start_deg: f64, end_deg: f64) -> Self {
        Self { start_deg, end_deg }
    }

    /// Choose the span for a curved run of `char_count` characters.
    ///
    /// Longer names need a wider arc so glyphs do not crowd:
    ///
    /// | character count | span           |
    /// |-----------------|----------------|
    /// | ≥ 23            | `[140°, 400°]` |
    /// | 21–22           | `[145°, 390°]` |
    /// | ≤ 20            | `[165°, 375°]` |
    ///
    /// The bucket boundaries are carried over from the original sizing
    /// tables unchanged.
    pub fn for_char_count(char_count: usize) -> Self {
        if char_count >= 23 {
            Self::new(140.0, 400.0)
        } else if char_count > 20 {
            Self::new(145.0, 390.0)
        } else {
            Self::new(165.0, 375.0)
        }
    }
}

/// One glyph anchor on an elliptical arc.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Parameter angle of this anchor, in degrees (may exceed 360°).
    pub angle_deg: f64,
    /// Position on the ellipse, in the ellipse-centered frame.
    pub point: Point,
    /// Tangent angle at [`Anchor::point`], in degrees.
    pub tangent_deg: f64,
}

/// Evenly subdivide `span` into `count` anchors on `ellipse`.
///
/// Anchors are returned in increasing-angle order, one per character of a
/// curved run. The angular step is `(end − start) / (count − 1)`, so the
/// first anchor sits exactly at the start angle and the last exactly at
/// the end angle.
///
/// Edge cases: `count == 0` yields an empty vector, and `count == 1`
/// yields a single anchor at the start angle (step 0) rather than
/// dividing by zero.
pub fn distribute(ellipse: Ellipse, span: ArcSpan, count: usize) -> Vec<Anchor> {
    let mut anchors = Vec::with_capacity(count);
    if count == 0 {
        return anchors;
    }
    let step = if count == 1 {
        0.0
    } else {
        (span.end_deg - span.start_deg) / (count as f64 - 1.0)
    };
    for i in 0..count {
        let angle_deg = span.start_deg + i as f64 * step;
        let point = ellipse.point_at(angle_deg);
        let tangent_deg = ellipse.tangent_angle_at(point);
        anchors.push(Anchor {
            angle_deg,
            point,
            tangent_deg,
        });
    }
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tolerance: f64) {
        assert!(
            (a - b).abs() < tolerance,
            "expected {a} ≈ {b} within {tolerance}"
        );
    }

    #[test]
    fn point_at_cardinal_angles() {
        let e = Ellipse::new(20.0, 15.0);
        let p = e.point_at(0.0);
        assert_close(p.x, 20.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);

        let p = e.point_at(90.0);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.y, 15.0, 1e-12);

        let p = e.point_at(270.0);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.y, -15.0, 1e-12);
    }

    #[test]
    fn point_at_accepts_angles_past_full_turn() {
        let e = Ellipse::new(16.4, 11.4);
        let wrapped = e.point_at(400.0);
        let equivalent = e.point_at(40.0);
        assert_close(wrapped.x, equivalent.x, 1e-9);
        assert_close(wrapped.y, equivalent.y, 1e-9);
    }

    #[test]
    fn tangent_is_flat_at_minor_vertices() {
        let e = Ellipse::new(20.0, 15.0);
        // Top and bottom of the ellipse: tangent runs horizontally.
        assert_close(e.tangent_angle_at(e.point_at(90.0)), 0.0, 1e-9);
        assert_close(e.tangent_angle_at(e.point_at(270.0)), 0.0, 1e-9);
    }

    #[test]
    fn tangent_singularity_guard_at_major_vertices() {
        let e = Ellipse::new(20.0, 15.0);
        assert_eq!(e.tangent_angle_at(Point::new(20.0, 0.0)), 90.0);
        assert_eq!(e.tangent_angle_at(Point::new(-20.0, 0.0)), -90.0);
        // Just inside the guard band the policy still applies.
        assert_eq!(e.tangent_angle_at(Point::new(20.0, 5e-5)), 90.0);
    }

    #[test]
    fn tangent_is_finite_away_from_the_guard() {
        let e = Ellipse::new(16.4, 11.4);
        let mut angle = 95.0;
        while angle < 265.0 {
            let t = e.tangent_angle_at(e.point_at(angle));
            assert!(t.is_finite(), "tangent at {angle}° should be finite");
            assert!((-90.0..=90.0).contains(&t), "atan range at {angle}°");
            angle += 5.0;
        }
    }

    #[test]
    fn span_buckets_match_character_counts() {
        assert_eq!(ArcSpan::for_char_count(23), ArcSpan::new(140.0, 400.0));
        assert_eq!(ArcSpan::for_char_count(30), ArcSpan::new(140.0, 400.0));
        assert_eq!(ArcSpan::for_char_count(21), ArcSpan::new(145.0, 390.0));
        assert_eq!(ArcSpan::for_char_count(22), ArcSpan::new(145.0, 390.0));
        assert_eq!(ArcSpan::for_char_count(20), ArcSpan::new(165.0, 375.0));
        assert_eq!(ArcSpan::for_char_count(12), ArcSpan::new(165.0, 375.0));
        assert_eq!(ArcSpan::for_char_count(1), ArcSpan::new(165.0, 375.0));
    }

    #[test]
    fn distribute_produces_exact_count_and_endpoints() {
        let e = Ellipse::new(16.4, 11.4);
        let span = ArcSpan::new(165.0, 375.0);
        let anchors = distribute(e, span, 12);
        assert_eq!(anchors.len(), 12);
        assert_close(anchors[0].angle_deg, 165.0, 1e-12);
        assert_close(anchors[11].angle_deg, 375.0, 1e-12);
    }

    #[test]
    fn distribute_spacing_is_uniform() {
        let e = Ellipse::new(16.4, 11.4);
        let span = ArcSpan::new(140.0, 400.0);
        let anchors = distribute(e, span, 23);
        let step = (400.0 - 140.0) / 22.0;
        for pair in anchors.windows(2) {
            assert_close(pair[1].angle_deg - pair[0].angle_deg, step, 1e-9);
        }
    }

    #[test]
    fn distribute_zero_is_empty() {
        let e = Ellipse::new(16.4, 11.4);
        assert!(distribute(e, ArcSpan::new(165.0, 375.0), 0).is_empty());
    }

    #[test]
    fn distribute_one_sits_at_the_start_angle() {
        let e = Ellipse::new(16.4, 11.4);
        let anchors = distribute(e, ArcSpan::new(165.0, 375.0), 1);
        assert_eq!(anchors.len(), 1);
        assert_close(anchors[0].angle_deg, 165.0, 1e-12);
        let expected = e.point_at(165.0);
        assert_close(anchors[0].point.x, expected.x, 1e-12);
        assert_close(anchors[0].point.y, expected.y, 1e-12);
    }

    #[test]
    fn anchors_carry_the_local_tangent() {
        let e = Ellipse::new(16.4, 11.4);
        let anchors = distribute(e, ArcSpan::new(165.0, 375.0), 5);
        for anchor in &anchors {
            assert_close(
                anchor.tangent_deg,
                e.tangent_angle_at(anchor.point),
                1e-12,
            );
        }
    }
}
