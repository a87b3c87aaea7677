// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinnabar Trace: an event-recording drawing surface.
//!
//! This crate provides a small, stateless implementation of
//! [`Surface`] for **draw tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It is intended for tests and debugging that want to assert on the
//!   exact sequence of fills and strokes a render produced, including
//!   each draw's transform, paint, and path.
//!
//! Because every [`Event`] is `PartialEq`, two renders of the same input
//! can be compared for identity wholesale, which is how the seal
//! renderer's idempotence property is tested.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

use alloc::vec::Vec;

use cinnabar_imaging::{Color, StrokeStyle, Surface};
use kurbo::{Affine, BezPath};

/// One draw call recorded by [`TraceSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A path fill.
    Fill {
        /// Transform the fill was evaluated under.
        transform: Affine,
        /// Fill color.
        color: Color,
        /// Path in local coordinates, before `transform`.
        path: BezPath,
    },
    /// A path stroke.
    Stroke {
        /// Transform the stroke was evaluated under.
        transform: Affine,
        /// Stroke color.
        color: Color,
        /// Stroke width; the rest of the style is not captured.
        width: f64,
        /// Path in local coordinates, before `transform`.
        path: BezPath,
    },
}

impl Event {
    /// Returns the transform of this event, regardless of kind.
    pub fn transform(&self) -> Affine {
        match self {
            Self::Fill { transform, .. } | Self::Stroke { transform, .. } => *transform,
        }
    }

    /// Returns `true` for [`Event::Fill`].
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::Fill { .. })
    }
}

/// Surface that records draw calls in order instead of producing pixels.
#[derive(Default, Debug)]
pub struct TraceSurface {
    events: Vec<Event>,
}

impl TraceSurface {
    /// Create an empty trace surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, in draw order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded fill events only, in draw order.
    pub fn fills(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_fill())
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Surface for TraceSurface {
    fn fill_path(&mut self, transform: Affine, color: Color, path: &BezPath) {
        self.events.push(Event::Fill {
            transform,
            color,
            path: path.clone(),
        });
    }

    fn stroke_path(
        &mut self,
        transform: Affine,
        color: Color,
        style: &StrokeStyle,
        path: &BezPath,
    ) {
        self.events.push(Event::Stroke {
            transform,
            color,
            width: style.width,
            path: path.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> BezPath {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((1.0, 0.0));
        p.line_to((1.0, 1.0));
        p.line_to((0.0, 1.0));
        p.close_path();
        p
    }

    #[test]
    fn records_draws_in_order() {
        let mut surface = TraceSurface::new();
        let path = unit_square();
        surface.stroke_path(
            Affine::IDENTITY,
            Color::BLACK,
            &StrokeStyle::new(2.0),
            &path,
        );
        surface.fill_path(Affine::scale(3.0), Color::WHITE, &path);

        assert_eq!(surface.events().len(), 2);
        assert!(!surface.events()[0].is_fill());
        assert!(surface.events()[1].is_fill());
        assert_eq!(surface.events()[1].transform(), Affine::scale(3.0));
    }

    #[test]
    fn identical_sequences_compare_equal() {
        let path = unit_square();
        let mut a = TraceSurface::new();
        let mut b = TraceSurface::new();
        for surface in [&mut a, &mut b] {
            surface.fill_path(Affine::translate((4.0, 5.0)), Color::WHITE, &path);
        }
        assert_eq!(a.events(), b.events());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut surface = TraceSurface::new();
        surface.fill_path(Affine::IDENTITY, Color::WHITE, &unit_square());
        surface.clear();
        assert!(surface.events().is_empty());
    }
}
