// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinnabar Imaging: the drawing-surface seam for seal rendering.
//!
//! This crate defines the small [`Surface`] trait that seal composition
//! draws through, plus transform helpers. Concrete rasterizers (the CPU
//! backend in `cinnabar_imaging_vello_cpu`, the event recorder in
//! `cinnabar_trace`) implement [`Surface`]; the composing code never
//! talks to a renderer directly.
//!
//! # No transform stack
//!
//! Unlike classic 2D canvases there is **no save/restore transform
//! stack**: every draw call takes the complete transform it should be
//! evaluated under as an explicit, immutable [`Affine`] value, typically
//! built with [`compose`]. A forgotten restore cannot corrupt later
//! draws, and each glyph placement is independently testable from its
//! transform alone.

#![no_std]
#![deny(unsafe_code)]

use kurbo::{Affine, BezPath, Vec2};
pub use peniko::Color;

/// Stroke parameters used by [`Surface::stroke_path`].
///
/// This is a re-export of [`kurbo::Stroke`], which captures width,
/// joins, caps, and related stroke parameters.
pub type StrokeStyle = kurbo::Stroke;

/// A drawing surface that can fill and stroke paths under an explicit
/// affine transform.
///
/// The surface owns the pixels (or the event log) for exactly one render;
/// calls mutate nothing but the surface itself. Transforms map the path's
/// local coordinates into surface coordinates and are not retained
/// between calls.
pub trait Surface {
    /// Fill `path` with `color`, with `transform` applied to the path.
    fn fill_path(&mut self, transform: Affine, color: Color, path: &BezPath);

    /// Stroke `path` with `color` and `style`, with `transform` applied
    /// to the path.
    fn stroke_path(&mut self, transform: Affine, color: Color, style: &StrokeStyle, path: &BezPath);
}

/// Compose a translate → rotate → scale transform as one immutable value.
///
/// The result maps local coordinates by first scaling about the local
/// origin, then rotating about it, then translating (the conventional
/// `T·R·S` order). Rotation is in radians, positive turning
/// from +X toward +Y (clockwise in the usual Y-down raster frame).
#[inline]
pub fn compose(translation: Vec2, rotation_rad: f64, scale: Vec2) -> Affine {
    Affine::translate(translation)
        * Affine::rotate(rotation_rad)
        * Affine::scale_non_uniform(scale.x, scale.y)
}
