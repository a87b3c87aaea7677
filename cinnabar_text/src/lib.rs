// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinnabar Text: glyph outlines for seal rendering.
//!
//! This crate is the text-shaping seam of the seal renderer. It does
//! **not** perform shaping, kerning, or line breaking; seal text needs
//! exactly two capabilities, expressed by the [`GlyphSource`] trait:
//!
//! - [`GlyphSource::char_outline`]: one character's fillable outline in
//!   local glyph space,
//! - [`GlyphSource::line_outline`]: a short run of characters laid out
//!   left to right by their advance widths, as one fillable path,
//!
//! plus [`GlyphSource::measure`], which both curved and straight stages
//! use to center outlines on their bounding box before transforming.
//!
//! [`SkrifaGlyphSource`] implements the trait over raw font bytes using
//! Skrifa. Outlines come back in a Y-down frame (Y is flipped from font
//! space) with the baseline origin at `(0, 0)`, so glyphs extend mostly
//! into negative Y.

#![no_std]
#![deny(unsafe_code)]

use core::fmt;

use kurbo::{Affine, BezPath, Rect, Shape as _};
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::GlyphMetrics;
use skrifa::outline::OutlinePen;
use skrifa::{FontRef, MetadataProvider};

/// Fallback advance, as a fraction of the font size, for glyphs whose
/// metrics are unavailable.
const FALLBACK_ADVANCE_FACTOR: f32 = 0.6;

/// Failure to produce a glyph outline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutlineError {
    /// The font bytes could not be parsed as a font.
    InvalidFont,
    /// The font has no usable glyph for this character.
    MissingGlyph(char),
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFont => write!(f, "font data could not be parsed"),
            Self::MissingGlyph(ch) => write!(f, "font has no glyph for {ch:?}"),
        }
    }
}

impl core::error::Error for OutlineError {}

/// Source of fillable glyph outlines and their measurements.
///
/// Implementations produce paths in a local, Y-down glyph space with the
/// baseline origin at `(0, 0)`. Callers own all positioning: outlines
/// carry no transform other than the requested pixel size.
pub trait GlyphSource {
    /// The outline of a single character at `size_px`.
    ///
    /// Characters that map to a glyph without contours (spaces and other
    /// whitespace) yield an empty path rather than an error; filling an
    /// empty path is a no-op.
    fn char_outline(&self, ch: char, size_px: f32) -> Result<BezPath, OutlineError>;

    /// The outline of a whole run of characters at `size_px`, laid out
    /// left to right from the origin using per-glyph advance widths.
    ///
    /// This is single-baseline placement only: no kerning, shaping, or
    /// wrapping.
    fn line_outline(&self, text: &str, size_px: f32) -> Result<BezPath, OutlineError>;

    /// Bounding box of [`GlyphSource::line_outline`] for `text`.
    fn measure(&self, text: &str, size_px: f32) -> Result<Rect, OutlineError> {
        Ok(self.line_outline(text, size_px)?.bounding_box())
    }
}

/// Skrifa-backed [`GlyphSource`] over raw font bytes.
///
/// The font is re-parsed per call; [`FontRef`] construction is cheap and
/// keeping the source free of lifetimes other than the byte slice keeps
/// callers simple.
#[derive(Copy, Clone, Debug)]
pub struct SkrifaGlyphSource<'a> {
    font_bytes: &'a [u8],
}

impl<'a> SkrifaGlyphSource<'a> {
    /// Create a glyph source from raw font bytes, validating that they
    /// parse as a font.
    pub fn new(font_bytes: &'a [u8]) -> Result<Self, OutlineError> {
        FontRef::new(font_bytes).map_err(|_| OutlineError::InvalidFont)?;
        Ok(Self { font_bytes })
    }

    fn font_ref(&self) -> Result<FontRef<'a>, OutlineError> {
        FontRef::new(self.font_bytes).map_err(|_| OutlineError::InvalidFont)
    }

    /// Outline one glyph into `pen` space, or an empty path for glyphs
    /// without contours.
    fn outline_char(
        font_ref: &FontRef<'a>,
        ch: char,
        size_px: f32,
    ) -> Result<BezPath, OutlineError> {
        let gid = font_ref
            .charmap()
            .map(ch)
            .ok_or(OutlineError::MissingGlyph(ch))?;
        let outlines = font_ref.outline_glyphs();
        let Some(outline) = outlines.get(gid) else {
            // Glyph exists but has no outline entry (e.g. whitespace).
            return Ok(BezPath::new());
        };
        let mut pen = BezPen::default();
        outline
            .draw(Size::new(size_px), &mut pen)
            .map_err(|_| OutlineError::MissingGlyph(ch))?;
        Ok(pen.path)
    }
}

impl GlyphSource for SkrifaGlyphSource<'_> {
    fn char_outline(&self, ch: char, size_px: f32) -> Result<BezPath, OutlineError> {
        let font_ref = self.font_ref()?;
        Self::outline_char(&font_ref, ch, size_px)
    }

    fn line_outline(&self, text: &str, size_px: f32) -> Result<BezPath, OutlineError> {
        let font_ref = self.font_ref()?;
        let charmap = font_ref.charmap();
        let metrics = GlyphMetrics::new(&font_ref, Size::new(size_px), LocationRef::default());

        let mut line = BezPath::new();
        let mut x = 0.0_f32;
        for ch in text.chars() {
            let gid = charmap.map(ch).ok_or(OutlineError::MissingGlyph(ch))?;
            let mut glyph = Self::outline_char(&font_ref, ch, size_px)?;
            glyph.apply_affine(Affine::translate((f64::from(x), 0.0)));
            for el in glyph.elements() {
                line.push(*el);
            }
            x += metrics
                .advance_width(gid)
                .unwrap_or(size_px * FALLBACK_ADVANCE_FACTOR);
        }
        Ok(line)
    }
}

/// Outline pen that records into a [`BezPath`], flipping Y so glyphs are
/// upright in the usual screen coordinate system.
#[derive(Default)]
struct BezPen {
    path: BezPath,
}

impl OutlinePen for BezPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), -f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), -f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(
            (f64::from(x1), -f64::from(y1)),
            (f64::from(x), -f64::from(y)),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(x1), -f64::from(y1)),
            (f64::from(x2), -f64::from(y2)),
            (f64::from(x), -f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
