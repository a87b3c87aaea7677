// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cinnabar Seal: elliptical company-seal composition.
//!
//! This crate turns a [`StampSpec`] into draw calls on a
//! [`Surface`]: a stroked border ellipse, the company name
//! curved along a smaller interior ellipse, a horizontally centered stamp
//! label, and a credit-code line beneath it. Glyph outlines come from a
//! [`GlyphSource`]; rasterization and encoding live behind the
//! [`Surface`] seam.
//!
//! # Curved text
//!
//! The heart of the crate is per-glyph placement: anchors are evenly
//! distributed over an arc of the interior ellipse (one per character),
//! each glyph outline is centered on its own bounding box, rotated by the
//! local tangent angle, and translated to its anchor. The three steps are
//! composed into a single immutable [`kurbo::Affine`] per glyph; there
//! is no shared transform stack to save and restore.
//!
//! Two anchors near the arc's extremities receive fixed rotation
//! corrections ([`FIRST_ANCHOR_CORRECTION_DEG`],
//! [`TWELFTH_ANCHOR_CORRECTION_DEG`]); see their docs.
//!
//! # Stages
//!
//! [`render_stamp`] runs a fixed stage order: border → curved name →
//! center label → credit code → optional seal number. A stage whose text
//! is empty (or absent, for the seal number) is skipped without error;
//! any glyph-outline failure aborts the whole render. Rendering the same
//! spec twice against the same collaborators produces identical draw
//! sequences.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use cinnabar_geometry::{Anchor, ArcSpan, Ellipse, distribute};
use cinnabar_imaging::{Color, StrokeStyle, Surface, compose};
use cinnabar_text::{GlyphSource, OutlineError};
use kurbo::{Affine, Shape as _, Vec2};

/// Rotation fix-up, in degrees, for the curved name's first character.
///
/// The generic tangent formula produces a visually wrong orientation for
/// the anchor at the arc's start extremity. This constant is an empirical
/// correction tuned against the original 12-character sample name; it is
/// preserved bit-for-bit rather than re-derived, and may not generalize
/// to other name lengths.
pub const FIRST_ANCHOR_CORRECTION_DEG: f64 = 135.2;

/// Rotation fix-up, in degrees, for the curved name's twelfth character
/// (character index 11).
///
/// Companion to [`FIRST_ANCHOR_CORRECTION_DEG`] for the anchor near the
/// arc's end extremity in the original sample; preserved bit-for-bit.
pub const TWELFTH_ANCHOR_CORRECTION_DEG: f64 = 15.7;

/// Character index the twelfth-anchor correction applies to.
const TWELFTH_ANCHOR_INDEX: usize = 11;

// Seal sizing, in canvas units; everything is multiplied by
// `StampSpec::scale` at render time. The canvas is an 80×80-unit square
// with the ellipse frame centered in it.
const CANVAS_SIDE: f64 = 80.0;
const BORDER_SEMI_MAJOR: f64 = 19.5;
const BORDER_SEMI_MINOR: f64 = 14.5;
const BORDER_STROKE_WIDTH: f64 = 1.0;
const INNER_BORDER_SEMI_MAJOR: f64 = 18.5;
const INNER_BORDER_SEMI_MINOR: f64 = 13.5;
const INNER_BORDER_STROKE_WIDTH: f64 = 0.5;
const NAME_SEMI_MAJOR: f64 = 16.4;
const NAME_SEMI_MINOR: f64 = 11.4;
const NAME_FONT_SIZE: f32 = 3.3158;
const LABEL_FONT_SIZE: f32 = 2.201;
const LABEL_V_SCALE: f64 = 1.6487;
const CODE_FONT_SIZE: f32 = 2.273;
const CODE_V_SCALE: f64 = 1.3121;
const CODE_OFFSET_Y: f64 = 7.5;
const NUMBER_FONT_SIZE: f32 = 1.873;
const NUMBER_V_SCALE: f64 = 1.9442;
const NUMBER_OFFSET_Y: f64 = 11.1;

/// Flattening tolerance for the stroked border ellipses.
const PATH_TOLERANCE: f64 = 0.1;

/// Seal ink: opaque red on a transparent canvas.
const INK: Color = Color::from_rgb8(255, 0, 0);

/// Immutable input to one seal render.
#[derive(Clone, Debug, PartialEq)]
pub struct StampSpec {
    /// Company name, curved along the interior ellipse. Empty skips the
    /// curved-text stage.
    pub corp_name: String,
    /// Credit code / tax number line below the label. Empty skips it.
    pub credit_code: String,
    /// Center label (e.g. a usage designation). Empty skips it.
    pub stamp_text: String,
    /// Optional seal number, rendered as `(number)` below the credit
    /// code. `None` disables the stage entirely.
    pub stamp_no: Option<String>,
    /// Whether to stroke a thinner inner border just inside the border
    /// ellipse.
    pub inner_border: bool,
    /// Uniform scale factor; the canvas is an `80·scale` square.
    pub scale: f32,
}

impl StampSpec {
    /// Side length of the square output canvas, in pixels.
    pub fn canvas_side(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped non-negative; sides far below u32::MAX"
        )]
        let side = (CANVAS_SIDE * f64::from(self.scale)).round().max(0.0) as u32;
        side
    }
}

impl Default for StampSpec {
    fn default() -> Self {
        Self {
            corp_name: String::new(),
            credit_code: String::new(),
            stamp_text: String::new(),
            stamp_no: None,
            inner_border: false,
            scale: 1.0,
        }
    }
}

/// Failure to render a seal.
///
/// Degenerate *inputs* (empty text fields, zero glyph count) are not
/// errors; their stages are skipped. Errors come from collaborators,
/// and any of them aborts the whole render; there is no partial-seal
/// recovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The glyph source failed to produce an outline.
    Outline(OutlineError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline(err) => write!(f, "glyph outline failed: {err}"),
        }
    }
}

impl core::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Outline(err) => Some(err),
        }
    }
}

impl From<OutlineError> for RenderError {
    fn from(err: OutlineError) -> Self {
        Self::Outline(err)
    }
}

/// Rotation correction, in degrees, for the curved-name character at
/// `char_index`.
///
/// Zero everywhere except the two fixed anchor roles documented on
/// [`FIRST_ANCHOR_CORRECTION_DEG`] and
/// [`TWELFTH_ANCHOR_CORRECTION_DEG`].
pub fn rotation_correction_deg(char_index: usize) -> f64 {
    match char_index {
        0 => FIRST_ANCHOR_CORRECTION_DEG,
        TWELFTH_ANCHOR_INDEX => TWELFTH_ANCHOR_CORRECTION_DEG,
        _ => 0.0,
    }
}

/// Place one character at an arc anchor and fill it.
///
/// The glyph outline is centered on its own bounding box (so rotation
/// pivots on the glyph's visual center rather than its baseline origin),
/// rotated by the anchor's tangent angle plus `correction_deg`, and
/// translated to the anchor point. `frame` maps the ellipse-centered
/// coordinate frame into canvas coordinates.
///
/// Characters without contours (whitespace) are a no-op. An outline
/// failure propagates and aborts the whole seal.
pub fn place_glyph<S, G>(
    surface: &mut S,
    glyphs: &G,
    frame: Affine,
    ch: char,
    size_px: f32,
    anchor: Anchor,
    correction_deg: f64,
    ink: Color,
) -> Result<(), RenderError>
where
    S: Surface,
    G: GlyphSource,
{
    let outline = glyphs.char_outline(ch, size_px)?;
    if outline.elements().is_empty() {
        return Ok(());
    }
    let center = outline.bounding_box().center();
    let rotation_rad = (anchor.tangent_deg + correction_deg).to_radians();
    let transform = frame
        * compose(anchor.point.to_vec2(), rotation_rad, Vec2::new(1.0, 1.0))
        * Affine::translate(-center.to_vec2());
    surface.fill_path(transform, ink, &outline);
    Ok(())
}

/// Render one seal onto `surface`, consuming glyph outlines from
/// `glyphs`.
///
/// Stages run in a fixed order (border ellipse(s), curved company name,
/// center label, credit code, optional seal number), each drawing
/// relative to the ellipse center, which sits at the middle of the
/// `80·scale` canvas. The surface is expected to start transparent and
/// is exclusively owned by this render.
pub fn render_stamp<S, G>(spec: &StampSpec, glyphs: &G, surface: &mut S) -> Result<(), RenderError>
where
    S: Surface,
    G: GlyphSource,
{
    SealComposer::new(spec, glyphs, surface).render()
}

/// Staged seal renderer over a surface and a glyph source.
struct SealComposer<'a, S, G> {
    spec: &'a StampSpec,
    glyphs: &'a G,
    surface: &'a mut S,
    /// Per-render uniform scale.
    scale: f64,
    /// Maps the ellipse-centered frame into canvas coordinates.
    frame: Affine,
}

impl<'a, S, G> SealComposer<'a, S, G>
where
    S: Surface,
    G: GlyphSource,
{
    fn new(spec: &'a StampSpec, glyphs: &'a G, surface: &'a mut S) -> Self {
        let scale = f64::from(spec.scale);
        let half_side = 0.5 * CANVAS_SIDE * scale;
        Self {
            spec,
            glyphs,
            surface,
            scale,
            frame: Affine::translate((half_side, half_side)),
        }
    }

    fn render(&mut self) -> Result<(), RenderError> {
        let spec = self.spec;
        self.stroke_border();
        self.draw_curved_name()?;
        self.draw_centered_line(&spec.stamp_text, LABEL_FONT_SIZE, LABEL_V_SCALE, 0.0)?;
        self.draw_centered_line(&spec.credit_code, CODE_FONT_SIZE, CODE_V_SCALE, CODE_OFFSET_Y)?;
        if let Some(no) = &spec.stamp_no {
            let line = format!("({no})");
            self.draw_centered_line(&line, NUMBER_FONT_SIZE, NUMBER_V_SCALE, NUMBER_OFFSET_Y)?;
        }
        Ok(())
    }

    /// Stage 1: the border ellipse, and optionally a thinner inner
    /// border inset inside it.
    fn stroke_border(&mut self) {
        self.stroke_centered_ellipse(BORDER_SEMI_MAJOR, BORDER_SEMI_MINOR, BORDER_STROKE_WIDTH);
        if self.spec.inner_border {
            self.stroke_centered_ellipse(
                INNER_BORDER_SEMI_MAJOR,
                INNER_BORDER_SEMI_MINOR,
                INNER_BORDER_STROKE_WIDTH,
            );
        }
    }

    fn stroke_centered_ellipse(&mut self, semi_major: f64, semi_minor: f64, width: f64) {
        let path = kurbo::Ellipse::new(
            (0.0, 0.0),
            (semi_major * self.scale, semi_minor * self.scale),
            0.0,
        )
        .to_path(PATH_TOLERANCE);
        let style = StrokeStyle::new(width * self.scale);
        self.surface.stroke_path(self.frame, INK, &style, &path);
    }

    /// Stage 2: the company name curved along the interior ellipse, one
    /// glyph per anchor in increasing-angle (left-to-right) order.
    fn draw_curved_name(&mut self) -> Result<(), RenderError> {
        let chars: Vec<char> = self.spec.corp_name.chars().collect();
        if chars.is_empty() {
            return Ok(());
        }
        let span = ArcSpan::for_char_count(chars.len());
        let ellipse = Ellipse::new(NAME_SEMI_MAJOR * self.scale, NAME_SEMI_MINOR * self.scale);
        let size_px = NAME_FONT_SIZE * self.spec.scale;
        for (index, (ch, anchor)) in chars
            .iter()
            .zip(distribute(ellipse, span, chars.len()))
            .enumerate()
        {
            place_glyph(
                self.surface,
                self.glyphs,
                self.frame,
                *ch,
                size_px,
                anchor,
                rotation_correction_deg(index),
                INK,
            )?;
        }
        Ok(())
    }

    /// Stages 3–5: a straight text line centered on the vertical axis.
    ///
    /// The line outline is centered on its bounding box, stretched
    /// vertically by `v_scale` about the origin, then translated
    /// `offset_y` units below the ellipse center. Empty text skips the
    /// stage.
    fn draw_centered_line(
        &mut self,
        text: &str,
        font_size: f32,
        v_scale: f64,
        offset_y: f64,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        let outline = self.glyphs.line_outline(text, font_size * self.spec.scale)?;
        if outline.elements().is_empty() {
            return Ok(());
        }
        let center = outline.bounding_box().center();
        let transform = self.frame
            * compose(
                Vec2::new(0.0, offset_y * self.scale),
                0.0,
                Vec2::new(1.0, v_scale),
            )
            * Affine::translate(-center.to_vec2());
        self.surface.fill_path(transform, INK, &outline);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_side_scales_the_base_square() {
        let spec = StampSpec {
            scale: 6.0,
            ..StampSpec::default()
        };
        assert_eq!(spec.canvas_side(), 480);
        let spec = StampSpec::default();
        assert_eq!(spec.canvas_side(), 80);
    }

    #[test]
    fn corrections_apply_only_at_fixed_indices() {
        assert_eq!(rotation_correction_deg(0), FIRST_ANCHOR_CORRECTION_DEG);
        assert_eq!(rotation_correction_deg(11), TWELFTH_ANCHOR_CORRECTION_DEG);
        for index in [1, 2, 10, 12, 22, 100] {
            assert_eq!(rotation_correction_deg(index), 0.0, "index {index}");
        }
    }

    #[test]
    fn render_error_wraps_outline_failures() {
        let err = RenderError::from(OutlineError::MissingGlyph('罕'));
        assert_eq!(err, RenderError::Outline(OutlineError::MissingGlyph('罕')));
        assert!(!format!("{err}").is_empty(), "display text");
    }
}
