// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU-backed implementation of the Cinnabar drawing surface.
//!
//! [`VelloCpuSurface`] implements [`Surface`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`], so a composed seal can be rasterized to
//! RGBA pixels without a GPU, and (with the `std` feature) encoded
//! straight to PNG.
//!
//! The surface starts fully transparent; seal ink is composited over it,
//! which is what lets the output be stamped onto documents.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::vec::Vec;
use core::fmt;

use cinnabar_imaging::{Color, StrokeStyle, Surface};
use kurbo::{Affine, BezPath, Cap, Join, PathEl};
use vello_cpu::kurbo::{
    Affine as CpuAffine, BezPath as CpuBezPath, Cap as CpuCap, Join as CpuJoin,
    Stroke as CpuStroke,
};
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};

/// Rasterizing [`Surface`] over a fixed-size transparent canvas.
pub struct VelloCpuSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
}

impl fmt::Debug for VelloCpuSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl VelloCpuSurface {
    /// Create a transparent canvas of the given pixel dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let settings = RenderSettings {
            // Force the u8 pipeline so output bytes are stable across
            // feature configurations.
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        Self {
            ctx: RenderContext::new_with(width, height, settings),
            width,
            height,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Rasterize everything drawn so far into unpremultiplied RGBA8
    /// bytes, row-major, consuming the surface.
    pub fn into_rgba(mut self) -> Vec<u8> {
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let unpremul = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }

    /// Rasterize and encode as an RGBA PNG, consuming the surface.
    #[cfg(feature = "std")]
    pub fn into_png(self) -> Result<Vec<u8>, PngEncodeError> {
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        let rgba = self.into_rgba();

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
        Ok(out)
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    /// `vello_cpu` vendors its own `kurbo`, so paths are rebuilt element
    /// by element.
    fn path_to_cpu(path: &BezPath) -> CpuBezPath {
        let mut out = CpuBezPath::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
                PathEl::LineTo(p) => out.line_to((p.x, p.y)),
                PathEl::QuadTo(p1, p) => out.quad_to((p1.x, p1.y), (p.x, p.y)),
                PathEl::CurveTo(p1, p2, p) => {
                    out.curve_to((p1.x, p1.y), (p2.x, p2.y), (p.x, p.y));
                }
                PathEl::ClosePath => out.close_path(),
            }
        }
        out
    }

    fn stroke_to_cpu(style: &StrokeStyle) -> CpuStroke {
        let mut stroke = CpuStroke::new(style.width);
        stroke.miter_limit = style.miter_limit;
        stroke.join = match style.join {
            Join::Bevel => CpuJoin::Bevel,
            Join::Miter => CpuJoin::Miter,
            Join::Round => CpuJoin::Round,
        };
        stroke.start_cap = match style.start_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        stroke.end_cap = match style.end_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        stroke
    }
}

impl Surface for VelloCpuSurface {
    fn fill_path(&mut self, transform: Affine, color: Color, path: &BezPath) {
        self.ctx.set_transform(Self::affine_to_cpu(transform));
        self.ctx.set_paint(color);
        self.ctx.fill_path(&Self::path_to_cpu(path));
    }

    fn stroke_path(&mut self, transform: Affine, color: Color, style: &StrokeStyle, path: &BezPath) {
        self.ctx.set_transform(Self::affine_to_cpu(transform));
        self.ctx.set_paint(color);
        self.ctx.set_stroke(Self::stroke_to_cpu(style));
        self.ctx.stroke_path(&Self::path_to_cpu(path));
    }
}

/// PNG encoding failed.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct PngEncodeError(png::EncodingError);

#[cfg(feature = "std")]
impl fmt::Display for PngEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "png encoding failed: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl core::error::Error for PngEncodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[cfg(feature = "std")]
impl From<png::EncodingError> for PngEncodeError {
    fn from(err: png::EncodingError) -> Self {
        Self(err)
    }
}
