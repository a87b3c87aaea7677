// Copyright 2026 the Cinnabar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders two sample seals to PNG files.
//!
//! Usage: `seal_demo <font.ttf> [out_dir]`. The font must cover CJK
//! ideographs (e.g. a Source Han / Noto CJK face).

use cinnabar_imaging_vello_cpu::VelloCpuSurface;
use cinnabar_seal::{StampSpec, render_stamp};
use cinnabar_text::SkrifaGlyphSource;

fn samples() -> Vec<(&'static str, StampSpec)> {
    vec![
        (
            "seal_bank",
            StampSpec {
                corp_name: "中信百信银行股份有限公司".into(),
                credit_code: "5001080489655".into(),
                stamp_text: "贷款专用章".into(),
                stamp_no: Some("1".into()),
                inner_border: false,
                scale: 6.0,
            },
        ),
        (
            "seal_finance",
            StampSpec {
                corp_name: "吉林省消费金融有限公司".into(),
                credit_code: "5001080489655".into(),
                stamp_text: "贷款专用章".into(),
                stamp_no: None,
                inner_border: true,
                scale: 6.0,
            },
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .ok_or("usage: seal_demo <font.ttf> [out_dir]")?;
    let out_dir = args.next().unwrap_or_else(|| String::from("."));

    let font_bytes = std::fs::read(&font_path)?;
    let glyphs = SkrifaGlyphSource::new(&font_bytes)?;

    for (name, spec) in samples() {
        let side = u16::try_from(spec.canvas_side())?;
        let mut surface = VelloCpuSurface::new(side, side);
        render_stamp(&spec, &glyphs, &mut surface)?;
        let path = format!("{out_dir}/{name}.png");
        std::fs::write(&path, surface.into_png()?)?;
        eprintln!("Wrote {path}");
    }
    Ok(())
}
