//! Font bank construction from the bundled font files.

use anyhow::Context;

use crate::raster::{FontBank, GLYPH_PX};

const CURSIVE_FONT: &str = "fonts/GreatVibes-Regular.ttf";
const SANS_SERIF_FONT: &str = "fonts/Inter-Bold.ttf";
const SERIF_FONT: &str = "fonts/PTSerif-Italic.ttf";

/// Load the three recognized font faces from `assets/fonts/`.
pub fn load_font_bank() -> anyhow::Result<FontBank> {
    let cursive = super::load_binary(CURSIVE_FONT)
        .with_context(|| format!("reading {CURSIVE_FONT}"))?;
    let sans_serif = super::load_binary(SANS_SERIF_FONT)
        .with_context(|| format!("reading {SANS_SERIF_FONT}"))?;
    let serif = super::load_binary(SERIF_FONT).with_context(|| format!("reading {SERIF_FONT}"))?;
    FontBank::from_bytes(&cursive, &sans_serif, &serif, GLYPH_PX)
}
