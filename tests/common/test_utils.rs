//! Shared helpers for the engraving integration tests.
#![allow(dead_code)]

use etch_ngin::{
    data_structures::canvas::Canvas,
    engrave::Engraver,
    raster::GlyphPaint,
    store::{Color, EngravingFont, ObjectShape, Store},
};

/// Advance width of every character under [`MonoGlyphs`].
pub const MONO_ADVANCE: f32 = 10.0;

/// Fixed-advance glyph backend: every character measures 10 px and draws as
/// an 8x10 block. Keeps the tests independent of font files while
/// exercising the same measure/draw contract as the fontdue bank.
pub struct MonoGlyphs;

impl GlyphPaint for MonoGlyphs {
    fn measure(&self, _font: EngravingFont, text: &str) -> f32 {
        text.chars().count() as f32 * MONO_ADVANCE
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        font: EngravingFont,
        text: &str,
        center: (f32, f32),
        _rotation_degrees: f32,
        color: Color,
    ) {
        let width = self.measure(font, text);
        let left = (center.0 - width / 2.0) as i64;
        let top = center.1 as i64 - 5;
        for (index, _) in text.chars().enumerate() {
            let cell = left + index as i64 * MONO_ADVANCE as i64;
            for row in 0..10 {
                for col in 0..8 {
                    canvas.blend(cell + col, top + row, color, 255);
                }
            }
        }
    }
}

/// A small engraver wired to the stub glyph backend.
pub fn test_engraver(resolution: u32, shape: ObjectShape) -> Engraver {
    let _ = env_logger::builder().is_test(true).try_init();
    Engraver::new(resolution, Box::new(MonoGlyphs), shape)
}

/// Default store with the given text, primed for a speed-1 reveal.
pub fn store_with_text(text: &str) -> Store {
    let mut store = Store::default();
    store.laser.text = text.to_string();
    store.laser.speed = 1.0;
    store
}
