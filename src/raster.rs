//! Text rasterization into the engraving atlas.
//!
//! [`paint_faces`] places a string on every selected face's atlas cell;
//! [`GlyphPaint`] is the seam between the animator and a concrete glyph
//! backend so the state machine can be exercised without font files.
//! [`FontBank`] is the production backend built on fontdue.

use cgmath::{Angle, Deg};

use crate::{
    atlas::{self, TILE_SIZE, Topology},
    data_structures::canvas::Canvas,
    store::{Color, EngravingFont, LaserSettings, ObjectShape},
};

/// Pixel height glyphs are rasterized at.
pub const GLYPH_PX: f32 = 256.0;

/// Glyph measurement and drawing, abstracted over the font backend.
///
/// `measure` returns the advance width of `text` in pixels at the engraving
/// size. `draw` paints `text` centered on `center` (horizontally and on the
/// middle of the line box), rotated by `rotation_degrees` around that point.
pub trait GlyphPaint {
    fn measure(&self, font: EngravingFont, text: &str) -> f32;

    fn draw(
        &self,
        canvas: &mut Canvas,
        font: EngravingFont,
        text: &str,
        center: (f32, f32),
        rotation_degrees: f32,
        color: Color,
    );
}

/// Fontdue-backed glyph painting with one face per recognized style.
pub struct FontBank {
    cursive: fontdue::Font,
    sans_serif: fontdue::Font,
    serif: fontdue::Font,
    px: f32,
}

impl FontBank {
    /// Parse the three font faces from raw TTF/OTF data.
    pub fn from_bytes(cursive: &[u8], sans_serif: &[u8], serif: &[u8], px: f32) -> anyhow::Result<Self> {
        let parse = |bytes: &[u8]| {
            fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
                .map_err(|e| anyhow::anyhow!("font parse failed: {e}"))
        };
        Ok(Self {
            cursive: parse(cursive)?,
            sans_serif: parse(sans_serif)?,
            serif: parse(serif)?,
            px,
        })
    }

    fn face(&self, font: EngravingFont) -> &fontdue::Font {
        match font {
            EngravingFont::Cursive => &self.cursive,
            EngravingFont::SansSerif => &self.sans_serif,
            EngravingFont::Serif => &self.serif,
        }
    }
}

impl GlyphPaint for FontBank {
    fn measure(&self, font: EngravingFont, text: &str) -> f32 {
        let face = self.face(font);
        text.chars()
            .map(|ch| face.metrics(ch, self.px).advance_width)
            .sum()
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        font: EngravingFont,
        text: &str,
        center: (f32, f32),
        rotation_degrees: f32,
        color: Color,
    ) {
        let face = self.face(font);
        let width = self.measure(font, text);
        // Middle baseline: the line box's vertical center sits on `center`.
        let (ascent, descent) = face
            .horizontal_line_metrics(self.px)
            .map(|line| (line.ascent, line.descent))
            .unwrap_or((self.px * 0.8, -(self.px * 0.2)));
        let baseline = (ascent + descent) / 2.0;
        let (sin, cos) = Deg(rotation_degrees).sin_cos();

        let mut pen = -width / 2.0;
        for ch in text.chars() {
            let (metrics, bitmap) = face.rasterize(ch, self.px);
            let left = pen + metrics.xmin as f32;
            let top = baseline - metrics.ymin as f32 - metrics.height as f32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    if coverage == 0 {
                        continue;
                    }
                    // Offsets are relative to the anchor so rotation happens
                    // around the cell center, like the canvas transform the
                    // tile layout was designed for.
                    let dx = left + col as f32;
                    let dy = top + row as f32;
                    let x = center.0 + dx * cos - dy * sin;
                    let y = center.1 + dx * sin + dy * cos;
                    canvas.blend(x.round() as i64, y.round() as i64, color, coverage);
                }
            }
            pen += metrics.advance_width;
        }
    }
}

/// Paint `text` onto every selected face's atlas cell.
///
/// The caller clears the canvas beforehand; this function only composites.
/// Faces without a descriptor under the shape's topology are skipped
/// silently. The cell center flips the v coordinate because pixel row 0 is
/// the top of the image while UV v = 0 is the bottom.
pub fn paint_faces(
    canvas: &mut Canvas,
    glyphs: &dyn GlyphPaint,
    laser: &LaserSettings,
    shape: ObjectShape,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let topology = Topology::of(shape);
    let size = canvas.resolution() as f32;
    let half_tile = TILE_SIZE / 2.0;
    for face in &laser.engraving_faces {
        let Some(descriptor) = atlas::resolve(topology, *face) else {
            log::debug!("face {face:?} has no cell under {topology:?}, skipping");
            continue;
        };
        let center_x = (descriptor.tile_origin.0 + half_tile) * size;
        let center_y = (1.0 - (descriptor.tile_origin.1 + half_tile)) * size;
        glyphs.draw(
            canvas,
            laser.font,
            text,
            (center_x, center_y),
            descriptor.rotation_degrees,
            laser.engraving_color,
        );
    }
}
