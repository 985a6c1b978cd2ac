//! Observed configuration state for the engraving simulation.
//!
//! The host UI owns these values and mutates them through the action methods
//! on [`Store`]; the animator only ever reads a snapshot per tick. All writes
//! flow one way, from the UI into the store, which keeps the animator
//! independently testable.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

pub use crate::atlas::EngravingFace;

/// RGBA color with 8 bits per channel.
pub type Color = [u8; 4];

/// Shapes the host can display. `Panel` exposes only its front and back
/// faces for engraving; every other shape uses the six-face atlas layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectShape {
    Panel,
    Cube,
    Sphere,
    Torus,
    Prism,
}

impl ObjectShape {
    pub const ALL: [ObjectShape; 5] = [
        ObjectShape::Panel,
        ObjectShape::Cube,
        ObjectShape::Sphere,
        ObjectShape::Torus,
        ObjectShape::Prism,
    ];

    /// Per-axis half-size of the shape in object-local units.
    ///
    /// Round shapes use their radius on every axis. Shapes without a natural
    /// extent on an axis fall back to 1.25, which is where the marker sits on
    /// the triangular prism.
    pub fn half_extents(&self) -> Vector3<f32> {
        match self {
            ObjectShape::Panel => Vector3::new(1.5, 2.0, 0.1),
            ObjectShape::Cube => Vector3::new(1.25, 1.25, 1.25),
            ObjectShape::Sphere | ObjectShape::Torus => Vector3::new(1.5, 1.5, 1.5),
            ObjectShape::Prism => Vector3::new(1.25, 1.25, 1.25),
        }
    }
}

/// Recognized engraving font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngravingFont {
    Cursive,
    SansSerif,
    Serif,
}

impl EngravingFont {
    /// Map a font name from the UI to a style. Unrecognized names fall back
    /// to the bold sans-serif style.
    pub fn parse(name: &str) -> Self {
        match name {
            "Cursive" => EngravingFont::Cursive,
            "Serif" => EngravingFont::Serif,
            _ => EngravingFont::SansSerif,
        }
    }
}

/// How the engraved glyphs read on the material: emissive or dulled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngravingStyle {
    Glow,
    Matte,
}

/// The displayed object and its coarse behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectSettings {
    pub shape: ObjectShape,
    pub scale: f32,
    pub auto_rotate: bool,
}

impl Default for ObjectSettings {
    fn default() -> Self {
        Self {
            shape: ObjectShape::Cube,
            scale: 1.0,
            auto_rotate: true,
        }
    }
}

/// Everything the laser needs: what to engrave, where, and how fast.
///
/// `engraving_nonce` increases on every start and clear; the animator treats
/// it as the generation signal that invalidates stale buffer contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaserSettings {
    pub text: String,
    pub font: EngravingFont,
    pub is_engraving: bool,
    /// Reveal speed multiplier, > 0.
    pub speed: f32,
    pub beam_width: f32,
    /// Engraving depth, fed into the displacement channel.
    pub depth: f32,
    pub pass_count: u32,
    pub engraving_nonce: u64,
    pub engraving_color: Color,
    pub engraving_style: EngravingStyle,
    /// Faces to engrave, in configured order. The first entry is the one the
    /// marker tracks.
    pub engraving_faces: Vec<EngravingFace>,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            text: "ZEN AI".to_string(),
            font: EngravingFont::SansSerif,
            is_engraving: false,
            speed: 0.5,
            beam_width: 0.01,
            depth: 0.5,
            pass_count: 1,
            engraving_nonce: 0,
            engraving_color: [0, 255, 255, 255],
            engraving_style: EngravingStyle::Glow,
            engraving_faces: vec![EngravingFace::Front],
        }
    }
}

impl LaserSettings {
    /// Displacement map scale the host should apply for the current depth.
    pub fn displacement_scale(&self) -> f32 {
        self.depth * 0.05
    }

    /// Metalness the engraved areas read at for the current style.
    pub fn metalness(&self) -> f32 {
        match self.engraving_style {
            EngravingStyle::Matte => 0.5,
            EngravingStyle::Glow => 0.2,
        }
    }

    /// Emissive intensity for the current style.
    pub fn emissive_intensity(&self) -> f32 {
        match self.engraving_style {
            EngravingStyle::Glow => 2.0,
            EngravingStyle::Matte => 0.0,
        }
    }
}

/// The observed state bundle handed into the animator each tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Store {
    pub object: ObjectSettings,
    pub laser: LaserSettings,
}

impl Store {
    /// Begin engraving the current text. No-op when the text trims to empty.
    pub fn start_engraving(&mut self) {
        if self.laser.text.trim().is_empty() {
            return;
        }
        self.laser.is_engraving = true;
        self.laser.engraving_nonce += 1;
    }

    /// Mark the running session finished. Invoked by the host when the
    /// animator reports completion.
    pub fn stop_engraving(&mut self) {
        self.laser.is_engraving = false;
    }

    /// Drop the text and signal the animator to wipe both texture buffers.
    pub fn clear_engraving(&mut self) {
        self.laser.is_engraving = false;
        self.laser.text.clear();
        self.laser.engraving_nonce += 1;
    }

    /// Overlay a preset onto the current settings, field by field.
    pub fn apply_preset(&mut self, preset: &Preset) {
        if let Some(object) = &preset.object {
            if let Some(shape) = object.shape {
                self.object.shape = shape;
            }
            if let Some(scale) = object.scale {
                self.object.scale = scale;
            }
            if let Some(auto_rotate) = object.auto_rotate {
                self.object.auto_rotate = auto_rotate;
            }
        }
        if let Some(laser) = &preset.laser {
            if let Some(text) = &laser.text {
                self.laser.text = text.clone();
            }
            if let Some(font) = laser.font {
                self.laser.font = font;
            }
            if let Some(speed) = laser.speed {
                self.laser.speed = speed;
            }
            if let Some(beam_width) = laser.beam_width {
                self.laser.beam_width = beam_width;
            }
            if let Some(depth) = laser.depth {
                self.laser.depth = depth;
            }
            if let Some(pass_count) = laser.pass_count {
                self.laser.pass_count = pass_count;
            }
            if let Some(color) = laser.engraving_color {
                self.laser.engraving_color = color;
            }
            if let Some(style) = laser.engraving_style {
                self.laser.engraving_style = style;
            }
            if let Some(faces) = &laser.engraving_faces {
                self.laser.engraving_faces = faces.clone();
            }
        }
    }
}

/// Partial object settings carried by a preset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectPatch {
    #[serde(default)]
    pub shape: Option<ObjectShape>,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub auto_rotate: Option<bool>,
}

/// Partial laser settings carried by a preset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LaserPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font: Option<EngravingFont>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub beam_width: Option<f32>,
    #[serde(default)]
    pub depth: Option<f32>,
    #[serde(default)]
    pub pass_count: Option<u32>,
    #[serde(default)]
    pub engraving_color: Option<Color>,
    #[serde(default)]
    pub engraving_style: Option<EngravingStyle>,
    #[serde(default)]
    pub engraving_faces: Option<Vec<EngravingFace>>,
}

/// A named bundle of setting overrides, loaded from `assets/presets.ron`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub object: Option<ObjectPatch>,
    #[serde(default)]
    pub laser: Option<LaserPatch>,
}
