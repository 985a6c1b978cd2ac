//! The engraving animator.
//!
//! A time-driven state machine that advances the glyph reveal, repaints the
//! live canvas every tick, bakes the finished result, and derives the laser
//! marker's surface position from the same progress value.
//!
//! # Lifecycle
//!
//! 1. the host bumps the store nonce and calls [`Engraver::start`]
//! 2. [`Engraver::tick`] runs once per rendered frame with the elapsed time
//!    and the current settings snapshot; each Active tick is a full repaint
//!    of the live canvas from scratch (no ghosting, nothing composited)
//! 3. the tick whose progress reaches 1 rasterizes the full text into the
//!    baked canvas, mirrors it into the live canvas and reports
//!    [`TickOutcome::completed`] exactly once; the host flips
//!    `is_engraving` off in its store
//! 4. while Idle the live canvas mirrors the baked canvas and the marker is
//!    hidden
//!
//! A store nonce the animator has not adopted through `start`/`clear` is the
//! external clear trigger; a shape change is an implicit clear. Both abandon
//! a running session without a completion signal.
//!
//! The animator exclusively owns both canvases and the optional GPU mirror;
//! it never mutates the settings it observes.

use cgmath::{ElementWise, InnerSpace, Vector3, Zero};
use instant::Duration;

use crate::{
    atlas::{self, Topology},
    data_structures::{canvas::Canvas, texture::EngravingTexture},
    raster::{self, GlyphPaint},
    store::{LaserSettings, ObjectSettings, ObjectShape},
};

/// Seconds one character takes to engrave at speed 1.
pub const BASE_CHAR_SECS: f32 = 0.15;

// Keeps the marker within the visible glyph span instead of the full face width.
const TANGENT_DAMPING: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
}

/// Current laser contact point on the object surface, object-local.
#[derive(Clone, Copy, Debug)]
pub struct MarkerState {
    pub position: Vector3<f32>,
    pub visible: bool,
}

impl MarkerState {
    fn hidden() -> Self {
        Self {
            position: Vector3::zero(),
            visible: false,
        }
    }
}

/// What a single tick produced.
#[derive(Clone, Copy, Debug)]
pub struct TickOutcome {
    /// Reveal fraction in [0, 1] after this tick.
    pub progress: f32,
    /// Number of characters currently revealed.
    pub revealed_chars: usize,
    /// True while a session is running and the reveal has not finished.
    /// Beam and sparks key off this flag.
    pub engraving: bool,
    /// Set on exactly one tick per session: the one that baked the result.
    pub completed: bool,
    pub marker: MarkerState,
}

/// The engraving state machine. One per engravable object.
pub struct Engraver {
    glyphs: Box<dyn GlyphPaint>,
    baked: Canvas,
    live: Canvas,
    target: Option<EngravingTexture>,
    phase: Phase,
    progress: f32,
    generation: u64,
    seen_nonce: u64,
    shape: ObjectShape,
    marker: MarkerState,
}

impl Engraver {
    pub fn new(resolution: u32, glyphs: Box<dyn GlyphPaint>, shape: ObjectShape) -> Self {
        Self {
            glyphs,
            baked: Canvas::new(resolution),
            live: Canvas::new(resolution),
            target: None,
            phase: Phase::Idle,
            progress: 0.0,
            generation: 0,
            seen_nonce: 0,
            shape,
            marker: MarkerState::hidden(),
        }
    }

    /// Attach a GPU mirror of the live canvas. The animator refreshes it
    /// after every tick that repainted.
    pub fn attach_target(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let target = EngravingTexture::new(device, queue, self.live.resolution(), "engraving texture");
        target.upload(&self.live);
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<&EngravingTexture> {
        self.target.as_ref()
    }

    /// The canvas the renderer should sample this frame.
    pub fn live(&self) -> &Canvas {
        &self.live
    }

    /// The last fully completed engraving.
    pub fn baked(&self) -> &Canvas {
        &self.baked
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn marker(&self) -> MarkerState {
        self.marker
    }

    /// Begin a session.
    ///
    /// No-op when the text trims to empty or a session is already running;
    /// at most one engraving is in flight at a time.
    pub fn start(&mut self, laser: &LaserSettings) {
        if self.phase == Phase::Active {
            log::warn!("engrave start ignored: a session is already active");
            return;
        }
        if laser.text.trim().is_empty() {
            return;
        }
        self.next_generation(laser);
        self.phase = Phase::Active;
    }

    /// Abandon any session and wipe both buffers.
    ///
    /// Valid in every state and never signals completion. The paired store
    /// action is the one that empties the text field.
    pub fn clear(&mut self, laser: &LaserSettings) {
        self.next_generation(laser);
        self.phase = Phase::Idle;
    }

    /// Advance the reveal by `dt` against the current settings snapshot.
    pub fn tick(&mut self, dt: Duration, object: &ObjectSettings, laser: &LaserSettings) -> TickOutcome {
        let shape_changed = object.shape != self.shape;
        if shape_changed {
            self.shape = object.shape;
        }
        // A nonce that was not adopted through start()/clear() is the
        // external clear trigger. Either signal invalidates the running
        // session; anything still keyed to the old generation is stale from
        // here on.
        if shape_changed || laser.engraving_nonce != self.seen_nonce {
            self.next_generation(laser);
            self.phase = Phase::Idle;
        }

        match self.phase {
            Phase::Idle => {
                self.live.copy_from(&self.baked);
                self.flush();
                self.marker = MarkerState::hidden();
                TickOutcome {
                    progress: self.progress,
                    revealed_chars: 0,
                    engraving: false,
                    completed: false,
                    marker: self.marker,
                }
            }
            Phase::Active => self.tick_active(dt, laser),
        }
    }

    fn tick_active(&mut self, dt: Duration, laser: &LaserSettings) -> TickOutcome {
        let chars: Vec<char> = laser.text.chars().collect();
        let len = chars.len();
        if len == 0 {
            // Nothing to reveal; also guards the duration division below.
            self.progress = 1.0;
        } else {
            let duration = len as f32 * BASE_CHAR_SECS / laser.speed;
            self.progress = (self.progress + dt.as_secs_f32() / duration).min(1.0);
        }
        let revealed = ((self.progress * len as f32).floor() as usize).min(len);
        let partial: String = chars[..revealed].iter().collect();

        self.live.clear();
        raster::paint_faces(&mut self.live, self.glyphs.as_ref(), laser, self.shape, &partial);

        self.marker = self.surface_marker(laser, &partial);

        let completed = self.progress >= 1.0;
        if completed {
            // Bake the authoritative result and mirror it into the live
            // canvas so the last visible frame matches the baked state
            // exactly, whatever the partial repaints rounded to.
            self.baked.clear();
            raster::paint_faces(
                &mut self.baked,
                self.glyphs.as_ref(),
                laser,
                self.shape,
                &laser.text,
            );
            self.live.copy_from(&self.baked);
            self.phase = Phase::Idle;
        }
        self.flush();

        TickOutcome {
            progress: self.progress,
            revealed_chars: revealed,
            engraving: !completed,
            completed,
            marker: self.marker,
        }
    }

    /// Reset progress and buffers for a new generation and adopt the store
    /// nonce that caused it.
    fn next_generation(&mut self, laser: &LaserSettings) {
        self.generation += 1;
        self.seen_nonce = laser.engraving_nonce;
        self.progress = 0.0;
        self.baked.clear();
        self.live.clear();
        self.marker = MarkerState::hidden();
    }

    fn flush(&self) {
        if let Some(target) = &self.target {
            target.upload(&self.live);
        }
    }

    /// Surface position of the laser for the current partial text.
    ///
    /// Only the first selected face is tracked; engraving may paint several
    /// faces per tick but a single marker visualizes the progress.
    fn surface_marker(&self, laser: &LaserSettings, partial: &str) -> MarkerState {
        let Some(&face) = laser.engraving_faces.first() else {
            return MarkerState::hidden();
        };
        let Some(descriptor) = atlas::resolve(Topology::of(self.shape), face) else {
            return MarkerState::hidden();
        };
        let normal = descriptor.normal();
        let tangent = normal.cross(Vector3::unit_y());
        // Top and bottom faces are parallel to world-up and leave no usable
        // cross product; fall back to a fixed horizontal axis.
        let tangent = if tangent.magnitude2() < 1e-6 {
            Vector3::unit_x()
        } else {
            tangent.normalize()
        };
        let full_width = self.glyphs.measure(laser.font, &laser.text);
        // Text is center-aligned, so the reveal front sweeps [-0.5, 0.5]
        // across the rendered span.
        let lateral = if full_width > 0.0 {
            self.glyphs.measure(laser.font, partial) / full_width - 0.5
        } else {
            -0.5
        };
        let position = (normal + tangent * (lateral * TANGENT_DAMPING))
            .mul_element_wise(self.shape.half_extents());
        MarkerState {
            position,
            visible: true,
        }
    }
}
