//! etch-ngin
//!
//! A real-time laser-engraving simulation core for transmissive (glass-like)
//! materials. The crate synthesizes an engraving texture by revealing
//! user-supplied text glyph by glyph over a shared 2D atlas, bakes the final
//! result into a persistent buffer, and derives the 3D position of the laser
//! contact point from the same texture-space progress value so that beam and
//! spark effects stay in sync with the reveal.
//!
//! The host application owns the scene graph, camera and material shading;
//! this crate hands it a pixel buffer (optionally mirrored into a GPU
//! texture) plus instance transforms for the effects.
//!
//! High-level modules
//! - `store`: observed configuration state (shapes, laser settings, presets)
//! - `atlas`: logical face to texture-atlas cell mapping per object topology
//! - `raster`: glyph measurement and text painting into the atlas
//! - `engrave`: the animator state machine driving the reveal per tick
//! - `effects`: laser beam and spark particle pool
//! - `data_structures`: pixel canvases, GPU texture hand-off, instance data
//! - `resources`: font and preset loading from the assets directory
//!

pub mod atlas;
pub mod data_structures;
pub mod effects;
pub mod engrave;
pub mod raster;
pub mod resources;
pub mod store;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use engrave::{Engraver, MarkerState, TickOutcome};
