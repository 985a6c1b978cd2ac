//! Data types of the engraving pipeline.
//!
//! - `canvas` holds the CPU pixel buffers the text is painted into
//! - `texture` mirrors the live canvas into a GPU texture for the renderer
//! - `instance` carries beam/marker transforms to the host renderer

pub mod canvas;
pub mod instance;
pub mod texture;
