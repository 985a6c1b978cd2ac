//! Preset list loading.

use crate::store::Preset;

/// Parse the bundled preset list from `assets/presets.ron`.
pub fn load_presets() -> anyhow::Result<Vec<Preset>> {
    let text = super::load_string("presets.ron")?;
    Ok(ron::from_str(&text)?)
}
