//! Loading of external assets: font binaries and preset data.
//!
//! Everything resolves relative to the `assets/` directory next to the
//! running binary, which is where the build script copies the bundled files.

pub mod fonts;
pub mod presets;

use std::path::Path;

pub fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = Path::new("./").join("assets").join(file_name);
    Ok(std::fs::read_to_string(path)?)
}

pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = Path::new("./").join("assets").join(file_name);
    Ok(std::fs::read(path)?)
}
