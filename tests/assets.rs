use std::env;
use std::path::{Path, PathBuf};

/// Crate directory holding `tests/assets`
fn assets_in(dir: &Path) -> Option<PathBuf> {
    let assets = dir.join("tests").join("assets");
    if dir.join("Cargo.toml").is_file() && assets.is_dir() {
        Some(assets)
    } else {
        None
    }
}

pub fn find_assets() -> Option<PathBuf> {
    if let Some(v) = assets_in(Path::new(env!("CARGO_MANIFEST_DIR"))) {
        return Some(v);
    }
    let cwd = env::current_dir().ok()?;
    if let Some(v) = assets_in(&cwd) {
        return Some(v);
    }
    // Search backwards from the test executable
    let exec = env::current_exe().ok()?;
    exec.ancestors().find_map(assets_in)
}

/// Font file shipped with the tests
#[allow(dead_code)]
pub fn test_font() -> PathBuf {
    find_assets()
        .map(|dir| dir.join("DejaVuSans.ttf"))
        .expect("tests/assets not found")
}
