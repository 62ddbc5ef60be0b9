//! Path resolution for the Colloquy data directory.

use colloquy_core::error::{ColloquyError, Result};
use std::path::PathBuf;

/// Returns the default data directory (`<platform data dir>/colloquy`).
///
/// The directory itself is created lazily on first write.
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("colloquy"))
        .ok_or_else(|| ColloquyError::storage("platform data directory could not be determined"))
}
