//! XDG Base Directory paths for modelpick.
//!
//! Remembered model choices live under the data directory, which follows
//! XDG on every platform the same way gh or kubectl lay out their files.

use std::path::PathBuf;

const APP_DIR: &str = "modelpick";

/// Get the modelpick data directory.
///
/// Returns `$XDG_DATA_HOME/modelpick` if set, otherwise `~/.local/share/modelpick`.
/// Durable provider preferences are written here.
///
/// # Examples
///
/// ```
/// use modelpick_paths::data_dir;
///
/// let data = data_dir();
/// let models = data.join("provider-model-ids.json");
/// ```
pub fn data_dir() -> PathBuf {
    resolve("XDG_DATA_HOME", ".local/share")
}

fn resolve(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        PathBuf::from(base).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_relative).join(APP_DIR)
    } else {
        PathBuf::from(home_relative).join(APP_DIR)
    }
}
