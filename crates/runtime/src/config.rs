//! Runtime configuration read from the environment.
use std::env;
use std::path::PathBuf;

use crate::repository::StateFormat;

/// Where content and saves live, and how far a drain may run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Data directory for [`armies_content::ContentFactory`]; built-in
    /// tables when unset.
    pub content_dir: Option<PathBuf>,
    pub save_dir: PathBuf,
    pub save_format: StateFormat,
    /// Upper bound on passes per [`crate::Session::drain`].
    pub max_passes: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_PASSES: usize = 256;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARMIES_CONTENT_DIR` - content data directory (default: built-in tables)
    /// - `ARMIES_SAVE_DIR` - save directory (default: platform data dir)
    /// - `ARMIES_SAVE_FORMAT` - `json` or `bincode` (default: json)
    /// - `ARMIES_MAX_PASSES` - drain bound (default: 256, minimum 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("ARMIES_CONTENT_DIR") {
            config.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = env::var_os("ARMIES_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(format) = read_env::<StateFormat>("ARMIES_SAVE_FORMAT") {
            config.save_format = format;
        }
        if let Some(passes) = read_env::<usize>("ARMIES_MAX_PASSES") {
            config.max_passes = passes.max(1);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            save_dir: default_save_dir(),
            save_format: StateFormat::default(),
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }
}

/// Platform data directory for saves.
///
/// - macOS: `~/Library/Application Support/armies/saves`
/// - Linux: `~/.local/share/armies/saves` (or `$XDG_DATA_HOME/armies/saves`)
/// - Windows: `%APPDATA%\armies\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "armies")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
