use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::warn;

/// Runtime settings, read from an optional `hueguess.ron` next to the
/// binary (or at `$HUEGUESS_CONFIG`). Every field has a default, so the
/// file can be absent or partial.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub font: FontConfig,
    pub timing: TimingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            font: FontConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 600,
            title: "Hue Guess!".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit path to a .ttf/.otf file. When unset, a list of common
    /// system font locations is probed instead.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// How long Memory mode shows the target before hiding it.
    pub memory_hide_ms: u64,
    /// How long an achievement toast stays on screen.
    pub notice_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            memory_hide_ms: 800,
            notice_secs: 3,
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {}", e))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {}", e))
    }

    /// Default config when the file is missing; a present-but-broken file
    /// also falls back, with a warning.
    pub fn load_or_default() -> Self {
        let path = env::var_os("HUEGUESS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("hueguess.ron"));
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }
}
