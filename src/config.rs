use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config '{path}': {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Everything tunable about a demo run. Defaults reproduce the classic
/// setup: 50 circles of radius 5 on an 800×600 window. A JSON config file
/// overrides any subset of fields; unknown keys are rejected so typos fail
/// loudly instead of silently using a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    pub actor_count: usize,
    pub actor_radius: f32,
    /// Extra spacing (beyond the doubled radius) enforced between freshly
    /// spawned actors.
    pub spawn_buffer: f32,
    /// Relative tolerance for the motion update's approximately-zero checks.
    pub motion_rel_tol: f32,
    pub background: [f32; 4],

    /// Frame geometry of the sheet strips under `<assets>/sheets/`.
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames_per_sheet: u32,

    /// Asset root. When set, sheet sprites and sounds are loaded (and must
    /// load — missing assets are fatal). When unset the demo draws tinted
    /// circles and stays silent.
    pub assets: Option<PathBuf>,
    /// Looping background track, relative to the asset root.
    pub soundtrack: Option<PathBuf>,
    pub soundtrack_volume: f64,

    /// Seed for the placement/speed/variant RNG. Unset picks a fresh one.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "homeward".into(),
            width: 800,
            height: 600,
            actor_count: 50,
            actor_radius: 5.0,
            spawn_buffer: 3.0,
            motion_rel_tol: 0.1,
            background: [0.0, 0.0, 0.0, 1.0],
            frame_width: 192,
            frame_height: 192,
            frames_per_sheet: 5,
            assets: None,
            soundtrack: None,
            soundtrack_volume: 0.5,
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}
