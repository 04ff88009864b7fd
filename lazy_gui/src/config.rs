// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context configuration.

use std::path::{Path, PathBuf};

use lazy_event_state::{DEFAULT_BUFFER_DELAY_MS, PrecisionLadder};
use lazy_state::StateError;
use lazy_state::undo::DEFAULT_UNDO_DEPTH;
use serde::{Deserialize, Serialize};

/// Settings for a [`Gui`](crate::Gui).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```rust
/// use lazy_gui::GuiConfig;
///
/// let config = GuiConfig::from_json_str(r#"{ "app_name": "MySketch", "undo_depth": 20 }"#).unwrap();
/// assert_eq!(config.undo_depth, 20);
/// assert_eq!(config.keyboard_buffer_delay_ms, 500);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Host application identifier. The root folder is named after it.
    pub app_name: String,
    /// Directory holding save files.
    pub save_dir: PathBuf,
    /// How long typed digits stay in the numpad buffer before they are committed.
    pub keyboard_buffer_delay_ms: u64,
    /// Maximum number of undo entries.
    pub undo_depth: usize,
    /// Remove nodes not declared for this many frames. `None` never removes them.
    pub prune_after_frames: Option<u64>,
    /// Write the autosave on [`Gui::shutdown`](crate::Gui::shutdown).
    pub autosave_on_exit: bool,
    /// Apply the most recent save at startup.
    pub load_latest_save: bool,
    /// Step sizes of float sliders.
    pub precision_ladder: Vec<f32>,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            app_name: "LazyGui".into(),
            save_dir: PathBuf::from("saves"),
            keyboard_buffer_delay_ms: DEFAULT_BUFFER_DELAY_MS,
            undo_depth: DEFAULT_UNDO_DEPTH,
            prune_after_frames: None,
            autosave_on_exit: true,
            load_latest_save: true,
            precision_ladder: PrecisionLadder::default().steps().to_vec(),
        }
    }
}

impl GuiConfig {
    /// Set the application identifier.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set the save directory.
    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    /// Set the numpad buffer delay.
    pub fn with_keyboard_buffer_delay_ms(mut self, delay_ms: u64) -> Self {
        self.keyboard_buffer_delay_ms = delay_ms;
        self
    }

    /// Set the undo depth.
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    /// Set the pruning window.
    pub fn with_prune_after_frames(mut self, frames: Option<u64>) -> Self {
        self.prune_after_frames = frames;
        self
    }

    /// Enable or disable the autosave on exit.
    pub fn with_autosave_on_exit(mut self, enabled: bool) -> Self {
        self.autosave_on_exit = enabled;
        self
    }

    /// Enable or disable loading the latest save at startup.
    pub fn with_load_latest_save(mut self, enabled: bool) -> Self {
        self.load_latest_save = enabled;
        self
    }

    /// Set the float slider step sizes.
    pub fn with_precision_ladder(mut self, steps: &[f32]) -> Self {
        self.precision_ladder = steps.to_vec();
        self
    }

    /// The ladder built from [`precision_ladder`](Self::precision_ladder).
    pub fn ladder(&self) -> PrecisionLadder {
        PrecisionLadder::from_steps(&self.precision_ladder)
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, StateError> {
        let text = std::fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| StateError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_and_defaults() {
        let config = GuiConfig::default()
            .with_app_name("Sketch")
            .with_undo_depth(5)
            .with_prune_after_frames(Some(60))
            .with_precision_ladder(&[1.0, 0.5]);
        assert_eq!(config.app_name, "Sketch");
        assert_eq!(config.undo_depth, 5);
        assert_eq!(config.prune_after_frames, Some(60));
        assert_eq!(config.ladder().steps(), &[0.5, 1.0]);
        assert!(config.autosave_on_exit);
        assert!(GuiConfig::default().prune_after_frames.is_none());
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let path = std::env::temp_dir().join("lazy_gui_config_missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(GuiConfig::from_json_file(&path).unwrap_err().is_not_found());
    }

    #[test]
    fn config_file_round_trip() {
        let path = std::env::temp_dir().join(format!("lazy_gui_config_{}.json", std::process::id()));
        let config = GuiConfig::default().with_keyboard_buffer_delay_ms(250);
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(GuiConfig::from_json_file(&path).unwrap(), config);
        let _ = std::fs::remove_file(&path);
    }
}
