//! Editor settings.
//!
//! Settings come from `data/editor/editor.toml` next to the executable (or
//! the file passed with `--config`). Every key is optional; command line
//! flags override the file.
//!
//! ```toml
//! title = "Scene Editor"
//! window_margin = 100
//! threads = 6
//!
//! [surface]
//! samples = 4
//! buffering = "double"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use engines::WorkerCount;
use wgpu_utils::SurfaceConfig;

use crate::cli::CliArgs;

/// Settings file, relative to the executable directory.
pub const SETTINGS_FILE: &str = "data/editor/editor.toml";

/// Log filter used when neither `RUST_LOG`, `--log-level` nor the settings name one.
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Main window title.
    pub title: String,
    /// Gap in pixels between the main window and each edge of the primary screen.
    pub window_margin: u32,
    /// Style sheet, relative to the executable directory.
    pub style_sheet: PathBuf,
    /// Scene opened when none is given on the command line, relative to the executable directory.
    pub default_scene: PathBuf,
    /// Worker thread override. `None` sizes the pool from the available parallelism.
    pub threads: Option<usize>,
    /// Switch the working directory to the executable directory at startup.
    pub anchor_working_directory: bool,
    pub log_level: Option<String>,
    pub surface: SurfaceConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            title: "Scene Editor".to_string(),
            window_margin: 100,
            style_sheet: PathBuf::from("data/editor/style/style.toml"),
            default_scene: PathBuf::from("data/materialtest/materialtest.toml"),
            threads: None,
            anchor_working_directory: true,
            log_level: None,
            surface: SurfaceConfig::default(),
        }
    }
}

impl EditorSettings {
    /// Reads settings from `path`. A missing file is not an error and yields `None`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text).map(Some).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(threads) = args.threads {
            self.threads = Some(threads);
        }
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
    }

    pub fn worker_count(&self) -> WorkerCount {
        match self.threads {
            Some(threads) => WorkerCount::exact(threads),
            None => WorkerCount::ideal(),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use wgpu_utils::Buffering;

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(EditorSettings::parse("").unwrap(), EditorSettings::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = EditorSettings::parse(
            r#"
            title = "Tungsten"
            threads = 6

            [surface]
            samples = 8
            buffering = "triple"
            "#,
        )
        .unwrap();
        assert_eq!(settings.title, "Tungsten");
        assert_eq!(settings.threads, Some(6));
        assert_eq!(settings.window_margin, 100);
        assert_eq!(settings.surface.samples, 8);
        assert_eq!(settings.surface.buffering, Buffering::Triple);
        assert_eq!(settings.surface.depth_bits, 24);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EditorSettings::load(&dir.path().join("editor.toml")).unwrap().is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        fs::write(&path, "window_margin = 40\nanchor_working_directory = false").unwrap();

        let settings = EditorSettings::load(&path).unwrap().unwrap();
        assert_eq!(settings.window_margin, 40);
        assert!(!settings.anchor_working_directory);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        fs::write(&path, "window_margin = \"wide\"").unwrap();

        let err = EditorSettings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("editor.toml"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut settings = EditorSettings::parse("threads = 6\nlog_level = \"warn\"").unwrap();
        let args = CliArgs {
            threads: Some(2),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        settings.apply_cli_overrides(&args);
        assert_eq!(settings.threads, Some(2));
        assert_eq!(settings.log_filter(), "debug");
    }

    #[test]
    fn test_absent_cli_flags_keep_file_values() {
        let mut settings = EditorSettings::parse("threads = 6").unwrap();
        settings.apply_cli_overrides(&CliArgs::default());
        assert_eq!(settings.threads, Some(6));
        assert_eq!(settings.log_filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_worker_count() {
        let mut settings = EditorSettings::default();
        assert_eq!(settings.worker_count(), WorkerCount::ideal());

        settings.threads = Some(0);
        assert_eq!(settings.worker_count().get(), 1);
        settings.threads = Some(5);
        assert_eq!(settings.worker_count().get(), 5);
    }

    #[test]
    fn test_bundled_settings_match_defaults() {
        let settings = EditorSettings::parse(include_str!("../../data/editor/editor.toml")).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }
}
