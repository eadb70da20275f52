//! # Editor
//!
//! Process bootstrap for the scene editor: sizes and starts the render
//! worker pool, brings up the ray-tracing kernel and the optional volumetric
//! engine, configures graphics surface defaults, creates the main window and
//! runs the event loop behind a fault boundary.
//!
//! ## Modules
//!
//! - `cli`: command line arguments.
//! - `config`: `EditorSettings`, loaded from `data/editor/editor.toml`.
//! - `anchor`: the executable directory that resources are resolved against.
//! - `scene_resolver`: choice of the scene opened at startup.
//! - `orchestrator`: the ordered startup phases, generic over the windowing layer.
//! - `window` / `state`: the winit and wgpu windowing layer.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use editor_lib::{run, CliArgs};
//!
//! let exit_code = run(CliArgs::parse()).unwrap();
//! std::process::exit(exit_code);
//! ```
use std::path::Path;

use engines::RayKernel;

mod anchor;
mod cli;
mod config;
mod orchestrator;
mod scene_resolver;
mod state;
mod window;

pub use anchor::{anchored, AnchorPath};
pub use cli::CliArgs;
pub use config::{ConfigError, EditorSettings, DEFAULT_LOG_FILTER, SETTINGS_FILE};
pub use orchestrator::{Orchestrator, Phase, Shutdown, EXIT_FAULT};
pub use scene_resolver::resolve_initial_scene;
pub use window::{EditorApplication, MainWindow, WinitToolkit};

/// Starts the editor and blocks until it quits.
///
/// Settings are read from the `--config` file, or from `data/editor/editor.toml`
/// next to the executable. A missing or malformed settings file falls back
/// to the defaults. Logging is set up from `RUST_LOG`, then `--log-level`,
/// then the settings.
///
/// # Errors
///
/// Returns an error when the engines, the application or the main window
/// cannot be brought up. A failure inside the running event loop is not an
/// error; it is reported and the returned exit code is 1.
pub fn run(args: CliArgs) -> anyhow::Result<i32> {
    let anchor = AnchorPath::resolve();
    let settings_path = match &args.config {
        Some(path) => path.clone(),
        None => anchored(anchor.as_ref(), Path::new(SETTINGS_FILE)),
    };
    let loaded = EditorSettings::load(&settings_path);

    let mut settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => EditorSettings::default(),
    };
    settings.apply_cli_overrides(&args);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_filter())).init();

    match loaded {
        Ok(Some(_)) => log::info!("Loaded settings from {}", settings_path.display()),
        Ok(None) if args.config.is_some() => {
            log::warn!("Settings file {} not found, using defaults", settings_path.display())
        }
        Ok(None) => log::debug!("No settings at {}, using defaults", settings_path.display()),
        Err(err) => log::warn!("{err}; using default settings"),
    }

    let orchestrator = Orchestrator::new(WinitToolkit::default(), settings, anchor);
    let shutdown = orchestrator.run(RayKernel::new(), args.scene)?;
    Ok(shutdown.exit_code)
}
