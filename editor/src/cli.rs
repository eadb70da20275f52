use std::path::PathBuf;

use clap::Parser;

/// Command line of the scene editor.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scene_editor", version, about = "Interactive scene editor")]
pub struct CliArgs {
    /// Scene file to open on startup. Opened as given, even if it does not exist.
    pub scene: Option<PathBuf>,

    /// Settings file to use instead of data/editor/editor.toml next to the executable.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of render worker threads. Defaults to one less than the available parallelism.
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Log filter, e.g. `debug` or `info,wgpu_core=warn`. `RUST_LOG` takes precedence.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let args = CliArgs::try_parse_from(["scene_editor"]).unwrap();
        assert!(args.scene.is_none());
        assert!(args.config.is_none());
        assert!(args.threads.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_scene_and_options() {
        let args = CliArgs::try_parse_from([
            "scene_editor",
            "scenes/cornell.toml",
            "--threads",
            "3",
            "--log-level",
            "debug",
            "--config",
            "my_editor.toml",
        ])
        .unwrap();
        assert_eq!(args.scene, Some(PathBuf::from("scenes/cornell.toml")));
        assert_eq!(args.threads, Some(3));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("my_editor.toml")));
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(CliArgs::try_parse_from(["scene_editor", "a.toml", "b.toml"]).is_err());
    }

    #[test]
    fn test_threads_must_be_a_number() {
        assert!(CliArgs::try_parse_from(["scene_editor", "--threads", "many"]).is_err());
    }
}
