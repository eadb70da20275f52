use clap::Parser;

use scene_editor::{run, CliArgs};

/// Entry point for the application.
///
/// Parses the command line, runs the editor until it quits and exits with its exit code.
fn main() -> anyhow::Result<()> {
    let exit_code = run(CliArgs::parse())?;
    std::process::exit(exit_code);
}
