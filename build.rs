use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use glob::glob;

/// Copies `data/` next to the built executable, where the editor looks up its
/// settings, style sheet and default scene.
fn main() -> Result<()> {
    for entry in glob("data/**/*")? {
        println!("cargo:rerun-if-changed={}", entry?.display());
    }

    // OUT_DIR is <target>/<profile>/build/<package>-<hash>/out
    let out_dir = env::var("OUT_DIR")?;
    let profile_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .ok_or_else(|| anyhow!("unexpected OUT_DIR layout: {out_dir}"))?;

    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&["data"], profile_dir, &copy_options)?;
    Ok(())
}
