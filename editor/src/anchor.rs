use std::io;
use std::path::{Path, PathBuf};

/// Directory containing the running executable. Bundled resources are
/// looked up relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPath(PathBuf);

impl AnchorPath {
    /// Locates the executable's directory. `None` when the platform cannot
    /// report the executable path.
    pub fn resolve() -> Option<Self> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(|dir| Self(dir.to_path_buf()))
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }

    pub fn dir(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }

    /// Makes the anchor the process working directory.
    pub fn enter(&self) -> io::Result<()> {
        std::env::set_current_dir(&self.0)
    }
}

/// Resolves a resource path against the anchor, or leaves it relative to the
/// working directory when there is none. Absolute paths pass through.
pub fn anchored(anchor: Option<&AnchorPath>, path: &Path) -> PathBuf {
    match anchor {
        Some(anchor) => anchor.join(path),
        None => path.to_path_buf(),
    }
}
