use std::path::{Path, PathBuf};

/// Picks the scene to open at startup.
///
/// A scene given on the command line is used as is; whether it exists is
/// left to the window's open routine, which reports the failure. Without
/// one, `default_scene` is used if it exists. Otherwise the editor starts
/// empty.
pub fn resolve_initial_scene(launch_scene: Option<&Path>, default_scene: &Path) -> Option<PathBuf> {
    if let Some(path) = launch_scene {
        return Some(path.to_path_buf());
    }
    if default_scene.exists() {
        return Some(default_scene.to_path_buf());
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_launch_scene_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let default_scene = dir.path().join("materialtest.toml");
        fs::write(&default_scene, "").unwrap();

        let resolved = resolve_initial_scene(Some(Path::new("cornell.toml")), &default_scene);
        assert_eq!(resolved, Some(PathBuf::from("cornell.toml")));
    }

    #[test]
    fn test_missing_launch_scene_is_not_checked() {
        let dir = tempfile::tempdir().unwrap();
        let launch = dir.path().join("does_not_exist.toml");

        let resolved = resolve_initial_scene(Some(&launch), &dir.path().join("also_missing.toml"));
        assert_eq!(resolved, Some(launch));
    }

    #[test]
    fn test_default_scene_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let default_scene = dir.path().join("materialtest.toml");
        fs::write(&default_scene, "").unwrap();

        assert_eq!(resolve_initial_scene(None, &default_scene), Some(default_scene));
    }

    #[test]
    fn test_nothing_to_open() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_initial_scene(None, &dir.path().join("materialtest.toml")), None);
    }
}
