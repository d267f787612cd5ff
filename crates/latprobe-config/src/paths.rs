//! Platform-specific configuration paths.
//!
//! # Lookup Order
//!
//! [`find_config`] resolves the configuration file in this order:
//!
//! 1. An explicitly given path (returned even if it does not exist, so the
//!    caller gets a read error naming it)
//! 2. `config.json` in the current directory
//! 3. `config.toml` in the current directory
//! 4. The user config file: `~/.config/latprobe/config.toml` (Linux),
//!    `~/Library/Application Support/latprobe/config.toml` (macOS),
//!    `%APPDATA%\latprobe\config.toml` (Windows)

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "latprobe";

/// File names probed in the working directory, in order.
pub const LOCAL_CONFIG_NAMES: [&str; 2] = ["config.json", "config.toml"];

/// Name of the config file inside the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the user config file (may not exist).
pub fn user_config_path() -> PathBuf {
    user_config_dir().join(USER_CONFIG_FILE)
}

/// Resolve the configuration file to load.
///
/// Returns `None` when no explicit path was given and no candidate exists.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    find_config_in(explicit, Path::new("."), &user_config_path())
}

/// [`find_config`] with the working directory and user file supplied.
pub fn find_config_in(explicit: Option<&Path>, cwd: &Path, user_file: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    LOCAL_CONFIG_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|p| p.is_file())
        .or_else(|| user_file.is_file().then(|| user_file.to_path_buf()))
}

/// Ensure the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> std::io::Result<PathBuf> {
    let dir = user_config_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
        assert!(user_config_path().ends_with("latprobe/config.toml"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            find_config_in(Some(explicit), dir.path(), Path::new("/nonexistent/user.toml")),
            Some(explicit.to_path_buf())
        );
    }

    #[test]
    fn test_json_preferred_over_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();

        let found = find_config_in(None, dir.path(), Path::new("/nonexistent/user.toml"));
        assert_eq!(found, Some(dir.path().join("config.json")));
    }

    #[test]
    fn test_falls_back_to_user_file() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let user_file = home.path().join("config.toml");

        assert_eq!(find_config_in(None, cwd.path(), &user_file), None);

        std::fs::write(&user_file, "period = 4096").unwrap();
        assert_eq!(find_config_in(None, cwd.path(), &user_file), Some(user_file));
    }
}
