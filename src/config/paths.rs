use std::env;
use std::path::PathBuf;

/// Base name of the persisted configuration file.
pub const CONFIG_FILE_NAME: &str = "authcode.toml";

/// Directory component used when saving under a candidate root.
pub const PROJECT_DIR_NAME: &str = "authcode";

/// Ordered candidate directories searched for the configuration file.
///
/// - Override: AUTHCODE_CONFIG_DIR env var (placed first)
/// - Linux: $XDG_CONFIG_HOME or ~/.config
/// - macOS: ~/Library/Application Support
/// - Fallback: current working directory (always last)
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs_list = Vec::new();

    if let Ok(dir) = env::var("AUTHCODE_CONFIG_DIR") {
        if !dir.is_empty() {
            dirs_list.push(PathBuf::from(dir));
        }
    }

    if let Some(config_root) = dirs::config_dir() {
        dirs_list.push(config_root);
    } else if let Some(home) = dirs::home_dir() {
        dirs_list.push(home.join(".config"));
    }

    if let Ok(cwd) = env::current_dir() {
        dirs_list.push(cwd);
    }

    dirs_list
}
