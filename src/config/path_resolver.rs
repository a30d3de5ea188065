//! Path resolution for the config file
//!
//! - Tilde (~) expansion to home directory
//! - XDG Base Directory specification compliance

use std::path::PathBuf;

/// Expand a leading `~` to the home directory. `~user` paths and paths
/// without a tilde pass through unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Get the XDG config directory for freight-gallery
///
/// Returns: $XDG_CONFIG_HOME/freight-gallery or ~/.config/freight-gallery
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(crate::NAME)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config").join(crate::NAME)
    } else {
        PathBuf::from(".config").join(crate::NAME)
    }
}

/// Get the default config file path
pub fn get_default_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_with_subdir() {
        let result = expand_home("~/gallery.toml");
        assert!(result.to_str().unwrap().ends_with("/gallery.toml"));
        assert!(!result.to_str().unwrap().starts_with('~'));
    }

    #[test]
    fn test_expand_home_absolute() {
        let result = expand_home("/etc/gallery.toml");
        assert_eq!(result.to_str().unwrap(), "/etc/gallery.toml");
    }

    #[test]
    fn test_expand_home_other_user_untouched() {
        let result = expand_home("~bob/gallery.toml");
        assert_eq!(result.to_str().unwrap(), "~bob/gallery.toml");
    }

    #[test]
    fn test_default_config_path() {
        let path = get_default_config_path();
        assert!(path.ends_with("freight-gallery/config.toml"));
    }
}
