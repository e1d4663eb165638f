//! Sandbox path helpers.
//!
//! Zellij plugins run under WASI with the host home directory mounted at
//! `/host`. Paths from user configuration are written against the real home
//! (`~/...`) and must be rewritten before the plugin can open them.

use std::path::PathBuf;

/// Mount point of the host home directory inside the plugin sandbox.
const HOST_HOME: &str = "/host";

/// Directory for plugin-owned files (trace output).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_HOME).join(".local/share/zellij/bookshelf")
}

/// Rewrites a leading `~` to the sandbox home mount.
///
/// Only `~` alone or `~/...` is expanded; `~user` forms are left untouched.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_HOME.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_HOME}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host_mount() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/themes/shelf.toml"), "/host/themes/shelf.toml");
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/shelf.toml"), "/etc/shelf.toml");
        assert_eq!(expand_tilde("~alice/shelf.toml"), "~alice/shelf.toml");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }

    #[test]
    fn data_dir_lives_under_host_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/bookshelf")
        );
    }
}
