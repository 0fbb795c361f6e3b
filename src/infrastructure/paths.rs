//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! points at the directory Zellij was started from (usually the user's home).
//! User-supplied paths such as `theme_file` are written with `~` and have to be
//! mapped onto that mount before they can be opened.

use std::path::PathBuf;

/// Mount point of the host filesystem inside the sandbox.
pub const HOST_ROOT: &str = "/host";

/// File the span exporter appends to, inside [`get_data_dir`].
pub const SPANS_FILE_NAME: &str = "pixsearch-spans.jsonl";

/// Returns the plugin's data directory.
///
/// Resolves to `~/.local/share/zellij/pixsearch` on the host when Zellij was
/// started from the home directory.
///
/// # Examples
///
/// ```
/// use pixsearch::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/pixsearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("pixsearch")
}

/// Path of the exported span log.
#[must_use]
pub fn spans_file() -> PathBuf {
    get_data_dir().join(SPANS_FILE_NAME)
}

/// Maps a `~`-prefixed path onto the sandbox host mount.
///
/// Paths that do not start with `~` are returned unchanged, as are `~user`
/// forms, which cannot be resolved from inside the sandbox.
///
/// # Examples
///
/// ```
/// use pixsearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml").to_str(), Some("/host/themes/dusk.toml"));
/// assert_eq!(expand_tilde("~").to_str(), Some("/host"));
/// assert_eq!(expand_tilde("/etc/dusk.toml").to_str(), Some("/etc/dusk.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => {
            PathBuf::from(HOST_ROOT).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_file_lives_in_data_dir() {
        assert_eq!(
            spans_file(),
            PathBuf::from("/host/.local/share/zellij/pixsearch/pixsearch-spans.jsonl")
        );
    }

    #[test]
    fn named_home_is_left_alone() {
        assert_eq!(expand_tilde("~alice/theme.toml"), PathBuf::from("~alice/theme.toml"));
        assert_eq!(expand_tilde("relative.toml"), PathBuf::from("relative.toml"));
    }
}
