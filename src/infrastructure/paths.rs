//! Filesystem locations.
//!
//! Favorites live under the XDG data directory unless configured otherwise:
//! `$XDG_DATA_HOME/flicklist`, falling back to `~/.local/share/flicklist`.

use std::path::PathBuf;

const APP_DIR: &str = "flicklist";

/// Default directory for persisted favorites.
///
/// Falls back to a relative `.flicklist` directory when neither
/// `XDG_DATA_HOME` nor `HOME` is set.
///
/// # Examples
///
/// ```
/// use flicklist::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("flicklist") || get_data_dir().ends_with(".flicklist"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(|name| std::env::var(name).ok())
}

/// [`get_data_dir`] over an arbitrary variable lookup.
pub fn data_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home).join(".local").join("share").join(APP_DIR);
    }
    PathBuf::from(format!(".{APP_DIR}"))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use flicklist::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (_, Some(home)) if path.starts_with("~/") => PathBuf::from(home).join(&path[2..]),
        _ => PathBuf::from(path),
    }
}
