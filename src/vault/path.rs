//! Helpers for `/`-delimited vault paths
//!
//! Vault paths are always relative to the vault root and use `/` regardless of
//! platform. The root folder is the empty string.

/// Whether `path` names the vault root (`""` or `"/"`).
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Path of the folder containing `path`, or `""` for top-level entries.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Last path segment.
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// File name without its final extension. Dotfiles keep their name.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Final extension without the dot, or `""`.
pub fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[i + 1..],
        _ => "",
    }
}

/// Join a folder path and a child name.
pub fn join(folder: &str, name: &str) -> String {
    if is_root(folder) {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Number of `/`-separated segments. The root path counts as one segment,
/// which is why depth bounds measured from the root are shifted by one.
pub fn segment_count(path: &str) -> usize {
    path.split('/').count()
}

/// Canonical form used as an index key: root aliases collapse to `""` and
/// surrounding slashes are dropped.
pub fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}
