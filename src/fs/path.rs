//! Remote path helpers.

/// Normalize a path (collapse `//`, drop trailing slashes, force a leading `/`).
pub fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

/// Parent of a path, or `None` for `/`.
pub fn path_up(path: &str) -> Option<String> {
    let normalized = normalize_path(path);
    if normalized == "/" {
        return None;
    }

    match normalized.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(normalized[..idx].to_string()),
        None => None,
    }
}

/// Last component of a path; empty for `/`.
pub fn path_name(path: &str) -> String {
    let normalized = normalize_path(path);
    normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Join a folder path and a child name.
pub fn join_path(folder: &str, name: &str) -> String {
    if folder == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", folder.trim_end_matches('/'), name)
    }
}
