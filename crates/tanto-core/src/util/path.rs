//! Lexical path helpers shared by pattern matching, storage and routing.
//!
//! Every path handled by the access engine is in "clean" form: anchored at `/`,
//! no empty or `.` segments, `..` resolved without climbing above the root.

/// ## Summary
/// Normalizes a request or pattern path into its clean, `/`-anchored form.
///
/// `..` segments never climb above `/`, so the result can be joined under a
/// storage root without escaping it.
#[must_use]
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for segment in &segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }
    if cleaned.is_empty() {
        cleaned.push('/');
    }
    cleaned
}

/// ## Summary
/// Returns the extension of the final path segment, including the leading dot.
///
/// Empty when the final segment contains no dot.
#[must_use]
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    name.rfind('.').map_or("", |idx| &name[idx..])
}

/// Final segment of `path` (empty for `/`).
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// ## Summary
/// Returns `true` if `path` starts with `prefix`.
///
/// Both arguments must already be clean. This is a case-sensitive string
/// prefix test: `/public` covers `/public/readme.txt` and also `/publicity`.
#[must_use]
pub fn is_within(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix)
}

/// Joins a clean directory path and a single entry name.
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Parent directory of a clean path (`/` for top-level entries and for `/`).
#[must_use]
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// ## Summary
/// Normalizes a configured URL prefix into a router path.
///
/// Returns the prefix without surrounding slashes; the root prefix becomes
/// an empty string.
#[must_use]
pub fn route_prefix(prefix: &str) -> String {
    prefix.trim_matches('/').to_string()
}
