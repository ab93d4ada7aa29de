//! Filesystem path → HTTP path derivation.
//!
//! A record's segments are the root folder name followed by the components of
//! its root-relative path. The HTTP path drops the first segment (the root)
//! and the last (the file name) and joins what is left:
//!
//! | file                      | segments                          | HTTP path     |
//! |---------------------------|-----------------------------------|---------------|
//! | `app/+route.ts`           | `app`, `+route.ts`                | `/`           |
//! | `app/users/+route.ts`     | `app`, `users`, `+route.ts`       | `/users`      |
//! | `app/users/[id]/+mw.ts`   | `app`, `users`, `[id]`, `+mw.ts`  | `/users/[id]` |
//!
//! Placeholder syntax such as `[id]` is kept verbatim.

use std::path::{Component, Path};

/// Split a root-relative path into segments, prefixed with `root_name`.
pub fn segments(root_name: &str, relative: &Path) -> Vec<String> {
    std::iter::once(root_name.to_string())
        .chain(relative.components().filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        }))
        .collect()
}

/// HTTP path for a segment list built by [`segments`].
pub fn http_path(segments: &[String]) -> String {
    if segments.len() <= 2 {
        return "/".to_string();
    }
    format!("/{}", segments[1..segments.len() - 1].join("/"))
}
