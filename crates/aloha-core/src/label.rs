//! Request path -> metric label normalization.
//!
//! Request paths are user-controlled, so they cannot go into a label value
//! as-is. Every run of characters outside `[A-Za-z0-9]` collapses into a single
//! `_`, the result is lower-cased, and edge underscores are dropped.

/// Label used when a path has no alphanumeric characters at all (e.g. `/`).
pub const ROOT_LABEL: &str = "root";

/// Normalize a raw request path into a bounded, exposition-safe label.
///
/// ```
/// use aloha_core::label::path_label;
///
/// assert_eq!(path_label("/foo/Bar-1"), "foo_bar_1");
/// assert_eq!(path_label("///"), "root");
/// ```
pub fn path_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            // Separator only between two alphanumeric stretches; this strips both edges.
            if in_run && !out.is_empty() {
                out.push('_');
            }
            in_run = false;
            out.push(c.to_ascii_lowercase());
        } else {
            in_run = true;
        }
    }

    if out.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        out
    }
}
