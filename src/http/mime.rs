//! Content type derived from a file name suffix.

/// Checked in order, first match wins.
const CONTENT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
];

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

pub fn content_type_for(file_name: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(suffix, _)| file_name.ends_with(suffix))
        .map(|(_, ty)| *ty)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
