//! MIME type detection based on file extensions.

/// Type used for bodies whose extension is not recognized.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Maps the extension of `path` to a MIME type.
///
/// Only the text after the last `.` of the final path segment is looked at,
/// case-insensitively; the filesystem is never touched. Unknown or missing
/// extensions yield an empty string.
///
/// # Example
///
/// ```
/// # use reel::http::mime::content_type;
/// assert_eq!(content_type("cinema.png"), "image/png");
/// assert_eq!(content_type("/css/site.CSS"), "text/css");
/// assert_eq!(content_type("README"), "");
/// ```
pub fn content_type(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return "";
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "txt" => "text/plain",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "",
    }
}

/// Whether `content_type` names an image.
pub fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Whether a body of this type is served as raw bytes.
///
/// Images and unresolved types go out untouched; everything else is text.
pub fn is_binary(content_type: &str) -> bool {
    content_type.is_empty() || is_image(content_type)
}
