//! MIME type lookup based on file extensions.

/// Returns the MIME type for a filename, or an empty string when the
/// extension is unrecognized.
///
/// The extension is everything after the first `.` in the filename and is
/// matched case-insensitively.
///
/// # Example
///
/// ```
/// # use staticd::http::mime::content_type_for;
/// assert_eq!(content_type_for("/index.html"), "text/html");
/// assert_eq!(content_type_for("/data.bin"), "");
/// ```
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = match filename.split_once('.') {
        Some((_, ext)) => ext,
        None => return "",
    };

    if ext.eq_ignore_ascii_case("html") {
        "text/html"
    } else if ext.eq_ignore_ascii_case("txt") {
        "text/plain"
    } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else if ext.eq_ignore_ascii_case("png") {
        "image/png"
    } else if ext.eq_ignore_ascii_case("gif") {
        "image/gif"
    } else if ext.eq_ignore_ascii_case("m4r") {
        "audio/m4r"
    } else {
        ""
    }
}
