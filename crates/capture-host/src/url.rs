//! Content page detection
//!
//! The extension may only script pages served over http(s), plus local
//! files when the user granted file access.

use ::url::Url;

/// Whether the extension may capture the page at `url`
pub fn is_content_capable_url(url: &str, allow_file_access: bool) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match parsed.scheme() {
        "http" | "https" => true,
        "file" => allow_file_access,
        _ => false,
    }
}
