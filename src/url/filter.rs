use url::Url;

/// Path suffixes that never lead to an HTML page
///
/// Documents, archives, images, audio and video, plus a few server-side
/// endpoints that return binaries.
pub const DENIED_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".doc", ".docx", ".xls", ".xlsx", ".csv", ".ppt", ".pptx", ".mp3", ".mp4",
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".avi", ".mov", ".cgi", ".flv", ".ibooks",
];

/// Checks whether a URL path ends in a non-HTML extension
///
/// The comparison is case-insensitive and only looks at the path, so a query
/// string such as `?format=pdf` does not trigger it. Strings that fail to
/// parse are checked as a whole.
///
/// # Examples
///
/// ```
/// use sitesweep::url::has_denied_extension;
///
/// assert!(has_denied_extension("https://site.edu/file.PDF"));
/// assert!(!has_denied_extension("https://site.edu/page"));
/// ```
pub fn has_denied_extension(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.to_lowercase(),
    };

    DENIED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
