use url::Url;

/// Marker appended when a URL has no path to derive a label from
pub const NO_LABEL_MARKER: &str = "[NO LABEL]";

/// Derives a human-readable label from a URL path
///
/// Used when an anchor has neither text nor a `title` attribute. Path
/// separators, hyphens and underscores become spaces and every word is
/// capitalized. A URL with an empty path gets the URL itself followed by
/// [`NO_LABEL_MARKER`].
///
/// # Examples
///
/// ```
/// use sitesweep::url::label;
///
/// assert_eq!(label("https://x.edu/about-us"), "About Us");
/// assert_eq!(label("https://x.edu/admissions/undergrad_programs"), "Admissions Undergrad Programs");
/// assert_eq!(label("https://enroll.x.edu"), "https://enroll.x.edu [NO LABEL]");
/// ```
pub fn label(url: &str) -> String {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_default();
    let path = path.trim_matches('/');

    let words: Vec<String> = path
        .split(|c| matches!(c, '/' | '-' | '_'))
        .flat_map(str::split_whitespace)
        .map(capitalize)
        .collect();

    if words.is_empty() {
        return format!("{} {}", url, NO_LABEL_MARKER);
    }

    words.join(" ")
}

/// Uppercases the first character and lowercases the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
