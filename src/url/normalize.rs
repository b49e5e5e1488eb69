use crate::{UrlError, UrlResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// A cleaned URL together with the key used to deduplicate it
///
/// `as_str()` is the fetchable form (scheme kept). `key()` is the identity:
/// when scheme-distinct mode is off the scheme is dropped from the key, so
/// `http://x/y` and `https://x/y` compare equal.
#[derive(Debug, Clone, Eq)]
pub struct CanonicalUrl {
    url: String,
    key: String,
}

impl CanonicalUrl {
    /// The cleaned, fetchable URL
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The dedup identity of this URL
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

impl PartialEq for CanonicalUrl {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hash for CanonicalUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Canonicalizes a raw URL
///
/// # Canonicalization Steps
///
/// 1. Resolve against `base` when given (relative hrefs), otherwise parse as absolute
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Remove the fragment
/// 4. Drop an empty query marker (`?` with nothing after it)
/// 5. Remove trailing slashes from the path, including the root `/`
/// 6. Derive the dedup key, dropping the scheme unless `scheme_distinct` is set
///
/// Host lowercasing and dot-segment removal are done by the URL parser itself.
/// Applying this function to its own output is a no-op.
///
/// # Examples
///
/// ```
/// use sitesweep::url::canonicalize;
///
/// let a = canonicalize("http://Example.edu/about/#team", None, false).unwrap();
/// let b = canonicalize("https://example.edu/about", None, false).unwrap();
/// assert_eq!(a.as_str(), "http://example.edu/about");
/// assert_eq!(a, b);
/// ```
pub fn canonicalize(
    raw: &str,
    base: Option<&Url>,
    scheme_distinct: bool,
) -> UrlResult<CanonicalUrl> {
    let raw = raw.trim();
    let mut url = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    }
    .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed }.to_string();
        url.set_path(&trimmed);
    }

    // The parser always renders an empty path as "/", so the root slash is
    // only removable from the final string form.
    let bare_root = url.path() == "/" && url.query().is_none();
    let mut cleaned = String::from(url);
    if bare_root && cleaned.ends_with('/') {
        cleaned.pop();
    }

    let key = dedup_key(&cleaned, scheme_distinct);
    Ok(CanonicalUrl { url: cleaned, key })
}

/// Derives the dedup key from a cleaned URL string
fn dedup_key(cleaned: &str, scheme_distinct: bool) -> String {
    if scheme_distinct {
        return cleaned.to_string();
    }

    match cleaned.find("://") {
        Some(idx) => cleaned[idx + 1..].to_string(),
        None => cleaned.to_string(),
    }
}
