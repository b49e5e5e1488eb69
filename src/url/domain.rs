use std::net::IpAddr;
use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Returns `None` when the string does not parse or has no host.
///
/// # Examples
///
/// ```
/// use sitesweep::url::extract_host;
///
/// assert_eq!(extract_host("https://WWW.Example.COM/path"), Some("www.example.com".to_string()));
/// assert_eq!(extract_host("https://example.com:8080/"), Some("example.com".to_string()));
/// assert_eq!(extract_host("not a url"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Computes the registrable domain (domain + public suffix) of a host
///
/// Uses the public suffix list, so multi-label suffixes such as `edu.ph` or
/// `co.uk` are handled. IP literals, and hosts that have no label in front of
/// a known suffix (e.g. `localhost`), are their own registrable domain.
///
/// # Examples
///
/// ```
/// use sitesweep::url::registrable_domain;
///
/// assert_eq!(registrable_domain("enroll.dlsu.edu.ph"), "dlsu.edu.ph");
/// assert_eq!(registrable_domain("www.example.co.uk"), "example.co.uk");
/// assert_eq!(registrable_domain("127.0.0.1"), "127.0.0.1");
/// ```
pub fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let bare = host.trim_start_matches('[').trim_end_matches(']');

    if bare.parse::<IpAddr>().is_ok() {
        return host;
    }

    psl::domain_str(&host)
        .map(str::to_string)
        .unwrap_or(host)
}

/// Returns the registrable domain of a URL string, if it has a host
pub fn url_registrable_domain(url: &str) -> Option<String> {
    extract_host(url).map(|host| registrable_domain(&host))
}

/// Checks whether a URL belongs to the crawl's root registrable domain
///
/// Any subdomain sharing the registrable domain is in scope; hosts under a
/// different registrable domain are not. Unparseable URLs are out of scope.
pub fn in_scope(url: &str, root_domain: &str) -> bool {
    match url_registrable_domain(url) {
        Some(domain) => domain == root_domain.to_lowercase(),
        None => false,
    }
}

/// Checks a URL's host against a deny list
///
/// The match is exact and case-insensitive on the host only: a subdomain of
/// a listed host is not denied unless it is listed itself.
pub fn is_blacklisted<S: AsRef<str>>(url: &str, blacklist: &[S]) -> bool {
    match extract_host(url) {
        Some(host) => blacklist
            .iter()
            .any(|entry| entry.as_ref().eq_ignore_ascii_case(&host)),
        None => false,
    }
}
