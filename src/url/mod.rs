//! URL handling module for Sitesweep
//!
//! This module provides URL canonicalization, registrable-domain scoping,
//! host blacklisting, extension filtering and label derivation.

mod domain;
mod filter;
mod label;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, in_scope, is_blacklisted, registrable_domain, url_registrable_domain};
pub use filter::{has_denied_extension, DENIED_EXTENSIONS};
pub use label::{label, NO_LABEL_MARKER};
pub use normalize::{canonicalize, CanonicalUrl};

/// Outcome of running a discovered link through the scope filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVerdict {
    /// Link may be claimed and queued
    Accepted,
    /// Path ends in a non-HTML extension
    DeniedExtension,
    /// Registrable domain differs from the crawl root
    OutOfScope,
    /// Host is on the deny list
    Blacklisted,
}

impl LinkVerdict {
    /// Returns true if the link should be offered to the dedup store
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Classifies a canonical link against the crawl's filters
///
/// Filters apply in this order:
/// 1. Denied extension
/// 2. Scope (registrable domain must equal `root_domain`; `None` accepts any domain)
/// 3. Blacklist (exact host match)
///
/// # Examples
///
/// ```
/// use sitesweep::url::{canonicalize, classify_link, LinkVerdict};
///
/// let blacklist = vec!["repo.x.edu".to_string()];
/// let link = canonicalize("https://www.x.edu/about", None, false).unwrap();
/// assert_eq!(classify_link(&link, Some("x.edu"), &blacklist), LinkVerdict::Accepted);
///
/// let link = canonicalize("https://repo.x.edu/item", None, false).unwrap();
/// assert_eq!(classify_link(&link, Some("x.edu"), &blacklist), LinkVerdict::Blacklisted);
/// ```
pub fn classify_link<S: AsRef<str>>(
    link: &CanonicalUrl,
    root_domain: Option<&str>,
    blacklist: &[S],
) -> LinkVerdict {
    let url = link.as_str();

    if has_denied_extension(url) {
        return LinkVerdict::DeniedExtension;
    }

    if let Some(root) = root_domain {
        if !in_scope(url, root) {
            return LinkVerdict::OutOfScope;
        }
    }

    if is_blacklisted(url, blacklist) {
        return LinkVerdict::Blacklisted;
    }

    LinkVerdict::Accepted
}
