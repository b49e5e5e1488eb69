//! Page values handed between the two worker stages
//!
//! A page moves through the pipeline as two distinct values: scrapers produce
//! a [`FetchedPage`], extractors consume it and produce an [`ExtractedPage`].
//! Each value is owned by exactly one queue slot or worker at a time.

use serde::{Deserialize, Serialize};

/// A page body as returned by the transport, awaiting extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,

    /// Raw HTML body
    pub html: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Completes the page with its extracted plain text
    pub fn into_extracted(self, plaintext: String) -> ExtractedPage {
        ExtractedPage {
            url: self.url,
            html: self.html,
            plaintext,
        }
    }
}

/// A page after text extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Final URL after redirects
    pub url: String,

    /// Raw HTML body
    pub html: String,

    /// Visible text with scripts and styles removed and whitespace collapsed
    pub plaintext: String,
}
