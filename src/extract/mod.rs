//! PDF link extraction from HTML documents.
//!
//! Parses a page, walks its node tree in document order, and collects the
//! `href` of every anchor whose target ends in `.pdf`. Deduplication is a
//! separate step so callers can merge links from several pages before
//! collapsing repeats.
//!
//! # Example
//!
//! ```
//! use harvester_core::extract::extract_unique_pdf_links;
//!
//! let html = r#"<a href="/a.pdf">A</a><a href="/b.html">B</a><a href="/a.pdf">again</a>"#;
//! assert_eq!(extract_unique_pdf_links(html), vec!["/a.pdf".to_string()]);
//! ```

use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, trace};

/// Suffix (compared case-insensitively) that marks an `href` as a PDF candidate.
const PDF_SUFFIX: &str = ".pdf";

/// Extracts every PDF link from `<a href="...">` elements, in document order.
///
/// The returned values are the attribute values exactly as written in the
/// page; only the `.pdf` suffix test is case-insensitive. Duplicates are kept,
/// use [`dedupe_links`] to collapse them.
///
/// Malformed markup never fails: the parser recovers the same way browsers
/// do, and input with no recoverable anchors yields an empty vector.
#[tracing::instrument(skip(html), fields(html_len = html.len()))]
#[must_use]
pub fn extract_pdf_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    // Pre-order walk with an explicit stack; children are pushed in reverse
    // so the leftmost child is visited first.
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        if let Some(element) = node.value().as_element()
            && element.name() == "a"
        {
            for (key, value) in element.attrs() {
                if key == "href" && is_pdf_href(value) {
                    trace!(href = value, "found PDF link");
                    links.push(value.to_string());
                }
            }
        }
        stack.extend(node.children().rev());
    }

    debug!(count = links.len(), "extracted PDF links");
    links
}

/// Removes repeated links, keeping the first occurrence of each.
///
/// Equality is exact string equality; `/a.pdf` and `/A.pdf` are distinct.
#[must_use]
pub fn dedupe_links(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(links.len());
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Extracts PDF links and removes duplicates in one call.
#[must_use]
pub fn extract_unique_pdf_links(html: &str) -> Vec<String> {
    dedupe_links(extract_pdf_links(html))
}

fn is_pdf_href(value: &str) -> bool {
    value.to_lowercase().ends_with(PDF_SUFFIX)
}
