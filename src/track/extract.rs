//! Symbol name extraction from documentation HTML
//!
//! Two strategies union into one set: structural extraction of hyperlink
//! text, and regex fallback over the raw markup for names the link pass
//! misses (inline signatures, quoted references).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Anchor text that names an API entry point.
/// Runtime API: cuda* (cudaMalloc); driver API: cu* (cuMemAlloc).
static SYMBOL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:cuda|cu)[A-Z][A-Za-z0-9_]*$").expect("valid symbol regex")
});

/// Fallback patterns over raw content: call-site, tag-delimited, quoted
static FALLBACK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b((?:cuda|cu)[A-Z][A-Za-z0-9_]*)\s*\(",
        r">((?:cuda|cu)[A-Z][A-Za-z0-9_]*)<",
        r#""((?:cuda|cu)[A-Z][A-Za-z0-9_]*)""#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid fallback regex"))
    .collect()
});

/// Extract API symbol names from a documentation page.
///
/// Collects hyperlink text pointing at function documentation (hrefs with
/// a `group__` segment or fragment anchor), then unions in regex matches
/// over the raw content. Malformed markup degrades to whatever the regex
/// pass can salvage.
pub fn extract_symbols(html: &str) -> BTreeSet<String> {
    let mut symbols = BTreeSet::new();

    let document = Html::parse_document(html);
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = element.value().attr("href").unwrap_or_default();
            if !href.contains("group__") && !href.contains('#') {
                continue;
            }
            let text = element.text().collect::<String>();
            let text = text.trim();
            if SYMBOL_NAME.is_match(text) {
                symbols.insert(text.to_string());
            }
        }
    }

    for pattern in FALLBACK_PATTERNS.iter() {
        for captures in pattern.captures_iter(html) {
            symbols.insert(captures[1].to_string());
        }
    }

    symbols
}

/// Collect module group links from a documentation index page, in document
/// order without duplicates. Relative links are returned as-is.
pub fn extract_group_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_document(html);
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if href.contains("group__") && !links.iter().any(|l| l == href) {
                links.push(href.to_string());
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_symbols_from_link_text() {
        let html = r##"
            <html><body>
            <a href="group__CUDART__MEMORY.html#g1">cudaMalloc</a>
            <a href="group__CUDA__MEM.html#g2">cuMemAlloc</a>
            <a href="other.html">notAnApi</a>
            </body></html>
        "##;

        let symbols = extract_symbols(html);
        assert!(symbols.contains("cudaMalloc"));
        assert!(symbols.contains("cuMemAlloc"));
        assert!(!symbols.contains("notAnApi"));
    }

    #[test]
    fn link_text_must_match_the_naming_convention() {
        let html = r##"
            <a href="group__X.html#a">cudalowercase</a>
            <a href="group__X.html#b">CudaWrongPrefix</a>
            <a href="group__X.html#c">cudaStreamCreate</a>
        "##;

        let symbols = extract_symbols(html);
        assert_eq!(
            symbols.into_iter().collect::<Vec<_>>(),
            vec!["cudaStreamCreate".to_string()]
        );
    }

    #[test]
    fn regex_fallback_catches_names_outside_links() {
        let html = r#"
            <p>Call cudaFree( after use.</p>
            <code>&gt;</code><span>cuCtxCreate</span>
            <td>>cuStreamDestroy<</td>
            <meta value="cudaDeviceReset">
        "#;

        let symbols = extract_symbols(html);
        assert!(symbols.contains("cudaFree"));
        assert!(symbols.contains("cuStreamDestroy"));
        assert!(symbols.contains("cudaDeviceReset"));
    }

    #[test]
    fn strategies_union_without_duplicates() {
        let html = r##"
            <a href="group__X.html#a">cudaMalloc</a>
            <p>cudaMalloc(size)</p>
        "##;

        let symbols = extract_symbols(html);
        assert_eq!(symbols.iter().filter(|s| *s == "cudaMalloc").count(), 1);
    }

    #[test]
    fn empty_or_malformed_content_yields_empty_set() {
        assert!(extract_symbols("").is_empty());
        assert!(extract_symbols("<<<not html>>>").is_empty());
    }

    #[test]
    fn group_links_are_collected_in_order_without_duplicates() {
        let html = r##"
            <a href="group__CUDART__DEVICE.html">Device</a>
            <a href="group__CUDART__MEMORY.html">Memory</a>
            <a href="group__CUDART__DEVICE.html">Device again</a>
            <a href="index.html">Home</a>
        "##;

        let links = extract_group_links(html);
        assert_eq!(
            links,
            vec![
                "group__CUDART__DEVICE.html".to_string(),
                "group__CUDART__MEMORY.html".to_string(),
            ]
        );
    }
}
