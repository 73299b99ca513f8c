//! The extract module turns raw page HTML into a bounded plain-text excerpt.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Candidate containers, most specific first.
const CANDIDATE_CONTAINERS: [&str; 3] = ["article", "main", "body"];
/// A candidate is accepted once its trimmed text is longer than this.
const MIN_CANDIDATE_CHARS: usize = 200;
/// Elements whose text never counts as readable content.
const IGNORED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static TAG_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile TAG_STRIPPER regex"));

static IGNORED_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<(script|style|noscript|template)\b[^>]*>.*?</(script|style|noscript|template)\s*>",
    )
    .expect("Failed to compile IGNORED_BLOCK regex")
});

/// Extracts readable text from the given HTML content.
///
/// `article`, `main` and `body` are tried in that order and the first whose
/// text is longer than 200 characters wins. Otherwise the body text is used,
/// or the raw markup with its tags stripped when the body has no text at all.
/// Whitespace runs are collapsed to one space, the result is trimmed and then
/// cut to at most `max_chars` characters.
///
/// Malformed markup never fails: the parser recovers, and the tag-stripping
/// fallback covers anything it cannot make sense of.
#[must_use]
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let candidate = CANDIDATE_CONTAINERS
        .iter()
        .map(|container| container_text(&document, container))
        .find(|text| text.trim().chars().count() > MIN_CANDIDATE_CHARS);

    let text = candidate.unwrap_or_else(|| {
        let body = container_text(&document, "body");
        if body.trim().is_empty() {
            strip_tags(html)
        } else {
            body
        }
    });

    normalize_whitespace(&text).chars().take(max_chars).collect()
}

/// Collapses every whitespace run, newlines included, to a single space and
/// trims both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Regex fallback for markup without body text. Non-content blocks go first
/// so their text does not survive the tag stripping.
fn strip_tags(html: &str) -> String {
    let without_blocks = IGNORED_BLOCK_REGEX.replace_all(html, " ");
    TAG_STRIPPER_REGEX
        .replace_all(&without_blocks, " ")
        .into_owned()
}

/// Concatenated text of every element matching `container`.
fn container_text(document: &Html, container: &str) -> String {
    let Ok(selector) = Selector::parse(container) else {
        return String::new();
    };

    document
        .select(&selector)
        .map(element_text)
        .collect()
}

/// Flattened text of `element`, skipping non-content subtrees.
fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let ignored = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|parent| IGNORED_ELEMENTS.contains(&parent.name()))
        });
        if !ignored {
            text.push_str(fragment);
        }
    }
    text
}
