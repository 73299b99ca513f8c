//! The prompt module renders the generation prompt for each mode and derives
//! a blog title from the generated article.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::Mode;
use crate::extract::normalize_whitespace;
use crate::constants::{
    KEYWORD_PROMPT_TEMPLATE, PROMPT_COMMON_SECTION, SEARCH_PROMPT_TEMPLATE, URL_PROMPT_TEMPLATE,
};

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 120;
const TITLE_FALLBACK_CHARS: usize = 60;
const TITLE_FALLBACK_SUFFIX: &str = "...";

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(input|excerpt|common)\}").expect("Failed to compile PLACEHOLDER regex")
});

static HEADING_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+\s*").expect("Failed to compile HEADING_MARKER regex"));

/// Builds the prompt sent to the generation backend.
///
/// The template is chosen by `mode`. `input` is the source URL or the keyword
/// line. `excerpt` is interpolated for [`Mode::Url`] and [`Mode::Search`] and
/// ignored for [`Mode::Keyword`], whose prompt has no excerpt section.
///
/// Placeholders are substituted in a single pass, so text inside `input` or
/// `excerpt` is never itself treated as a placeholder.
#[must_use]
pub fn build_prompt(mode: Mode, input: &str, excerpt: &str) -> String {
    let template = match mode {
        Mode::Url => URL_PROMPT_TEMPLATE,
        Mode::Search => SEARCH_PROMPT_TEMPLATE,
        Mode::Keyword => KEYWORD_PROMPT_TEMPLATE,
    };

    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            match caps.get(1).map(|name| name.as_str()) {
                Some("input") => input,
                Some("excerpt") => excerpt,
                _ => PROMPT_COMMON_SECTION,
            }
        })
        .into_owned()
}

/// Derives a title from generated article text.
///
/// Returns the first line whose length, once trimmed and stripped of its
/// leading `#` heading marker, is strictly between 10 and 120 characters. When no
/// line qualifies, the first 60 characters of the whitespace-collapsed text
/// are returned with `...` appended.
#[must_use]
pub fn derive_title(text: &str) -> String {
    let heading = text
        .lines()
        .map(|line| HEADING_MARKER_REGEX.replace(line.trim(), ""))
        .find(|line| {
            let length = line.chars().count();
            length > TITLE_MIN_CHARS && length < TITLE_MAX_CHARS
        });

    if let Some(line) = heading {
        return line.chars().take(TITLE_MAX_CHARS).collect();
    }

    let collapsed = normalize_whitespace(text);
    let mut title: String = collapsed.chars().take(TITLE_FALLBACK_CHARS).collect();
    title.push_str(TITLE_FALLBACK_SUFFIX);
    title
}
