//! The blogdraft library turns a web page or a keyword set into a Japanese
//! blog draft using a local LLM, optionally posting it to Hatena Blog.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod pipeline;
pub mod prompt;
pub mod publish;
pub mod search;

use std::fmt;

/// Enum representing which prompt template is used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// A single source page fetched from a URL.
    Url,
    /// Keywords with search results as source material.
    Search,
    /// Keywords only, used when the search returned nothing usable.
    Keyword,
}

impl fmt::Display for Mode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Mode::Url => "url",
            Mode::Search => "search",
            Mode::Keyword => "kw",
        })
    }
}

pub use error::{Error, Result, Stage};
pub use extract::extract_text;
pub use pipeline::{PipelineContext, run_pipeline};
pub use prompt::{build_prompt, derive_title};
pub use search::SearchResult;
