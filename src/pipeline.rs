//! The pipeline module drives one run: gather source material, build the
//! prompt, generate the article and optionally post it as a draft.

use log::{debug, info, warn};

use crate::Mode;
use crate::config::{Settings, Source};
use crate::constants::{EXCERPT_MAX_CHARS, SEARCH_RESULT_LIMIT, SEARCH_RESULT_SEPARATOR};
use crate::error::{Error, Result};
use crate::extract::extract_text;
use crate::fetch::PageFetcher;
use crate::generate::{TextGenerator, strip_thinking};
use crate::prompt::{build_prompt, derive_title};
use crate::publish::{BlogEntry, DraftPublisher};
use crate::search::{SearchBackend, SearchResult};

/// Backends shared by every stage of a run.
pub struct PipelineContext<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub search: &'a dyn SearchBackend,
    pub generator: &'a dyn TextGenerator,
    /// Required when the settings ask for publishing.
    pub publisher: Option<&'a dyn DraftPublisher>,
}

/// Input of the prompt builder.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceMaterial {
    /// Effective mode; keyword runs become [`Mode::Search`] when results exist.
    pub mode: Mode,
    /// URL or keyword line shown in the prompt.
    pub input: String,
    pub excerpt: String,
}

/// Outcome of a successful run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Draft {
    pub mode: Mode,
    pub prompt: String,
    pub article: String,
    /// The entry posted as a draft, if publishing was requested.
    pub published: Option<BlogEntry>,
}

/// Runs the whole pipeline once.
///
/// # Errors
///
/// Returns an error if publishing is requested without a publisher, or if
/// fetching the source page, generation or publishing fails. Search failures
/// are not errors: the run continues with a keyword-only prompt.
pub async fn run_pipeline(ctx: &PipelineContext<'_>, settings: &Settings) -> Result<Draft> {
    let publisher = match (&settings.publish, ctx.publisher) {
        (Some(_), None) => {
            return Err(Error::Usage("Hatena 投稿の設定がありません。".to_owned()));
        }
        (Some(publish), Some(publisher)) => Some((publish, publisher)),
        (None, _) => None,
    };

    let material = gather_source(ctx, &settings.source).await?;
    let prompt = build_prompt(material.mode, &material.input, &material.excerpt);
    debug!("Prompt for {} mode:\n{prompt}", material.mode);

    let generated = ctx
        .generator
        .generate(&settings.model, &prompt, settings.max_tokens)
        .await?;
    info!("Ollama response received.");
    let article = strip_thinking(&generated);
    if article.is_empty() {
        warn!("The generated article is empty");
    }

    let posted_entry = if let Some((publish, publisher)) = publisher {
        let entry = BlogEntry {
            title: publish
                .title
                .clone()
                .unwrap_or_else(|| derive_title(&article)),
            content: article.clone(),
            tags: publish.tags.clone(),
        };
        publisher.publish_draft(&entry).await?;
        info!("Hatena 下書きを投稿しました。");
        Some(entry)
    } else {
        None
    };

    Ok(Draft {
        mode: material.mode,
        prompt,
        article,
        published: posted_entry,
    })
}

/// Collects the excerpt for `source`.
///
/// # Errors
///
/// Returns an error if the source page cannot be fetched.
pub async fn gather_source(ctx: &PipelineContext<'_>, source: &Source) -> Result<SourceMaterial> {
    match source {
        Source::Url(url) => {
            let html = ctx.fetcher.fetch(url).await?;
            Ok(SourceMaterial {
                mode: Mode::Url,
                input: url.clone(),
                excerpt: extract_text(&html, EXCERPT_MAX_CHARS),
            })
        }
        Source::Keywords(keywords) => {
            let input = keywords.join(", ");
            // The query joins keywords with spaces; commas would reach the
            // search engine as literal terms.
            let results = ctx.search.search(&keywords.join(" "), SEARCH_RESULT_LIMIT).await;
            if let Some(excerpt) = compose_search_excerpt(&results) {
                return Ok(SourceMaterial {
                    mode: Mode::Search,
                    input,
                    excerpt,
                });
            }

            info!("No usable search results, writing from keywords only");
            Ok(SourceMaterial {
                mode: Mode::Keyword,
                input,
                excerpt: String::new(),
            })
        }
    }
}

/// Joins the snippet blocks of every result that has a URL.
///
/// Returns `None` when no result has a URL.
#[must_use]
pub fn compose_search_excerpt(results: &[SearchResult]) -> Option<String> {
    let blocks: Vec<String> = results
        .iter()
        .filter_map(|result| {
            let url = result.url.as_deref().filter(|url| !url.is_empty())?;
            debug!("Using search snippet for {url}");
            Some(format!(
                "Title: {}\nURL: {url}\nContent: {}",
                result.title.as_deref().unwrap_or_default(),
                result.content.as_deref().unwrap_or_default(),
            ))
        })
        .collect();

    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join(SEARCH_RESULT_SEPARATOR))
    }
}
