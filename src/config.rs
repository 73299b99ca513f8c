//! The config module validates command-line input into run settings.
//!
//! Validation performs no I/O, so every usage error surfaces before the first
//! network request.

use url::Url;

use crate::cli::Cli;
use crate::constants::{PUBLISH_API_KEY_ENV_NAME, PUBLISH_BLOG_ENV_NAME, PUBLISH_USER_ENV_NAME};
use crate::error::{Error, Result};
use crate::publish::HatenaCredentials;

/// Where the article's source material comes from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Source {
    /// A single page to fetch.
    Url(String),
    /// Keywords to search for, in the order given.
    Keywords(Vec<String>),
}

/// Draft publishing settings, present only when publishing was requested.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PublishSettings {
    pub credentials: HatenaCredentials,
    /// Explicit title; derived from the article when absent.
    pub title: Option<String>,
    pub tags: Vec<String>,
}

/// A validated set of options for one run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Settings {
    pub source: Source,
    pub model: String,
    pub max_tokens: u32,
    pub output: Option<String>,
    pub generate_endpoint: String,
    pub search_endpoint: String,
    pub publish_endpoint: String,
    pub publish: Option<PublishSettings>,
}

impl Settings {
    /// Validates parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if neither a URL nor a keyword is given, if the
    /// keyword list is empty once split, or if `--hatena` is set without all
    /// three Hatena credentials.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let source = match (cli.url, cli.kw) {
            (Some(url), _) if !url.trim().is_empty() => Source::Url(url.trim().to_owned()),
            (_, Some(kw)) => {
                let keywords = split_list(&kw);
                if keywords.is_empty() {
                    return Err(Error::Usage(
                        "URLまたはキーワードを指定してください。".to_owned(),
                    ));
                }
                Source::Keywords(keywords)
            }
            _ => {
                return Err(Error::Usage(
                    "URLまたはキーワードを指定してください。".to_owned(),
                ));
            }
        };

        let publish = if cli.hatena {
            let credentials =
                credentials_from_parts(cli.hatena_user, cli.hatena_blog_id, cli.hatena_api_key)?;
            Some(PublishSettings {
                credentials,
                title: cli
                    .hatena_title
                    .map(|title| title.trim().to_owned())
                    .filter(|title| !title.is_empty()),
                tags: cli.hatena_tags.as_deref().map(split_list).unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(Self {
            source,
            model: cli.model,
            max_tokens: cli.max_tokens,
            output: cli.output,
            generate_endpoint: cli.ollama_endpoint,
            search_endpoint: cli.searxng_endpoint,
            publish_endpoint: cli.hatena_endpoint,
            publish,
        })
    }
}

/// Requires all three Hatena credentials to be present and non-empty.
///
/// # Errors
///
/// Returns [`Error::Usage`] naming the environment variables to set when any
/// part is missing.
pub fn credentials_from_parts(
    user: Option<String>,
    blog_id: Option<String>,
    api_key: Option<String>,
) -> Result<HatenaCredentials> {
    let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
    match (present(user), present(blog_id), present(api_key)) {
        (Some(user), Some(blog_id), Some(api_key)) => Ok(HatenaCredentials {
            user,
            blog_id,
            api_key,
        }),
        _ => Err(Error::Usage(format!(
            "Hatena 投稿に必要な環境変数が不足しています。{PUBLISH_USER_ENV_NAME}, {PUBLISH_BLOG_ENV_NAME}, {PUBLISH_API_KEY_ENV_NAME} を設定してください。"
        ))),
    }
}

/// Splits a comma-separated list, trimming items and dropping empty ones.
#[must_use]
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Appends `path` to a configured base address.
///
/// # Errors
///
/// Returns [`Error::InvalidEndpoint`] if the result is not a valid URL.
pub fn endpoint_url(base: &str, path: &str) -> Result<Url> {
    let joined = format!("{}{path}", base.trim_end_matches('/'));
    Url::parse(&joined).map_err(|err| Error::InvalidEndpoint(format!("{joined}: {err}")))
}
