//! The publish module posts generated articles to Hatena Blog as drafts
//! through its AtomPub API.

use std::fmt;

use async_trait::async_trait;
use log::info;
use url::Url;

use crate::error::{Error, Result, Stage, check_status};

const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";

/// A blog post ready to be submitted.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BlogEntry {
    pub title: String,
    /// Body, embedded as escaped `text/html` content.
    pub content: String,
    pub tags: Vec<String>,
}

impl BlogEntry {
    /// Renders the entry as an Atom document flagged as a draft.
    #[must_use]
    pub fn to_atom_xml(&self) -> String {
        let categories: String = self
            .tags
            .iter()
            .map(|tag| format!("<category term=\"{}\" />", escape_xml(tag)))
            .collect();

        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <entry xmlns=\"http://www.w3.org/2005/Atom\" xmlns:app=\"http://www.w3.org/2007/app\">\n\
             <title>{}</title>\n\
             <content type=\"text/html\">{}</content>\n\
             {categories}\n\
             <app:control><app:draft>yes</app:draft></app:control>\n\
             </entry>",
            escape_xml(&self.title),
            escape_xml(&self.content),
        )
    }
}

/// Escapes the characters that are significant in XML text and attributes.
#[must_use]
pub fn escape_xml(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for character in unsafe_text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Account settings needed to post to a Hatena blog.
#[derive(Clone, PartialEq, Eq)]
pub struct HatenaCredentials {
    pub user: String,
    pub blog_id: String,
    pub api_key: String,
}

impl fmt::Debug for HatenaCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HatenaCredentials")
            .field("user", &self.user)
            .field("blog_id", &self.blog_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Destination for finished articles.
#[async_trait]
pub trait DraftPublisher: Send + Sync {
    /// Submits `entry` as a non-public draft and returns the backend's reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the entry.
    async fn publish_draft(&self, entry: &BlogEntry) -> Result<String>;
}

/// Client for the Hatena Blog AtomPub endpoint of one blog.
pub struct HatenaClient {
    client: reqwest::Client,
    endpoint: Url,
    credentials: HatenaCredentials,
}

impl HatenaClient {
    /// Creates a client posting to `{base}/{user}/{blog_id}/atom/entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid base URL.
    pub fn new(client: reqwest::Client, base: &str, credentials: HatenaCredentials) -> Result<Self> {
        let endpoint = entry_endpoint(base, &credentials.user, &credentials.blog_id)?;
        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DraftPublisher for HatenaClient {
    async fn publish_draft(&self, entry: &BlogEntry) -> Result<String> {
        info!("Posting draft \"{}\" to {}", entry.title, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.user, Some(&self.credentials.api_key))
            .header(reqwest::header::CONTENT_TYPE, ATOM_CONTENT_TYPE)
            .body(entry.to_atom_xml())
            .send()
            .await
            .map_err(Error::transport(Stage::Publish))?;

        check_status(Stage::Publish, response)
            .await?
            .text()
            .await
            .map_err(Error::transport(Stage::Publish))
    }
}

/// Builds the collection URL, percent-encoding the user and blog segments.
///
/// # Errors
///
/// Returns an error if `base` is not a valid base URL.
pub fn entry_endpoint(base: &str, user: &str, blog_id: &str) -> Result<Url> {
    let mut endpoint =
        Url::parse(base).map_err(|err| Error::InvalidEndpoint(format!("{base}: {err}")))?;
    endpoint
        .path_segments_mut()
        .map_err(|()| Error::InvalidEndpoint(base.to_owned()))?
        .pop_if_empty()
        .extend([user, blog_id, "atom", "entry"]);
    Ok(endpoint)
}
