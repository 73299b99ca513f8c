use std::sync::Mutex;

use async_trait::async_trait;
use blogdraft::config::{PublishSettings, Settings, Source};
use blogdraft::constants::{
    DEFAULT_GENERATE_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PUBLISH_ENDPOINT,
    DEFAULT_SEARCH_ENDPOINT,
};
use blogdraft::fetch::PageFetcher;
use blogdraft::generate::TextGenerator;
use blogdraft::publish::{BlogEntry, DraftPublisher, HatenaCredentials};
use blogdraft::search::{SearchBackend, SearchResult};
use blogdraft::{Error, Result, Stage};

pub(crate) fn settings(source: Source) -> Settings {
    Settings {
        source,
        model: DEFAULT_MODEL.to_owned(),
        max_tokens: DEFAULT_MAX_TOKENS,
        output: None,
        generate_endpoint: DEFAULT_GENERATE_ENDPOINT.to_owned(),
        search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_owned(),
        publish_endpoint: DEFAULT_PUBLISH_ENDPOINT.to_owned(),
        publish: None,
    }
}

pub(crate) fn publish_settings(title: Option<&str>, tags: &[&str]) -> PublishSettings {
    PublishSettings {
        credentials: HatenaCredentials {
            user: "alice".to_owned(),
            blog_id: "alice.hatenablog.com".to_owned(),
            api_key: "secret".to_owned(),
        },
        title: title.map(str::to_owned),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
    }
}

pub(crate) fn backend_error(stage: Stage, body: &str) -> Error {
    Error::Backend {
        stage,
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: body.to_owned(),
    }
}

/// Serves one fixed page, or fails every fetch when built with `failing`.
pub(crate) struct StubFetcher {
    html: Option<String>,
    pub urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(html: &str) -> Self {
        StubFetcher {
            html: Some(html.to_owned()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubFetcher {
            html: None,
            urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.urls.lock().expect("Expected lock.").push(url.to_owned());
        self.html
            .clone()
            .ok_or_else(|| backend_error(Stage::Fetch, "gone"))
    }
}

pub(crate) struct StubSearch {
    results: Vec<SearchResult>,
    pub queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        StubSearch {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchBackend for StubSearch {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.queries
            .lock()
            .expect("Expected lock.")
            .push(query.to_owned());
        self.results.iter().take(limit).cloned().collect()
    }
}

/// Records every prompt and answers with a fixed article.
pub(crate) struct StubGenerator {
    response: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(response: &str) -> Self {
        StubGenerator {
            response: Some(response.to_owned()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubGenerator {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("Expected lock.").len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _model: &str, prompt: &str, _max_tokens: u32) -> Result<String> {
        self.prompts
            .lock()
            .expect("Expected lock.")
            .push(prompt.to_owned());
        self.response
            .clone()
            .ok_or_else(|| backend_error(Stage::Generate, r#"{"error":"model not found"}"#))
    }
}

#[derive(Default)]
pub(crate) struct StubPublisher {
    pub entries: Mutex<Vec<BlogEntry>>,
}

#[async_trait]
impl DraftPublisher for StubPublisher {
    async fn publish_draft(&self, entry: &BlogEntry) -> Result<String> {
        self.entries
            .lock()
            .expect("Expected lock.")
            .push(entry.clone());
        Ok("<entry />".to_owned())
    }
}
