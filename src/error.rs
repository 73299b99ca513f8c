use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Pipeline stage that issued a network request.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Fetch,
    Search,
    Generate,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Fetch => "URL取得",
            Stage::Search => "検索",
            Stage::Generate => "記事生成",
            Stage::Publish => "はてなブログ投稿",
        };
        formatter.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid combination of command-line input or missing settings.
    #[error("{0}")]
    Usage(String),

    #[error("{stage}に失敗しました: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{stage}に失敗しました: HTTP {status}")]
    Backend {
        stage: Stage,
        status: StatusCode,
        body: String,
    },

    #[error("不正なエンドポイントです: {0}")]
    InvalidEndpoint(String),

    #[error("HTTPクライアントの初期化に失敗しました: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Raw payload returned by the backend, if the failure carried one.
    #[must_use]
    pub fn backend_body(&self) -> Option<&str> {
        match self {
            Error::Backend { body, .. } if !body.trim().is_empty() => Some(body.as_str()),
            _ => None,
        }
    }

    pub(crate) fn transport(stage: Stage) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::Transport { stage, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a non-success response into [`Error::Backend`], keeping its body.
pub(crate) async fn check_status(
    stage: Stage,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Backend {
        stage,
        status,
        body,
    })
}
