use clap::{ArgGroup, Parser};

use crate::constants::{
    DEFAULT_GENERATE_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PUBLISH_ENDPOINT,
    DEFAULT_SEARCH_ENDPOINT, GENERATE_ENDPOINT_ENV_NAME, PUBLISH_API_KEY_ENV_NAME,
    PUBLISH_BLOG_ENV_NAME, PUBLISH_ENDPOINT_ENV_NAME, PUBLISH_USER_ENV_NAME,
    SEARCH_ENDPOINT_ENV_NAME,
};

/// A CLI tool to draft Japanese blog articles from a web page or keywords
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "kw"])))]
pub struct Cli {
    /// Source URL to base the article on
    #[arg(long)]
    pub url: Option<String>,

    /// Comma-separated keywords
    #[arg(long)]
    pub kw: Option<String>,

    /// Post the generated article as a draft to Hatena Blog
    #[arg(long)]
    pub hatena: bool,

    /// Title to use when posting to Hatena (derived from the article by default)
    #[arg(long)]
    pub hatena_title: Option<String>,

    /// Comma-separated tags for Hatena
    #[arg(long)]
    pub hatena_tags: Option<String>,

    /// Model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum number of tokens to generate
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Write the article to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", default_value_t = 2)]
    pub verbose: u8,

    /// Base address of the Ollama server
    #[arg(long, env = GENERATE_ENDPOINT_ENV_NAME, default_value = DEFAULT_GENERATE_ENDPOINT)]
    pub ollama_endpoint: String,

    /// Base address of the SearXNG instance
    #[arg(long, env = SEARCH_ENDPOINT_ENV_NAME, default_value = DEFAULT_SEARCH_ENDPOINT)]
    pub searxng_endpoint: String,

    /// Base address of the Hatena Blog AtomPub API
    #[arg(long, env = PUBLISH_ENDPOINT_ENV_NAME, default_value = DEFAULT_PUBLISH_ENDPOINT)]
    pub hatena_endpoint: String,

    /// Hatena account name
    #[arg(long, env = PUBLISH_USER_ENV_NAME, hide_env_values = true)]
    pub hatena_user: Option<String>,

    /// Hatena blog identifier, e.g. example.hatenablog.com
    #[arg(long, env = PUBLISH_BLOG_ENV_NAME, hide_env_values = true)]
    pub hatena_blog_id: Option<String>,

    /// Hatena AtomPub API key
    #[arg(long, env = PUBLISH_API_KEY_ENV_NAME, hide_env_values = true)]
    pub hatena_api_key: Option<String>,
}
