pub const GENERATE_ENDPOINT_ENV_NAME: &str = "OLLAMA_ENDPOINT";
pub const SEARCH_ENDPOINT_ENV_NAME: &str = "SEARXNG_ENDPOINT";
pub const PUBLISH_ENDPOINT_ENV_NAME: &str = "HATENA_ENDPOINT";
pub const PUBLISH_USER_ENV_NAME: &str = "HATENA_USER";
pub const PUBLISH_BLOG_ENV_NAME: &str = "HATENA_BLOG_ID";
pub const PUBLISH_API_KEY_ENV_NAME: &str = "HATENA_API_KEY";

pub const DEFAULT_GENERATE_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://localhost:18080";
pub const DEFAULT_PUBLISH_ENDPOINT: &str = "https://blog.hatena.ne.jp";
pub const DEFAULT_MODEL: &str = "llama3.2:latest";
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

pub const GENERATE_PATH: &str = "/api/generate";
pub const SEARCH_PATH: &str = "/search";
pub const SEARCH_FORMAT: &str = "json";
pub const SEARCH_LANGUAGE: &str = "ja";

pub const USER_AGENT: &str = "blogdraft Bot";

/// Characters kept from a fetched page.
pub const EXCERPT_MAX_CHARS: usize = 3000;
/// Results requested from the search backend in keyword mode.
pub const SEARCH_RESULT_LIMIT: usize = 5;
pub(crate) const SEARCH_RESULT_SEPARATOR: &str = "\n\n---\n\n";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

pub(crate) const PROMPT_COMMON_SECTION: &str = "対象読者: システム開発者
目的: 調査結果をまとめてブログとして公開したい
トーン: 専門的

構成: 1) イントロ、2) 特徴、3) 導入手順、4) まとめ
出力形式: markdown形式で、適宜見出しやコードブロックを使用してわかりやすく説明してください。";

pub(crate) const URL_PROMPT_TEMPLATE: &str = "以下のウェブページの内容を参考に、日本語のブログ記事を書いてください。
URL: {input}

== ページ内容（抜粋）==
{excerpt}

{common}";

pub(crate) const SEARCH_PROMPT_TEMPLATE: &str = "以下のキーワードに関する検索結果を参考に、日本語のブログ記事を書いてください。
キーワード: {input}

== 検索結果（抜粋）==
{excerpt}

{common}";

pub(crate) const KEYWORD_PROMPT_TEMPLATE: &str = "以下のキーワードを基に、日本語のブログ記事を書いてください。
キーワード: {input}

{common}";
