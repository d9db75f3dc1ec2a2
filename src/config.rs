use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_body_size: usize,
    pub backend_base_url: String,
    pub chat_api_url: String,
    pub chat_api_key: Option<String>,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            max_body_size: 256 * 1024,
            backend_base_url: "http://127.0.0.1:8000".to_string(),
            chat_api_url: "https://api.anthropic.com/v1/messages".to_string(),
            chat_api_key: None,
            chat_model: "claude-3-5-sonnet-20241022".to_string(),
            chat_max_tokens: 1000,
            store_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let max_body_size_kb: usize = std::env::var("MAX_BODY_SIZE_KB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256);

        let backend_base_url = non_empty_var("BACKEND_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.backend_base_url);

        let chat_max_tokens = std::env::var("CHAT_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.chat_max_tokens);

        Self {
            port,
            max_body_size: max_body_size_kb * 1024,
            backend_base_url,
            chat_api_url: non_empty_var("CHAT_API_URL").unwrap_or(defaults.chat_api_url),
            chat_api_key: non_empty_var("CHAT_API_KEY"),
            chat_model: non_empty_var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            chat_max_tokens,
            store_path: non_empty_var("STORE_PATH").map(PathBuf::from),
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.backend_base_url)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
