use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Page to ingest.
    pub target_url: String,
    pub openai_api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// Only matters insofar as it selects which tokenizer to use.
    #[serde(default = "default_tokenizer_model")]
    pub tokenizer_model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_max_recursion")]
    pub max_recursion: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_min_section_chars")]
    pub min_section_chars: usize,
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_tokenizer_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_max_tokens() -> usize {
    1600
}

fn default_max_recursion() -> usize {
    5
}

fn default_batch_size() -> usize {
    1000
}

fn default_min_section_chars() -> usize {
    16
}

fn default_csv_path() -> String {
    "embeddings.csv".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
