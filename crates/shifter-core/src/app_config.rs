use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub stripe_api_secret: String,
    pub stripe_base_url: String,
    pub stripe_api_version: String,
    pub catalog_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub fetch_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("stripe_api_secret", &"[redacted]")
            .field("stripe_base_url", &self.stripe_base_url)
            .field("stripe_api_version", &self.stripe_api_version)
            .field("catalog_path", &self.catalog_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .finish()
    }
}
