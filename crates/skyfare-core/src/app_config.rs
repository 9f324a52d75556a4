use std::net::SocketAddr;

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
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub amadeus_api_key: String,
    pub amadeus_api_secret: String,
    pub amadeus_base_url: String,
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on offers requested per search, sent upstream as `max`.
    pub search_max_results: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("amadeus_api_key", &"[redacted]")
            .field("amadeus_api_secret", &"[redacted]")
            .field("amadeus_base_url", &self.amadeus_base_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_max_results", &self.search_max_results)
            .finish()
    }
}
