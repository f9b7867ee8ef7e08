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
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Base URL of the postal-code directory (`ViaCEP`).
    pub postal_lookup_url: String,
    /// Base URL of the geocoding service (Nominatim).
    pub geocoder_url: String,
    pub http_user_agent: String,
    /// Upper bound for each outbound call made while resolving a search.
    pub upstream_timeout_secs: u64,
    pub default_radius_km: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("postal_lookup_url", &self.postal_lookup_url)
            .field("geocoder_url", &self.geocoder_url)
            .field("http_user_agent", &self.http_user_agent)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("default_radius_km", &self.default_radius_km)
            .finish()
    }
}
