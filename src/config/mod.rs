use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/matchday.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_filter: String,
}

impl Settings {
    /// Reads settings from the process environment. Call after `dotenv()`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Settings {
            database_url,
            host,
            port,
            log_filter,
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
