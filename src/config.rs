use std::time::Duration;

use anyhow::{Context, Result};

use crate::DEFAULT_SERVER_ADDR;

/// Client configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_addr: String,
    /// No timeout unless configured; a hung upload then stays busy.
    pub http_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_timeout = match lookup("RECRUIT_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse::<u64>().with_context(
                || format!("RECRUIT_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"),
            )?)),
            None => None,
        };

        Ok(Settings {
            server_addr: lookup("RECRUIT_SERVER_ADDR")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            http_timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.server_addr, DEFAULT_SERVER_ADDR);
        assert_eq!(s.http_timeout, None);
        assert_eq!(s.rust_log, "info");
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("RECRUIT_SERVER_ADDR", "https://hire.example.com"),
            ("RECRUIT_HTTP_TIMEOUT_SECS", " 30 "),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(s.server_addr, "https://hire.example.com");
        assert_eq!(s.http_timeout, Some(Duration::from_secs(30)));
        assert_eq!(s.rust_log, "debug");
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = settings(&[("RECRUIT_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("RECRUIT_HTTP_TIMEOUT_SECS"));
    }
}
