use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

use crate::gemini::DEMO_KEY;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub addr: SocketAddr,
    /// Signs this email in at startup instead of waiting for `/api/session/login`.
    pub auto_sign_in: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Ignoring unparseable PORT={:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let host = match non_empty("HOST") {
            Some(raw) => raw.parse::<IpAddr>().unwrap_or_else(|_| {
                warn!("Ignoring unparseable HOST={:?}, binding all interfaces", raw);
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Self {
            api_key: non_empty("GEMINI_API_KEY").unwrap_or_else(|| DEMO_KEY.into()),
            api_base: non_empty("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            addr: SocketAddr::new(host, port),
            auto_sign_in: non_empty("AUTO_SIGN_IN"),
        }
    }

    /// Enough of the key to tell which one is loaded.
    pub fn masked_key(&self) -> String {
        format!("{}...", &self.api_key.chars().take(10).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg.api_key, DEMO_KEY);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(cfg.auto_sign_in, None);
    }

    #[test]
    fn reads_overrides_and_falls_back_on_garbage() {
        let cfg = config(&[
            ("GEMINI_API_KEY", "abcdefghijklmnop"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("PORT", "not-a-port"),
            ("HOST", "127.0.0.1"),
            ("AUTO_SIGN_IN", " ada@example.com "),
        ]);
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(cfg.auto_sign_in.as_deref(), Some("ada@example.com"));
        assert_eq!(cfg.masked_key(), "abcdefghij...");
    }
}
