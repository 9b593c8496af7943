use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tasks.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL`, `API_HOST` and `PORT`, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = match host.as_str() {
            "localhost" => IpAddr::from([127, 0, 0, 1]),
            other => other.parse().with_context(|| format!("API_HOST {other:?} is not an IP address"))?,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT {raw:?} is not a valid port"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { database_url, addr: SocketAddr::new(host, port) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn localhost_and_port_are_honoured() {
        let config = config(&[("API_HOST", "localhost"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("PORT", "eighty")]).is_err());
    }
}
