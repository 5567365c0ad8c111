use std::{net::{IpAddr, Ipv4Addr, SocketAddr}, path::PathBuf};

use crate::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};

pub const DEFAULT_SAMPLE_WRITINGS_PATH: &str = "resources/sample_writings.txt";
pub const DEFAULT_PORT: u16 = 5000;

/// Process settings read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub sample_writings_path: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The API key is not validated here; a missing key only fails the model call.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GOOGLE_API_KEY").or_else(|| non_empty("GEMINI_API_KEY"));
        let host: IpAddr = non_empty("HOST")
            .and_then(|v| v.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port: u16 = non_empty("PORT").and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT);

        Self {
            api_key,
            api_base: non_empty("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            sample_writings_path: non_empty("SAMPLE_WRITINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_WRITINGS_PATH)),
            addr: SocketAddr::new(host, port),
        }
    }
}
