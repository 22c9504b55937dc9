//! Runtime configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = ".dorm-data";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
    /// Upper bound on one store write during batch provisioning
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DORM_DATA_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let port = parse_or(lookup("DORM_PORT"), "DORM_PORT", DEFAULT_PORT);
        let timeout_secs = parse_or(
            lookup("DORM_STORE_TIMEOUT_SECS"),
            "DORM_STORE_TIMEOUT_SECS",
            DEFAULT_STORE_TIMEOUT_SECS,
        )
        .max(1);

        Self {
            data_dir,
            port,
            store_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join("documents.json")
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    raw: Option<String>,
    name: &str,
    default: T,
) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        None => default,
    }
}
