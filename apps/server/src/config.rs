//! Server configuration from environment variables.

use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;
use vowel_core::{GameSettings, VowelCatalog};

use crate::services::sessions::DEFAULT_IDLE_TIMEOUT;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Seed for reproducible sessions.
    pub rng_seed: Option<u64>,
    /// How long a session may sit untouched before it is evicted.
    pub session_idle_timeout: Duration,
    pub settings: GameSettings,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognised vars:
    /// - HOST (default 0.0.0.0)
    /// - PORT (default 3000)
    /// - FEEDBACK_DELAY_MS
    /// - VOWEL_CATALOG_PATH
    /// - GAME_RNG_SEED
    /// - SESSION_IDLE_SECS (default 1800)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().context("PORT must be a port number")?,
            None => 3000,
        };

        let mut settings = GameSettings::default();
        if let Some(delay) = var("FEEDBACK_DELAY_MS") {
            settings.feedback_delay_ms = delay
                .parse::<u64>()
                .context("FEEDBACK_DELAY_MS must be a whole number of milliseconds")?;
        }

        let rng_seed = var("GAME_RNG_SEED")
            .map(|seed| seed.parse::<u64>().context("GAME_RNG_SEED must be an unsigned integer"))
            .transpose()?;

        let session_idle_timeout = match var("SESSION_IDLE_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_IDLE_TIMEOUT,
        };

        Ok(Self {
            host,
            port,
            catalog_path: var("VOWEL_CATALOG_PATH").map(PathBuf::from),
            rng_seed,
            session_idle_timeout,
            settings,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> anyhow::Result<VowelCatalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(VowelCatalog::builtin());
        };

        tracing::info!("Loading vowel catalog from {}", path.display());
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = VowelCatalog::from_json(&json)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_vars() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.settings, GameSettings::default());
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.load_catalog().unwrap().len(), 15);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("FEEDBACK_DELAY_MS", "250"),
            ("GAME_RNG_SEED", "42"),
            ("SESSION_IDLE_SECS", "90"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.settings.feedback_delay_ms, 250);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(90));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("FEEDBACK_DELAY_MS", "-1")]).is_err());
        assert!(config(&[("GAME_RNG_SEED", "seed")]).is_err());
        assert!(config(&[("SESSION_IDLE_SECS", "soon")]).is_err());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = config(&[("VOWEL_CATALOG_PATH", "/nonexistent/catalog.json")]).unwrap();
        assert!(config.load_catalog().is_err());
    }
}
