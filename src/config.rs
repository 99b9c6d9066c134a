//! Application configuration resolved once at start-up.
//!
//! The engine itself never reads the environment; the host turns an
//! [`AppConfig`] into an [`EngineConfig`] and hands that over.

use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::Level;

use crate::core::EngineConfig;
use crate::render::RendererKind;

pub const ENV_KEY: &str = "BLOCKFALL_ENV";
pub const ENV_FALLBACK_KEY: &str = "APP_ENV";
pub const RENDERER_KEY: &str = "BLOCKFALL_RENDERER";
pub const SOCKET_OVERRIDE_KEY: &str = "BLOCKFALL_SOCKET_URL_OVERRIDE";
pub const SEED_KEY: &str = "BLOCKFALL_SEED";
pub const LOG_PATH_KEY: &str = "BLOCKFALL_LOG_PATH";
pub const LOG_LEVEL_KEY: &str = "BLOCKFALL_LOG_LEVEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid deployment environment `{0}`")]
    InvalidEnvironment(String),
    #[error("`{0}` is set but empty")]
    MissingValue(&'static str),
    #[error("unknown renderer `{0}`")]
    UnknownRenderer(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeployEnv {
    #[default]
    Dev,
    Qa,
    Prod,
}

impl DeployEnv {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "d" => Ok(DeployEnv::Dev),
            "preview" | "test" | "qa" => Ok(DeployEnv::Qa),
            "prod" | "production" | "p" => Ok(DeployEnv::Prod),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }

    /// Per-environment presence endpoint variable.
    pub fn socket_key(&self) -> &'static str {
        match self {
            DeployEnv::Dev => "BLOCKFALL_SOCKET_URL_DEV",
            DeployEnv::Qa => "BLOCKFALL_SOCKET_URL_QA",
            DeployEnv::Prod => "BLOCKFALL_SOCKET_URL_PROD",
        }
    }
}

impl fmt::Display for DeployEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeployEnv::Dev => "dev",
            DeployEnv::Qa => "qa",
            DeployEnv::Prod => "prod",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: DeployEnv,
    pub renderer: RendererKind,
    /// Presence endpoint; `None` disables presence.
    pub socket_url: Option<String>,
    pub seed: u32,
    /// Log file. Without one no subscriber is installed.
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: DeployEnv::Dev,
            renderer: RendererKind::Surface,
            socket_url: None,
            seed: clock_seed(),
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::MissingValue(key)),
                Some(v) => Ok(Some(v.trim().to_string())),
                None => Ok(None),
            }
        };

        let raw_env = match get(ENV_KEY)? {
            Some(raw) => Some(raw),
            None => get(ENV_FALLBACK_KEY)?,
        };
        let env = match raw_env {
            Some(raw) => DeployEnv::parse(&raw)?,
            None => DeployEnv::default(),
        };

        let renderer = match get(RENDERER_KEY)? {
            Some(raw) => {
                RendererKind::from_str(&raw).ok_or(ConfigError::UnknownRenderer(raw))?
            }
            None => RendererKind::default(),
        };

        let socket_url = match get(SOCKET_OVERRIDE_KEY)? {
            Some(url) => Some(url),
            None => get(env.socket_key())?,
        };

        let seed = match get(SEED_KEY)? {
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: SEED_KEY,
                value: raw,
            })?,
            None => clock_seed(),
        };

        let log_level = match get(LOG_LEVEL_KEY)? {
            Some(raw) => raw.parse::<Level>().map_err(|_| ConfigError::InvalidValue {
                key: LOG_LEVEL_KEY,
                value: raw,
            })?,
            None => Level::INFO,
        };

        Ok(Self {
            env,
            renderer,
            socket_url,
            seed,
            log_path: get(LOG_PATH_KEY)?.map(PathBuf::from),
            log_level,
        })
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig::default().with_seed(self.seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_aliases() {
        for (raw, want) in [
            ("Development", DeployEnv::Dev),
            ("d", DeployEnv::Dev),
            ("preview", DeployEnv::Qa),
            ("TEST", DeployEnv::Qa),
            ("production", DeployEnv::Prod),
            ("p", DeployEnv::Prod),
        ] {
            assert_eq!(DeployEnv::parse(raw), Ok(want), "{raw}");
        }
        assert_eq!(
            DeployEnv::parse("staging"),
            Err(ConfigError::InvalidEnvironment("staging".into()))
        );
    }

    #[test]
    fn socket_url_follows_environment() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (ENV_KEY, "qa"),
            ("BLOCKFALL_SOCKET_URL_DEV", "dev:1"),
            ("BLOCKFALL_SOCKET_URL_QA", "qa:2"),
        ]))
        .unwrap();
        assert_eq!(cfg.env, DeployEnv::Qa);
        assert_eq!(cfg.socket_url.as_deref(), Some("qa:2"));
    }

    #[test]
    fn override_wins() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (ENV_KEY, "prod"),
            ("BLOCKFALL_SOCKET_URL_PROD", "prod:1"),
            (SOCKET_OVERRIDE_KEY, "local:9"),
        ]))
        .unwrap();
        assert_eq!(cfg.socket_url.as_deref(), Some("local:9"));
    }

    #[test]
    fn primary_env_key_ignores_empty_fallback() {
        let cfg =
            AppConfig::from_lookup(lookup(&[(ENV_KEY, "prod"), (ENV_FALLBACK_KEY, "")])).unwrap();
        assert_eq!(cfg.env, DeployEnv::Prod);

        let err = AppConfig::from_lookup(lookup(&[(ENV_FALLBACK_KEY, "")])).err();
        assert_eq!(err, Some(ConfigError::MissingValue(ENV_FALLBACK_KEY)));
    }

    #[test]
    fn fallback_env_key_is_read() {
        let cfg = AppConfig::from_lookup(lookup(&[(ENV_FALLBACK_KEY, "production")])).unwrap();
        assert_eq!(cfg.env, DeployEnv::Prod);
        assert_eq!(cfg.socket_url, None);
    }

    #[test]
    fn renderer_seed_and_logging() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (RENDERER_KEY, "webgl"),
            (SEED_KEY, "42"),
            (LOG_PATH_KEY, "/tmp/blockfall.log"),
            (LOG_LEVEL_KEY, "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.renderer, RendererKind::Raster);
        assert_eq!(cfg.engine().seed, 42);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(cfg.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(RENDERER_KEY, "vulkan")])),
            Err(ConfigError::UnknownRenderer("vulkan".into()))
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(SEED_KEY, "-3")])),
            Err(ConfigError::InvalidValue { key: SEED_KEY, .. })
        ));
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(SOCKET_OVERRIDE_KEY, " ")])),
            Err(ConfigError::MissingValue(SOCKET_OVERRIDE_KEY))
        );
    }
}
