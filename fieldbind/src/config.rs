//! Binder configuration loaded through figment.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. An optional TOML, YAML or JSON file
//! 3. `FIELDBIND_`-prefixed environment variables (`FIELDBIND_PARSE_MODE=legacy`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collection::ApplyMode;
use crate::convert::ParseMode;
use crate::error::{BindError, Result};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FIELDBIND_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub parse_mode: ParseMode,
    pub apply_mode: ApplyMode,
}

impl BindConfig {
    /// Defaults overridden by the environment.
    pub fn load() -> Result<Self> {
        Self::extract(Self::figment())
    }

    /// Defaults, then `path`, then the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = file_provider(path)?;
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    /// The figment behind [`load`](Self::load), for callers that add their own providers.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        debug!(
            parse_mode = ?config.parse_mode,
            apply_mode = ?config.apply_mode,
            "bind config loaded"
        );
        Ok(config)
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(BindError::Config {
            message: format!("unsupported config file format: {}", path.display()),
        }),
    }
}
