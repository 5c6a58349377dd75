// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::consts::{CONFIG_ENV, DEFAULT_CONFIG_FILE};
use crate::core::{EnvKeyProvider, InterpreterExecutor, Template};
use crate::error::{Result, VaultError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub key: KeySettings,
    pub interpreter: InterpreterSettings,
    pub template: TemplateSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeySettings {
    pub env_var: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterSettings {
    pub program: String,
    pub args: Vec<String>,
    /// Descriptor the interpreter reads its script from; 0 is stdin
    pub source_fd: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
    pub preamble: String,
    pub postamble: String,
}

impl Config {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| VaultError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn key_provider(&self) -> EnvKeyProvider {
        EnvKeyProvider::new(self.key.env_var.clone())
    }

    pub fn executor(&self) -> InterpreterExecutor {
        InterpreterExecutor::from(&self.interpreter)
    }

    pub fn template(&self) -> Template {
        Template::from(&self.template)
    }
}

/// Load the config named by `SCRIPT_VAULT_CONFIG`, else `./script-vault.toml`,
/// else the built-in defaults
pub fn load() -> Result<Config> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_from(Path::new(&path)),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_from(&path)
            } else {
                debug!("no config file found, using built-in defaults");
                Ok(Config::default())
            }
        }
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(VaultError::io(format!("read config file '{}'", path.display())))?;
    let config = Config::from_toml_str(&content, path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
