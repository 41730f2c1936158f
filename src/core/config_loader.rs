//! Configuration file loader for batch-publisher
//!
//! This module provides configuration loading, merging and validation.

use super::config::{ConfigLayer, PublisherConfig};
use crate::core::error::PublishError;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration file name
pub const CONFIG_FILENAME: &str = ".batch-publish.yaml";

/// Environment variable pattern (${VAR_NAME})
const ENV_VAR_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Configuration load options
#[derive(Debug, Clone, Default)]
pub struct ConfigLoadOptions {
    /// Directory searched for `.batch-publish.yaml`
    pub base_dir: PathBuf,

    /// Explicit config file (must exist when given)
    pub config_path: Option<PathBuf>,

    /// CLI arguments (highest priority)
    pub cli_args: Option<ConfigLayer>,

    /// Environment variables
    pub env: HashMap<String, String>,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from multiple sources with priority
    ///
    /// Priority (high to low):
    /// 1. CLI arguments
    /// 2. Environment variables (`BATCH_PUBLISH_*`)
    /// 3. Config file (`--config` or `./.batch-publish.yaml`)
    /// 4. Default values
    pub async fn load(options: ConfigLoadOptions) -> Result<PublisherConfig, PublishError> {
        let mut config = PublisherConfig::default();

        let file_layer = match &options.config_path {
            Some(path) => Some(Self::load_required_file(path).await?),
            None => Self::load_config_file(&options.base_dir.join(CONFIG_FILENAME)).await?,
        };
        if let Some(layer) = file_layer {
            // The allow-list guards against the file choosing the command
            if layer.allowed_commands.is_some() {
                return Err(PublishError::ConfigError(
                    "allowedCommands cannot be set in a config file; pass --command or BATCH_PUBLISH_COMMAND instead"
                        .to_string(),
                ));
            }
            Self::expand_env_vars(layer, &options.env)?.apply_to(&mut config);
        }

        if let Some(layer) = Self::load_env_config(&options.env)? {
            layer.apply_to(&mut config);
        }

        if let Some(layer) = options.cli_args {
            layer.apply_to(&mut config);
        }

        Self::validate(&config)?;

        debug!(root = %config.root.display(), command = %config.command, "configuration resolved");
        Ok(config)
    }

    async fn load_required_file(path: &Path) -> Result<ConfigLayer, PublishError> {
        Self::load_config_file(path).await?.ok_or_else(|| {
            PublishError::ConfigError(format!("Config file not found: {}", path.display()))
        })
    }

    /// Load configuration from a YAML file; a missing file yields `None`
    async fn load_config_file(file_path: &Path) -> Result<Option<ConfigLayer>, PublishError> {
        if !fs::try_exists(file_path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = fs::read_to_string(file_path).await.map_err(|e| {
            PublishError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        // An empty file is a valid, empty layer
        if content.trim().is_empty() {
            return Ok(Some(ConfigLayer::default()));
        }

        let layer: ConfigLayer = serde_yaml::from_str(&content).map_err(|e| {
            PublishError::ConfigError(format!("Failed to parse YAML config: {}", e))
        })?;

        debug!(path = %file_path.display(), "loaded config file");
        Ok(Some(layer))
    }

    /// Load configuration from environment variables
    fn load_env_config(env: &HashMap<String, String>) -> Result<Option<ConfigLayer>, PublishError> {
        let mut layer = ConfigLayer::default();
        let mut has_changes = false;

        if let Some(root) = env.get("BATCH_PUBLISH_ROOT") {
            layer.root = Some(PathBuf::from(root));
            has_changes = true;
        }

        // A command named in the environment is trusted like a CLI flag
        if let Some(command) = env.get("BATCH_PUBLISH_COMMAND") {
            layer.command = Some(command.clone());
            layer.allowed_commands = Some(vec![command.clone()]);
            has_changes = true;
        }

        if let Some(timeout) = env.get("BATCH_PUBLISH_TIMEOUT") {
            let secs = timeout.parse::<u64>().map_err(|_| {
                PublishError::ConfigError(format!(
                    "BATCH_PUBLISH_TIMEOUT must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
            layer.timeout_secs = Some(secs);
            has_changes = true;
        }

        match env.get("BATCH_PUBLISH_DRY_RUN").map(|s| s.as_str()) {
            Some("true") | Some("1") => {
                layer.dry_run = Some(true);
                has_changes = true;
            }
            Some("false") | Some("0") => {
                layer.dry_run = Some(false);
                has_changes = true;
            }
            _ => {}
        }

        Ok(if has_changes { Some(layer) } else { None })
    }

    /// Expand `${VAR}` references in the string settings of a config file layer
    ///
    /// Paths that are not valid UTF-8 are left untouched.
    fn expand_env_vars(
        mut layer: ConfigLayer,
        env: &HashMap<String, String>,
    ) -> Result<ConfigLayer, PublishError> {
        let re = Regex::new(ENV_VAR_PATTERN)
            .map_err(|e| PublishError::ConfigError(format!("Invalid pattern: {}", e)))?;

        layer.root = match layer.root.take() {
            Some(root) => Some(Self::expand_path(&re, root, env)?),
            None => None,
        };
        layer.working_dir = match layer.working_dir.take() {
            Some(dir) => Some(Self::expand_path(&re, dir, env)?),
            None => None,
        };
        layer.command = match layer.command.take() {
            Some(command) => Some(Self::expand_string(&re, &command, env)?),
            None => None,
        };
        layer.args = match layer.args.take() {
            Some(args) => Some(
                args.iter()
                    .map(|arg| Self::expand_string(&re, arg, env))
                    .collect::<Result<_, _>>()?,
            ),
            None => None,
        };
        layer.required_manifest = match layer.required_manifest.take() {
            Some(manifest) => Some(Self::expand_string(&re, &manifest, env)?),
            None => None,
        };

        Ok(layer)
    }

    fn expand_path(
        re: &Regex,
        path: PathBuf,
        env: &HashMap<String, String>,
    ) -> Result<PathBuf, PublishError> {
        match path.to_str() {
            Some(text) => Ok(PathBuf::from(Self::expand_string(re, text, env)?)),
            None => Ok(path),
        }
    }

    fn expand_string(
        re: &Regex,
        value: &str,
        env: &HashMap<String, String>,
    ) -> Result<String, PublishError> {
        let mut missing = None;
        let expanded = re.replace_all(value, |caps: &regex::Captures| {
            let name = &caps[1];
            match env.get(name) {
                Some(v) => v.clone(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(PublishError::ConfigError(format!(
                "Environment variable '{}' is not defined",
                name
            ))),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Validate a resolved configuration
    pub fn validate(config: &PublisherConfig) -> Result<(), PublishError> {
        if config.command.trim().is_empty() {
            return Err(PublishError::ConfigError("command must not be empty".to_string()));
        }

        if !config.allowed_commands.contains(&config.command) {
            return Err(PublishError::ConfigError(format!(
                "command '{}' is not in allowedCommands ({})",
                config.command,
                config.allowed_commands.join(", ")
            )));
        }

        if !config.sequential && config.max_concurrency == 0 {
            return Err(PublishError::ConfigError(
                "maxConcurrency must be at least 1".to_string(),
            ));
        }

        if config.timeout_secs == Some(0) {
            return Err(PublishError::ConfigError(
                "timeoutSecs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
