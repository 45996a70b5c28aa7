use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use jsonschema::{JSONSchema, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{profile::TraitProfile, types::default_reasoning_mode};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub textgen: TextGenConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub kernel: KernelRuntimeConfig,
    #[serde(default)]
    pub arbitration: ArbitrationRuntimeConfig,
    #[serde(default)]
    pub profile: TraitProfile,
}

fn default_enabled_true() -> bool {
    true
}

fn default_logging_dir() -> PathBuf {
    PathBuf::from("./logs/noema")
}

fn default_logging_filter() -> String {
    "info".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_logging_retention_days() -> usize {
    14
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_logging_retention_days")]
    pub retention_days: usize,
    #[serde(default = "default_enabled_true")]
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_logging_dir(),
            filter: default_logging_filter(),
            rotation: default_logging_rotation(),
            retention_days: default_logging_retention_days(),
            stderr_warn_enabled: true,
        }
    }
}

fn default_textgen_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_textgen_model() -> String {
    "llama3".to_string()
}

fn default_textgen_timeout_ms() -> u64 {
    60_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "kebab-case")]
pub enum TextGenConfig {
    Ollama {
        #[serde(default)]
        config: OllamaBackendConfig,
    },
    /// No generator wired; every stage degrades to its deterministic
    /// fallback.
    None,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        TextGenConfig::Ollama {
            config: OllamaBackendConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaBackendConfig {
    #[serde(default = "default_textgen_base_url")]
    pub base_url: String,
    #[serde(default = "default_textgen_model")]
    pub model: String,
    #[serde(default = "default_textgen_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for OllamaBackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_textgen_base_url(),
            model: default_textgen_model(),
            timeout_ms: default_textgen_timeout_ms(),
        }
    }
}

impl OllamaBackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_chain_dir() -> PathBuf {
    PathBuf::from("./state/chains")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_chain_dir")]
    pub chain_dir: PathBuf,
    #[serde(default = "default_enabled_true")]
    pub persist_chains: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            chain_dir: default_chain_dir(),
            persist_chains: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelRuntimeConfig {
    #[serde(default = "default_reasoning_mode")]
    pub reasoning_mode: String,
}

impl Default for KernelRuntimeConfig {
    fn default() -> Self {
        Self {
            reasoning_mode: default_reasoning_mode(),
        }
    }
}

fn default_selection_threshold() -> f64 {
    crate::arbitration::DEFAULT_SELECTION_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrationRuntimeConfig {
    #[serde(default = "default_enabled_true")]
    pub enabled: bool,
    #[serde(default = "default_selection_threshold")]
    pub selection_threshold: f64,
}

impl Default for ArbitrationRuntimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selection_threshold: default_selection_threshold(),
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let schema_path = resolve_schema_path(config_base, &config_value)?;
        validate_against_schema(&config_value, &schema_path)?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize core config")?;

        config
            .profile
            .validate()
            .map_err(|e| anyhow!("trait profile out of range: {e}"))?;
        if !(0.0..=1.0).contains(&config.arbitration.selection_threshold) {
            return Err(anyhow!(
                "arbitration.selection_threshold must be within [0, 1], got {}",
                config.arbitration.selection_threshold
            ));
        }

        if !config.memory.chain_dir.is_absolute() {
            config.memory.chain_dir = config_base.join(&config.memory.chain_dir);
        }

        Ok(config)
    }
}

fn resolve_schema_path(config_base: &Path, config_value: &Value) -> Result<PathBuf> {
    if let Some(path_text) = config_value.get("$schema").and_then(|value| value.as_str()) {
        let configured = PathBuf::from(path_text);
        if configured.is_absolute() {
            return Ok(configured);
        }
        return Ok(config_base.join(&configured));
    }

    let root_default = config_base.join("core/noema.schema.json");
    if root_default.exists() {
        return Ok(root_default);
    }

    let local_default = config_base.join("noema.schema.json");
    if local_default.exists() {
        return Ok(local_default);
    }

    Err(anyhow!(
        "unable to resolve schema path: expected $schema in config, core/noema.schema.json, or noema.schema.json"
    ))
}

fn validate_against_schema(config_value: &Value, schema_path: &Path) -> Result<()> {
    let schema_content = fs::read_to_string(schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;
    let schema: Value = serde_json::from_str(&schema_content)
        .with_context(|| format!("failed to parse schema {}", schema_path.display()))?;

    let compiled =
        JSONSchema::compile(&schema).map_err(|e| anyhow!("failed to compile schema: {e}"))?;

    match compiled.validate(config_value) {
        Ok(()) => Ok(()),
        Err(errors_iter) => {
            let validation_errors: Vec<ValidationError> = errors_iter.collect();
            let messages: Vec<String> = validation_errors
                .into_iter()
                .map(|error| error.to_string())
                .collect();
            Err(anyhow!("config validation failed: {}", messages.join("; ")))
        }
    }
}
