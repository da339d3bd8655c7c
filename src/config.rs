use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::models::{RankingSettings, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub traits: TraitSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraitSettings {
    /// Trait model TOML; the built-in model is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_path_weight")]
    pub path: f64,
    #[serde(default = "default_level_weight")]
    pub level: f64,
    #[serde(default = "default_resonance_weight")]
    pub resonance: f64,
    #[serde(default = "default_characteristics_weight")]
    pub characteristics: f64,
    #[serde(default = "default_preferences_weight")]
    pub preferences: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            path: default_path_weight(),
            level: default_level_weight(),
            resonance: default_resonance_weight(),
            characteristics: default_characteristics_weight(),
            preferences: default_preferences_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            path: config.path,
            level: config.level,
            resonance: config.resonance,
            characteristics: config.characteristics,
            preferences: config.preferences,
        }
    }
}

fn default_path_weight() -> f64 { 0.40 }
fn default_level_weight() -> f64 { 0.25 }
fn default_resonance_weight() -> f64 { 0.15 }
fn default_characteristics_weight() -> f64 { 0.10 }
fn default_preferences_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_accessible_price")]
    pub accessible_price: f64,
    #[serde(default = "default_path_length")]
    pub path_length: usize,
    #[serde(default = "default_path_candidate_limit")]
    pub path_candidate_limit: usize,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: default_min_score(),
            accessible_price: default_accessible_price(),
            path_length: default_path_length(),
            path_candidate_limit: default_path_candidate_limit(),
            similar_limit: default_similar_limit(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl From<&RankingConfig> for RankingSettings {
    fn from(config: &RankingConfig) -> Self {
        Self {
            min_score: config.min_score,
            accessible_price: config.accessible_price,
            default_limit: config.default_limit,
            path_length: config.path_length,
            path_candidate_limit: config.path_candidate_limit,
            similar_limit: config.similar_limit,
            parallel_threshold: config.parallel_threshold,
        }
    }
}

fn default_limit() -> usize { 6 }
fn default_max_limit() -> usize { 50 }
fn default_min_score() -> f64 { 0.3 }
fn default_accessible_price() -> f64 { 50.0 }
fn default_path_length() -> usize { 6 }
fn default_path_candidate_limit() -> usize { 20 }
fn default_similar_limit() -> usize { 3 }
fn default_parallel_threshold() -> usize { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, e.g. `info` or `matcha=debug,actix_web=info`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `compact`, `pretty` or `full`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Output style of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Full,
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        match self.format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "full" => LogFormat::Full,
            _ => LogFormat::Compact,
        }
    }

    /// Filter built from the configured level; `RUST_LOG` takes precedence
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.configured_filter())
    }

    fn configured_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.level)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("catalog.path", "data/catalog.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
