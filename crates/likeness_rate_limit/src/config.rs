//! Layered configuration for the engine.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (likeness.toml shipped with the library)
//! 2. `~/.config/likeness/likeness.toml`
//! 3. `./likeness.toml`
//! 4. `LIKENESS_*` environment variables, `__` separating nested keys

use crate::FeatureFlags;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use likeness_error::{ConfigError, LikenessError, LikenessResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../likeness.toml");

/// Provider endpoint and model selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// REST base URL
    pub base_url: String,
    /// Model used for text and JSON completions
    pub text_model: String,
    /// Model used for image editing
    pub image_model: String,
    /// Model used for video generation
    pub video_model: String,
    /// Model used for text embeddings
    pub embedding_model: String,
    /// `personGeneration` video parameter
    pub person_generation: String,
    /// Requested clip length
    pub duration_seconds: u32,
    /// Requested aspect ratio
    pub aspect_ratio: String,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image-preview".to_string(),
            video_model: "veo-3.0-generate-001".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            person_generation: "allow_adult".to_string(),
            duration_seconds: 8,
            aspect_ratio: "16:9".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Clip generation polling behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Delay between operation polls
    pub poll_interval_secs: u64,
    /// Maximum time spent polling one operation; `0` polls without bound
    pub poll_timeout_secs: u64,
    /// Clips requested when the caller does not say
    pub default_clip_count: u32,
    /// MIME type assumed for downloaded media without a content type
    pub default_media_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            poll_timeout_secs: 600,
            default_clip_count: 3,
            default_media_type: "video/mp4".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Delay between polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Poll budget, `None` when unbounded.
    pub fn poll_timeout(&self) -> Option<Duration> {
        (self.poll_timeout_secs > 0).then(|| Duration::from_secs(self.poll_timeout_secs))
    }
}

/// Refinement retry budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefinementConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Base of the exponential delay
    pub base_delay_ms: u64,
    /// Exclusive upper bound of the random jitter
    pub max_jitter_ms: u64,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 1000,
            max_jitter_ms: 1000,
        }
    }
}

/// Identity consistency settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Minimum similarity for a clip to pass
    pub threshold: f64,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            threshold: likeness_core::DEFAULT_CONSISTENCY_THRESHOLD,
        }
    }
}

/// Profile persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Realtime Database URL, used when cloud storage is enabled
    pub firebase_url: Option<String>,
    /// Environment variable holding the database auth token
    pub firebase_auth_env: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            firebase_url: None,
            firebase_auth_env: "FIREBASE_AUTH_TOKEN".to_string(),
        }
    }
}

/// Top-level engine configuration.
///
/// # Example
///
/// ```no_run
/// use likeness_rate_limit::LikenessConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LikenessConfig::load()?;
/// println!("Polling every {}s", config.generation.poll_interval_secs);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LikenessConfig {
    /// Provider settings
    pub gateway: GatewayConfig,
    /// Clip generation settings
    pub generation: GenerationConfig,
    /// Refinement retry settings
    pub refinement: RefinementConfig,
    /// Consistency validation settings
    pub consistency: ConsistencyConfig,
    /// Profile storage settings
    pub storage: StorageConfig,
    /// Feature flags
    pub features: FeatureFlags,
}

impl LikenessConfig {
    /// Load configuration from a specific file path on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LikenessResult<Self> {
        debug!("Loading configuration from file");

        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with the full precedence chain.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed, or if the
    /// result fails validation.
    #[instrument]
    pub fn load() -> LikenessResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("likeness").join("likeness.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("likeness").required(false));
        builder = builder.add_source(
            Environment::with_prefix("LIKENESS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> LikenessResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                LikenessError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LikenessError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.poll_interval_secs == 0 {
            return Err(ConfigError::new(
                "generation.poll_interval_secs must be positive",
            ));
        }
        if self.refinement.max_attempts == 0 {
            return Err(ConfigError::new(
                "refinement.max_attempts must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.consistency.threshold) {
            return Err(ConfigError::new(format!(
                "consistency.threshold must be within [0, 1], got {}",
                self.consistency.threshold
            )));
        }
        if self.features.cloud_storage && self.storage.firebase_url.is_none() {
            return Err(ConfigError::new(
                "features.cloud_storage requires storage.firebase_url",
            ));
        }
        Ok(())
    }
}
