//! Configuration, feature flags and rate-limit backoff.
//!
//! Configuration is layered from TOML files and the environment:
//! - Bundled defaults (include_str! from likeness.toml)
//! - User overrides (~/.config/likeness/likeness.toml, then ./likeness.toml)
//! - Environment variables with the `LIKENESS_` prefix
//!   (e.g. `LIKENESS_FEATURES__ANALYTICS=true`)
//!
//! [`RateLimitBackoff`] is the delay schedule used when the provider reports
//! rate limiting.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backoff;
mod config;
mod flags;

pub use backoff::RateLimitBackoff;
pub use config::{
    ConsistencyConfig, GatewayConfig, GenerationConfig, LikenessConfig, RefinementConfig,
    StorageConfig,
};
pub use flags::{Feature, FeatureFlags};
