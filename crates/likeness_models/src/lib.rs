//! Generative provider gateways for the LikenessAI engine.
//!
//! [`GeminiGateway`] implements [`ModelGateway`] over the Gemini REST API:
//! completions through `generateContent`, embeddings through `embedContent`,
//! and Veo video generation through `predictLongRunning` plus operation
//! polling. Provider errors are classified into
//! [`ErrorClass`](likeness_error::ErrorClass) before they leave this crate.
//!
//! [`HttpMediaFetcher`] downloads the media URLs that finished operations
//! point at.
//!
//! # Example
//!
//! ```no_run
//! use likeness_interface::{CompletionRequest, ModelGateway, PromptPart};
//! use likeness_models::GeminiGateway;
//! use likeness_rate_limit::GatewayConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = GeminiGateway::new(&GatewayConfig::default())?;
//! let request = CompletionRequest::builder()
//!     .parts(vec![PromptPart::text("Say hello")])
//!     .build()?;
//! let completion = gateway.complete(&request).await?;
//! println!("{}", completion.text());
//! # Ok(())
//! # }
//! ```
//!
//! [`ModelGateway`]: likeness_interface::ModelGateway

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetcher;
mod gemini;
mod metrics;

pub use fetcher::HttpMediaFetcher;
pub use gemini::GeminiGateway;
pub use metrics::GatewayMetrics;
