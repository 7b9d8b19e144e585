//! Generation, validation and refinement orchestration.
//!
//! Every component here is generic over a [`ModelGateway`] and holds no
//! mutable state, so one instance can serve concurrent calls.
//!
//! - [`ConsistencyValidator`]: describe media, embed, score against an identity
//! - [`ClipGenerator`]: concurrent video generation with settle-all aggregation
//! - [`LikenessRefiner`]: image editing with rate-limit backoff
//! - [`IdentityEmbedder`]: text-proxy identity embedding from reference frames
//! - [`VideoAnalyzer`]: suitability and quality reports for training footage
//!
//! [`ModelGateway`]: likeness_interface::ModelGateway

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod clips;
mod consistency;
mod identity;
pub mod prompts;
mod refine;

pub use analysis::VideoAnalyzer;
pub use clips::{ClipGenerator, ClipSettings};
pub use consistency::ConsistencyValidator;
pub use identity::{IdentityEmbedder, MAX_REFERENCE_FRAMES};
pub use refine::LikenessRefiner;
