//! Core data types for the LikenessAI engine.
//!
//! Everything in this crate is plain data plus pure functions: data URIs,
//! generation requests and results, actor profiles, the emotion taxonomy and
//! the cosine similarity scorer. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod data_uri;
mod emotion;
mod operation;
mod profile;
mod request;
mod result;
mod similarity;

pub use analysis::{
    DataQualityReport, DiversityScore, FaceVisibilityScore, IdentityEmbedding, LightingScore,
    MotionBlurScore, ResolutionScore, SuitabilityReport,
};
pub use data_uri::DataUri;
pub use emotion::{
    BASE_EMOTIONS, EXPANDED_EMOTIONS, EmotionIntensity, TOTAL_TRACKED_EMOTIONS, coverage_percent,
};
pub use operation::{MediaResult, Operation, OperationFailure};
pub use profile::{ActorProfile, EmotionClipData, MotorTraits, TrainingVideos, VideoCategory};
pub use request::{
    ClipRequest, ClipRequestBuilder, DEFAULT_CONSISTENCY_THRESHOLD, RefineRequest,
    ValidateRequest,
};
pub use result::{ClipBatch, ClipResult, ConsistencyResult, RefineResponse};
pub use similarity::cosine_similarity;
