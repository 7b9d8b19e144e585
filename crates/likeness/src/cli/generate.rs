//! Analysis, generation, refinement and validation handlers.

use super::commands::OutputFormat;
use super::media::{extension_for_mime, load_identity, load_media, write_media};
use super::output::emit;
use anyhow::{Context, Result};
use likeness::{
    ClipRequest, DataUri, EmotionIntensity, LikenessEngine, RefineRequest, ValidateRequest,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Suitability report for footage.
pub async fn analyze(engine: &LikenessEngine, video: &str, format: OutputFormat) -> Result<()> {
    let video = load_media(video).await?;
    let report = engine.analyze_footage(&video).await?;
    emit(format, &report, |r| println!("{}", r.suitability_report))
}

/// Quality rubric for footage.
pub async fn quality(engine: &LikenessEngine, video: &str, format: OutputFormat) -> Result<()> {
    let video = load_media(video).await?;
    let report = engine.validate_quality(&video).await?;
    emit(format, &report, |r| {
        println!("Overall score: {:.0}%", r.overall_score * 100.0);
        println!(
            "  Resolution:      {:.2} ({}x{})",
            r.resolution.score, r.resolution.width, r.resolution.height
        );
        println!("  Lighting:        {:.2}", r.lighting.score);
        for issue in &r.lighting.issues {
            println!("    - {}", issue);
        }
        println!(
            "  Face visibility: {:.2} ({:.0}% of frames)",
            r.face_visibility.score, r.face_visibility.percentage
        );
        println!(
            "  Motion blur:     {:.2}{}",
            r.motion_blur.score,
            if r.motion_blur.detected { " (detected)" } else { "" }
        );
        println!(
            "  Diversity:       {:.2} ({} angles, {} expressions)",
            r.diversity.score, r.diversity.angles, r.diversity.expressions
        );
        if !r.recommendations.is_empty() {
            println!("Recommendations:");
            for recommendation in &r.recommendations {
                println!("  - {}", recommendation);
            }
        }
    })
}

/// Identity embedding from reference frames.
pub async fn identity(
    engine: &LikenessEngine,
    frames: &[String],
    profile: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut loaded = Vec::with_capacity(frames.len());
    for frame in frames {
        loaded.push(load_media(frame).await?);
    }
    let identity = match profile {
        Some(id) => engine.identity_for_profile(id, &loaded).await?,
        None => engine.generate_identity(&loaded).await?,
    };
    emit(format, &identity, |i| {
        println!("Face description: {}", i.face_description);
        println!("Embedding dimensions: {}", i.embedding.len());
        if let Some(id) = profile {
            println!("Stored on profile {}", id);
        }
    })
}

/// Options for clip generation.
#[derive(Debug)]
pub struct GenerateOptions {
    /// Source image argument
    pub image: String,
    /// Target emotion
    pub emotion: String,
    /// Attempt count override
    pub count: Option<u32>,
    /// Requested intensity
    pub intensity: Option<EmotionIntensity>,
    /// Identity embedding file
    pub identity: Option<PathBuf>,
    /// Whether to validate clips
    pub validate: bool,
    /// Profile to record clips on
    pub profile: Option<String>,
    /// Directory for clip files
    pub out_dir: Option<PathBuf>,
}

/// Generate a clip batch.
pub async fn generate(
    engine: &LikenessEngine,
    options: GenerateOptions,
    format: OutputFormat,
) -> Result<()> {
    let mut builder = ClipRequest::builder();
    builder
        .source_image(load_media(&options.image).await?)
        .target_emotion(options.emotion.as_str())
        .clip_count(
            options
                .count
                .unwrap_or(engine.config().generation.default_clip_count),
        )
        .validate_consistency(options.validate);
    if let Some(intensity) = options.intensity {
        builder.intensity(intensity);
    }
    if let Some(path) = &options.identity {
        let (embedding, _) = load_identity(path).await?;
        builder.identity_embedding(embedding);
    }
    let request = builder.build().context("Invalid clip request")?;

    let batch = match &options.profile {
        Some(id) => engine.generate_for_profile(id, &request).await?,
        None => engine.generate_clips(&request).await?,
    };

    let mut written = Vec::new();
    if let Some(dir) = &options.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for (index, clip) in batch.clips.iter().enumerate() {
            let path = clip_path(dir, &options.emotion, index, &clip.media_uri);
            write_media(&clip.media_uri, &path).await?;
            written.push(path);
        }
        info!(files = written.len(), "Clips written");
    }

    emit(format, &batch, |b| {
        println!(
            "Generated {} of {} clips for {}",
            b.clips.len(),
            request.clip_count(),
            options.emotion
        );
        for (index, clip) in b.clips.iter().enumerate() {
            let score = clip
                .consistency_score
                .map(|s| format!("{:.1}% consistent", s * 100.0))
                .unwrap_or_else(|| "not scored".to_string());
            match written.get(index) {
                Some(path) => println!("  [{}] {} ({})", index, path.display(), score),
                None => println!(
                    "  [{}] {} ({} bytes, {})",
                    index,
                    clip.media_uri.mime_type(),
                    clip.media_uri.data().len(),
                    score
                ),
            }
        }
    })
}

fn clip_path(dir: &Path, emotion: &str, index: usize, media: &DataUri) -> PathBuf {
    dir.join(format!(
        "{}-{}.{}",
        emotion.to_lowercase(),
        index,
        extension_for_mime(media.mime_type())
    ))
}

/// Refine a likeness image.
pub async fn refine(
    engine: &LikenessEngine,
    image: &str,
    instructions: String,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let request = RefineRequest {
        base_image: load_media(image).await?,
        instructions,
    };
    let response = engine.refine(&request).await?;
    if let Some(path) = output {
        write_media(&response.refined_image_uri, path).await?;
    }
    emit(format, &response, |r| match output {
        Some(path) => println!("Refined image written to {}", path.display()),
        None => println!("{}", r.refined_image_uri),
    })
}

/// Score media against an identity.
pub async fn validate(
    engine: &LikenessEngine,
    media: &str,
    identity: &Path,
    description: Option<String>,
    threshold: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let (identity_embedding, stored_description) = load_identity(identity).await?;
    let request = ValidateRequest {
        generated_media_uri: load_media(media).await?,
        identity_embedding,
        identity_description: description.or(stored_description),
        threshold: threshold.unwrap_or(engine.config().consistency.threshold),
    };
    let result = engine.validate(&request).await?;
    emit(format, &result, |r| {
        let verdict = if r.passed { "PASS" } else { "FAIL" };
        println!(
            "{}: score {:.3} (threshold {:.2})",
            verdict, r.score, r.threshold
        );
        if let Some(details) = &r.details {
            println!("  {}", details);
        }
    })
}
