//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use likeness_core::{EmotionIntensity, VideoCategory};
use std::path::PathBuf;

/// LikenessAI - actor likeness analysis, emotion synthesis and refinement
#[derive(Parser, Debug)]
#[command(name = "likeness")]
#[command(about = "Actor likeness analysis, emotion clip synthesis and refinement", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether footage suits likeness training
    Analyze {
        /// Video file or data URI
        video: String,
    },

    /// Score footage quality against the training rubric
    Quality {
        /// Video file or data URI
        video: String,
    },

    /// Build an identity embedding from reference frames
    Identity {
        /// Image files or data URIs; the first is canonical
        #[arg(required = true)]
        frames: Vec<String>,

        /// Store the embedding on this profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Generate video clips of the actor showing an emotion
    Generate {
        /// Source image file or data URI
        #[arg(long)]
        image: String,

        /// Target emotion
        #[arg(long)]
        emotion: String,

        /// Number of concurrent attempts (defaults to generation.default_clip_count)
        #[arg(long)]
        count: Option<u32>,

        /// Expression intensity
        #[arg(long)]
        intensity: Option<EmotionIntensity>,

        /// Identity embedding JSON file
        #[arg(long)]
        identity: Option<PathBuf>,

        /// Score every clip against the identity and drop mismatches
        #[arg(long, requires = "identity")]
        validate: bool,

        /// Record the clips on this profile
        #[arg(long)]
        profile: Option<String>,

        /// Write clips into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Edit a likeness image with natural-language instructions
    Refine {
        /// Base image file or data URI
        #[arg(long)]
        image: String,

        /// Editing instructions
        #[arg(long)]
        instructions: String,

        /// Write the refined image here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score media against an identity embedding
    Validate {
        /// Image or video file, or data URI
        #[arg(long)]
        media: String,

        /// Identity embedding JSON file
        #[arg(long)]
        identity: PathBuf,

        /// Text description of the identity
        #[arg(long)]
        description: Option<String>,

        /// Minimum passing score (defaults to consistency.threshold)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// List emotions offered for generation
    Emotions {
        /// Show coverage for this profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Show feature flag status
    Flags,

    /// Actor profile management
    #[command(subcommand)]
    Profile(ProfileCommands),
}

/// Actor profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create a profile
    Create {
        /// Actor name
        name: String,
    },

    /// List profiles, oldest first
    List,

    /// Show a profile
    Show {
        /// Profile id
        id: String,
    },

    /// Delete a profile
    Delete {
        /// Profile id
        id: String,
    },

    /// Attach a training video
    AddVideo {
        /// Profile id
        id: String,

        /// Video category
        #[arg(long, default_value = "facial")]
        category: VideoCategory,

        /// Video URI
        uri: String,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
}
