//! Profile management and informational handlers.

use super::commands::{OutputFormat, ProfileCommands};
use super::output::emit;
use anyhow::{Result, bail};
use likeness::{ActorProfile, LikenessEngine, coverage_percent};
use serde_json::json;

/// Warning for backends that forget profiles when the process exits.
fn backend_notice(backend: &str) -> Option<&'static str> {
    (backend == "memory").then_some(
        "note: profiles are kept in memory for this run only; enable features.cloud_storage to persist them",
    )
}

/// Handle profile subcommands.
pub async fn handle_profile_command(
    engine: &LikenessEngine,
    cmd: ProfileCommands,
    format: OutputFormat,
) -> Result<()> {
    let profiles = engine.profiles();
    if let Some(notice) = backend_notice(profiles.backend_name()) {
        eprintln!("{}", notice);
    }
    match cmd {
        ProfileCommands::Create { name } => {
            let profile = profiles.create_profile(&name).await?;
            emit(format, &profile, |p| println!("Created profile {} ({})", p.id, p.name))
        }

        ProfileCommands::List => {
            let all = profiles.list_profiles().await?;
            emit(format, &all, |all| {
                println!("Profiles ({} backend):", profiles.backend_name());
                println!("{:-<80}", "");
                for p in all {
                    println!(
                        "{}  {:<24} coverage {:>5.1}%  consistency {:.2}",
                        p.id, p.name, p.emotion_coverage_percent, p.consistency_score
                    );
                }
                println!("Total: {} profiles", all.len());
            })
        }

        ProfileCommands::Show { id } => match profiles.get_profile(&id).await? {
            Some(profile) => emit(format, &profile, |p| print_profile(engine, p)),
            None => bail!("Profile not found: {}", id),
        },

        ProfileCommands::Delete { id } => {
            if !profiles.delete_profile(&id).await? {
                bail!("Profile not found: {}", id);
            }
            emit(format, &json!({ "deleted": id }), |_| {
                println!("Deleted profile {}", id)
            })
        }

        ProfileCommands::AddVideo { id, category, uri } => {
            match profiles.add_training_video(&id, category, &uri).await? {
                Some(profile) => emit(format, &profile.training_videos, |videos| {
                    println!(
                        "Added {} video to {} ({} {} videos)",
                        category,
                        id,
                        videos.get(category).len(),
                        category
                    )
                }),
                None => bail!("Profile not found: {}", id),
            }
        }
    }
}

fn print_profile(engine: &LikenessEngine, profile: &ActorProfile) {
    println!("{} ({})", profile.name, profile.id);
    println!("  Created:     {}", profile.created_at);
    println!("  Updated:     {}", profile.updated_at);
    println!("  Training videos: {}", profile.training_videos.len());
    println!(
        "  Identity:    {}",
        match &profile.face_embedding {
            Some(e) => format!("{} dimensions", e.len()),
            None => "none".to_string(),
        }
    );
    println!("  Consistency: {:.2}", profile.consistency_score);
    println!("  Coverage:    {:.1}%", profile.emotion_coverage_percent);
    let missing = profile.missing_emotions(engine.offered_emotions());
    if !missing.is_empty() {
        println!("  Missing:     {}", missing.join(", "));
    }
}

/// List offered emotions, optionally with a profile's coverage.
pub async fn emotions(
    engine: &LikenessEngine,
    profile: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let offered = engine.offered_emotions();
    let Some(id) = profile else {
        return emit(format, &offered, |offered| {
            for emotion in offered.iter() {
                println!("{}", emotion);
            }
        });
    };

    let Some(profile) = engine.profiles().get_profile(id).await? else {
        bail!("Profile not found: {}", id);
    };
    let covered: Vec<&str> = profile.covered_emotions().collect();
    let missing = profile.missing_emotions(offered);
    let report = json!({
        "covered": covered,
        "missing": missing,
        "coveragePercent": coverage_percent(covered.len()),
    });
    emit(format, &report, |_| {
        for emotion in offered {
            let mark = if covered.contains(emotion) { "x" } else { " " };
            println!("[{}] {}", mark, emotion);
        }
        println!("Coverage: {:.1}%", profile.emotion_coverage_percent);
    })
}

/// Show feature flag status.
pub fn flags(engine: &LikenessEngine, format: OutputFormat) -> Result<()> {
    let status = engine.features().status();
    let report: Vec<_> = status
        .iter()
        .map(|(feature, enabled)| {
            json!({
                "flag": feature.to_string(),
                "name": feature.label(),
                "enabled": enabled,
                "description": feature.description(),
            })
        })
        .collect();
    emit(format, &report, |_| {
        for (feature, enabled) in &status {
            let state = if *enabled { "on " } else { "off" };
            println!("[{}] {:<20} {}", state, feature.label(), feature.description());
        }
    })
}
