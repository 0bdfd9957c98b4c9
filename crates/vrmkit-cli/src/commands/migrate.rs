//! Migrate command implementation
//!
//! Runs the migration trigger on every rig of a scene file and writes the
//! migrated scene back.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

use vrmkit_migrate::{IdSource, MigrateOptions, Scene, SequentialIds, UuidSource};
use vrmkit_schema::document_hash;

use super::reporting::{print_rig_summary, MigrateOutput, RigSummary};

/// Run the migrate command
///
/// # Arguments
/// * `scene_path` - Path to the scene JSON file
/// * `output` - Where to write the migrated scene (default: overwrite `scene_path`)
/// * `no_stamp` - Leave add-on versions as they are
/// * `sequential_ids` - Use deterministic collider group ids
/// * `pretty` - Pretty-print the written scene
/// * `json` - Print a machine-readable summary instead of text
///
/// # Returns
/// Exit code: 0 success, 1 if any rig failed to migrate
pub fn run(
    scene_path: &str,
    output: Option<&str>,
    no_stamp: bool,
    sequential_ids: bool,
    pretty: bool,
    json: bool,
) -> Result<ExitCode> {
    let mut scene = Scene::load(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene {}", scene_path))?;
    debug!(scene = scene_path, rigs = scene.rigs.len(), "Loaded scene");

    if !json {
        println!("{} {}", "Migrate scene:".cyan().bold(), scene_path);
    }

    let before = scene
        .rigs
        .iter()
        .map(|rig| Ok((rig.extension.addon_version, document_hash(&rig.extension)?)))
        .collect::<Result<Vec<_>>>()?;

    let options = MigrateOptions {
        stamp_version: !no_stamp,
    };
    let mut ids: Box<dyn IdSource> = if sequential_ids {
        Box::new(SequentialIds::default())
    } else {
        Box::new(UuidSource)
    };
    let outcomes = scene.migrate_all(&options, ids.as_mut());

    let mut summaries = Vec::with_capacity(outcomes.len());
    for (((version_before, hash_before), outcome), rig) in
        before.into_iter().zip(outcomes).zip(&scene.rigs)
    {
        let document = &rig.extension;
        let changed = document_hash(document)? != hash_before;

        let summary = match outcome.result {
            Ok(report) => RigSummary {
                rig: outcome.rig,
                version_before,
                version_after: document.addon_version,
                changed,
                legacy_migrated: report.legacy_migrated,
                collider_groups_created: report.collider_groups_created,
                first_person_backfilled: report.first_person_backfilled,
                warnings: report.warnings,
                error: None,
            },
            Err(e) => RigSummary {
                rig: outcome.rig,
                version_before,
                version_after: document.addon_version,
                changed,
                legacy_migrated: false,
                collider_groups_created: 0,
                first_person_backfilled: false,
                warnings: Vec::new(),
                error: Some(e.to_string()),
            },
        };
        summaries.push(summary);
    }

    let output_path = output.unwrap_or(scene_path);
    scene
        .save(Path::new(output_path), pretty)
        .with_context(|| format!("Failed to write scene {}", output_path))?;
    info!(output = output_path, "Wrote migrated scene");

    let success = summaries.iter().all(|summary| summary.error.is_none());

    if json {
        let output = MigrateOutput {
            success,
            scene: scene_path.to_string(),
            output: output_path.to_string(),
            rigs: summaries,
        };
        let text = serde_json::to_string_pretty(&output).context("Failed to serialize summary")?;
        println!("{}", text);
    } else {
        println!();
        for summary in &summaries {
            print_rig_summary(summary);
        }
        println!("\n{} {}", "Wrote:".cyan(), output_path);
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
