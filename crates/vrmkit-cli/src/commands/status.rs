//! Status command implementation
//!
//! Reports each rig's version-gate state without modifying the scene.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use vrmkit_migrate::Scene;
use vrmkit_schema::{AddonVersion, SpecVersion};

/// Version-gate state of one rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateState {
    NeedsMigration,
    UpToDate,
}

impl GateState {
    pub fn of(version: AddonVersion) -> Self {
        if version.needs_legacy_migration() {
            GateState::NeedsMigration
        } else {
            GateState::UpToDate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateState::NeedsMigration => "needs-migration",
            GateState::UpToDate => "up-to-date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RigStatus {
    rig: String,
    addon_version: AddonVersion,
    spec_version: SpecVersion,
    state: GateState,
}

/// Run the status command
///
/// # Arguments
/// * `scene_path` - Path to the scene JSON file
/// * `json` - Print machine-readable JSON instead of text
pub fn run(scene_path: &str, json: bool) -> Result<ExitCode> {
    let scene = Scene::load(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene {}", scene_path))?;

    let statuses: Vec<RigStatus> = scene
        .rigs
        .iter()
        .map(|rig| RigStatus {
            rig: rig.name.clone(),
            addon_version: rig.extension.addon_version,
            spec_version: rig.extension.spec_version,
            state: GateState::of(rig.extension.addon_version),
        })
        .collect();

    if json {
        let text = serde_json::to_string_pretty(&statuses).context("Failed to serialize status")?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Scene:".cyan().bold(), scene_path);
    if statuses.is_empty() {
        println!("{} No rigs found.", "INFO".yellow().bold());
    }
    for status in &statuses {
        let state = match status.state {
            GateState::NeedsMigration => status.state.as_str().yellow(),
            GateState::UpToDate => status.state.as_str().green(),
        };
        println!(
            "  {} {} (VRM {}) {}",
            status.rig.bold(),
            status.addon_version,
            status.spec_version.as_str(),
            state
        );
    }

    Ok(ExitCode::SUCCESS)
}
