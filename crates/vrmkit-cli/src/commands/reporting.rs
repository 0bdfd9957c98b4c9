use colored::Colorize;
use serde::Serialize;
use vrmkit_migrate::MigrationWarning;
use vrmkit_schema::AddonVersion;

/// Per-rig line of the `migrate` summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RigSummary {
    pub rig: String,
    pub version_before: AddonVersion,
    pub version_after: AddonVersion,
    /// Whether the document hash changed.
    pub changed: bool,
    pub legacy_migrated: bool,
    pub collider_groups_created: usize,
    pub first_person_backfilled: bool,
    pub warnings: Vec<MigrationWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Machine-readable output of the `migrate` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MigrateOutput {
    pub success: bool,
    pub scene: String,
    pub output: String,
    pub rigs: Vec<RigSummary>,
}

pub(crate) fn print_rig_summary(summary: &RigSummary) {
    if let Some(error) = &summary.error {
        println!("{} {}: {}", "x".red(), summary.rig.bold(), error.red());
        return;
    }

    let state = if summary.changed {
        "changed".green()
    } else {
        "unchanged".dimmed()
    };
    println!(
        "{} {} {} -> {} ({})",
        "✓".green(),
        summary.rig.bold(),
        summary.version_before,
        summary.version_after,
        state
    );
    if summary.legacy_migrated {
        println!(
            "  {} legacy properties migrated, {} collider group(s) rebuilt",
            "·".cyan(),
            summary.collider_groups_created
        );
    }
    if summary.first_person_backfilled {
        println!("  {} first-person bone set from head", "·".cyan());
    }
    for warning in &summary.warnings {
        print_warning(warning);
    }
}

fn print_warning(warning: &MigrationWarning) {
    let code = if warning.code.is_structural() {
        warning.code.to_string().yellow().bold()
    } else {
        warning.code.to_string().yellow()
    };
    println!(
        "  {} {} {} {}",
        "!".yellow(),
        code,
        warning.message,
        format!("({})", warning.path).dimmed()
    );
}
