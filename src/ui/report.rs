//! Orphan listing and run summary

use colored::*;

use crate::core::{Classification, OrphanRecord};
use crate::deletion::DeletionOutcome;
use crate::ui::{self, format_size};

const OWNER_WIDTH: usize = 24;

fn owner_cell(orphan: &OrphanRecord) -> String {
	let label: String = orphan.owner.label().chars().take(OWNER_WIDTH).collect();
	let padded = format!("{:<width$}", label, width = OWNER_WIDTH);

	match orphan.classification() {
		Classification::Matched => padded.bright_green().to_string(),
		Classification::UnmatchedWithGuess => padded.yellow().to_string(),
		Classification::UnmatchedNoGuess => padded.dimmed().to_string(),
	}
}

fn status_cell(orphan: &OrphanRecord) -> String {
	match orphan.owner.state() {
		Some(state) => format!("registered, {}", state),
		None => "not registered".to_string(),
	}
}

/// Print one row per orphan: size, modified time, owner guess, path.
pub fn print_orphans(orphans: &[OrphanRecord]) {
	ui::header("Orphaned Files");
	println!(
		"  {:>10}  {:<16}  {:<width$}  {:<22}  {}",
		"Size".bright_blue(),
		"Modified".bright_blue(),
		"Owner".bright_blue(),
		"Status".bright_blue(),
		"Path".bright_blue(),
		width = OWNER_WIDTH
	);

	for orphan in orphans {
		let modified = orphan
			.file
			.modified
			.map(|m| m.format("%Y-%m-%d %H:%M").to_string())
			.unwrap_or_else(|| "-".to_string());

		println!(
			"  {:>10}  {:<16}  {}  {:<22}  {}",
			format_size(orphan.file.size),
			modified.dimmed(),
			owner_cell(orphan),
			status_cell(orphan),
			ui::path_link(&orphan.file.path)
		);
	}

	let total: u64 = orphans.iter().map(|o| o.file.size).sum();
	let matched = orphans
		.iter()
		.filter(|o| o.classification() == Classification::Matched)
		.count();

	println!();
	ui::info(&format!(
		"{} orphaned files, {} reclaimable ({} attributed to registered VMs)",
		orphans.len(),
		format_size(total),
		matched
	));
}

/// Final counts, always printed regardless of failures along the way.
pub fn print_summary(outcome: &DeletionOutcome, duration_secs: f32) {
	ui::header("Summary");

	println!("  {} {}", "Processed:".bright_blue(), outcome.processed());
	if outcome.dry_run {
		println!("  {} {}", "Mode:".bright_blue(), "dry run, nothing deleted".yellow());
	} else {
		println!(
			"  {} {} ({})",
			"Deleted:".bright_green(),
			outcome.deleted.len(),
			format_size(outcome.bytes_freed())
		);
		if outcome.prompts > 0 {
			println!("  {} {}", "Prompts:".bright_blue(), outcome.prompts);
		}
	}
	println!(
		"  {} {}",
		"Kept:".yellow(),
		outcome.kept.len() + outcome.failed.len()
	);
	if !outcome.failed.is_empty() {
		println!("  {} {}", "Failed:".red(), outcome.failed.len());
		for (orphan, e) in &outcome.failed {
			println!("    {} {}", orphan.file.path.display().to_string().dimmed(), e);
		}
	}
	println!("  {} {:.2}s", "Duration:".bright_blue(), duration_secs);
	println!();
}
