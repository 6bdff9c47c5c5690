//! Sweep command - find and optionally delete orphaned VM files

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::SweepConfig;
use crate::core::OrphanRecord;
use crate::deletion::{run_deletion, DecisionSource, DeletionOutcome, FileRemover};
use crate::host::VmHost;
use crate::reconcile::{self, validate_dir};
use crate::ui::{self, report};

/// Everything one sweep produced.
#[derive(Debug, Default)]
pub struct SweepReport {
	pub registered_vms: usize,
	pub active_files: usize,
	pub scanned_files: usize,
	pub orphans: Vec<OrphanRecord>,
	pub outcome: DeletionOutcome,
}

pub fn run(
	config: &SweepConfig,
	host: &dyn VmHost,
	decisions: &mut dyn DecisionSource,
	remover: &mut dyn FileRemover,
) -> Result<SweepReport> {
	let start = Instant::now();

	let (config_dir, snapshot_dir, roots) = resolve_locations(config)?;

	ui::info("Querying registered virtual machines...");
	let collection = reconcile::collect(host, &config_dir, &snapshot_dir)?;
	ui::success(&format!(
		"{} VMs registered, {} files in use",
		collection.index.len(),
		collection.active.len()
	));
	if collection.warnings > 0 {
		ui::warn(&format!("{} warnings while collecting active files", collection.warnings));
	}

	ui::info(&format!("Scanning {} locations...", roots.len()));
	let scan = reconcile::scan_directories(&roots, &config.extensions());
	ui::success(&format!("Found {} VM files on disk", scan.files.len()));
	if scan.skipped > 0 {
		ui::warn(&format!("{} entries skipped during scan", scan.skipped));
	}

	let orphans = reconcile::find_orphans(&scan.files, &collection.active, &collection.index);

	let mut report = SweepReport {
		registered_vms: collection.index.len(),
		active_files: collection.active.len(),
		scanned_files: scan.files.len(),
		..SweepReport::default()
	};

	if orphans.is_empty() {
		ui::success("No orphaned files found");
		report.outcome.dry_run = config.dry_run;
	} else {
		report::print_orphans(&orphans);

		if config.dry_run {
			ui::info("Dry run: pass --dry-run false to delete");
		} else {
			ui::header("Confirm Deletion");
		}

		report.outcome = run_deletion(orphans.clone(), config.dry_run, decisions, remover);
		report.orphans = orphans;
	}

	report::print_summary(&report.outcome, start.elapsed().as_secs_f32());

	Ok(report)
}

/// Validate both configuration directories and every scan path. Any invalid
/// location aborts the run.
fn resolve_locations(config: &SweepConfig) -> Result<(PathBuf, PathBuf, Vec<PathBuf>)> {
	let config_dir = validate_dir(&config.config_dir);
	let snapshot_dir = validate_dir(&config.snapshot_dir);
	let roots = reconcile::validate_dirs(&config.scan_roots());

	match (config_dir, snapshot_dir, roots) {
		(Ok(config_dir), Ok(snapshot_dir), Ok(roots)) => {
			for root in &roots {
				ui::debug(&format!("Scan location: {}", root.display()));
			}
			Ok((config_dir, snapshot_dir, roots))
		}
		(_, _, roots) => {
			let errors = roots.err().unwrap_or_default();
			for e in &errors {
				ui::error(&format!("Invalid scan location: {}", e));
			}
			bail!("{} invalid scan location(s)", errors.len().max(1))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Classification, RunState, VmSummary};
	use crate::deletion::{FsRemover, ScriptedDecisions};
	use crate::host::inventory::{Inventory, InventoryVm};
	use crate::host::InventoryHost;
	use std::fs;
	use std::path::Path;
	use tempfile::TempDir;

	const WEB01: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
	const STALE: &str = "00000000-0000-4000-8000-00000000dead";

	struct Fixture {
		_tmp: TempDir,
		config: SweepConfig,
		host: InventoryHost,
		disks: PathBuf,
	}

	fn fixture(dry_run: bool) -> Fixture {
		let tmp = TempDir::new().unwrap();
		let root = dunce::canonicalize(tmp.path()).unwrap();
		let vms = root.join("Virtual Machines");
		let snaps = root.join("Snapshots");
		let disks = root.join("Disks");
		let grouped = disks.join("web01").join("Virtual Hard Disks");
		for dir in [&vms, &snaps, &grouped] {
			fs::create_dir_all(dir).unwrap();
		}

		fs::write(vms.join(format!("{WEB01}.vmcx")), b"cfg").unwrap();
		fs::write(vms.join(format!("{STALE}.vmcx")), b"cfg").unwrap();
		fs::write(grouped.join("web01.vhdx"), b"disk").unwrap();
		fs::write(grouped.join("web01_old.avhdx"), b"diff").unwrap();
		fs::write(disks.join("scratch.vhd"), b"scratch").unwrap();
		fs::write(disks.join("install.iso"), b"iso").unwrap();

		let host = InventoryHost::new(Inventory {
			vms: vec![InventoryVm {
				summary: VmSummary {
					id: WEB01.to_string(),
					name: "web01".to_string(),
					state: RunState::Running,
				},
				disks: vec![grouped.join("WEB01.VHDX")],
				dvd_drives: Vec::new(),
				snapshots: Vec::new(),
			}],
			..Inventory::default()
		});

		Fixture {
			config: SweepConfig {
				config_dir: vms,
				snapshot_dir: snaps,
				scan_dirs: vec![disks.clone()],
				dry_run,
				include_isos: false,
				inventory: None,
			},
			_tmp: tmp,
			host,
			disks,
		}
	}

	fn names(orphans: &[OrphanRecord]) -> Vec<String> {
		orphans.iter().map(|o| o.file.filename().to_string()).collect()
	}

	#[test]
	fn dry_run_lists_orphans_and_touches_nothing() {
		let f = fixture(true);
		let mut decisions = ScriptedDecisions::new(["a"]);

		let report = run(&f.config, &f.host, &mut decisions, &mut FsRemover).unwrap();

		assert_eq!(report.registered_vms, 1);
		assert_eq!(
			names(&report.orphans),
			vec![
				"scratch.vhd".to_string(),
				"web01_old.avhdx".to_string(),
				format!("{STALE}.vmcx"),
			]
		);
		assert_eq!(decisions.asked(), 0);
		assert!(f.disks.join("scratch.vhd").exists());

		assert_eq!(report.orphans[0].classification(), Classification::UnmatchedWithGuess);
		assert_eq!(report.orphans[1].classification(), Classification::Matched);
		assert_eq!(report.orphans[1].owner.label(), "web01");
		assert_eq!(report.orphans[2].classification(), Classification::UnmatchedWithGuess);
	}

	#[test]
	fn isos_are_opt_in() {
		let mut f = fixture(true);
		f.config.include_isos = true;
		let mut decisions = ScriptedDecisions::new(Vec::<String>::new());

		let report = run(&f.config, &f.host, &mut decisions, &mut FsRemover).unwrap();
		assert!(names(&report.orphans).contains(&"install.iso".to_string()));
	}

	#[test]
	fn confirmed_orphans_are_deleted() {
		let f = fixture(false);
		let mut decisions = ScriptedDecisions::new(["y", "n", "q"]);

		let report = run(&f.config, &f.host, &mut decisions, &mut FsRemover).unwrap();

		assert_eq!(report.outcome.deleted.len(), 1);
		assert_eq!(report.outcome.kept.len(), 2);
		assert!(!f.disks.join("scratch.vhd").exists());
		assert!(f.config.config_dir.join(format!("{STALE}.vmcx")).exists());
	}

	#[test]
	fn repeated_runs_find_the_same_orphans() {
		let f = fixture(true);
		let first = run(&f.config, &f.host, &mut ScriptedDecisions::default(), &mut FsRemover).unwrap();
		let second = run(&f.config, &f.host, &mut ScriptedDecisions::default(), &mut FsRemover).unwrap();
		assert_eq!(names(&first.orphans), names(&second.orphans));
	}

	#[test]
	fn empty_vm_listing_deletes_nothing() {
		let mut f = fixture(false);
		f.host = InventoryHost::new(Inventory::default());
		let mut decisions = ScriptedDecisions::new(["a"]);

		let result = run(&f.config, &f.host, &mut decisions, &mut FsRemover);

		assert!(result.is_err());
		assert_eq!(decisions.asked(), 0);
		assert!(f.disks.join("scratch.vhd").exists());
		assert!(f.config.config_dir.join(format!("{WEB01}.vmcx")).exists());
		assert!(f.disks.join("web01").join("Virtual Hard Disks").join("web01.vhdx").exists());
	}

	#[test]
	fn no_orphans_still_reports_zero_counts() {
		let f = fixture(false);
		fs::remove_file(f.disks.join("scratch.vhd")).unwrap();
		fs::remove_file(f.disks.join("web01").join("Virtual Hard Disks").join("web01_old.avhdx")).unwrap();
		fs::remove_file(f.config.config_dir.join(format!("{STALE}.vmcx"))).unwrap();
		let mut decisions = ScriptedDecisions::default();

		let report = run(&f.config, &f.host, &mut decisions, &mut FsRemover).unwrap();

		assert!(report.orphans.is_empty());
		assert_eq!(report.outcome.processed(), 0);
		assert!(report.outcome.deleted.is_empty());
		assert!(report.outcome.kept.is_empty());
		assert!(!report.outcome.dry_run);
		assert_eq!(decisions.asked(), 0);
	}

	#[test]
	fn invalid_scan_path_is_fatal() {
		let mut f = fixture(true);
		f.config.scan_dirs.push(Path::new("/definitely/not/here").to_path_buf());

		let result = run(&f.config, &f.host, &mut ScriptedDecisions::default(), &mut FsRemover);
		assert!(result.is_err());
	}
}
