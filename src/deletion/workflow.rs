//! Confirmation-gated batch deletion

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::OrphanRecord;
use crate::deletion::{Action, Decision, Mode};
use crate::ui;

/// Where per-file answers come from.
pub trait DecisionSource {
	fn decide(&mut self, orphan: &OrphanRecord, position: usize, total: usize) -> Decision;
}

pub trait FileRemover {
	fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// Deletes through `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRemover;

impl FileRemover for FsRemover {
	fn remove(&mut self, path: &Path) -> io::Result<()> {
		fs::remove_file(path)
	}
}

/// Answers from a fixed list, as typed at a prompt. Unrecognized answers
/// count as `No`; running out of answers quits.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
	answers: VecDeque<String>,
	asked: usize,
}

impl ScriptedDecisions {
	pub fn new<I, S>(answers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			answers: answers.into_iter().map(Into::into).collect(),
			asked: 0,
		}
	}

	pub fn asked(&self) -> usize {
		self.asked
	}
}

impl DecisionSource for ScriptedDecisions {
	fn decide(&mut self, orphan: &OrphanRecord, _position: usize, _total: usize) -> Decision {
		self.asked += 1;
		let Some(answer) = self.answers.pop_front() else {
			return Decision::Quit;
		};
		Decision::parse(&answer).unwrap_or_else(|| {
			ui::warn(&format!("Unrecognized answer '{}', keeping {}", answer, orphan.file.filename()));
			Decision::No
		})
	}
}

#[derive(Debug, Default)]
pub struct DeletionOutcome {
	pub deleted: Vec<OrphanRecord>,
	pub kept: Vec<OrphanRecord>,
	pub failed: Vec<(OrphanRecord, io::Error)>,
	pub prompts: usize,
	pub dry_run: bool,
}

impl DeletionOutcome {
	pub fn processed(&self) -> usize {
		self.deleted.len() + self.kept.len() + self.failed.len()
	}

	pub fn bytes_freed(&self) -> u64 {
		self.deleted.iter().map(|o| o.file.size).sum()
	}
}

/// Walk `orphans` in order, asking `source` whenever the state machine is
/// prompting. In dry-run mode nothing is asked and nothing is removed.
pub fn run_deletion(
	orphans: Vec<OrphanRecord>,
	dry_run: bool,
	source: &mut dyn DecisionSource,
	remover: &mut dyn FileRemover,
) -> DeletionOutcome {
	let mut outcome = DeletionOutcome {
		dry_run,
		..DeletionOutcome::default()
	};

	if dry_run {
		outcome.kept = orphans;
		return outcome;
	}

	let total = orphans.len();
	let mut mode = Mode::Prompting;

	for (i, orphan) in orphans.into_iter().enumerate() {
		let action = match mode.automatic_action() {
			Some(action) => action,
			None => {
				outcome.prompts += 1;
				let decision = source.decide(&orphan, i + 1, total);
				let (action, next) = mode.apply(decision);
				if next != mode {
					ui::debug(&format!("Confirmation mode {:?} -> {:?}", mode, next));
				}
				mode = next;
				action
			}
		};

		match action {
			Action::Keep => {
				ui::debug(&format!("Kept {}", orphan.file.path.display()));
				outcome.kept.push(orphan);
			}
			Action::Delete => match remover.remove(&orphan.file.path) {
				Ok(()) => {
					ui::success(&format!("Deleted {}", orphan.file.path.display()));
					outcome.deleted.push(orphan);
				}
				Err(e) => {
					ui::error(&format!("Failed to delete {}: {}", orphan.file.path.display(), e));
					outcome.failed.push((orphan, e));
				}
			},
		}

		if mode == Mode::Quitting {
			ui::info("Quit requested, keeping remaining files");
			mode = Mode::Done;
		}
	}

	outcome
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{CandidateFile, Ownership};
	use std::fs;
	use std::path::PathBuf;
	use tempfile::TempDir;

	#[derive(Default)]
	struct Recorder {
		removed: Vec<PathBuf>,
	}

	impl FileRemover for Recorder {
		fn remove(&mut self, path: &Path) -> io::Result<()> {
			self.removed.push(path.to_path_buf());
			Ok(())
		}
	}

	fn orphans(count: usize) -> Vec<OrphanRecord> {
		(0..count)
			.map(|i| OrphanRecord {
				file: CandidateFile::new(PathBuf::from(format!("/vms/disk{i}.vhdx")), 10, None).unwrap(),
				owner: Ownership::Unknown,
			})
			.collect()
	}

	#[test]
	fn yes_then_all_deletes_everything_with_two_prompts() {
		let mut source = ScriptedDecisions::new(["y", "a", "n"]);
		let mut remover = Recorder::default();

		let outcome = run_deletion(orphans(3), false, &mut source, &mut remover);

		assert_eq!(outcome.deleted.len(), 3);
		assert_eq!(outcome.prompts, 2);
		assert_eq!(source.asked(), 2);
		assert_eq!(remover.removed.len(), 3);
		assert_eq!(outcome.bytes_freed(), 30);
	}

	#[test]
	fn quit_first_keeps_all() {
		let mut source = ScriptedDecisions::new(["q", "y", "y", "y", "y"]);
		let mut remover = Recorder::default();

		let outcome = run_deletion(orphans(5), false, &mut source, &mut remover);

		assert_eq!(outcome.kept.len(), 5);
		assert!(outcome.deleted.is_empty());
		assert!(remover.removed.is_empty());
		assert_eq!(source.asked(), 1);
	}

	#[test]
	fn no_to_all_keeps_rest_without_asking() {
		let mut source = ScriptedDecisions::new(["y", "l"]);
		let mut remover = Recorder::default();

		let outcome = run_deletion(orphans(4), false, &mut source, &mut remover);

		assert_eq!(outcome.deleted.len(), 1);
		assert_eq!(outcome.kept.len(), 3);
		assert_eq!(outcome.prompts, 2);
	}

	#[test]
	fn unrecognized_answer_keeps_file() {
		let mut source = ScriptedDecisions::new(["sure", "y"]);
		let mut remover = Recorder::default();

		let outcome = run_deletion(orphans(2), false, &mut source, &mut remover);

		assert_eq!(outcome.kept[0].file.filename(), "disk0.vhdx");
		assert_eq!(outcome.deleted[0].file.filename(), "disk1.vhdx");
	}

	#[test]
	fn dry_run_never_prompts_or_removes() {
		let mut source = ScriptedDecisions::new(["a"]);
		let mut remover = Recorder::default();

		let outcome = run_deletion(orphans(7), true, &mut source, &mut remover);

		assert_eq!(source.asked(), 0);
		assert!(remover.removed.is_empty());
		assert_eq!(outcome.kept.len(), 7);
		assert_eq!(outcome.processed(), 7);
	}

	#[test]
	fn removal_failure_does_not_stop_the_batch() {
		let tmp = TempDir::new().unwrap();
		let present = tmp.path().join("present.vhdx");
		fs::write(&present, b"disk").unwrap();
		let records = vec![
			OrphanRecord {
				file: CandidateFile::new(tmp.path().join("missing.vhdx"), 0, None).unwrap(),
				owner: Ownership::Unknown,
			},
			OrphanRecord {
				file: CandidateFile::new(present.clone(), 4, None).unwrap(),
				owner: Ownership::Unknown,
			},
		];

		let mut source = ScriptedDecisions::new(["a"]);
		let outcome = run_deletion(records, false, &mut source, &mut FsRemover);

		assert_eq!(outcome.failed.len(), 1);
		assert_eq!(outcome.deleted.len(), 1);
		assert!(!present.exists());
	}
}
