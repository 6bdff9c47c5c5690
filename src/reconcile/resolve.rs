//! Orphan detection and ownership inference

use regex::Regex;
use std::sync::OnceLock;

use crate::config::{is_grouping_folder, GUID_PATTERN};
use crate::core::{CandidateFile, FileKind, OrphanRecord, Ownership, VirtualMachine};
use crate::reconcile::{ActiveFileSet, VmIndex};

fn guid_regex() -> &'static Regex {
	static GUID: OnceLock<Regex> = OnceLock::new();
	GUID.get_or_init(|| Regex::new(GUID_PATTERN).expect("GUID pattern is valid"))
}

pub fn is_guid(value: &str) -> bool {
	guid_regex().is_match(value)
}

/// Every candidate the host does not reference, with a guessed owner.
pub fn find_orphans(candidates: &[CandidateFile], active: &ActiveFileSet, index: &VmIndex) -> Vec<OrphanRecord> {
	candidates
		.iter()
		.filter(|file| !active.contains_key(&file.key))
		.map(|file| OrphanRecord {
			owner: infer_owner(
				&file.stem,
				file.parent_name.as_deref(),
				file.grandparent_name.as_deref(),
				file.kind,
				index,
			),
			file: file.clone(),
		})
		.collect()
}

/// Guess which VM a file belonged to from its name and location.
///
/// Config and state files are named by VM or snapshot id, so only a GUID stem
/// is meaningful. Disks and ISOs are tried by name: the file stem, then the
/// containing folder, then (for `Virtual Hard Disks`-style folders) the folder
/// above it. Failing all of those the stem itself is the guess.
pub fn infer_owner(
	stem: &str,
	parent: Option<&str>,
	grandparent: Option<&str>,
	kind: FileKind,
	index: &VmIndex,
) -> Ownership {
	if kind.is_config() {
		if !is_guid(stem) {
			return Ownership::Unknown;
		}
		return match index.by_id(stem) {
			Some(vm) => matched(vm),
			None => Ownership::Guessed(stem.to_string()),
		};
	}

	if let Some(vm) = index.by_name(stem) {
		return matched(vm);
	}

	if let Some(parent) = parent {
		if let Some(vm) = index.by_name(parent) {
			return matched(vm);
		}
		if is_grouping_folder(parent) {
			if let Some(vm) = grandparent.and_then(|g| index.by_name(g)) {
				return matched(vm);
			}
		}
	}

	if stem.is_empty() {
		Ownership::Unknown
	} else {
		Ownership::Guessed(stem.to_string())
	}
}

fn matched(vm: &VirtualMachine) -> Ownership {
	Ownership::Matched {
		id: vm.id.clone(),
		name: vm.name.clone(),
		state: vm.state.clone(),
	}
}
