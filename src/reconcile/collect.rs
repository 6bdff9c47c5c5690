//! Active file collection
//!
//! Walks everything the host has registered (VMs, their disks and parent
//! chains, mounted ISOs, snapshots) and records every file path in use.
//! A failed or empty VM listing is fatal; any other query failure skips the
//! affected sub-tree with a warning.

use anyhow::{bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_EXT, MAX_CHAIN_DEPTH, STATE_EXT};
use crate::core::{PathKey, VirtualMachine};
use crate::host::VmHost;
use crate::ui;

/// Paths in use by the host, compared case-insensitively.
///
/// Files that exist are also recorded under their canonical path, which is
/// how the scanner reports them (junctions, symlinked roots, short names).
#[derive(Debug, Clone, Default)]
pub struct ActiveFileSet {
	keys: HashSet<PathKey>,
	aliases: HashSet<PathKey>,
}

impl ActiveFileSet {
	/// Returns `true` if the path was not already present.
	pub fn insert(&mut self, path: &Path) -> bool {
		if let Ok(canonical) = dunce::canonicalize(path) {
			self.aliases.insert(PathKey::new(&canonical));
		}
		self.keys.insert(PathKey::new(path))
	}

	pub fn contains(&self, path: &Path) -> bool {
		self.contains_key(&PathKey::new(path))
	}

	pub fn contains_key(&self, key: &PathKey) -> bool {
		self.keys.contains(key) || self.aliases.contains(key)
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

/// Registered VMs, looked up by id or by name.
///
/// Ids and names live in separate maps so a VM named like another VM's id
/// never shadows the id lookup.
#[derive(Debug, Clone, Default)]
pub struct VmIndex {
	vms: Vec<VirtualMachine>,
	by_id: HashMap<String, usize>,
	by_name: HashMap<String, usize>,
}

impl VmIndex {
	pub fn insert(&mut self, vm: VirtualMachine) {
		let slot = self.vms.len();
		let id_key = vm.id.to_lowercase();
		let name_key = vm.name.to_lowercase();

		if self.by_id.contains_key(&id_key) {
			ui::debug(&format!("Duplicate VM id {} ignored", vm.id));
			return;
		}
		self.by_id.insert(id_key, slot);

		// First VM in host order keeps a shared display name
		if self.by_name.contains_key(&name_key) {
			ui::debug(&format!("Duplicate VM name '{}' ({}), lookups resolve to the first", vm.name, vm.id));
		} else {
			self.by_name.insert(name_key, slot);
		}

		self.vms.push(vm);
	}

	pub fn by_id(&self, id: &str) -> Option<&VirtualMachine> {
		self.by_id.get(&id.to_lowercase()).map(|&i| &self.vms[i])
	}

	pub fn by_name(&self, name: &str) -> Option<&VirtualMachine> {
		self.by_name.get(&name.to_lowercase()).map(|&i| &self.vms[i])
	}

	pub fn iter(&self) -> impl Iterator<Item = &VirtualMachine> {
		self.vms.iter()
	}

	pub fn len(&self) -> usize {
		self.vms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vms.is_empty()
	}
}

/// Result of one collector pass.
#[derive(Debug, Clone, Default)]
pub struct Collection {
	pub active: ActiveFileSet,
	pub index: VmIndex,
	pub warnings: usize,
}

/// How a parent-disk chain walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEnd {
	/// Reached a disk without a parent
	Base,
	/// A path repeated within the chain
	Cycle(PathBuf),
	/// Gave up after `MAX_CHAIN_DEPTH` links
	TooDeep,
	/// Metadata query failed for this disk
	QueryFailed(PathBuf),
}

/// Build the active file set and VM index from the host's registrations.
pub fn collect(host: &dyn VmHost, config_dir: &Path, snapshot_dir: &Path) -> Result<Collection> {
	let summaries = host
		.list_vms()
		.context("Failed to list virtual machines")?;

	// Nothing registered would turn every file under the roots into an orphan
	if summaries.is_empty() {
		bail!("Host reports no virtual machines, refusing to continue");
	}

	ui::debug(&format!("Host reports {} VMs", summaries.len()));

	let mut collection = Collection::default();

	for summary in summaries {
		let mut vm = VirtualMachine::from_summary(summary);
		let label = format!("VM '{}'", vm.name);

		collection.warnings += register_config(&mut collection.active, config_dir, &vm.id, &label);

		match host.vm_disks(&vm.id) {
			Ok(disks) => vm.disks = disks,
			Err(e) => {
				ui::warn(&format!("Skipping disks of {}: {}", label, e));
				collection.warnings += 1;
			}
		}
		for disk in &vm.disks {
			if !matches!(follow_chain(host, disk, &mut collection.active), ChainEnd::Base) {
				collection.warnings += 1;
			}
		}

		match host.vm_dvd_drives(&vm.id) {
			Ok(drives) => vm.dvd_drives = drives,
			Err(e) => {
				ui::warn(&format!("Skipping DVD drives of {}: {}", label, e));
				collection.warnings += 1;
			}
		}
		for iso in &vm.dvd_drives {
			collection.active.insert(iso);
		}

		match host.vm_snapshots(&vm.id) {
			Ok(snapshots) => vm.snapshots = snapshots,
			Err(e) => {
				ui::warn(&format!("Skipping snapshots of {}: {}", label, e));
				collection.warnings += 1;
			}
		}
		for snapshot in &vm.snapshots {
			let snap_label = format!("snapshot '{}' of {}", snapshot.name, label);
			collection.warnings += register_config(&mut collection.active, snapshot_dir, &snapshot.id, &snap_label);
			for disk in &snapshot.disks {
				if !matches!(follow_chain(host, disk, &mut collection.active), ChainEnd::Base) {
					collection.warnings += 1;
				}
			}
		}

		ui::debug(&format!(
			"{}: {} disks, {} ISOs, {} snapshots",
			label,
			vm.disks.len(),
			vm.dvd_drives.len(),
			vm.snapshots.len()
		));
		collection.index.insert(vm);
	}

	Ok(collection)
}

/// Mark `{dir}/{id}.vmcx` and, when present, `{dir}/{id}.vmrs` as active.
/// Returns the number of warnings raised.
fn register_config(active: &mut ActiveFileSet, dir: &Path, id: &str, label: &str) -> usize {
	let config = dir.join(format!("{}.{}", id, CONFIG_EXT));
	let state = dir.join(format!("{}.{}", id, STATE_EXT));
	let mut warnings = 0;

	if !config.exists() {
		ui::warn(&format!("Configuration file of {} not found: {}", label, config.display()));
		warnings += 1;
	}
	active.insert(&config);

	// No saved state while powered off
	if state.exists() {
		active.insert(&state);
	}

	warnings
}

/// Add `disk` and each ancestor in its differencing chain to `active`.
pub fn follow_chain(host: &dyn VmHost, disk: &Path, active: &mut ActiveFileSet) -> ChainEnd {
	let mut visited = HashSet::new();
	let mut current = disk.to_path_buf();

	for _ in 0..MAX_CHAIN_DEPTH {
		if !visited.insert(PathKey::new(&current)) {
			ui::warn(&format!(
				"Disk chain of {} loops back to {}, stopping",
				disk.display(),
				current.display()
			));
			return ChainEnd::Cycle(current);
		}
		active.insert(&current);

		match host.disk_parent(&current) {
			Ok(Some(parent)) => current = parent,
			Ok(None) => return ChainEnd::Base,
			Err(e) => {
				ui::warn(&format!("Cannot resolve parent of {}: {}", current.display(), e));
				return ChainEnd::QueryFailed(current);
			}
		}
	}

	ui::warn(&format!(
		"Disk chain of {} exceeds {} links, stopping",
		disk.display(),
		MAX_CHAIN_DEPTH
	));
	ChainEnd::TooDeep
}
