//! Host inventory replayed from a JSON export
//!
//! Lets a sweep run against a snapshot of a host's registrations, e.g. when
//! auditing a copied VM store on another machine.
//!
//! ```json
//! {
//!   "vms": [
//!     { "Id": "…", "Name": "web01", "State": "Running",
//!       "Disks": ["D:\\VMs\\web01.avhdx"], "DvdDrives": [],
//!       "Snapshots": [{ "Id": "…", "Name": "pre-update", "Disks": [] }] }
//!   ],
//!   "parents": { "D:\\VMs\\web01.avhdx": "D:\\VMs\\web01.vhdx" },
//!   "unreadable_disks": []
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{PathKey, Snapshot, VmSummary};
use crate::error::HostError;
use crate::host::VmHost;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryVm {
	#[serde(flatten)]
	pub summary: VmSummary,
	#[serde(default)]
	pub disks: Vec<PathBuf>,
	#[serde(default)]
	pub dvd_drives: Vec<PathBuf>,
	#[serde(default)]
	pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
	#[serde(default)]
	pub vms: Vec<InventoryVm>,
	/// Differencing disk -> immediate parent
	#[serde(default)]
	pub parents: HashMap<PathBuf, PathBuf>,
	/// Disks whose metadata could not be read when the inventory was taken
	#[serde(default)]
	pub unreadable_disks: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct InventoryHost {
	vms: Vec<InventoryVm>,
	parents: HashMap<PathKey, PathBuf>,
	unreadable: HashSet<PathKey>,
}

impl InventoryHost {
	pub fn new(inventory: Inventory) -> Self {
		let parents = inventory
			.parents
			.into_iter()
			.map(|(child, parent)| (PathKey::new(&child), parent))
			.collect();
		let unreadable = inventory.unreadable_disks.iter().map(|p| PathKey::new(p)).collect();

		Self {
			vms: inventory.vms,
			parents,
			unreadable,
		}
	}

	pub fn load(path: &Path) -> Result<Self, HostError> {
		let content = fs::read_to_string(path).map_err(|source| HostError::Inventory {
			path: path.to_path_buf(),
			source,
		})?;
		let inventory: Inventory = serde_json::from_str(&content).map_err(|source| HostError::InventoryFormat {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(Self::new(inventory))
	}

	fn vm(&self, vm_id: &str) -> Result<&InventoryVm, HostError> {
		self.vms
			.iter()
			.find(|vm| vm.summary.id.eq_ignore_ascii_case(vm_id))
			.ok_or_else(|| HostError::UnknownVm(vm_id.to_string()))
	}
}

impl VmHost for InventoryHost {
	fn list_vms(&self) -> Result<Vec<VmSummary>, HostError> {
		Ok(self.vms.iter().map(|vm| vm.summary.clone()).collect())
	}

	fn vm_disks(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError> {
		Ok(self.vm(vm_id)?.disks.clone())
	}

	fn vm_dvd_drives(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError> {
		Ok(self.vm(vm_id)?.dvd_drives.clone())
	}

	fn vm_snapshots(&self, vm_id: &str) -> Result<Vec<Snapshot>, HostError> {
		let vm = self.vm(vm_id)?;
		Ok(vm
			.snapshots
			.iter()
			.cloned()
			.map(|mut snapshot| {
				if snapshot.vm_id.is_empty() {
					snapshot.vm_id = vm.summary.id.clone();
				}
				snapshot
			})
			.collect())
	}

	fn disk_parent(&self, disk: &Path) -> Result<Option<PathBuf>, HostError> {
		let key = PathKey::new(disk);
		if self.unreadable.contains(&key) {
			return Err(HostError::UnknownDisk(disk.to_path_buf()));
		}
		Ok(self.parents.get(&key).cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const INVENTORY: &str = r#"{
		"vms": [{
			"Id": "1B4E28BA-2FA1-11D2-883F-0016D3CCA427",
			"Name": "web01",
			"State": "Running",
			"Disks": ["D:\\VMs\\web01_A.avhdx"],
			"Snapshots": [{ "Id": "5d6f7e8a-0000-4000-8000-000000000001", "Name": "pre-update" }]
		}],
		"parents": { "D:\\VMs\\web01_A.avhdx": "D:\\VMs\\web01.vhdx" },
		"unreadable_disks": ["D:\\VMs\\gone.vhdx"]
	}"#;

	fn host() -> InventoryHost {
		InventoryHost::new(serde_json::from_str(INVENTORY).unwrap())
	}

	#[test]
	fn answers_vm_queries() {
		let host = host();
		let vms = host.list_vms().unwrap();
		assert_eq!(vms.len(), 1);

		let id = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
		assert_eq!(host.vm_disks(id).unwrap().len(), 1);
		assert!(host.vm_dvd_drives(id).unwrap().is_empty());

		let snapshots = host.vm_snapshots(id).unwrap();
		assert_eq!(snapshots[0].vm_id, vms[0].id);
		assert!(matches!(host.vm_disks("missing"), Err(HostError::UnknownVm(_))));
	}

	#[test]
	fn parent_lookup_is_case_insensitive() {
		let host = host();
		let parent = host.disk_parent(Path::new("d:/vms/WEB01_a.avhdx")).unwrap();
		assert_eq!(parent, Some(PathBuf::from(r"D:\VMs\web01.vhdx")));
		assert_eq!(host.disk_parent(Path::new(r"D:\VMs\web01.vhdx")).unwrap(), None);
		assert!(host.disk_parent(Path::new(r"D:\VMs\gone.vhdx")).is_err());
	}
}
