//! # Virtualization Host
//!
//! Read-only query surface over the VMs a host has registered.
//! `PowerShellHost` talks to Hyper-V; `InventoryHost` replays a JSON export.

pub mod inventory;
pub mod powershell;

use std::path::{Path, PathBuf};

use crate::core::{Snapshot, VmSummary};
use crate::error::HostError;

pub use inventory::InventoryHost;
pub use powershell::PowerShellHost;

/// Every query is fallible. Only `list_vms` failing is fatal to a sweep.
pub trait VmHost {
	fn list_vms(&self) -> Result<Vec<VmSummary>, HostError>;

	fn vm_disks(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError>;

	/// Paths of mounted optical media. Empty drives are omitted.
	fn vm_dvd_drives(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError>;

	fn vm_snapshots(&self, vm_id: &str) -> Result<Vec<Snapshot>, HostError>;

	/// Immediate parent of a differencing disk, `None` for a base disk.
	fn disk_parent(&self, disk: &Path) -> Result<Option<PathBuf>, HostError>;
}
