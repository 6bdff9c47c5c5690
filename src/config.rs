//! Application configuration and constants

use std::path::PathBuf;

// === Hyper-V Defaults ===
pub const DEFAULT_CONFIG_DIR: &str = r"C:\ProgramData\Microsoft\Windows\Hyper-V\Virtual Machines";
pub const DEFAULT_SNAPSHOT_DIR: &str = r"C:\ProgramData\Microsoft\Windows\Hyper-V\Snapshots";

// === File Extensions ===
pub const CONFIG_EXT: &str = "vmcx";
pub const STATE_EXT: &str = "vmrs";
pub const CONFIG_EXTENSIONS: &[&str] = &[CONFIG_EXT, STATE_EXT];
pub const DISK_EXTENSIONS: &[&str] = &["vhd", "vhdx", "avhd", "avhdx"];
pub const ISO_EXTENSION: &str = "iso";

// === Ownership Inference ===
pub const GUID_PATTERN: &str =
	r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$";
pub const UNKNOWN_OWNER: &str = "unknown";

/// Sub-folder names Hyper-V and its users group VM files under, lowercased.
/// A disk found in one of these is attributed via its grandparent folder.
pub const GROUPING_FOLDERS: &[&str] = &[
	"virtual hard disks",
	"snapshots",
	"virtual machines",
	// de
	"virtuelle festplatten",
	"virtuelle computer",
	// fr
	"disques durs virtuels",
	"ordinateurs virtuels",
	"instantanés",
	// es
	"discos duros virtuales",
	"máquinas virtuales",
	"instantáneas",
	// it
	"dischi rigidi virtuali",
	"macchine virtuali",
	// pt
	"discos rígidos virtuais",
	"máquinas virtuais",
];

// === Disk Chains ===
pub const MAX_CHAIN_DEPTH: usize = 256;

/// Resolved settings for one sweep run.
#[derive(Debug, Clone)]
pub struct SweepConfig {
	pub config_dir: PathBuf,
	pub snapshot_dir: PathBuf,
	pub scan_dirs: Vec<PathBuf>,
	pub dry_run: bool,
	pub include_isos: bool,
	pub inventory: Option<PathBuf>,
}

impl SweepConfig {
	/// Every directory the disk scanner walks: both configuration roots first,
	/// then the user's disk locations.
	pub fn scan_roots(&self) -> Vec<PathBuf> {
		let mut roots = vec![self.config_dir.clone(), self.snapshot_dir.clone()];
		roots.extend(self.scan_dirs.iter().cloned());
		roots
	}

	/// Extension allow-list for this run.
	pub fn extensions(&self) -> Vec<&'static str> {
		let mut exts: Vec<&'static str> = CONFIG_EXTENSIONS.to_vec();
		exts.extend_from_slice(DISK_EXTENSIONS);
		if self.include_isos {
			exts.push(ISO_EXTENSION);
		}
		exts
	}
}

/// Case-insensitive membership test against the grouping folder list.
pub fn is_grouping_folder(name: &str) -> bool {
	let lowered = name.to_lowercase();
	GROUPING_FOLDERS.iter().any(|f| *f == lowered)
}
