//! Candidate files found on disk

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_EXT, DISK_EXTENSIONS, ISO_EXTENSION, STATE_EXT};
use crate::core::PathKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
	Config,
	State,
	Disk,
	Iso,
}

impl FileKind {
	/// Detect file kind from extension
	pub fn detect(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?;

		if ext.eq_ignore_ascii_case(CONFIG_EXT) {
			Some(FileKind::Config)
		} else if ext.eq_ignore_ascii_case(STATE_EXT) {
			Some(FileKind::State)
		} else if DISK_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
			Some(FileKind::Disk)
		} else if ext.eq_ignore_ascii_case(ISO_EXTENSION) {
			Some(FileKind::Iso)
		} else {
			None
		}
	}

	/// VM configuration or saved-state file, named after a VM or snapshot id
	pub fn is_config(self) -> bool {
		matches!(self, FileKind::Config | FileKind::State)
	}
}

#[derive(Debug, Clone)]
pub struct CandidateFile {
	pub path: PathBuf,
	pub key: PathKey,
	pub stem: String,
	pub parent_name: Option<String>,
	pub grandparent_name: Option<String>,
	pub size: u64,
	pub modified: Option<DateTime<Local>>,
	pub extension: String,
	pub kind: FileKind,
}

impl CandidateFile {
	/// Build from a path plus the metadata the scanner already read.
	/// Returns `None` for paths whose extension is not a VM file type.
	pub fn new(path: PathBuf, size: u64, modified: Option<DateTime<Local>>) -> Option<Self> {
		let kind = FileKind::detect(&path)?;
		let extension = path.extension()?.to_string_lossy().to_lowercase();
		let stem = path
			.file_stem()
			.map(|s| s.to_string_lossy().to_string())
			.unwrap_or_default();

		let parent = path.parent();
		let parent_name = parent.and_then(dir_name);
		let grandparent_name = parent.and_then(Path::parent).and_then(dir_name);

		Some(Self {
			key: PathKey::new(&path),
			path,
			stem,
			parent_name,
			grandparent_name,
			size,
			modified,
			extension,
			kind,
		})
	}

	pub fn filename(&self) -> &str {
		self.path
			.file_name()
			.and_then(|n| n.to_str())
			.unwrap_or("unknown")
	}
}

fn dir_name(path: &Path) -> Option<String> {
	path.file_name().map(|n| n.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detects_kinds_case_insensitively() {
		assert_eq!(FileKind::detect(Path::new("a.VMCX")), Some(FileKind::Config));
		assert_eq!(FileKind::detect(Path::new("a.vmrs")), Some(FileKind::State));
		assert_eq!(FileKind::detect(Path::new("a.AVHDX")), Some(FileKind::Disk));
		assert_eq!(FileKind::detect(Path::new("a.iso")), Some(FileKind::Iso));
		assert_eq!(FileKind::detect(Path::new("a.vmgs")), None);
		assert_eq!(FileKind::detect(Path::new("noext")), None);
	}

	#[test]
	fn candidate_captures_directory_names() {
		let path = PathBuf::from("/vms/web01/Virtual Hard Disks/web01-data.vhdx");
		let file = CandidateFile::new(path, 42, None).unwrap();
		assert_eq!(file.stem, "web01-data");
		assert_eq!(file.parent_name.as_deref(), Some("Virtual Hard Disks"));
		assert_eq!(file.grandparent_name.as_deref(), Some("web01"));
		assert_eq!(file.extension, "vhdx");
		assert_eq!(file.kind, FileKind::Disk);
		assert_eq!(file.filename(), "web01-data.vhdx");
	}
}
