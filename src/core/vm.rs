//! Virtual machine records as reported by the host

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Power state of a registered VM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunState {
	Running,
	Off,
	Saved,
	Paused,
	Other(String),
}

impl From<String> for RunState {
	fn from(value: String) -> Self {
		match value.to_ascii_lowercase().as_str() {
			"running" => Self::Running,
			"off" => Self::Off,
			"saved" => Self::Saved,
			"paused" => Self::Paused,
			_ => Self::Other(value),
		}
	}
}

impl From<RunState> for String {
	fn from(state: RunState) -> Self {
		state.to_string()
	}
}

impl std::fmt::Display for RunState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Running => write!(f, "Running"),
			Self::Off => write!(f, "Off"),
			Self::Saved => write!(f, "Saved"),
			Self::Paused => write!(f, "Paused"),
			Self::Other(s) => write!(f, "{}", s),
		}
	}
}

/// Minimal VM listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VmSummary {
	pub id: String,
	pub name: String,
	pub state: RunState,
}

/// A checkpoint of a VM. `vm_id` points back at the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
	pub id: String,
	pub name: String,
	#[serde(default, rename = "VMId")]
	pub vm_id: String,
	#[serde(default)]
	pub disks: Vec<PathBuf>,
}

/// A registered VM with everything the collector could fetch for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachine {
	pub id: String,
	pub name: String,
	pub state: RunState,
	pub disks: Vec<PathBuf>,
	pub dvd_drives: Vec<PathBuf>,
	pub snapshots: Vec<Snapshot>,
}

impl VirtualMachine {
	pub fn from_summary(summary: VmSummary) -> Self {
		Self {
			id: summary.id,
			name: summary.name,
			state: summary.state,
			disks: Vec::new(),
			dvd_drives: Vec::new(),
			snapshots: Vec::new(),
		}
	}
}
