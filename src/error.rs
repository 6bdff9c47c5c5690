//! Typed errors for the host and path seams

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
	#[error("failed to launch {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("{cmdlet} failed ({status}): {stderr}")]
	Command {
		cmdlet: String,
		status: String,
		stderr: String,
	},

	#[error("could not decode {cmdlet} output: {source}")]
	Decode {
		cmdlet: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to read inventory {path}: {source}")]
	Inventory {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid inventory {path}: {source}")]
	InventoryFormat {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("no VM with id {0}")]
	UnknownVm(String),

	#[error("no virtual disk at {0}")]
	UnknownDisk(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
	#[error("{0} does not exist")]
	Missing(PathBuf),

	#[error("{0} is not a directory")]
	NotADirectory(PathBuf),

	#[error("{path} is not readable: {reason}")]
	Unreadable { path: PathBuf, reason: String },
}
