//! Orphaned files and their inferred owners

use crate::config::UNKNOWN_OWNER;
use crate::core::{CandidateFile, RunState};

/// Best-effort guess at which VM an orphan came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
	/// Resolved to a VM that is still registered
	Matched { id: String, name: String, state: RunState },
	/// An identifier or name was extracted but no such VM is registered
	Guessed(String),
	/// Nothing usable could be extracted
	Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	Matched,
	UnmatchedWithGuess,
	UnmatchedNoGuess,
}

impl Ownership {
	pub fn classification(&self) -> Classification {
		match self {
			Ownership::Matched { .. } => Classification::Matched,
			Ownership::Guessed(_) => Classification::UnmatchedWithGuess,
			Ownership::Unknown => Classification::UnmatchedNoGuess,
		}
	}

	/// Human-readable owner, `"unknown"` when nothing was inferred
	pub fn label(&self) -> &str {
		match self {
			Ownership::Matched { name, .. } => name,
			Ownership::Guessed(guess) => guess,
			Ownership::Unknown => UNKNOWN_OWNER,
		}
	}

	pub fn is_registered(&self) -> bool {
		matches!(self, Ownership::Matched { .. })
	}

	pub fn state(&self) -> Option<&RunState> {
		match self {
			Ownership::Matched { state, .. } => Some(state),
			_ => None,
		}
	}
}

#[derive(Debug, Clone)]
pub struct OrphanRecord {
	pub file: CandidateFile,
	pub owner: Ownership,
}

impl OrphanRecord {
	pub fn classification(&self) -> Classification {
		self.owner.classification()
	}
}
