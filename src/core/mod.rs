//! Core domain types

pub mod file;
pub mod orphan;
pub mod path_key;
pub mod vm;

pub use file::{CandidateFile, FileKind};
pub use orphan::{Classification, OrphanRecord, Ownership};
pub use path_key::PathKey;
pub use vm::{RunState, Snapshot, VirtualMachine, VmSummary};
