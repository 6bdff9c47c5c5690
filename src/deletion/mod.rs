//! # Deletion
//!
//! Per-file confirmation with yes / no / all / none / quit answers.

pub mod machine;
pub mod workflow;

pub use machine::{Action, Decision, Mode};
pub use workflow::{run_deletion, DecisionSource, DeletionOutcome, FileRemover, FsRemover, ScriptedDecisions};
