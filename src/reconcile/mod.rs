//! # Reconciliation
//!
//! Registered files versus files on disk: validate the scan locations,
//! collect what the host uses, scan what exists, and diff the two.

pub mod collect;
pub mod resolve;
pub mod scan;
pub mod validate;

pub use collect::{collect, follow_chain, ActiveFileSet, ChainEnd, Collection, VmIndex};
pub use resolve::{find_orphans, infer_owner, is_guid};
pub use scan::{scan_directories, ScanResult};
pub use validate::{validate_dir, validate_dirs};
