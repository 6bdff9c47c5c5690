//! Scan location validation

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::PathKey;
use crate::error::PathError;

/// Check that `path` is an existing, listable directory and return its
/// canonical form.
pub fn validate_dir(path: &Path) -> Result<PathBuf, PathError> {
	if !path.exists() {
		return Err(PathError::Missing(path.to_path_buf()));
	}
	if !path.is_dir() {
		return Err(PathError::NotADirectory(path.to_path_buf()));
	}
	if let Err(e) = fs::read_dir(path) {
		return Err(PathError::Unreadable {
			path: path.to_path_buf(),
			reason: e.to_string(),
		});
	}

	Ok(dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// Validate every directory, dropping duplicates (first occurrence wins).
/// Any invalid entry fails the whole set; all failures are reported.
pub fn validate_dirs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Vec<PathError>> {
	let mut seen = HashSet::new();
	let mut valid = Vec::with_capacity(paths.len());
	let mut errors = Vec::new();

	for path in paths {
		match validate_dir(path) {
			Ok(dir) => {
				if seen.insert(PathKey::new(&dir)) {
					valid.push(dir);
				}
			}
			Err(e) => errors.push(e),
		}
	}

	if errors.is_empty() {
		Ok(valid)
	} else {
		Err(errors)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn deduplicates_equivalent_paths() {
		let tmp = TempDir::new().unwrap();
		let dir = tmp.path().join("disks");
		fs::create_dir(&dir).unwrap();
		let dotted = tmp.path().join(".").join("disks");

		let valid = validate_dirs(&[dir.clone(), dotted, dir]).unwrap();
		assert_eq!(valid.len(), 1);
	}

	#[test]
	fn rejects_missing_and_file_paths() {
		let tmp = TempDir::new().unwrap();
		let file = tmp.path().join("disk.vhdx");
		fs::write(&file, b"x").unwrap();
		let missing = tmp.path().join("nope");

		let errors = validate_dirs(&[tmp.path().to_path_buf(), file.clone(), missing.clone()]).unwrap_err();
		assert_eq!(
			errors,
			vec![PathError::NotADirectory(file), PathError::Missing(missing)]
		);
	}
}
