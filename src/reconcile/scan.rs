//! Directory scanning for VM files

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::core::CandidateFile;
use crate::ui;

pub struct ScanResult {
	pub files: Vec<CandidateFile>,
	pub skipped: usize,
}

/// Recursively collect files whose extension is in `extensions` from every
/// root. Duplicates across overlapping roots are dropped and the result is
/// sorted by path key.
pub fn scan_directories(roots: &[PathBuf], extensions: &[&str]) -> ScanResult {
	let mut files = Vec::new();
	let mut skipped = 0;
	let mut seen = HashSet::new();

	for root in roots {
		ui::debug(&format!("Scanning {}", root.display()));

		for entry in WalkDir::new(root).follow_links(false) {
			let entry = match entry {
				Ok(entry) => entry,
				Err(e) => {
					let location = e
						.path()
						.map(|p| p.display().to_string())
						.unwrap_or_else(|| root.display().to_string());
					ui::warn(&format!("Skipping {}: {}", location, e));
					skipped += 1;
					continue;
				}
			};

			if !entry.file_type().is_file() {
				continue;
			}

			let path = entry.path();
			let matches = path
				.extension()
				.and_then(|e| e.to_str())
				.is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)));
			if !matches {
				continue;
			}

			let metadata = match entry.metadata() {
				Ok(metadata) => metadata,
				Err(e) => {
					ui::warn(&format!("Cannot read metadata of {}: {}", path.display(), e));
					skipped += 1;
					continue;
				}
			};
			let modified = metadata.modified().ok().map(DateTime::<Local>::from);

			let Some(file) = CandidateFile::new(path.to_path_buf(), metadata.len(), modified) else {
				continue;
			};
			if !seen.insert(file.key.clone()) {
				continue;
			}

			files.push(file);
		}
	}

	files.sort_by(|a, b| a.key.cmp(&b.key));

	ScanResult { files, skipped }
}
