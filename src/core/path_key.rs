//! Case-insensitive path identity

use std::path::Path;

/// Normalized comparison key for a file path.
///
/// Hyper-V hosts live on case-insensitive filesystems and report paths with
/// either separator, sometimes with the `\\?\` verbatim prefix. Two paths
/// naming the same file produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
	pub fn new(path: &Path) -> Self {
		let raw = path.to_string_lossy();
		let raw = raw.strip_prefix(r"\\?\").unwrap_or(&raw);
		let mut key = raw.replace('/', "\\").to_lowercase();
		while key.len() > 1 && key.ends_with('\\') {
			key.pop();
		}
		Self(key)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&Path> for PathKey {
	fn from(path: &Path) -> Self {
		Self::new(path)
	}
}

impl std::fmt::Display for PathKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
