//! Interactive console input

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::core::{OrphanRecord, Ownership};
use crate::deletion::{Decision, DecisionSource};
use crate::ui;

/// Read one line, `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
	let mut input = String::new();
	if reader.read_line(&mut input)? == 0 {
		return Ok(None);
	}
	Ok(Some(input.trim().to_string()))
}

fn ask(question: &str) -> io::Result<()> {
	print!("{} ", question);
	io::stdout().flush()
}

/// Ask for a directory, falling back to `default` on an empty answer.
pub fn prompt_path<R: BufRead>(reader: &mut R, label: &str, default: &str) -> Result<PathBuf> {
	ask(&format!("{} {}:", label.bright_blue().bold(), format!("[{}]", default).dimmed()))?;
	let answer = read_line(reader).context("Failed to read path")?;

	Ok(match answer {
		Some(path) if !path.is_empty() => PathBuf::from(path.trim_matches('"')),
		_ => PathBuf::from(default),
	})
}

/// Collect directories one per line until an empty line or end of input.
pub fn prompt_scan_paths<R: BufRead>(reader: &mut R) -> Result<Vec<PathBuf>> {
	ui::info("Enter directories to scan for disks and ISOs, one per line (empty line to finish)");
	let mut paths = Vec::new();

	loop {
		ask(&format!("{}", format!("  scan path #{}:", paths.len() + 1).bright_blue()))?;
		match read_line(reader).context("Failed to read scan path")? {
			Some(path) if !path.is_empty() => paths.push(PathBuf::from(path.trim_matches('"'))),
			_ => break,
		}
	}

	Ok(paths)
}

/// Per-file delete confirmation read from a terminal.
pub struct ConsoleDecisions<R> {
	reader: R,
}

impl<R: BufRead> ConsoleDecisions<R> {
	pub fn new(reader: R) -> Self {
		Self { reader }
	}
}

impl<R: BufRead> DecisionSource for ConsoleDecisions<R> {
	fn decide(&mut self, orphan: &OrphanRecord, position: usize, total: usize) -> Decision {
		let queue = format!("[{}/{}]", position, total).bright_blue().bold();
		let owner = match &orphan.owner {
			Ownership::Matched { name, .. } => format!("(VM {})", name).yellow(),
			Ownership::Guessed(guess) => format!("(was {}?)", guess).dimmed(),
			Ownership::Unknown => "".normal(),
		};
		let choices = "[y]es [n]o [a]ll no-to-a[l]l [q]uit".dimmed();

		if let Err(e) = ask(&format!(
			"{} Delete {} {} {} {}:",
			queue,
			ui::path_link(&orphan.file.path),
			ui::format_size(orphan.file.size).dimmed(),
			owner,
			choices
		)) {
			ui::warn(&format!("Cannot write prompt: {}", e));
		}

		match read_line(&mut self.reader) {
			Ok(Some(answer)) => Decision::parse(&answer).unwrap_or_else(|| {
				ui::warn(&format!("Unrecognized answer '{}', keeping file", answer));
				Decision::No
			}),
			Ok(None) => {
				println!();
				ui::warn("Input closed, keeping remaining files");
				Decision::Quit
			}
			Err(e) => {
				ui::warn(&format!("Cannot read answer: {}, keeping remaining files", e));
				Decision::Quit
			}
		}
	}
}
