use anyhow::Result;
use clap::builder::styling::{AnsiColor, Styles};
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::{SweepConfig, DEFAULT_CONFIG_DIR, DEFAULT_SNAPSHOT_DIR};
use crate::ui::prompt;

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Blue.on_default().bold())
		.usage(AnsiColor::Blue.on_default().bold())
		.literal(AnsiColor::Blue.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
		.valid(AnsiColor::Blue.on_default())
		.invalid(AnsiColor::Red.on_default())
}

#[derive(Parser, Debug)]
#[command(
	name = "vmreap",
	author,
	version,
	about = "Find orphaned Hyper-V configuration files, virtual disks and ISOs",
	styles = styles(),
	after_help = format!(
		"{title}
  {vmreap} {scan_args}          {scan_desc}
  {vmreap} {iso_args}             {iso_desc}
  {vmreap} {delete_args}   {delete_desc}
  {vmreap} {inventory_args}   {inventory_desc}",
		title = "Examples:".bright_blue().bold(),
		vmreap = "vmreap".bright_blue(),
		scan_args = "-d D:\\VMs -d E:\\Disks".yellow(),
		scan_desc = "List orphans (dry run)".dimmed(),
		iso_args = "-d D:\\ISO --include-isos".yellow(),
		iso_desc = "Also look for unused ISOs".dimmed(),
		delete_args = "-d D:\\VMs --dry-run false".yellow(),
		delete_desc = "Confirm and delete orphans".dimmed(),
		inventory_args = "--inventory host.json -d .".yellow(),
		inventory_desc = "Use an exported inventory".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose")]
	pub verbose: bool,

	/// Directory holding VM configuration files (prompted if omitted)
	#[arg(short = 'c', long = "config-path", env = "VMREAP_CONFIG_PATH", value_name = "DIR")]
	pub config_path: Option<PathBuf>,

	/// Directory holding snapshot configuration files (prompted if omitted)
	#[arg(short = 's', long = "snapshot-path", env = "VMREAP_SNAPSHOT_PATH", value_name = "DIR")]
	pub snapshot_path: Option<PathBuf>,

	/// Directories to scan for disks and ISOs (repeatable or comma-separated)
	#[arg(
		short = 'd',
		long = "scan-path",
		env = "VMREAP_SCAN_PATHS",
		value_delimiter = ',',
		value_name = "DIR"
	)]
	pub scan_paths: Vec<PathBuf>,

	/// Only list orphans; pass `false` to confirm and delete them
	#[arg(long = "dry-run", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
	pub dry_run: bool,

	/// Also scan for .iso files
	#[arg(long = "include-isos")]
	pub include_isos: bool,

	/// Read VM registrations from a JSON inventory instead of querying Hyper-V
	#[arg(long = "inventory", value_name = "FILE")]
	pub inventory: Option<PathBuf>,
}

impl Cli {
	/// Resolve missing paths interactively and produce the run settings.
	pub fn into_config<R: BufRead>(self, input: &mut R) -> Result<SweepConfig> {
		let config_dir = match self.config_path {
			Some(path) => path,
			None => prompt::prompt_path(input, "VM configuration path", DEFAULT_CONFIG_DIR)?,
		};
		let snapshot_dir = match self.snapshot_path {
			Some(path) => path,
			None => prompt::prompt_path(input, "Snapshot configuration path", DEFAULT_SNAPSHOT_DIR)?,
		};
		let scan_dirs = if self.scan_paths.is_empty() {
			prompt::prompt_scan_paths(input)?
		} else {
			self.scan_paths
		};

		Ok(SweepConfig {
			config_dir,
			snapshot_dir,
			scan_dirs,
			dry_run: self.dry_run,
			include_isos: self.include_isos,
			inventory: self.inventory,
		})
	}
}
