//! vmreap - find orphaned Hyper-V files
//!
//! Lists configuration files, virtual disks and ISOs no registered VM or
//! snapshot uses, and deletes them after confirmation.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io;

use vmreap::cli::Cli;
use vmreap::commands;
use vmreap::deletion::FsRemover;
use vmreap::host::{InventoryHost, PowerShellHost, VmHost};
use vmreap::ui::{self, prompt::ConsoleDecisions, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	if let Err(e) = run(cli) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	print_header();

	let mut input = io::stdin().lock();
	let config = cli.into_config(&mut input)?;

	let host: Box<dyn VmHost> = match &config.inventory {
		Some(path) => {
			ui::info(&format!("Using inventory {}", ui::path_link(path)));
			Box::new(InventoryHost::load(path)?)
		}
		None => Box::new(PowerShellHost::new()),
	};

	let mut decisions = ConsoleDecisions::new(input);
	commands::sweep::run(&config, host.as_ref(), &mut decisions, &mut FsRemover)?;

	Ok(())
}

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── vmreap v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
