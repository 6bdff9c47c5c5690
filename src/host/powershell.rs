//! Hyper-V queries through PowerShell cmdlets

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::{Snapshot, VmSummary};
use crate::error::HostError;
use crate::host::VmHost;
use crate::ui;

const POWERSHELL: &str = "powershell.exe";
const PREAMBLE: &str = "$ErrorActionPreference = 'Stop'; [Console]::OutputEncoding = [Text.Encoding]::UTF8;";

/// `ConvertTo-Json` collapses single-element arrays unless forced with
/// `-InputObject @(...)`; accept both shapes anyway.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
	Many(Vec<T>),
	One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
	fn from(value: OneOrMany<T>) -> Self {
		match value {
			OneOrMany::Many(items) => items,
			OneOrMany::One(item) => vec![item],
		}
	}
}

#[derive(Debug, Clone)]
pub struct PowerShellHost {
	program: String,
}

impl Default for PowerShellHost {
	fn default() -> Self {
		Self::new()
	}
}

impl PowerShellHost {
	pub fn new() -> Self {
		Self {
			program: POWERSHELL.to_string(),
		}
	}

	fn run(&self, cmdlet: &str, script: &str) -> Result<String, HostError> {
		ui::debug(&format!("{} via {}", cmdlet, self.program));

		let output = Command::new(&self.program)
			.args(["-NoProfile", "-NonInteractive", "-Command"])
			.arg(format!("{} {}", PREAMBLE, script))
			.output()
			.map_err(|source| HostError::Spawn {
				program: self.program.clone(),
				source,
			})?;

		if !output.status.success() {
			return Err(HostError::Command {
				cmdlet: cmdlet.to_string(),
				status: output.status.to_string(),
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
	}

	fn run_json_array<T: DeserializeOwned>(&self, cmdlet: &str, script: &str) -> Result<Vec<T>, HostError> {
		let stdout = self.run(cmdlet, script)?;
		decode_array(cmdlet, &stdout)
	}
}

fn decode_array<T: DeserializeOwned>(cmdlet: &str, stdout: &str) -> Result<Vec<T>, HostError> {
	if stdout.is_empty() {
		return Ok(Vec::new());
	}
	serde_json::from_str::<OneOrMany<T>>(stdout)
		.map(Vec::from)
		.map_err(|source| HostError::Decode {
			cmdlet: cmdlet.to_string(),
			source,
		})
}

/// Quote a value for a single-quoted PowerShell string literal.
pub fn escape(value: &str) -> String {
	value.replace('\'', "''")
}

fn select_vm(vm_id: &str) -> String {
	format!("$vm = Get-VM -Id '{}';", escape(vm_id))
}

impl VmHost for PowerShellHost {
	fn list_vms(&self) -> Result<Vec<VmSummary>, HostError> {
		let script = r#"
ConvertTo-Json -Compress -Depth 3 -InputObject @(Get-VM | ForEach-Object {
    [PSCustomObject]@{
        Id    = $_.Id.ToString()
        Name  = $_.Name
        State = $_.State.ToString()
    }
})
"#;
		self.run_json_array("Get-VM", script)
	}

	fn vm_disks(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError> {
		let script = format!(
			"{} ConvertTo-Json -Compress -InputObject @(Get-VMHardDiskDrive -VM $vm | Where-Object {{ $_.Path }} | ForEach-Object {{ $_.Path }})",
			select_vm(vm_id)
		);
		self.run_json_array("Get-VMHardDiskDrive", &script)
	}

	fn vm_dvd_drives(&self, vm_id: &str) -> Result<Vec<PathBuf>, HostError> {
		let script = format!(
			"{} ConvertTo-Json -Compress -InputObject @(Get-VMDvdDrive -VM $vm | Where-Object {{ $_.Path }} | ForEach-Object {{ $_.Path }})",
			select_vm(vm_id)
		);
		self.run_json_array("Get-VMDvdDrive", &script)
	}

	fn vm_snapshots(&self, vm_id: &str) -> Result<Vec<Snapshot>, HostError> {
		let script = format!(
			r#"{}
ConvertTo-Json -Compress -Depth 3 -InputObject @(Get-VMSnapshot -VM $vm | ForEach-Object {{
    [PSCustomObject]@{{
        Id    = $_.Id.ToString()
        Name  = $_.Name
        VMId  = $_.VMId.ToString()
        Disks = @(Get-VMHardDiskDrive -VMSnapshot $_ | Where-Object {{ $_.Path }} | ForEach-Object {{ $_.Path }})
    }}
}})
"#,
			select_vm(vm_id)
		);
		self.run_json_array("Get-VMSnapshot", &script)
	}

	fn disk_parent(&self, disk: &Path) -> Result<Option<PathBuf>, HostError> {
		let script = format!(
			"$vhd = Get-VHD -Path '{}'; if ($vhd.ParentPath) {{ ConvertTo-Json -Compress -InputObject $vhd.ParentPath }} else {{ 'null' }}",
			escape(&disk.to_string_lossy())
		);
		let stdout = self.run("Get-VHD", &script)?;
		serde_json::from_str::<Option<PathBuf>>(&stdout).map_err(|source| HostError::Decode {
			cmdlet: "Get-VHD".to_string(),
			source,
		})
	}
}
