// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer status polling.
//
// A `StatusSource` answers "what is printer X doing?" with line-oriented
// text:
//
//     STATUS:<code>
//     JOBS:<count>
//     NAME:<name>
//
// in any order.  `StatusPoller` turns that text into a
// `PrinterStatusSnapshot`.  Malformed fields degrade to defaults; only a
// failed query is an error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use spoolwatch_core::error::{Result, SpoolwatchError};
use spoolwatch_core::types::PrinterStatusSnapshot;

use crate::classifier::{classify, facets};

/// Reason reported for every failed status query.
pub const PRINTER_NOT_FOUND: &str = "printer not found";

/// Something that can be asked for a printer's raw status text.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Return the raw `STATUS:`/`JOBS:`/`NAME:` text for the printer, or
    /// `PrinterNotFound` if it does not exist or the query failed.
    async fn query(&self, printer_name: &str) -> Result<String>;
}

/// Queries the Windows spooler through PowerShell's `Get-Printer` and
/// `Get-PrintJob` cmdlets.
pub struct ShellStatusSource {
    shell: String,
}

impl ShellStatusSource {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

/// PowerShell snippet emitting the status protocol for one printer.
fn status_script(printer_name: &str) -> String {
    // Single quotes inside a PowerShell single-quoted string are doubled.
    let name = printer_name.replace('\'', "''");
    format!(
        r#"
$printer = Get-Printer -Name '{name}' -ErrorAction SilentlyContinue
if ($printer) {{
    $status = $printer.PrinterStatus
    $queue = Get-PrintJob -PrinterName '{name}' -ErrorAction SilentlyContinue
    $jobCount = if ($queue) {{ ($queue | Measure-Object).Count }} else {{ 0 }}
    Write-Host "STATUS:$status"
    Write-Host "JOBS:$jobCount"
    Write-Host "NAME:$($printer.Name)"
}} else {{
    Write-Error "Printer not found"
    exit 1
}}
"#
    )
}

#[async_trait]
impl StatusSource for ShellStatusSource {
    async fn query(&self, printer_name: &str) -> Result<String> {
        let output = Command::new(&self.shell)
            .arg("-NoProfile")
            .arg("-Command")
            .arg(status_script(printer_name))
            .output()
            .await
            .map_err(|e| {
                warn!(shell = %self.shell, error = %e, "status query could not be started");
                SpoolwatchError::printer_not_found(printer_name, PRINTER_NOT_FOUND)
            })?;

        if !output.status.success() {
            debug!(
                printer = printer_name,
                code = ?output.status.code(),
                "status query exited non-zero"
            );
            return Err(SpoolwatchError::printer_not_found(
                printer_name,
                PRINTER_NOT_FOUND,
            ));
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Fields pulled out of the status text before classification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawStatus {
    pub status_code: Option<String>,
    pub jobs: u32,
    pub name: Option<String>,
}

/// Parse the line protocol. The first occurrence of each key wins; other
/// lines are ignored. A malformed job count reads as 0.
pub fn parse_status_output(text: &str) -> RawStatus {
    let mut raw = RawStatus::default();
    let mut jobs_seen = false;

    for line in text.lines().map(str::trim) {
        if let Some(code) = line.strip_prefix("STATUS:") {
            if raw.status_code.is_none() {
                raw.status_code = Some(code.to_string());
            }
        } else if let Some(jobs) = line.strip_prefix("JOBS:") {
            if !jobs_seen {
                jobs_seen = true;
                raw.jobs = jobs.trim().parse().unwrap_or(0);
            }
        } else if let Some(name) = line.strip_prefix("NAME:") {
            if raw.name.is_none() {
                raw.name = Some(name.to_string());
            }
        }
    }

    raw
}

/// Build a snapshot from parsed status text.
pub fn snapshot_from_raw(printer_name: &str, raw: RawStatus) -> PrinterStatusSnapshot {
    let code = raw.status_code.unwrap_or_default();
    let flags = facets(&code);
    PrinterStatusSnapshot {
        name: printer_name.to_string(),
        status: classify(&code),
        error_message: flags.has_error.then(|| code.trim().to_string()),
        raw_status: code,
        jobs_in_queue: raw.jobs,
        is_ready: flags.is_ready,
        has_paper: flags.has_paper,
        has_error: flags.has_error,
        reported_name: raw.name,
    }
}

/// Polls a [`StatusSource`] and classifies the result.
#[derive(Clone)]
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
}

impl StatusPoller {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }

    /// Take one snapshot of the printer.
    #[instrument(skip(self))]
    pub async fn poll(&self, printer_name: &str) -> Result<PrinterStatusSnapshot> {
        let text = self.source.query(printer_name).await.map_err(|e| match e {
            SpoolwatchError::PrinterNotFound { .. } => e,
            other => SpoolwatchError::printer_not_found(printer_name, other.to_string()),
        })?;

        let snapshot = snapshot_from_raw(printer_name, parse_status_output(&text));
        debug!(
            status = %snapshot.status,
            jobs = snapshot.jobs_in_queue,
            ready = snapshot.is_ready,
            "printer polled"
        );
        Ok(snapshot)
    }
}
