// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpoolwatchError};

/// File picked up from the working directory when no path is given.
pub const CONFIG_FILE: &str = "spoolwatch.json";

/// Settings shared by the CLI and the HTTP service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Printer used when a request does not name one.
    pub default_printer: String,
    /// Document printed by a bare `print` command.
    pub default_document: String,
    /// Relative document names resolve against this directory.
    pub document_dir: PathBuf,
    /// Extensions listed as printable documents (case-insensitive).
    pub document_extensions: Vec<String>,
    /// Renderer executables, searched in order.
    pub renderer_paths: Vec<PathBuf>,
    /// Program the status query script runs under.
    pub status_shell: String,
    /// Seconds between two status polls while monitoring.
    pub poll_interval_secs: u64,
    /// Give up monitoring after this many seconds; 0 or less never times out.
    pub monitor_timeout_secs: i64,
    /// Address the HTTP service binds to.
    pub listen_addr: String,
    /// Start a detached monitor for jobs submitted through the service.
    pub monitor_service_jobs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_printer: "MP230".into(),
            default_document: "test.pdf".into(),
            document_dir: PathBuf::from("."),
            document_extensions: vec!["pdf".into()],
            renderer_paths: vec![
                PathBuf::from(r"C:\Program Files\gs\gs10.06.0\bin\gswin64c.exe"),
                PathBuf::from(r"C:\Program Files (x86)\gs\gs10.06.0\bin\gswin32c.exe"),
                PathBuf::from("gswin64c.exe"),
                PathBuf::from("gs"),
            ],
            status_shell: "powershell".into(),
            poll_interval_secs: 2,
            monitor_timeout_secs: 0,
            listen_addr: "0.0.0.0:3000".into(),
            monitor_service_jobs: true,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `spoolwatch.json`
    /// in the working directory is used when present, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SpoolwatchError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&data).map_err(|e| {
            SpoolwatchError::Config(format!("cannot parse {}: {e}", path.display()))
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// `None` means monitor until the job finishes.
    pub fn monitor_timeout(&self) -> Option<Duration> {
        timeout_from_secs(self.monitor_timeout_secs)
    }
}

/// Convert a signed second count into an optional timeout (`<= 0` is unlimited).
pub fn timeout_from_secs(secs: i64) -> Option<Duration> {
    u64::try_from(secs)
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
}
