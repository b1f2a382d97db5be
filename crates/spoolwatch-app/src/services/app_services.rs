// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: owns the loaded configuration and the print
// orchestrator, and provides the operations both surfaces share.
//
// Cheap to clone: the config is behind an `Arc` and the orchestrator only
// holds `Arc`s, so the struct doubles as the axum router state.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use spoolwatch_core::AppConfig;
use spoolwatch_core::error::Result;
use spoolwatch_core::types::{JobHandle, PrintOptions, PrinterStatusSnapshot};
use spoolwatch_print::{MonitorOutcome, MonitorSlots, PrintOrchestrator};

/// A printable document found in the document directory.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    orchestrator: PrintOrchestrator,
    monitors: MonitorSlots,
}

impl AppServices {
    /// Wire the real status source and renderer from the config.
    pub fn init(config: AppConfig) -> Self {
        let orchestrator = PrintOrchestrator::from_config(&config);
        info!(
            document_dir = %config.document_dir.display(),
            default_printer = %config.default_printer,
            "app services initialised"
        );
        Self::with_orchestrator(config, orchestrator)
    }

    pub fn with_orchestrator(config: AppConfig, orchestrator: PrintOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
            monitors: MonitorSlots::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &PrintOrchestrator {
        &self.orchestrator
    }

    /// The named printer, or the configured default when blank.
    pub fn printer_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.config.default_printer,
        }
    }

    pub async fn printer_status(&self, printer_name: &str) -> Result<PrinterStatusSnapshot> {
        self.orchestrator.printer_status(printer_name).await
    }

    /// Printers with a detached monitor running.
    pub fn active_monitors(&self) -> usize {
        self.monitors.active()
    }

    /// Submit and return at once.  When enabled, a detached task watches the
    /// printer's queue and reports the outcome through the log.  A printer
    /// that is already watched does not get a second monitor.
    pub async fn print_detached(
        &self,
        document: &Path,
        printer_name: &str,
        options: &PrintOptions,
    ) -> Result<JobHandle> {
        let handle = self.orchestrator.submit(document, printer_name, options).await?;

        if !self.config.monitor_service_jobs {
            return Ok(handle);
        }
        let Some(slot) = self.monitors.try_claim(&handle.printer) else {
            debug!(job_id = %handle.id, printer = %handle.printer, "printer already monitored");
            return Ok(handle);
        };

        let monitor = self.orchestrator.monitor();
        let printer = handle.printer.clone();
        let job_id = handle.id.clone();
        tokio::spawn(async move {
            let _slot = slot;
            match monitor.run(&printer, |_| {}).await {
                MonitorOutcome::Failed(failure) => {
                    warn!(job_id = %job_id, %printer, %failure, "detached job failed")
                }
                outcome => info!(job_id = %job_id, %printer, ?outcome, "detached job finished"),
            }
        });

        Ok(handle)
    }

    // -- Documents -----------------------------------------------------------

    /// Printable documents in the document directory, sorted by name.
    pub fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.config.document_dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() || !self.is_document(&entry.path()) {
                continue;
            }
            entries.push(DocumentEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                modified: DateTime::<Utc>::from(metadata.modified()?),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_document(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.config
            .document_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolwatch_print::fakes::{FakeRenderer, ScriptedStatusSource};

    fn services_with(dir: &Path, source: ScriptedStatusSource, monitor: bool) -> AppServices {
        let config = AppConfig {
            document_dir: dir.to_path_buf(),
            document_extensions: vec!["pdf".into(), "ps".into()],
            monitor_service_jobs: monitor,
            ..AppConfig::default()
        };
        let orchestrator = PrintOrchestrator::new(
            &config,
            Arc::new(source),
            Arc::new(FakeRenderer::succeeding()),
        );
        AppServices::with_orchestrator(config, orchestrator)
    }

    fn services_in(dir: &Path) -> AppServices {
        services_with(dir, ScriptedStatusSource::new(["STATUS:0\nJOBS:0"]), false)
    }

    #[test]
    fn lists_only_documents_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"12345").unwrap();
        std::fs::write(dir.path().join("a.ps"), b"1").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let docs = services_in(dir.path()).list_documents().unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a.ps", "b.PDF"]);
        assert_eq!(docs[1].size, 5);
    }

    #[test]
    fn blank_printer_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let services = services_in(dir.path());
        assert_eq!(services.printer_or_default(None), "MP230");
        assert_eq!(services.printer_or_default(Some("  ")), "MP230");
        assert_eq!(services.printer_or_default(Some("LaserJet")), "LaserJet");
    }

    #[tokio::test]
    async fn detached_print_returns_handle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.pdf"), b"%PDF").unwrap();
        let handle = services_in(dir.path())
            .print_detached(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap();
        assert_eq!(handle.printer, "MP230");
    }

    #[tokio::test(start_paused = true)]
    async fn one_detached_monitor_per_printer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.pdf"), b"%PDF").unwrap();
        // The queue never drains and the default config has no timeout.
        let source = ScriptedStatusSource::new(["STATUS:0\nJOBS:1"]);
        let services = services_with(dir.path(), source.clone(), true);

        for _ in 0..50 {
            services
                .print_detached(Path::new("test.pdf"), "MP230", &PrintOptions::default())
                .await
                .unwrap();
        }
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;

        assert_eq!(services.active_monitors(), 1);
        // 50 submit checks plus one poll every 2 s from a single monitor.
        assert!(source.calls() <= 50 + 1801, "calls = {}", source.calls());
    }

    #[tokio::test(start_paused = true)]
    async fn finished_monitor_frees_the_printer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.pdf"), b"%PDF").unwrap();
        let services = services_with(
            dir.path(),
            ScriptedStatusSource::new(["STATUS:0\nJOBS:0"]),
            true,
        );

        services
            .print_detached(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap();
        assert_eq!(services.active_monitors(), 1);

        tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        assert_eq!(services.active_monitors(), 0);
    }
}
