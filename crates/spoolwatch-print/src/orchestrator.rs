// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print submission.
//
// Checks, in order and stopping at the first failure:
//   1. the document exists
//   2. the printer answers a status query
//   3. the printer reports ready
//   4. the renderer is installed
// then renders the document to the printer and hands back a job handle.
// Interactive callers go on to watch the job with the `JobMonitor`; the
// HTTP service returns immediately.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use spoolwatch_core::AppConfig;
use spoolwatch_core::error::{Result, SpoolwatchError};
use spoolwatch_core::types::{JobHandle, JobId, PrintOptions, PrinterStatusSnapshot};

use crate::command::build_renderer_args;
use crate::lease::PrinterLeases;
use crate::monitor::{JobMonitor, MonitorSettings};
use crate::renderer::{GhostscriptRenderer, Renderer};
use crate::status::{ShellStatusSource, StatusPoller, StatusSource};

/// Validates, renders and hands jobs to the monitor.
#[derive(Clone)]
pub struct PrintOrchestrator {
    poller: StatusPoller,
    renderer: Arc<dyn Renderer>,
    leases: PrinterLeases,
    document_dir: PathBuf,
    monitor_settings: MonitorSettings,
}

impl PrintOrchestrator {
    /// Build with explicit collaborators.
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn StatusSource>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            poller: StatusPoller::new(source),
            renderer,
            leases: PrinterLeases::new(),
            document_dir: config.document_dir.clone(),
            monitor_settings: MonitorSettings {
                interval: config.poll_interval(),
                timeout: config.monitor_timeout(),
            },
        }
    }

    /// Build against the real spooler and Ghostscript.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(ShellStatusSource::new(config.status_shell.clone())),
            Arc::new(GhostscriptRenderer::new(config.renderer_paths.clone())),
        )
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    /// A monitor using the configured cadence and timeout.
    pub fn monitor(&self) -> JobMonitor {
        JobMonitor::new(self.poller.clone(), self.monitor_settings)
    }

    /// Take one snapshot of a printer.
    pub async fn printer_status(&self, printer_name: &str) -> Result<PrinterStatusSnapshot> {
        self.poller.poll(printer_name).await
    }

    /// Resolve a document name against the document directory.
    pub fn resolve_document(&self, document: &Path) -> Result<PathBuf> {
        let joined = if document.is_absolute() {
            document.to_path_buf()
        } else {
            self.document_dir.join(document)
        };
        Ok(std::path::absolute(joined)?)
    }

    /// Resolve the document and make sure it exists.  This is the first
    /// precondition of `submit`.
    pub async fn check_document(&self, document: &Path) -> Result<PathBuf> {
        let path = self.resolve_document(document)?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(SpoolwatchError::FileNotFound(path));
        }
        Ok(path)
    }

    /// Check preconditions and render the document to the printer.
    #[instrument(skip(self, document, options), fields(document = %document.display()))]
    pub async fn submit(
        &self,
        document: &Path,
        printer_name: &str,
        options: &PrintOptions,
    ) -> Result<JobHandle> {
        let path = self.check_document(document).await?;

        let snapshot = self.poller.poll(printer_name).await?;
        if !snapshot.is_ready {
            warn!(printer = printer_name, status = %snapshot.status, "printer not ready");
            return Err(SpoolwatchError::PrinterNotReady {
                printer: printer_name.to_string(),
                status: snapshot.status,
            });
        }

        let executable = self
            .renderer
            .locate()
            .ok_or_else(|| SpoolwatchError::RendererMissing {
                searched: self.renderer.searched(),
            })?;

        let args = build_renderer_args(printer_name, &path, options);
        let submitted_at = Utc::now();

        let rendered = {
            let _lease = self.leases.acquire(printer_name).await;
            self.renderer.render(&executable, &args).await?
        };

        if !rendered.success() {
            warn!(printer = printer_name, code = ?rendered.exit_code, "render failed");
            return Err(SpoolwatchError::RenderFailed {
                exit_code: rendered.exit_code,
                output: rendered.output,
            });
        }

        let handle = JobHandle {
            id: JobId::from_submission(submitted_at),
            printer: printer_name.to_string(),
            document: path,
            submitted_at,
        };
        info!(job_id = %handle.id, printer = printer_name, "print job sent");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeRenderer, ScriptedStatusSource};
    use spoolwatch_core::types::SemanticStatus;

    struct Fixture {
        _dir: tempfile::TempDir,
        orchestrator: PrintOrchestrator,
        renderer: FakeRenderer,
        source: ScriptedStatusSource,
    }

    fn fixture(source: ScriptedStatusSource, renderer: FakeRenderer) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.pdf"), b"%PDF-1.4").unwrap();
        let config = AppConfig {
            document_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let orchestrator =
            PrintOrchestrator::new(&config, Arc::new(source.clone()), Arc::new(renderer.clone()));
        Fixture {
            _dir: dir,
            orchestrator,
            renderer,
            source,
        }
    }

    fn ready(renderer: FakeRenderer) -> Fixture {
        fixture(ScriptedStatusSource::new(["STATUS:0\nJOBS:0"]), renderer)
    }

    #[tokio::test]
    async fn missing_document_short_circuits() {
        let fx = ready(FakeRenderer::succeeding());
        let err = fx
            .orchestrator
            .submit(Path::new("nope.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SpoolwatchError::FileNotFound(_)));
        assert_eq!(fx.source.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_printer_is_not_found() {
        let fx = fixture(ScriptedStatusSource::missing(), FakeRenderer::succeeding());
        let err = fx
            .orchestrator
            .submit(Path::new("test.pdf"), "Ghost", &PrintOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SpoolwatchError::PrinterNotFound { .. }));
    }

    #[tokio::test]
    async fn not_ready_carries_status() {
        let fx = fixture(
            ScriptedStatusSource::new(["STATUS:8\nJOBS:0"]),
            FakeRenderer::succeeding(),
        );
        let err = fx
            .orchestrator
            .submit(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap_err();
        match err {
            SpoolwatchError::PrinterNotReady { status, .. } => {
                assert_eq!(status, SemanticStatus::Offline)
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fx.renderer.invocations().is_empty());
    }

    #[tokio::test]
    async fn missing_renderer_is_reported() {
        let fx = ready(FakeRenderer::missing());
        let err = fx
            .orchestrator
            .submit(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SpoolwatchError::RendererMissing { .. }));
    }

    #[tokio::test]
    async fn render_failure_keeps_output() {
        let fx = fixture(
            ScriptedStatusSource::new(["STATUS:Normal\nJOBS:0"]),
            FakeRenderer::failing(1, "GPL Ghostscript: Unrecoverable error"),
        );
        let err = fx
            .orchestrator
            .submit(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap_err();
        match err {
            SpoolwatchError::RenderFailed { exit_code, output } => {
                assert_eq!(exit_code, Some(1));
                assert_eq!(output, "GPL Ghostscript: Unrecoverable error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn successful_submit_renders_absolute_path() {
        let fx = ready(FakeRenderer::succeeding());
        let handle = fx
            .orchestrator
            .submit(Path::new("test.pdf"), "MP230", &PrintOptions::default())
            .await
            .unwrap();

        assert!(handle.id.0.starts_with("job_"));
        assert!(handle.document.is_absolute());
        let calls = fx.renderer.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].last().unwrap(),
            &handle.document.display().to_string()
        );
        assert!(calls[0].contains(&"-sOutputFile=%printer%MP230".to_string()));
    }

    #[test]
    fn monitor_follows_config() {
        let config = AppConfig {
            poll_interval_secs: 5,
            monitor_timeout_secs: 120,
            ..AppConfig::default()
        };
        let orchestrator = PrintOrchestrator::new(
            &config,
            Arc::new(ScriptedStatusSource::missing()),
            Arc::new(FakeRenderer::missing()),
        );
        let settings = orchestrator.monitor().settings();
        assert_eq!(settings.interval, std::time::Duration::from_secs(5));
        assert_eq!(settings.timeout, Some(std::time::Duration::from_secs(120)));
    }

    #[tokio::test]
    async fn check_document_resolves_existing_files_only() {
        let fx = ready(FakeRenderer::succeeding());
        let path = fx.orchestrator.check_document(Path::new("test.pdf")).await.unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("test.pdf"));

        let err = fx
            .orchestrator
            .check_document(Path::new("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpoolwatchError::FileNotFound(_)));
        assert_eq!(fx.source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_zero_timeout_keeps_watching() {
        let source = ScriptedStatusSource::new(["STATUS:0\nJOBS:1"]);
        let config = AppConfig {
            monitor_timeout_secs: 0,
            ..AppConfig::default()
        };
        let orchestrator = PrintOrchestrator::new(
            &config,
            Arc::new(source.clone()),
            Arc::new(FakeRenderer::missing()),
        );
        let monitor = orchestrator.monitor();
        assert_eq!(monitor.settings().timeout, None);

        let run = tokio::time::timeout(
            std::time::Duration::from_secs(600),
            monitor.run("MP230", |_| {}),
        )
        .await;
        assert!(run.is_err(), "monitor should still be polling");
        assert!(source.calls() >= 299);
    }
}
