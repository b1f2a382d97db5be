// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive commands.  Everything here writes user-facing lines to stdout;
// diagnostics go through tracing.

use std::path::PathBuf;

use spoolwatch_core::error::Result;
use spoolwatch_core::types::PrinterStatusSnapshot;
use spoolwatch_print::{MonitorEvent, MonitorOutcome};

use crate::cli::PrintArgs;
use crate::services::app_services::AppServices;

/// Check the document and printer, submit, then watch the job.  Returns
/// whether the job ended without a printer failure.
pub async fn print(services: &AppServices, args: &PrintArgs) -> Result<bool> {
    let printer = services.printer_or_default(args.printer.as_deref());
    let document = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&services.config().default_document));

    let document = services.orchestrator().check_document(&document).await?;

    println!("Checking printer status...");
    let snapshot = services.printer_status(printer).await?;
    print_snapshot(&snapshot);

    println!("\nStarting print job for {}...", document.display());
    let handle = services
        .orchestrator()
        .submit(&document, printer, &args.options())
        .await?;
    println!("Print command sent (job {}).", handle.id);

    println!("\nMonitoring print job...");
    let outcome = services
        .orchestrator()
        .monitor()
        .run(printer, print_event)
        .await;
    Ok(print_outcome(&outcome))
}

pub async fn status(services: &AppServices, name: Option<&str>) -> Result<()> {
    let printer = services.printer_or_default(name);
    let snapshot = services.printer_status(printer).await?;
    print_snapshot(&snapshot);
    Ok(())
}

pub fn files(services: &AppServices) -> Result<()> {
    let documents = services.list_documents()?;
    if documents.is_empty() {
        println!(
            "No documents in {}.",
            services.config().document_dir.display()
        );
        return Ok(());
    }
    for doc in &documents {
        println!(
            "{:<40} {:>10} bytes  {}",
            doc.name,
            doc.size,
            doc.modified.format("%Y-%m-%d %H:%M")
        );
    }
    println!("{} document(s)", documents.len());
    Ok(())
}

// -- Output ------------------------------------------------------------------

fn print_snapshot(snapshot: &PrinterStatusSnapshot) {
    println!("\nPrinter: {}", snapshot.name);
    println!("Status: {}", snapshot.status);
    println!("Jobs in queue: {}", snapshot.jobs_in_queue);
    if snapshot.is_ready {
        println!("Printer ready");
    } else {
        println!("Printer not ready");
    }
    if !snapshot.has_paper {
        println!("Paper out or paper problem!");
    }
    if let Some(message) = &snapshot.error_message {
        println!("Error: {message}");
    }
}

fn print_event(event: MonitorEvent) {
    match event {
        MonitorEvent::Progress {
            jobs_in_queue,
            status,
            elapsed,
        } => println!(
            "Jobs in queue: {jobs_in_queue} - Status: {status} ({}s elapsed)",
            elapsed.as_secs()
        ),
        MonitorEvent::PaperOut => {
            println!("\nOUT OF PAPER!");
            println!("Load paper; printing resumes automatically...");
        }
        MonitorEvent::PaperRestored => println!("Paper detected, printing resumed."),
    }
}

fn print_outcome(outcome: &MonitorOutcome) -> bool {
    match outcome {
        MonitorOutcome::Completed { elapsed } => {
            println!("Print job finished ({}s).", elapsed.as_secs());
            true
        }
        MonitorOutcome::TimedOut {
            elapsed,
            jobs_in_queue,
        } => {
            println!(
                "Stopped watching after {}s with {jobs_in_queue} job(s) still queued; \
                 the printer keeps going.",
                elapsed.as_secs()
            );
            println!("Tip: raise --timeout, or pass 0 to wait until the queue drains.");
            true
        }
        MonitorOutcome::Failed(failure) => {
            println!("Print job failed: {failure}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use spoolwatch_core::AppConfig;
    use spoolwatch_core::error::SpoolwatchError;
    use spoolwatch_core::types::SemanticStatus;
    use spoolwatch_print::fakes::{FakeRenderer, ScriptedStatusSource};
    use spoolwatch_print::{MonitorFailure, PrintOrchestrator};

    fn print_args(file: &str) -> PrintArgs {
        PrintArgs {
            file: Some(PathBuf::from(file)),
            printer: Some("Ghost".into()),
            paper: "a4".into(),
            monochrome: false,
            duplex: false,
            short_edge: false,
            copies: 1,
            timeout: None,
        }
    }

    fn services_in(dir: &Path, source: ScriptedStatusSource) -> AppServices {
        let config = AppConfig {
            document_dir: dir.to_path_buf(),
            ..AppConfig::default()
        };
        let orchestrator = PrintOrchestrator::new(
            &config,
            Arc::new(source),
            Arc::new(FakeRenderer::succeeding()),
        );
        AppServices::with_orchestrator(config, orchestrator)
    }

    #[tokio::test]
    async fn missing_document_reported_before_printer() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedStatusSource::missing();
        let services = services_in(dir.path(), source.clone());

        let err = print(&services, &print_args("nope.pdf")).await.unwrap_err();
        assert!(matches!(err, SpoolwatchError::FileNotFound(_)));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn missing_printer_reported_once_document_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.pdf"), b"%PDF").unwrap();
        let services = services_in(dir.path(), ScriptedStatusSource::missing());

        let err = print(&services, &print_args("test.pdf")).await.unwrap_err();
        assert!(matches!(err, SpoolwatchError::PrinterNotFound { .. }));
    }

    #[test]
    fn only_failures_are_unsuccessful() {
        assert!(print_outcome(&MonitorOutcome::Completed {
            elapsed: Duration::from_secs(4)
        }));
        assert!(print_outcome(&MonitorOutcome::TimedOut {
            elapsed: Duration::from_secs(6),
            jobs_in_queue: 2,
        }));
        assert!(!print_outcome(&MonitorOutcome::Failed(
            MonitorFailure::PrinterError {
                status: SemanticStatus::PaperJam,
                message: None,
            }
        )));
    }
}
