// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language error messages for the command line.
//
// Every failure is terminal for the operation that hit it, so these messages
// tell the user what to fix before running the command again.

use crate::error::SpoolwatchError;
use crate::types::SemanticStatus;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Likely to clear by itself (busy spooler, flaky status query).
    Transient,
    /// The user must do something (add paper, switch the printer on).
    ActionRequired,
    /// Running again will not help without changing setup or input.
    Permanent,
}

/// A human-readable error with a message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What to try next.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `SpoolwatchError` into something a non-technical user can act on.
pub fn humanize_error(err: &SpoolwatchError) -> HumanError {
    match err {
        SpoolwatchError::FileNotFound(path) => HumanError {
            message: format!("The document {} could not be found.", path.display()),
            suggestion: "Check the file name and that it is in the documents folder.".into(),
            severity: Severity::ActionRequired,
        },

        SpoolwatchError::PrinterNotFound { printer, .. } => HumanError {
            message: format!("The printer \"{printer}\" could not be found."),
            suggestion: "Check the printer name exactly as it appears in the system printer \
                         list, and that it is switched on."
                .into(),
            severity: Severity::ActionRequired,
        },

        SpoolwatchError::PrinterNotReady { printer, status } => {
            humanize_status(printer, status)
        }

        SpoolwatchError::RendererMissing { .. } => HumanError {
            message: "Ghostscript is not installed (or not where we looked).".into(),
            suggestion: "Install Ghostscript, or add its executable to `renderer_paths` in \
                         the configuration."
                .into(),
            severity: Severity::Permanent,
        },

        SpoolwatchError::RenderFailed { output, .. } => HumanError {
            message: "Ghostscript could not print the document.".into(),
            suggestion: if output.trim().is_empty() {
                "The file may be damaged. Try opening it in a PDF viewer first.".into()
            } else {
                format!("Ghostscript said: {}", output.trim())
            },
            severity: Severity::Permanent,
        },

        SpoolwatchError::InvalidRequest(detail) => HumanError {
            message: "The print request was not understood.".into(),
            suggestion: detail.clone(),
            severity: Severity::ActionRequired,
        },

        SpoolwatchError::Config(detail) => HumanError {
            message: "The configuration file could not be used.".into(),
            suggestion: detail.clone(),
            severity: Severity::Permanent,
        },

        SpoolwatchError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file could not be found.".into(),
                suggestion: "It may have been moved or deleted.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission to read a file was denied.".into(),
                suggestion: "Check the file permissions and try again.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: format!("Try again. ({io_err})"),
                severity: Severity::Transient,
            },
        },

        SpoolwatchError::Serialization(_) => HumanError {
            message: "Spoolwatch had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            severity: Severity::Transient,
        },
    }
}

/// Explain why a printer in the given state cannot take a job.
fn humanize_status(printer: &str, status: &SemanticStatus) -> HumanError {
    match status {
        SemanticStatus::PaperOut | SemanticStatus::PaperProblem => HumanError {
            message: format!("{printer} has a paper problem."),
            suggestion: "Load paper into the tray, then print again.".into(),
            severity: Severity::ActionRequired,
        },
        SemanticStatus::PaperJam => HumanError {
            message: format!("Paper is stuck in {printer}."),
            suggestion: "Gently pull the stuck paper out and close all covers.".into(),
            severity: Severity::ActionRequired,
        },
        SemanticStatus::Offline => HumanError {
            message: format!("{printer} is offline."),
            suggestion: "Switch the printer on and check its cable or Wi-Fi connection.".into(),
            severity: Severity::ActionRequired,
        },
        SemanticStatus::Paused => HumanError {
            message: format!("{printer} is paused."),
            suggestion: "Resume the printer from the system print queue.".into(),
            severity: Severity::ActionRequired,
        },
        SemanticStatus::ManualFeed => HumanError {
            message: format!("{printer} is waiting for manual feed."),
            suggestion: "Insert a sheet into the manual feed slot.".into(),
            severity: Severity::ActionRequired,
        },
        SemanticStatus::PendingDeletion => HumanError {
            message: format!("{printer} is still clearing old jobs."),
            suggestion: "Wait a moment, then print again.".into(),
            severity: Severity::Transient,
        },
        other => HumanError {
            message: format!("{printer} is not ready ({other})."),
            suggestion: "Check the printer's display for an error, then print again.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_out_is_action_required() {
        let err = SpoolwatchError::PrinterNotReady {
            printer: "MP230".into(),
            status: SemanticStatus::PaperOut,
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("paper"));
    }

    #[test]
    fn missing_renderer_is_permanent() {
        let err = SpoolwatchError::RendererMissing { searched: Vec::new() };
        assert_eq!(humanize_error(&err).severity, Severity::Permanent);
    }

    #[test]
    fn render_failure_quotes_ghostscript() {
        let err = SpoolwatchError::RenderFailed {
            exit_code: Some(1),
            output: "  Error: /undefinedfilename  ".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.suggestion, "Ghostscript said: Error: /undefinedfilename");
    }

    #[test]
    fn pending_deletion_is_transient() {
        let err = SpoolwatchError::PrinterNotReady {
            printer: "MP230".into(),
            status: SemanticStatus::PendingDeletion,
        };
        assert_eq!(humanize_error(&err).severity, Severity::Transient);
    }
}
