// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolwatch.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SemanticStatus;

/// Top-level error type for all Spoolwatch operations.
#[derive(Debug, Error)]
pub enum SpoolwatchError {
    // -- Submission preconditions --
    #[error("document not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("printer not found: {printer} ({reason})")]
    PrinterNotFound { printer: String, reason: String },

    #[error("printer {printer} is not ready: {status}")]
    PrinterNotReady {
        printer: String,
        status: SemanticStatus,
    },

    // -- Renderer --
    #[error("renderer not found (searched {} location(s))", .searched.len())]
    RendererMissing { searched: Vec<PathBuf> },

    #[error("renderer failed{}: {output}", exit_suffix(.exit_code))]
    RenderFailed {
        exit_code: Option<i32>,
        output: String,
    },

    // -- Request / configuration --
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => String::new(),
    }
}

impl SpoolwatchError {
    /// Shorthand for the status-source failure surfaced to callers.
    pub fn printer_not_found(printer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PrinterNotFound {
            printer: printer.into(),
            reason: reason.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_failed_carries_output_verbatim() {
        let err = SpoolwatchError::RenderFailed {
            exit_code: Some(1),
            output: "Unrecoverable error, exit code 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "renderer failed with exit code 1: Unrecoverable error, exit code 1"
        );
    }

    #[test]
    fn not_ready_names_the_status() {
        let err = SpoolwatchError::PrinterNotReady {
            printer: "MP230".into(),
            status: SemanticStatus::Offline,
        };
        assert_eq!(err.to_string(), "printer MP230 is not ready: Offline");
    }
}
