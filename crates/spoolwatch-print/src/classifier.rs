// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer status code classification.
//
// The Windows spooler reports `PrinterStatus` either as a number (0-8) or as
// a symbolic name.  Codes are mapped onto a closed set of semantic states.
// The ready/paper/error flags are read straight off the raw text rather than
// off the semantic state, so a code can be "ready" and "out of paper" at the
// same time.

use spoolwatch_core::types::SemanticStatus;

/// Boolean facets read from a raw status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFacets {
    pub is_ready: bool,
    pub has_paper: bool,
    pub has_error: bool,
}

/// Map a raw status code onto a [`SemanticStatus`].
///
/// Exact matches win, then substring rules: "paper" before "error".
pub fn classify(raw_code: &str) -> SemanticStatus {
    let code = raw_code.trim();
    match code {
        "0" | "Normal" => SemanticStatus::Ready,
        "1" => SemanticStatus::Paused,
        "2" => SemanticStatus::Error,
        "3" => SemanticStatus::PendingDeletion,
        "4" => SemanticStatus::PaperJam,
        "5" => SemanticStatus::PaperOut,
        "6" => SemanticStatus::ManualFeed,
        "7" => SemanticStatus::PaperProblem,
        "8" => SemanticStatus::Offline,
        _ => {
            let lower = code.to_ascii_lowercase();
            if lower.contains("paper") {
                SemanticStatus::PaperProblem
            } else if lower.contains("error") {
                SemanticStatus::Error
            } else {
                SemanticStatus::Unknown(code.to_string())
            }
        }
    }
}

/// Compute the ready/paper/error flags from the untrimmed raw code.
pub fn facets(raw_code: &str) -> StatusFacets {
    let lower = raw_code.to_ascii_lowercase();
    StatusFacets {
        is_ready: raw_code.contains("Normal") || raw_code == "0",
        has_paper: !lower.contains("paper"),
        has_error: lower.contains("error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_map_exactly() {
        let expected = [
            ("0", SemanticStatus::Ready),
            ("1", SemanticStatus::Paused),
            ("2", SemanticStatus::Error),
            ("3", SemanticStatus::PendingDeletion),
            ("4", SemanticStatus::PaperJam),
            ("5", SemanticStatus::PaperOut),
            ("6", SemanticStatus::ManualFeed),
            ("7", SemanticStatus::PaperProblem),
            ("8", SemanticStatus::Offline),
        ];
        for (code, status) in expected {
            assert_eq!(classify(code), status, "code {code}");
        }
    }

    #[test]
    fn normal_token_is_ready() {
        assert_eq!(classify("Normal"), SemanticStatus::Ready);
    }

    #[test]
    fn substring_rule_beats_lookalike_names() {
        assert_eq!(classify("PaperJam99"), SemanticStatus::PaperProblem);
        assert_eq!(classify("TonerError"), SemanticStatus::Error);
        assert_eq!(classify("paper-error"), SemanticStatus::PaperProblem);
    }

    #[test]
    fn unknown_code_is_preserved() {
        assert_eq!(classify("Busy"), SemanticStatus::Unknown("Busy".into()));
        assert_eq!(classify("9"), SemanticStatus::Unknown("9".into()));
    }

    #[test]
    fn facets_are_independent_of_the_enum() {
        let f = facets("Normal-paper-error");
        assert!(f.is_ready);
        assert!(!f.has_paper);
        assert!(f.has_error);
        assert_eq!(classify("Normal-paper-error"), SemanticStatus::PaperProblem);
    }

    #[test]
    fn numeric_paper_out_still_reports_paper() {
        // Code 5 is Paper Out, but the text itself never says "paper".
        let f = facets("5");
        assert!(f.has_paper);
        assert!(!f.is_ready);
        assert_eq!(classify("5"), SemanticStatus::PaperOut);
    }

    #[test]
    fn ready_code_facets() {
        let f = facets("0");
        assert!(f.is_ready);
        assert!(f.has_paper);
        assert!(!f.has_error);
    }
}
