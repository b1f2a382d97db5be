// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Spoolwatch print monitor.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Identifier handed back for a submitted print job.
///
/// Derived from the submission time (`job_<unix-seconds>`); the spooler
/// assigns its own ids, this one only labels the submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn from_submission(submitted_at: DateTime<Utc>) -> Self {
        Self(format!("job_{}", submitted_at.timestamp()))
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paper sizes the renderer is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
    A5,
}

impl PaperSize {
    /// Lenient keyword parse. Anything unrecognised is A4.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "letter" => Self::Letter,
            "legal" => Self::Legal,
            "a5" => Self::A5,
            _ => Self::A4,
        }
    }

    /// Ghostscript `PAPERSIZE` value.
    pub fn device_keyword(&self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::Letter => "letter",
            Self::Legal => "legal",
            Self::A5 => "a5",
        }
    }
}

/// Colour handling for the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

impl ColorMode {
    /// Only an explicit monochrome keyword switches to grayscale.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "monochrome" | "grayscale" | "greyscale" => Self::Monochrome,
            _ => Self::Color,
        }
    }
}

/// Binding edge for two-sided printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplexEdge {
    /// Flip vertically (book style).
    #[default]
    LongEdge,
    /// Flip horizontally (calendar style).
    ShortEdge,
}

impl DuplexEdge {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "short-edge" | "short_edge" | "shortedge" => Self::ShortEdge,
            _ => Self::LongEdge,
        }
    }
}

/// Print settings for one submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintOptions {
    paper_size: PaperSize,
    color_mode: ColorMode,
    duplex: bool,
    duplex_edge: DuplexEdge,
    copies: u32,
}

impl PrintOptions {
    /// Build options; a copy count of zero or less becomes 1.
    pub fn new(
        paper_size: PaperSize,
        color_mode: ColorMode,
        duplex: bool,
        duplex_edge: DuplexEdge,
        copies: i64,
    ) -> Self {
        let copies = if copies <= 0 {
            1
        } else {
            u32::try_from(copies).unwrap_or(u32::MAX)
        };
        Self {
            paper_size,
            color_mode,
            duplex,
            duplex_edge,
            copies,
        }
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn duplex(&self) -> bool {
        self.duplex
    }

    /// Only meaningful when [`duplex`](Self::duplex) is set.
    pub fn duplex_edge(&self) -> DuplexEdge {
        self.duplex_edge
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new(
            PaperSize::A4,
            ColorMode::Color,
            false,
            DuplexEdge::LongEdge,
            1,
        )
    }
}

/// Semantic printer state derived from the spooler's raw status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticStatus {
    Ready,
    Paused,
    Error,
    PendingDeletion,
    PaperJam,
    PaperOut,
    ManualFeed,
    PaperProblem,
    Offline,
    /// Unrecognised code, kept verbatim.
    Unknown(String),
}

impl SemanticStatus {
    /// Display label shown to users and returned over the API.
    pub fn label(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Paused => "Paused",
            Self::Error => "Error",
            Self::PendingDeletion => "Pending Deletion",
            Self::PaperJam => "Paper Jam",
            Self::PaperOut => "Paper Out",
            Self::ManualFeed => "Manual Feed",
            Self::PaperProblem => "Paper Problem",
            Self::Offline => "Offline",
            Self::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for SemanticStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SemanticStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One poll of a printer. Each poll produces a fresh, independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterStatusSnapshot {
    /// The name that was asked for, not the one the spooler echoed.
    pub name: String,
    pub status: SemanticStatus,
    /// The `STATUS:` payload as received.
    pub raw_status: String,
    pub jobs_in_queue: u32,
    pub is_ready: bool,
    pub has_paper: bool,
    pub has_error: bool,
    #[serde(rename = "error_msg", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_name: Option<String>,
}

/// Returned by a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct JobHandle {
    pub id: JobId,
    pub printer: String,
    pub document: PathBuf,
    pub submitted_at: DateTime<Utc>,
}
