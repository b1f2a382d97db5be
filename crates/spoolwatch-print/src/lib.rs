// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwatch Print: status classification and polling, Ghostscript command
// construction and invocation, and the print job lifecycle monitor.  This
// crate bridges the core domain types in `spoolwatch-core` and the host's
// print spooler.

pub mod classifier;
pub mod command;
pub mod lease;
pub mod monitor;
pub mod orchestrator;
pub mod renderer;
pub mod status;

#[cfg(any(test, feature = "fakes"))]
pub mod fakes;

pub use lease::{MonitorSlot, MonitorSlots, PrinterLeases};
pub use monitor::{JobMonitor, MonitorEvent, MonitorFailure, MonitorOutcome, MonitorSettings};
pub use orchestrator::PrintOrchestrator;
pub use renderer::{GhostscriptRenderer, Renderer};
pub use status::{ShellStatusSource, StatusPoller, StatusSource};
