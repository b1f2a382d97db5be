// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print job lifecycle monitor.
//
// After a document has been handed to the spooler, the monitor polls the
// printer on a fixed interval until the queue drains (Completed), the printer
// reports an error or disappears (Failed), or the optional timeout passes
// (TimedOut).  While polling it reports queue-depth changes and paper-out
// episodes, warning once per episode rather than on every tick.
//
// Each tick is one status round trip; ticks never overlap.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, instrument, warn};

use spoolwatch_core::types::{PrinterStatusSnapshot, SemanticStatus};

use crate::status::StatusPoller;

/// Something the user should be told while a job is being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// The queue depth changed (or was seen for the first time).
    Progress {
        jobs_in_queue: u32,
        status: SemanticStatus,
        elapsed: Duration,
    },
    /// The printer ran out of paper. Sent once per episode.
    PaperOut,
    /// Paper is back after a `PaperOut`.
    PaperRestored,
}

/// Why monitoring stopped with a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorFailure {
    /// The printer could not be queried any more.
    StatusUnavailable(String),
    /// The printer reported an error condition.
    PrinterError {
        status: SemanticStatus,
        message: Option<String>,
    },
}

impl std::fmt::Display for MonitorFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusUnavailable(reason) => write!(f, "status unavailable: {reason}"),
            Self::PrinterError { status, message } => match message {
                Some(message) => write!(f, "printer error ({status}): {message}"),
                None => write!(f, "printer error ({status})"),
            },
        }
    }
}

/// Terminal state of a monitoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The queue drained.
    Completed { elapsed: Duration },
    /// The timeout passed with jobs still queued; the job itself keeps going.
    TimedOut {
        elapsed: Duration,
        jobs_in_queue: u32,
    },
    Failed(MonitorFailure),
}

/// Polling cadence and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub interval: Duration,
    /// `None` watches until the job completes or fails.
    pub timeout: Option<Duration>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

/// What one tick decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    pub events: Vec<MonitorEvent>,
    /// `Some` once the job reached a terminal state.
    pub outcome: Option<MonitorOutcome>,
}

/// State of the job being watched. Lives only as long as one monitoring run.
#[derive(Debug, Clone)]
pub struct WatchedJob {
    pub printer: String,
    /// `None` until the first snapshot arrives.
    previous_jobs: Option<u32>,
    paper_warning_active: bool,
}

impl WatchedJob {
    pub fn new(printer: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            previous_jobs: None,
            paper_warning_active: false,
        }
    }

    pub fn paper_warning_active(&self) -> bool {
        self.paper_warning_active
    }

    /// Apply one snapshot taken `elapsed` after monitoring began.
    pub fn observe(
        &mut self,
        snapshot: &PrinterStatusSnapshot,
        elapsed: Duration,
        timeout: Option<Duration>,
    ) -> TickResult {
        let mut events = Vec::new();

        if snapshot.jobs_in_queue == 0 {
            return TickResult {
                events,
                outcome: Some(MonitorOutcome::Completed { elapsed }),
            };
        }

        if !snapshot.has_paper {
            if !self.paper_warning_active {
                self.paper_warning_active = true;
                events.push(MonitorEvent::PaperOut);
            }
        } else if self.paper_warning_active {
            self.paper_warning_active = false;
            events.push(MonitorEvent::PaperRestored);
        }

        if snapshot.has_error {
            return TickResult {
                events,
                outcome: Some(MonitorOutcome::Failed(MonitorFailure::PrinterError {
                    status: snapshot.status.clone(),
                    message: snapshot.error_message.clone(),
                })),
            };
        }

        if self.previous_jobs != Some(snapshot.jobs_in_queue) {
            self.previous_jobs = Some(snapshot.jobs_in_queue);
            events.push(MonitorEvent::Progress {
                jobs_in_queue: snapshot.jobs_in_queue,
                status: snapshot.status.clone(),
                elapsed,
            });
        }

        let outcome = match timeout {
            Some(limit) if elapsed > limit => Some(MonitorOutcome::TimedOut {
                elapsed,
                jobs_in_queue: snapshot.jobs_in_queue,
            }),
            _ => None,
        };

        TickResult { events, outcome }
    }
}

/// Drives [`WatchedJob`] from a [`StatusPoller`] on a fixed interval.
#[derive(Clone)]
pub struct JobMonitor {
    poller: StatusPoller,
    settings: MonitorSettings,
}

impl JobMonitor {
    pub fn new(poller: StatusPoller, settings: MonitorSettings) -> Self {
        Self { poller, settings }
    }

    pub fn settings(&self) -> MonitorSettings {
        self.settings
    }

    /// Watch the printer until a terminal state, reporting events as they
    /// happen. The first poll happens one interval after the call.
    #[instrument(
        skip(self, on_event),
        fields(interval = ?self.settings.interval, timeout = ?self.settings.timeout)
    )]
    pub async fn run<F>(&self, printer_name: &str, mut on_event: F) -> MonitorOutcome
    where
        F: FnMut(MonitorEvent) + Send,
    {
        let started = Instant::now();
        let mut ticker = interval_at(started + self.settings.interval, self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut job = WatchedJob::new(printer_name);

        info!(printer = printer_name, "monitoring print job");
        loop {
            ticker.tick().await;

            let snapshot = match self.poller.poll(printer_name).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(printer = printer_name, error = %e, "lost printer status");
                    return MonitorOutcome::Failed(MonitorFailure::StatusUnavailable(
                        e.to_string(),
                    ));
                }
            };

            let tick = job.observe(&snapshot, started.elapsed(), self.settings.timeout);
            for event in tick.events {
                log_event(printer_name, &event);
                on_event(event);
            }

            if let Some(outcome) = tick.outcome {
                log_outcome(printer_name, &outcome);
                return outcome;
            }
        }
    }
}

fn log_event(printer: &str, event: &MonitorEvent) {
    match event {
        MonitorEvent::Progress {
            jobs_in_queue,
            status,
            elapsed,
        } => info!(
            printer,
            jobs = jobs_in_queue,
            %status,
            elapsed_s = elapsed.as_secs(),
            "queue changed"
        ),
        MonitorEvent::PaperOut => warn!(printer, "printer is out of paper"),
        MonitorEvent::PaperRestored => info!(printer, "paper restored"),
    }
}

fn log_outcome(printer: &str, outcome: &MonitorOutcome) {
    match outcome {
        MonitorOutcome::Completed { elapsed } => {
            info!(printer, elapsed_s = elapsed.as_secs(), "print job completed")
        }
        MonitorOutcome::TimedOut {
            elapsed,
            jobs_in_queue,
        } => warn!(
            printer,
            elapsed_s = elapsed.as_secs(),
            jobs = jobs_in_queue,
            "monitoring timed out, job still running"
        ),
        MonitorOutcome::Failed(failure) => warn!(printer, %failure, "monitoring failed"),
    }
}
