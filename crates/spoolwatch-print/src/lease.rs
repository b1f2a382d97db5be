// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-printer render leases and background monitor slots.
//
// Two submissions to the same printer must not drive the renderer at the same
// time, or their spooled pages can interleave.  Each printer name gets its own
// async mutex; submissions to different printers never wait on each other.
//
// Queue depth is printer-wide, so one background monitor per printer sees
// every job on it.  `MonitorSlots` hands out at most one slot per name.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

/// Held for the duration of one renderer run against a printer.
pub type PrinterLease = OwnedMutexGuard<()>;

/// Hands out one lease per printer name.
#[derive(Clone, Default)]
pub struct PrinterLeases {
    /// Keyed by printer name as given by the caller.
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl PrinterLeases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until the printer is free, then hold it until the lease drops.
    pub async fn acquire(&self, printer_name: &str) -> PrinterLease {
        let lock = {
            // The map is only touched under this short critical section; a
            // poisoned map still holds valid entries.
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(locks.entry(printer_name.to_string()).or_default())
        };

        if lock.try_lock().is_err() {
            debug!(printer = printer_name, "waiting for another render on this printer");
        }
        lock.lock_owned().await
    }

    /// Whether a render currently holds the printer.
    pub fn is_busy(&self, printer_name: &str) -> bool {
        let locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .get(printer_name)
            .is_some_and(|lock| lock.try_lock().is_err())
    }
}

/// Printers that currently have a background monitor.
#[derive(Clone, Default)]
pub struct MonitorSlots {
    active: Arc<Mutex<HashSet<String>>>,
}

/// Frees its printer's slot when dropped.
pub struct MonitorSlot {
    active: Arc<Mutex<HashSet<String>>>,
    printer: String,
}

impl MonitorSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the printer, or `None` when a monitor already watches it.
    pub fn try_claim(&self, printer_name: &str) -> Option<MonitorSlot> {
        let mut active = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !active.insert(printer_name.to_string()) {
            return None;
        }
        Some(MonitorSlot {
            active: Arc::clone(&self.active),
            printer: printer_name.to_string(),
        })
    }

    /// Number of printers being watched.
    pub fn active(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Drop for MonitorSlot {
    fn drop(&mut self) {
        let mut active = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        active.remove(&self.printer);
    }
}
