// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory status source and renderer for tests.  No external processes.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use spoolwatch_core::error::{Result, SpoolwatchError};

use crate::renderer::{RenderOutput, Renderer};
use crate::status::{PRINTER_NOT_FOUND, StatusSource};

/// `Err(())` stands for "printer not found".
type Scripted = std::result::Result<String, ()>;

/// Replays canned status text in order, repeating the last entry forever.
#[derive(Clone)]
pub struct ScriptedStatusSource {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    last: Arc<Mutex<Option<Scripted>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStatusSource {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_responses(texts.into_iter().map(|t| Ok(t.into())).collect())
    }

    pub fn from_responses(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source that never finds any printer.
    pub fn missing() -> Self {
        Self::from_responses(vec![Err(())])
    }

    /// How many queries have been answered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for ScriptedStatusSource {
    async fn query(&self, printer_name: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().expect("script lock poisoned").pop_front();
        let response = match next {
            Some(response) => {
                *self.last.lock().expect("script lock poisoned") = Some(response.clone());
                response
            }
            None => self.last.lock().expect("script lock poisoned").clone().unwrap_or(Err(())),
        };
        response.map_err(|()| SpoolwatchError::printer_not_found(printer_name, PRINTER_NOT_FOUND))
    }
}

/// Records every invocation and answers with a fixed result.
#[derive(Clone)]
pub struct FakeRenderer {
    installed: bool,
    exit_code: i32,
    output: String,
    invocations: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeRenderer {
    /// Installed, always succeeds.
    pub fn succeeding() -> Self {
        Self {
            installed: true,
            exit_code: 0,
            output: String::new(),
            invocations: Arc::default(),
        }
    }

    /// Installed, exits with the given code and output.
    pub fn failing(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            installed: true,
            exit_code,
            output: output.into(),
            invocations: Arc::default(),
        }
    }

    /// Not installed anywhere.
    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::succeeding()
        }
    }

    /// Argument lists passed to `render`, oldest first.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().expect("invocation lock poisoned").clone()
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    fn locate(&self) -> Option<PathBuf> {
        self.installed.then(|| PathBuf::from("fake-gs"))
    }

    fn searched(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("fake-gs")]
    }

    async fn render(&self, _executable: &Path, args: &[String]) -> Result<RenderOutput> {
        self.invocations.lock().expect("invocation lock poisoned").push(args.to_vec());
        Ok(RenderOutput {
            exit_code: Some(self.exit_code),
            output: self.output.clone(),
        })
    }
}
