// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document renderer (Ghostscript) invocation.
//
// The renderer is an external executable found by walking an ordered list of
// candidate locations.  It is run to completion with stdout and stderr
// captured together so a failure can be reported verbatim.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use spoolwatch_core::error::Result;

/// Exit status and combined output of one renderer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub output: String,
}

impl RenderOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// An external renderer that turns a document into spooled printer output.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Locate the executable, or `None` if it is not installed.
    fn locate(&self) -> Option<PathBuf>;

    /// Every location `locate` considered, for error reporting.
    fn searched(&self) -> Vec<PathBuf>;

    /// Run the executable with the given arguments.
    async fn render(&self, executable: &Path, args: &[String]) -> Result<RenderOutput>;
}

/// Ghostscript found through a configurable, ordered search list.
pub struct GhostscriptRenderer {
    search_paths: Vec<PathBuf>,
}

impl GhostscriptRenderer {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }
}

#[async_trait]
impl Renderer for GhostscriptRenderer {
    fn locate(&self) -> Option<PathBuf> {
        self.search_paths.iter().find_map(|candidate| {
            if let Ok(resolved) = which::which(candidate) {
                return Some(resolved);
            }
            candidate.is_file().then(|| candidate.clone())
        })
    }

    fn searched(&self) -> Vec<PathBuf> {
        self.search_paths.clone()
    }

    #[instrument(skip(self, args), fields(exe = %executable.display(), argc = args.len()))]
    async fn render(&self, executable: &Path, args: &[String]) -> Result<RenderOutput> {
        debug!(?args, "starting renderer");

        let child = Command::new(executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Reads both pipes while waiting, so a chatty renderer cannot stall.
        let finished = child.wait_with_output().await?;
        let status = finished.status;

        let mut output = String::from_utf8_lossy(&finished.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&finished.stderr));

        info!(code = ?status.code(), "renderer finished");
        Ok(RenderOutput {
            exit_code: status.code(),
            output,
        })
    }
}
