// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use spoolwatch_core::AppConfig;
use spoolwatch_core::types::{ColorMode, DuplexEdge, PaperSize, PrintOptions};

/// spoolwatch - print documents through Ghostscript and watch the job until
/// it leaves the printer queue.
#[derive(Parser, Debug)]
#[command(name = "spoolwatch", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./spoolwatch.json when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a document and monitor the job until it finishes.
    Print(PrintArgs),
    /// Show the current status of a printer.
    Status {
        /// Printer name (defaults to the configured printer).
        name: Option<String>,
    },
    /// Run the HTTP print service.
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000.
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },
    /// List printable documents in the document directory.
    Files,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Document to print (defaults to the configured document).
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub printer: Option<String>,

    /// a4, letter, legal or a5.
    #[arg(long, default_value = "a4")]
    pub paper: String,

    #[arg(long)]
    pub monochrome: bool,

    #[arg(long)]
    pub duplex: bool,

    /// Flip on the short edge when printing double-sided.
    #[arg(long, requires = "duplex")]
    pub short_edge: bool,

    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub copies: i64,

    /// Stop monitoring after this many seconds; 0 waits forever.
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub timeout: Option<i64>,
}

impl PrintArgs {
    pub fn options(&self) -> PrintOptions {
        let color = if self.monochrome {
            ColorMode::Monochrome
        } else {
            ColorMode::Color
        };
        let edge = if self.short_edge {
            DuplexEdge::ShortEdge
        } else {
            DuplexEdge::LongEdge
        };
        PrintOptions::new(
            PaperSize::from_keyword(&self.paper),
            color,
            self.duplex,
            edge,
            self.copies,
        )
    }
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match &self.command {
            Commands::Print(args) => {
                if let Some(secs) = args.timeout {
                    config.monitor_timeout_secs = secs;
                }
            }
            Commands::Serve {
                listen: Some(addr),
            } => config.listen_addr = addr.clone(),
            _ => {}
        }
    }
}
