// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ghostscript argument construction.
//
// The argument order is significant to Ghostscript: device parameters must
// precede `-sDEVICE`/`-sOutputFile`, and the input file comes last.

use std::path::Path;

use spoolwatch_core::types::{ColorMode, DuplexEdge, PrintOptions};

/// Output device that forwards to a Windows printer queue.
pub const PRINTER_DEVICE: &str = "mswinpr2";

/// Batch, no pause, no sandbox, quiet, and mark the job as already printed.
const FIXED_FLAGS: [&str; 5] = ["-dPrinted", "-dBATCH", "-dNOPAUSE", "-dNOSAFER", "-q"];

/// Build the renderer argument list. Pure: same input, same output.
pub fn build_renderer_args(
    printer_name: &str,
    document_path: &Path,
    options: &PrintOptions,
) -> Vec<String> {
    let mut args: Vec<String> = FIXED_FLAGS.iter().map(|f| f.to_string()).collect();

    args.push(format!("-dNumCopies={}", options.copies()));
    args.push(format!("-sPAPERSIZE={}", options.paper_size().device_keyword()));

    if options.color_mode() == ColorMode::Monochrome {
        args.push("-sProcessColorModel=DeviceGray".into());
        args.push("-sColorConversionStrategy=Gray".into());
        args.push("-dOverrideICC".into());
    }

    if options.duplex() {
        args.push("-dDuplex=true".into());
        let tumble = options.duplex_edge() == DuplexEdge::ShortEdge;
        args.push(format!("-dTumble={tumble}"));
    } else {
        args.push("-dDuplex=false".into());
    }

    args.push(format!("-sDEVICE={PRINTER_DEVICE}"));
    args.push(format!("-sOutputFile=%printer%{printer_name}"));
    args.push(document_path.display().to_string());

    args
}
