// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the status classification, status report parsing
// and renderer argument paths in the spoolwatch-print crate.

use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use spoolwatch_core::types::{ColorMode, DuplexEdge, PaperSize, PrintOptions};
use spoolwatch_print::classifier::{classify, facets};
use spoolwatch_print::command::build_renderer_args;
use spoolwatch_print::status::{parse_status_output, snapshot_from_raw};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Classify every documented code plus the substring fallbacks.
fn bench_classify(c: &mut Criterion) {
    let codes = [
        "0", "Normal", "1", "2", "3", "4", "5", "6", "7", "8", "PaperJam99", "DriverError",
        "Warming",
    ];

    c.bench_function("classify (all codes)", |b| {
        b.iter(|| {
            for code in codes {
                black_box(classify(black_box(code)));
                black_box(facets(black_box(code)));
            }
        });
    });
}

/// Parse one status report, as returned on every monitor tick.
fn bench_parse_status(c: &mut Criterion) {
    let report = "STATUS:Normal\r\nJOBS:3\r\nNAME:Canon MP230 series Printer\r\n";

    c.bench_function("parse_status_output + snapshot", |b| {
        b.iter(|| {
            let raw = parse_status_output(black_box(report));
            black_box(snapshot_from_raw("MP230", raw));
        });
    });
}

/// Build the full argument list for a monochrome duplex job.
fn bench_renderer_args(c: &mut Criterion) {
    let options = PrintOptions::new(
        PaperSize::Letter,
        ColorMode::Monochrome,
        true,
        DuplexEdge::ShortEdge,
        2,
    );
    let path = Path::new("/srv/documents/report.pdf");

    c.bench_function("build_renderer_args (mono duplex)", |b| {
        b.iter(|| {
            black_box(build_renderer_args(
                black_box("MP230"),
                black_box(path),
                black_box(&options),
            ));
        });
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_parse_status,
    bench_renderer_args,
);
criterion_main!(benches);
