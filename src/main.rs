use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use pep2rss::{FeedConfig, Report};

use crate::cli::Cli;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    cli::init_tracing(args.verbose);

    let source = args.source_dir();
    let report = pep2rss::run(&FeedConfig::default(), &source, &args.output_dir)
        .with_context(|| format!("failed to build feed from {}", source.display()))?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &Report) {
    let ok = format!("✓ {}", report.written);
    let skipped = format!("✗ {}", report.skipped);
    let path = report.output.display();
    if std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        eprintln!("{} {}  -> {}", ok.green(), skipped.red(), path);
    } else {
        eprintln!("{ok} {skipped}  -> {path}");
    }
}
