//! Implementation of `xref update`.

use std::{path::Path, process::ExitCode};

use xref_index::{IndexStats, Indexer, ProgressReporter};

use crate::cli::{
    args::UpdateCommand,
    context::CommandContext,
    output::{dim, report_index_error, success},
};

/// Prints per-file progress to stderr when verbose.
struct CliReporter {
    /// Whether to print per-file lines.
    verbose: bool,
}

impl ProgressReporter for CliReporter {
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize) {
        if self.verbose {
            eprint!("[{current}/{total}] {}", path.display());
        }
    }

    fn on_file_done(&mut self, _path: &Path, records: usize) {
        if self.verbose {
            eprintln!(" {}", dim(&format!("({records} records)")));
        }
    }

    fn on_complete(&mut self, _stats: &IndexStats) {}
}

/// Rebuilds the index from the configured inputs.
pub fn run(ctx: &CommandContext, cmd: &UpdateCommand) -> ExitCode {
    let indexer = Indexer::new(&ctx.config);
    let mut reporter = CliReporter {
        verbose: ctx.verbose > 0,
    };

    let stats = match indexer.update(&mut reporter, cmd.force) {
        Ok(stats) => stats,
        Err(e) => {
            report_index_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if stats.skipped {
        println!("Index is up to date.");
        return ExitCode::SUCCESS;
    }

    println!(
        "{}",
        success(&format!(
            "Indexed {} terms ({} entries) from {} files across {} specs",
            stats.terms, stats.entries, stats.files_processed, stats.specs
        ))
    );
    println!(
        "   {}",
        dim(&format!(
            "{} records read, {} dropped, {} duplicates",
            stats.records_read, stats.records_dropped, stats.duplicates
        ))
    );
    println!("   {}", dim(&format!("-> {}", indexer.index_dir().display())));

    ExitCode::SUCCESS
}
