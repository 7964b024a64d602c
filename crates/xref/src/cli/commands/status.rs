//! Implementation of `xref status`.

use std::{path::Path, process::ExitCode};

use xref_config::{ConfigWarning, discover_config_files};
use xref_index::{IndexStatus, detect_index_status, index_directory};

use crate::cli::{
    context::CommandContext,
    output::{dim, display_path, header, subheader, success, warning},
};

/// Shows configuration files, data locations, index status, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;
    let config = &ctx.config;

    println!("{}", header("xref status"));
    println!();

    let config_files = discover_config_files(cwd);
    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
        println!(
            "   Run {} to create a configuration file.",
            subheader("xref init")
        );
    } else {
        for path in &config_files {
            println!("   {}", display_path(path, Some(cwd.as_path())));
        }
    }
    println!();

    let data_dir = config.settings.data_dir.as_path();
    println!("{}", subheader("Data:"));
    print_location("data", data_dir, None);
    print_location("anchors", &config.anchors_dir(), Some(data_dir));
    print_location("specs", &config.specs_file(), Some(data_dir));
    if let Some(definitions) = config.definitions_dir() {
        print_location("definitions", &definitions, Some(data_dir));
    }
    println!();

    let index_status = detect_index_status(config);
    let index_path = index_directory(config);
    let description = match index_status {
        IndexStatus::Current => success(index_status.description()),
        IndexStatus::Stale | IndexStatus::Missing => warning(index_status.description()),
    };
    println!("{}", subheader("Index:"));
    println!(
        "   {description} {}",
        dim(&format!("({})", display_path(&index_path, Some(data_dir))))
    );
    if index_status.needs_update() {
        println!("   {}", dim("Run 'xref update' to rebuild."));
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints one data location with a marker when it does not exist.
fn print_location(label: &str, path: &Path, base: Option<&Path>) {
    let shown = display_path(path, base);
    if path.exists() {
        println!("   {label:12} {shown}");
    } else {
        println!("   {label:12} {shown} {}", warning("[missing]"));
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints = Vec::new();

    for w in warnings {
        let hint = match w {
            ConfigWarning::DataDirMissing { .. } => {
                "Hint: set settings.data_dir in .xref.toml or export XREF_DATA_DIR"
            }
            ConfigWarning::AnchorsDirMissing { .. } | ConfigWarning::SpecsFileMissing { .. } => {
                "Hint: check out bikeshed-data into the data directory"
            }
            ConfigWarning::DefinitionsDirMissing { .. } => {
                "Hint: remove index.definitions_dir or check out webref"
            }
            ConfigWarning::ZeroCacheTtl => "Hint: set search.cache_ttl_secs above 0",
        };
        hints.push(hint);
    }

    hints.dedup();
    for hint in hints {
        println!("{}", dim(hint));
    }
}
