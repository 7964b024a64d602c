//! Clap argument definitions for the `xref` CLI.

use std::{env, path::PathBuf, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use xref_search::{Field, SpecType};

/// Parse a spec status preference from a string.
fn parse_spec_type(s: &str) -> Result<SpecType, String> {
    s.parse().map_err(|value| {
        format!("unknown spec type {value:?} (expected draft, official, current or snapshot)")
    })
}

/// Parse a result field name from a string.
fn parse_field(s: &str) -> Result<Field, String> {
    s.parse().map_err(|value| format!("unknown field {value:?}"))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "xref")]
#[command(about = "Cross-reference lookup for web platform specification terms")]
pub struct Cli {
    /// Verbosity level (-v for progress and info logs, -vv for debug logs)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `xref init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.xref.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Set settings.data_dir
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Set index.definitions_dir (relative to the data directory)
    #[arg(long, value_name = "DIR")]
    pub definitions_dir: Option<String>,
}

/// Arguments for `xref update`.
#[derive(Args, Debug, Clone)]
pub struct UpdateCommand {
    /// Rebuild even if the inputs are unchanged
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `xref search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Term to look up ('""' for the empty term)
    pub term: String,

    /// Restrict to a definition type, _IDL_ or _CONCEPT_ (repeatable)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Spec fallback group: comma-separated spec ids or shortnames, tried in order (repeatable)
    #[arg(short = 's', long = "spec")]
    pub specs: Vec<String>,

    /// Owning interface or concept ("" for context-free definitions)
    #[arg(long = "for")]
    pub for_context: Option<String>,

    /// Spec status preference, most preferred first (repeatable) [default: draft, official]
    #[arg(long, value_parser = parse_spec_type)]
    pub spec_type: Vec<SpecType>,

    /// Fields to show, comma-separated [default: shortname,spec,type,for,normative,uri]
    #[arg(long, value_delimiter = ',', value_parser = parse_field)]
    pub fields: Vec<Field>,

    /// Accepted for compatibility with the HTTP API; has no effect
    #[arg(long)]
    pub all: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `xref query`.
#[derive(Args, Debug, Clone)]
pub struct QueryCommand {
    /// Request document ({"options": {...}, "keys": [...]}); reads stdin when omitted
    pub file: Option<PathBuf>,
}

/// Supported `xref` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize xref configuration in current directory
    Init(InitCommand),

    /// Rebuild the term index from the configured inputs
    Update(UpdateCommand),

    /// Look up a single term
    #[command(after_help = "\
EXAMPLES:
  xref search event --for Window
  xref search baseline -t _CONCEPT_
  xref search script -s dom -s svg2
  xref search 'inherited value' -s css-cascade-3 --spec-type official
  xref search '\"\"' --for ReferrerPolicy --json")]
    Search(SearchCommand),

    /// Resolve a JSON request document and print the JSON response
    Query(QueryCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing hierarchical help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_hierarchical_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help listing every subcommand.
fn print_hierarchical_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: xref [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }

        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Increase log verbosity");
    println!("  -h, --help        Print help");
}
