//! Implementation of `xref search`.

use std::process::ExitCode;

use xref_search::{Options, Query};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, entries_table},
};

/// Builds the engine query for the command's term and filters.
fn build_query(cmd: &SearchCommand) -> Query {
    let specs = (!cmd.specs.is_empty()).then(|| {
        cmd.specs
            .iter()
            .map(|group| {
                group
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    });

    Query {
        term: Some(cmd.term.clone()),
        id: None,
        types: (!cmd.types.is_empty()).then(|| cmd.types.clone()),
        specs,
        for_context: cmd.for_context.clone(),
    }
}

/// Builds request options; unset values fall back to the configured defaults.
fn build_options(cmd: &SearchCommand) -> Options {
    Options {
        fields: (!cmd.fields.is_empty()).then(|| cmd.fields.clone()),
        spec_type: (!cmd.spec_type.is_empty()).then(|| cmd.spec_type.clone()),
        all: cmd.all,
        ..Options::default()
    }
}

/// Looks up one term and prints the matching definitions.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = build_query(cmd);
    let options = build_options(cmd);

    let searcher = match ctx.searcher() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let response = match searcher.search(vec![query], &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let entries = response
        .result
        .into_iter()
        .next()
        .map(|(_, entries)| entries)
        .unwrap_or_default();

    if cmd.json {
        return match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if entries.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    let fields = options
        .fields
        .unwrap_or_else(|| searcher.defaults().fields.clone());
    println!("{}", entries_table(&entries, &fields));

    ExitCode::SUCCESS
}
