//! Implementation of `xref query`.

use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use crate::cli::{args::QueryCommand, context::CommandContext};

/// Resolves a JSON request document and prints the JSON response.
pub fn run(ctx: &mut CommandContext, cmd: &QueryCommand) -> ExitCode {
    let body = match &cmd.file {
        Some(path) => fs::read_to_string(path).map_err(|e| (path.display().to_string(), e)),
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .map(|_| body)
                .map_err(|e| ("stdin".to_string(), e))
        }
    };
    let body = match body {
        Ok(body) => body,
        Err((source, e)) => {
            eprintln!("error: failed to read {source}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let searcher = match ctx.searcher() {
        Ok(s) => s,
        Err(code) => return code,
    };

    match searcher.handle_json(&body) {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
