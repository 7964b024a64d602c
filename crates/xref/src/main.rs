//! Command-line interface for the `xref` term lookup tool.

use std::process::ExitCode;

use xref::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    // `init` must work even when an existing config file is invalid.
    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    ctx.verbose = cli.verbose;

    commands::run(cli.command, &mut ctx)
}
