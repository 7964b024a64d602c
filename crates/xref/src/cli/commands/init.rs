//! Implementation of `xref init`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use xref_config::{
    CONFIG_FILENAME, Config, DEFAULT_DATA_DIR, TemplateSeed, global_config_path, global_template,
    is_global_config, local_template,
};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{indent_content, subheader, warning},
};

/// Writes a `.xref.toml` seeded from the command line, then reports what `xref update` needs.
///
/// Running in the home directory writes the global config, as `--global` does.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let local = ctx.cwd.join(CONFIG_FILENAME);
    let global = cmd.global || is_global_config(&local);
    let Some(config_path) = (if global { global_config_path() } else { Some(local) }) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: {} already exists (use --force to overwrite)",
            config_path.display()
        );
        return ExitCode::FAILURE;
    }

    let seed = TemplateSeed {
        data_dir: cmd.data_dir.clone(),
        definitions_dir: cmd.definitions_dir.clone(),
    };
    let template = if global {
        global_template(&seed)
    } else {
        local_template(&seed)
    };
    if let Err(e) = fs::write(&config_path, template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }
    println!("Created {}", config_path.display());

    if !global {
        let data_dir = cmd.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR);
        if let Some(pattern) = ignore_pattern(data_dir) {
            match ignore_in_git(&ctx.cwd, &pattern) {
                Ok(true) => println!("Added {pattern} to .gitignore"),
                Ok(false) => {}
                Err(e) => eprintln!("warning: could not update .gitignore: {e}"),
            }
        }
    }

    report_next_steps(&config_path, &ctx.cwd)
}

/// Loads the new config on its own and lists what is missing before an index can be built.
fn report_next_steps(config_path: &Path, cwd: &Path) -> ExitCode {
    let config = match Config::load_from_files(&[PathBuf::from(config_path)], cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: the new configuration does not load: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!(
        "{} {}",
        subheader("Data directory:"),
        config.settings.data_dir.display()
    );
    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Run `xref update` to build the index.");
        return ExitCode::SUCCESS;
    }

    let listed = warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    println!("{}", warning(&indent_content(&listed)));
    println!("Check out bikeshed-data under the data directory, then run `xref update`.");
    ExitCode::SUCCESS
}

/// The `.gitignore` line for a data directory inside the project.
///
/// Absolute and home-relative directories live elsewhere and get none.
fn ignore_pattern(data_dir: &str) -> Option<String> {
    if data_dir.starts_with('~') || Path::new(data_dir).is_absolute() {
        return None;
    }
    let relative = data_dir.trim_start_matches("./").trim_end_matches('/');
    (!relative.is_empty() && relative != ".").then(|| format!("{relative}/"))
}

/// Appends `pattern` to `dir/.gitignore` unless it is already listed.
///
/// Returns whether the file changed. A project without a `.gitignore` is left alone.
fn ignore_in_git(dir: &Path, pattern: &str) -> io::Result<bool> {
    let path = dir.join(".gitignore");
    let mut contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    let bare = pattern.trim_end_matches('/');
    if contents
        .lines()
        .map(str::trim)
        .any(|line| line == pattern || line == bare)
    {
        return Ok(false);
    }

    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(pattern);
    contents.push('\n');
    fs::write(&path, contents)?;
    Ok(true)
}
