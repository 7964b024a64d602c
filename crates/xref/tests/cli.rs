//! CLI integration tests for xref commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const SPECS: &str = r#"{
    "dom": {
        "current_url": "https://dom.spec.whatwg.org/",
        "title": "DOM Standard",
        "shortname": "dom"
    },
    "html": {
        "current_url": "https://html.spec.whatwg.org/multipage/",
        "title": "HTML Standard",
        "shortname": "html"
    },
    "referrer-policy": {
        "current_url": "https://w3c.github.io/webappsec-referrer-policy/",
        "snapshot_url": "https://www.w3.org/TR/referrer-policy/",
        "title": "Referrer Policy",
        "shortname": "referrer-policy"
    }
}"#;

const ANCHORS: &str = "\
event
dfn
dom
dom
1
current
https://dom.spec.whatwg.org/#concept-event
1
1
-
event
attribute
html
html
1
current
https://html.spec.whatwg.org/multipage/nav-history-apis.html#dom-window-event
1
1
Window
-
\"\"
enum-value
referrer-policy
referrer-policy
1
current
https://w3c.github.io/webappsec-referrer-policy/#dom-referrerpolicy
1
1
ReferrerPolicy
-
";

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get an xref command.
fn xref() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("xref").unwrap();
    cmd.env_remove("XREF_DATA_DIR").env_remove("XREF_LOG");
    cmd
}

/// Helper to run `xref` with HOME isolated to the provided directory.
fn xref_with_home(home: &Path) -> Command {
    let mut cmd = xref();
    cmd.env("HOME", home);
    cmd
}

/// Helper to run `xref` inside `dir` with HOME isolated to it.
fn xref_in(dir: &Path) -> Command {
    let mut cmd = xref_with_home(dir);
    cmd.current_dir(dir);
    cmd
}

/// Writes the bikeshed-style inputs under `data_dir`.
fn write_inputs(data_dir: &Path, anchors: &str) {
    let base = data_dir.join("bikeshed-data/data");
    fs::create_dir_all(base.join("anchors")).unwrap();
    fs::write(base.join("specs.json"), SPECS).unwrap();
    fs::write(base.join("anchors/anchors-ev.data"), anchors).unwrap();
}

/// Creates a root config and the default input layout in `dir`.
fn setup_project(dir: &Path) {
    fs::write(dir.join(".xref.toml"), "root = true\n").unwrap();
    write_inputs(&dir.join("data"), ANCHORS);
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs a command expecting success and returns its stdout without styling.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    strip_ansi(&String::from_utf8(output).unwrap())
}

mod init {
    use super::*;

    /// A project directory and a separate, empty home directory.
    struct Project {
        /// Working directory for `xref init`.
        dir: tempfile::TempDir,
        /// HOME for the command.
        home: tempfile::TempDir,
    }

    impl Project {
        fn new() -> Self {
            Self {
                dir: temp_dir(),
                home: temp_dir(),
            }
        }

        fn xref(&self) -> Command {
            let mut cmd = xref_with_home(self.home.path());
            cmd.current_dir(self.dir.path());
            cmd
        }

        fn read(&self, name: &str) -> String {
            fs::read_to_string(self.dir.path().join(name)).unwrap()
        }
    }

    #[test]
    fn creates_config_file() {
        let project = Project::new();

        project.xref().arg("init").assert().success();

        let contents = project.read(".xref.toml");
        assert!(contents.contains("# [settings]"));
        assert!(contents.contains("# cache_ttl_secs = 259200"));
        assert!(!project.home.path().join(".xref.toml").exists());
    }

    #[test]
    fn fails_if_config_exists() {
        let project = Project::new();
        fs::write(project.dir.path().join(".xref.toml"), "existing").unwrap();

        project
            .xref()
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));

        assert_eq!(project.read(".xref.toml"), "existing");
    }

    #[test]
    fn force_overwrites() {
        let project = Project::new();
        fs::write(project.dir.path().join(".xref.toml"), "existing").unwrap();

        project.xref().args(["init", "--force"]).assert().success();

        assert!(project.read(".xref.toml").contains("# [search]"));
    }

    #[test]
    fn adds_data_dir_to_gitignore() {
        let project = Project::new();
        fs::write(project.dir.path().join(".gitignore"), "target").unwrap();

        project
            .xref()
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Added data/ to .gitignore"));

        assert_eq!(project.read(".gitignore"), "target\ndata/\n");
    }

    #[test]
    fn leaves_existing_gitignore_entry() {
        let project = Project::new();
        fs::write(project.dir.path().join(".gitignore"), "data/\n").unwrap();

        project.xref().arg("init").assert().success();

        assert_eq!(project.read(".gitignore"), "data/\n");
    }

    #[test]
    fn seeds_data_dir_and_reports_missing_inputs() {
        let project = Project::new();
        fs::write(project.dir.path().join(".gitignore"), "").unwrap();

        let stdout = stdout_of(project.xref().args(["init", "--data-dir", "specs-cache"]));
        assert!(stdout.contains("Added specs-cache/ to .gitignore"));
        assert!(stdout.contains("data directory does not exist"));

        let contents = project.read(".xref.toml");
        assert!(contents.contains("\n[settings]\n"));
        assert!(contents.contains("\ndata_dir = \"specs-cache\"\n"));
        assert!(contents.contains("# [index]"));

        let shown = stdout_of(project.xref().arg("config"));
        assert!(shown.contains("specs-cache"));
    }

    #[test]
    fn seeded_layout_is_ready_to_update() {
        let project = Project::new();
        write_inputs(&project.dir.path().join("specs"), ANCHORS);
        fs::create_dir_all(project.dir.path().join("specs/webref/ed/dfns")).unwrap();

        let stdout = stdout_of(project.xref().args([
            "init",
            "--data-dir",
            "specs",
            "--definitions-dir",
            "webref/ed/dfns",
        ]));
        assert!(stdout.contains("Run `xref update`"));
        assert!(!stdout.contains("does not exist"));

        let contents = project.read(".xref.toml");
        assert!(contents.contains("\ndefinitions_dir = \"webref/ed/dfns\"\n"));

        project.xref().arg("update").assert().success();
        assert!(project.dir.path().join("specs/xref/xref.json").is_file());
    }

    #[test]
    fn home_directory_gets_global_config() {
        let dir = temp_dir();

        xref_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".xref.toml")).unwrap();
        assert!(contents.starts_with("# Global xref configuration"));
        assert!(contents.contains("# data_dir = \"~/.local/share/xref\""));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".xref.toml"),
            "root = true\n\n[search]\ncache_ttl_secs = 60\n",
        )
        .unwrap();

        let stdout = stdout_of(xref_in(dir.path()).arg("config"));
        assert!(stdout.contains("cache_ttl_secs = 60"));
        assert!(stdout.contains("data_dir"));
        assert!(stdout.contains("anchors_dir"));
    }

    #[test]
    fn data_dir_env_overrides_config() {
        let dir = temp_dir();
        let elsewhere = dir.path().join("elsewhere");
        fs::write(dir.path().join(".xref.toml"), "root = true\n").unwrap();

        let stdout = stdout_of(
            xref_in(dir.path())
                .env("XREF_DATA_DIR", &elsewhere)
                .arg("config"),
        );
        assert!(stdout.contains(&elsewhere.display().to_string()));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".xref.toml"), "[search\n").unwrap();

        xref_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod status {
    use super::*;

    #[test]
    fn reports_missing_data() {
        let dir = temp_dir();
        fs::write(dir.path().join(".xref.toml"), "root = true\n").unwrap();

        let output = xref_in(dir.path()).arg("status").assert().failure();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.get_output().stdout));
        assert!(stdout.contains("data directory does not exist"));
        assert!(stdout.contains("[missing]"));
    }

    #[test]
    fn complete_layout_has_no_issues() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).arg("status"));
        assert!(stdout.contains("No issues found."));
        assert!(stdout.contains("missing"));
        assert!(stdout.contains("xref update"));
    }

    #[test]
    fn reports_current_index_after_update() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path()).arg("update").assert().success();

        let stdout = stdout_of(xref_in(dir.path()).arg("status"));
        assert!(stdout.contains("current"));
        assert!(!stdout.contains("xref update"));
    }
}

mod update {
    use super::*;

    #[test]
    fn builds_index() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).arg("update"));
        assert!(stdout.contains("Indexed 2 terms (3 entries) from 1 files across 3 specs"));

        let index_dir = dir.path().join("data/xref");
        assert!(index_dir.join("xref.json").exists());
        assert!(index_dir.join("specs.json").exists());
        assert!(index_dir.join("specmap.json").exists());
    }

    #[test]
    fn skips_unchanged_inputs() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path()).arg("update").assert().success();

        let stdout = stdout_of(xref_in(dir.path()).arg("update"));
        assert!(stdout.contains("Index is up to date."));

        let stdout = stdout_of(xref_in(dir.path()).args(["update", "--force"]));
        assert!(stdout.contains("Indexed 2 terms"));
    }

    #[test]
    fn verbose_reports_progress() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path())
            .args(["update", "-v"])
            .assert()
            .success()
            .stderr(predicate::str::contains("anchors-ev.data"));
    }

    #[test]
    fn unresolved_url_fails_without_writing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".xref.toml"), "root = true\n").unwrap();
        let anchors = format!(
            "{ANCHORS}baseline\ndfn\nmystery\nmystery\n1\ncurrent\nhttps://unknown.example/#baseline\n1\n1\n-\n"
        );
        write_inputs(&dir.path().join("data"), &anchors);

        xref_in(dir.path())
            .arg("update")
            .assert()
            .failure()
            .stderr(predicate::str::contains("https://unknown.example/#baseline"));

        assert!(!dir.path().join("data/xref/xref.json").exists());
    }
}

mod search {
    use super::*;

    #[test]
    fn builds_missing_index_and_prints_table() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path())
            .args(["search", "event"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Index missing, building..."))
            .stdout(predicate::str::contains("#concept-event"))
            .stdout(predicate::str::contains("#dom-window-event"));

        assert!(dir.path().join("data/xref/xref.json").exists());
    }

    #[test]
    fn json_output_is_entry_array() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).args([
            "search",
            "event",
            "--for",
            "Window",
            "--fields",
            "spec,uri",
            "--json",
        ]));
        let entries: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(
            entries,
            serde_json::json!([{
                "spec": "html",
                "uri": "nav-history-apis.html#dom-window-event"
            }])
        );
    }

    #[test]
    fn type_filter_selects_concepts() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).args(["search", "Event", "-t", "_CONCEPT_"]));
        assert!(stdout.contains("#concept-event"));
        assert!(!stdout.contains("#dom-window-event"));
    }

    #[test]
    fn empty_term_with_context() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).args([
            "search",
            "\"\"",
            "--for",
            "ReferrerPolicy",
            "--json",
        ]));
        let entries: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(entries[0]["uri"], "#dom-referrerpolicy");
        assert_eq!(entries[0]["type"], "enum-value");
    }

    #[test]
    fn spec_filter_falls_back() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).args([
            "search", "event", "-s", "svg2", "-s", "css,html", "--json",
        ]));
        let entries: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 1);
        assert_eq!(entries[0]["shortname"], "html");
    }

    #[test]
    fn no_results() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(xref_in(dir.path()).args(["search", "baseline"]));
        assert!(stdout.contains("No results found."));
    }

    #[test]
    fn rejects_unknown_spec_type() {
        let dir = temp_dir();

        xref_in(dir.path())
            .args(["search", "event", "--spec-type", "latest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown spec type"));
    }

    #[test]
    fn serves_existing_index_when_inputs_disappear() {
        let dir = temp_dir();
        setup_project(dir.path());
        xref_in(dir.path()).arg("update").assert().success();
        fs::remove_dir_all(dir.path().join("data/bikeshed-data")).unwrap();

        xref_in(dir.path())
            .args(["search", "event"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Index is stale, updating..."))
            .stderr(predicate::str::contains("using the existing index"))
            .stdout(predicate::str::contains("#concept-event"));
    }

    #[test]
    fn serves_existing_index_when_rebuild_is_rejected() {
        let dir = temp_dir();
        setup_project(dir.path());
        xref_in(dir.path()).arg("update").assert().success();

        let anchors = format!(
            "{ANCHORS}baseline\ndfn\nmystery\nmystery\n1\ncurrent\nhttps://unknown.example/#baseline\n1\n1\n-\n"
        );
        fs::write(
            dir.path().join("data/bikeshed-data/data/anchors/anchors-ev.data"),
            anchors,
        )
        .unwrap();

        xref_in(dir.path())
            .args(["query"])
            .write_stdin(r#"{"keys":[{"term":"event","for":"Window"}]}"#)
            .assert()
            .success()
            .stderr(predicate::str::contains("https://unknown.example/#baseline"))
            .stderr(predicate::str::contains("using the existing index"))
            .stdout(predicate::str::contains("#dom-window-event"));
    }

    #[test]
    fn fails_when_inputs_missing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".xref.toml"), "root = true\n").unwrap();

        xref_in(dir.path())
            .args(["search", "event"])
            .assert()
            .failure();
    }
}

mod query {
    use super::*;

    #[test]
    fn resolves_request_from_stdin() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(
            xref_in(dir.path())
                .arg("query")
                .write_stdin(r#"{"options":{"fields":["uri"]},"keys":[{"term":"event","for":"Window","id":"w"}]}"#),
        );
        let response: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(
            response["result"],
            serde_json::json!([["w", [{"uri": "nav-history-apis.html#dom-window-event"}]]])
        );
    }

    #[test]
    fn reads_request_file() {
        let dir = temp_dir();
        setup_project(dir.path());
        let request = dir.path().join("request.json");
        fs::write(
            &request,
            r#"{"options":{"fields":["spec"],"query":true},"keys":[{"term":"html"}]}"#,
        )
        .unwrap();

        let stdout = stdout_of(xref_in(dir.path()).arg("query").arg(&request));
        let response: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(
            response["result"][0][0],
            "e65068091bad3c383def394a09acbebf591b4f58"
        );
        assert_eq!(response["result"][0][1], serde_json::json!([]));
        assert_eq!(
            response["query"][0]["id"],
            "e65068091bad3c383def394a09acbebf591b4f58"
        );
    }

    #[test]
    fn missing_term_fails() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path())
            .arg("query")
            .write_stdin(r#"{"keys":[{"term":"event"},{"for":"Window"}]}"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("query 1 is missing required field"));
    }

    #[test]
    fn malformed_request_fails() {
        let dir = temp_dir();
        setup_project(dir.path());

        xref_in(dir.path())
            .arg("query")
            .write_stdin(r#"{"keys":[{"term":"event"}],"options":{"fields":["title"]}}"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid request"));
    }
}

mod env {
    use super::*;

    #[test]
    fn data_dir_override_is_used_for_search() {
        let dir = temp_dir();
        let elsewhere = dir.path().join("elsewhere");
        fs::write(dir.path().join(".xref.toml"), "root = true\n").unwrap();
        write_inputs(&elsewhere, ANCHORS);

        xref_in(dir.path())
            .env("XREF_DATA_DIR", &elsewhere)
            .args(["search", "event", "--for", "Window"])
            .assert()
            .success()
            .stdout(predicate::str::contains("#dom-window-event"));

        assert!(elsewhere.join("xref/xref.json").exists());
        assert!(!dir.path().join("data").exists());
    }
}
