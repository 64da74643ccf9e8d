//! E2E tests for `livid --once`
//!
//! One cycle, no editor, output copied to stdout.

mod common;

use std::fs;

use common::*;
use livid::infrastructure::Workspace;

#[test]
fn once_renders_default_grid() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);

    let result = env.run_once(&["--backend", "builtin", path_str(&input)]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, ABC_GRID);
    assert_eq!(env.read_artifact("output"), ABC_GRID);
    assert!(env.read_artifact("script.c").contains("#define COLUMN_LIST"));
}

#[test]
fn once_spools_standard_input() {
    let env = TestEnv::new();
    let workspace = env.workspace();

    let result = env.run_with_stdin(
        &["--once", "--backend", "builtin", "-t", ";", "-w", path_str(&workspace)],
        "x;y\n1;2\n",
    );

    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("| _index | x | y |"));
    assert_eq!(env.read_artifact("input"), "x;y\n1;2\n");
}

#[test]
fn once_caps_rows() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", "a,b,c\n1,2,3\n4,5,6\n");

    let result = env.run_once(&["--backend", "builtin", "--max-rows", "1", path_str(&input)]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    +--------+---+---+---+
    | _index | a | b | c |
    +--------+---+---+---+
    |      1 | 1 | 2 | 3 |
    ...
    ");
}

#[test]
fn once_creates_temp_workspace_by_default() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);

    let result = env.run(&["--once", "--backend", "builtin", path_str(&input)]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, ABC_GRID);
    let created: Vec<_> = fs::read_dir(env.path("tmp"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(created.len(), 1);
    assert!(created[0].starts_with("livid-wkspace-"));
}

#[test]
fn once_keeps_edited_source() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);
    fs::write(
        env.artifact("script.c"),
        "#define COLUMN_LIST \\\n    COLUMN(c, \"c\", INT, SHOW(1)) \\\n    COLUMN(a, \"a\", STR, HIDE(1))\n",
    )
    .unwrap();

    let result = env.run_once(&["--backend", "builtin", path_str(&input)]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    +---+
    | c |
    +---+
    | 3 |
    ");
}

#[test]
fn once_json_reports_events() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);

    let result = env.run_once(&["--backend", "builtin", "--json", path_str(&input)]);

    assert!(result.success, "stderr: {}", result.stderr);
    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["started", "source_generated", "cycle_started", "cycle_complete"]
    );
    assert_eq!(events[3]["rows_read"], 1);
    assert_eq!(events[0]["backend"], "builtin");
}

#[test]
fn compile_failure_leaves_output_untouched() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);
    assert!(env.run_once(&["--backend", "builtin", path_str(&input)]).success);

    fs::write(env.artifact("script.c"), BROKEN_SOURCE).unwrap();
    let result = env.run_once(&["--backend", "builtin", path_str(&input)]);

    assert!(!result.success);
    assert!(result.stderr.contains("compilation failed"), "stderr: {}", result.stderr);
    assert_eq!(env.read_artifact("output"), ABC_GRID);
    assert!(env.read_artifact("log").contains("script.c:2: error:"));
}

#[test]
fn workspace_config_is_layered_under_flags() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", "a,b,c\n1,2,3\n4,5,6\n");
    fs::write(
        env.artifact("livid.toml"),
        "backend = \"builtin\"\n\n[grid]\nmax_rows = 1\nmax_row = 2\n",
    )
    .unwrap();

    let capped = env.run_once(&[path_str(&input)]);
    assert!(capped.success, "stderr: {}", capped.stderr);
    assert!(capped.stdout.ends_with("...\n"));
    assert!(capped.stderr.contains("unknown config key 'max_row'"));
    assert!(capped.stderr.contains("did you mean 'max_rows'?"));

    let uncapped = env.run_once(&["--max-rows", "10", path_str(&input)]);
    assert!(uncapped.stdout.contains("|      2 | 4 | 5 | 6 |"));
}

#[test]
fn verbose_log_records_config_loading() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);
    fs::write(env.artifact("livid.toml"), "backend = \"builtin\"\nmax_row = 2\n").unwrap();

    let result = env.run_once(&["-v", path_str(&input)]);
    assert!(result.success, "stderr: {}", result.stderr);

    let log = env.read_artifact("log");
    assert!(log.contains("session started"), "log: {log}");
    assert!(log.contains("config layer loaded"), "log: {log}");
    assert!(log.contains("unknown config key 'max_row'"), "log: {log}");
}

#[test]
fn locked_workspace_is_refused() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);
    let _held = Workspace::open(&env.workspace()).unwrap();

    let result = env.run_once(&["--backend", "builtin", path_str(&input)]);

    assert!(!result.success);
    assert!(result.stderr.contains("already in use"), "stderr: {}", result.stderr);
}

#[test]
fn multibyte_delimiter_is_fatal() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", ABC_INPUT);

    let result = env.run_once(&["--backend", "builtin", "-t", "::", path_str(&input)]);

    assert!(!result.success);
    assert!(result.stderr.contains("delimiter must be 1 character"));
}

#[test]
fn empty_header_is_fatal() {
    let env = TestEnv::new();
    let input = env.write_input("data.csv", "\n1,2\n");

    let result = env.run_once(&["--backend", "builtin", path_str(&input)]);

    assert!(!result.success);
    assert!(result.stderr.contains("header line is empty"));
}

#[test]
fn missing_input_is_fatal() {
    let env = TestEnv::new();

    let result = env.run_once(&["--backend", "builtin", "no-such.csv"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unable to open input"));
}
