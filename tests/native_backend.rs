//! Native backend against a real C compiler
//!
//! Every test returns early when `cc` is not installed.

mod common;

use std::fs;
use std::path::PathBuf;

use common::*;
use livid::application::codegen::ensure_source;
use livid::domain::ports::ExecutionBackend;
use livid::infrastructure::{InputSource, NativeBackend, Workspace};
use livid::{CycleRunner, LividError};

struct Native {
    _env: TestEnv,
    workspace: Workspace,
    input: InputSource,
    backend: NativeBackend,
}

impl Native {
    fn new(input: &str, source: Option<&str>) -> Option<Self> {
        if !have_cc() {
            eprintln!("skipping: no C compiler on PATH");
            return None;
        }
        let env = TestEnv::new();
        let input_path = env.write_input("data.csv", input);
        let workspace = Workspace::open(&env.workspace()).unwrap();
        let input = InputSource::open(&input_path, b',').unwrap();
        match source {
            Some(text) => fs::write(&workspace.paths().source, text).unwrap(),
            None => {
                ensure_source(workspace.paths(), input.schema()).unwrap();
            }
        }
        Some(Self {
            _env: env,
            workspace,
            input,
            backend: NativeBackend::default(),
        })
    }

    fn runner(&self) -> CycleRunner<'_> {
        CycleRunner::new(&self.backend, &self.workspace, &self.input, 100)
    }

    fn output(&self) -> String {
        fs::read_to_string(&self.workspace.paths().output).unwrap()
    }

    fn artifact(&self) -> PathBuf {
        self.workspace.paths().artifact.clone()
    }
}

#[test]
fn generated_program_renders_grid() {
    let Some(native) = Native::new(ABC_INPUT, None) else {
        return;
    };

    let report = native.runner().run().unwrap();

    assert_eq!(report.status, 0);
    assert_eq!(report.rows_read, 1);
    assert_eq!(native.output(), ABC_GRID);
    assert!(native.artifact().exists());
    assert_eq!(
        fs::read_to_string(&native.workspace.paths().header).unwrap(),
        livid::infrastructure::backend::LIVID_H
    );
}

#[test]
fn generated_program_compiles_for_reserved_looking_headers() {
    let input = "id,unix,bool,NULL,EOF,size_t,int64_t\n1,2,3,4,5,6,7\n";
    let Some(native) = Native::new(input, None) else {
        return;
    };

    let report = native.runner().run().unwrap();

    assert_eq!(report.rows_read, 1);
    let output = native.output();
    assert!(output.contains("| _index | id | unix | bool | NULL | EOF | size_t | int64_t |"));
    assert!(output.contains("|      1 |  1 |    2 |    3 |    4 |   5 |      6 |       7 |"));
}

#[test]
fn typed_columns_load_forward_only() {
    let Some(native) = Native::new(ORDERS_INPUT, Some(SUM_QTY_SOURCE)) else {
        return;
    };

    native.runner().run().unwrap();

    assert_eq!(native.output(), "total=19 missing=1\n");
}

#[test]
fn entry_point_status_is_reported() {
    let Some(native) = Native::new(ABC_INPUT, Some(&exit_status_source(7))) else {
        return;
    };

    let report = native.runner().run().unwrap();

    assert_eq!(report.status, 7);
    assert_eq!(native.output(), "rows=1\n");
}

#[test]
fn compiler_errors_go_to_the_log() {
    let Some(native) = Native::new(ABC_INPUT, None) else {
        return;
    };
    native.runner().run().unwrap();

    fs::write(&native.workspace.paths().source, UNDECLARED_IDENTIFIER_SOURCE).unwrap();
    let err = native.runner().run().unwrap_err();

    assert!(matches!(err, LividError::CompileFailed { .. }));
    assert_eq!(native.output(), ABC_GRID);
    let log = fs::read_to_string(&native.workspace.paths().log).unwrap();
    assert!(log.contains("no_such_variable"), "log: {log}");
    let captured = fs::read_to_string(&native.workspace.paths().compiler_stderr).unwrap();
    assert!(!captured.is_empty());
}

#[test]
fn missing_entry_point_is_recoverable() {
    let Some(native) = Native::new(ABC_INPUT, Some(NO_ENTRY_POINT_SOURCE)) else {
        return;
    };

    let err = native.runner().run().unwrap_err();

    match &err {
        LividError::MissingExport { symbol, .. } => assert_eq!(symbol, "process"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_cycle_recoverable());
}

#[test]
fn backend_name_is_the_compiler() {
    assert_eq!(NativeBackend::default().name(), "cc");
}
