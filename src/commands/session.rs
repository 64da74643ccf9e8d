use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use livid::application::reload::{ReloadEvent, ReloadOptions, ReloadUseCase};
use livid::config::LividConfig;
use livid::domain::ports::Editor;
use livid::domain::services::parse_delimiter;
use livid::infrastructure::{create_backend, InputSource, NoopEditor, VimEditor, Workspace};

use crate::cli::Cli;

pub fn cmd_session(cli: Cli) -> Result<ExitCode> {
    let workspace = match &cli.workspace {
        Some(root) => Workspace::open(root)
            .with_context(|| format!("opening workspace {}", root.display()))?,
        None => Workspace::create_temp().context("creating workspace")?,
    };

    // Before config loading, which logs each layer it reads
    livid::logging::init(workspace.log_writer()?, cli.verbose).context("initializing logging")?;
    tracing::info!(workspace = %workspace.root().display(), "session started");

    let (mut config, warnings) =
        LividConfig::load_layered(Some(workspace.root())).context("loading configuration")?;
    for warning in &warnings {
        tracing::warn!(%warning, "config warning");
        eprintln!("warning: {}", warning);
    }
    apply_cli_overrides(&mut config, &cli);

    let delimiter = parse_delimiter(&config.delimiter)?;
    let input = match &cli.file {
        Some(path) => InputSource::open(path, delimiter)?,
        None => InputSource::spool(
            &mut io::stdin().lock(),
            &workspace.paths().spooled_input,
            delimiter,
        )?,
    };

    let backend = create_backend(config.backend, &config.compiler);
    let options = ReloadOptions::new(config.grid.max_rows);
    let mut use_case = ReloadUseCase::new(backend, workspace, input, options);
    let json = cli.json;
    // vim owns the terminal while it runs
    let terminal_free = cli.once || !config.editor.enabled;
    let emit = move |event: ReloadEvent| report(&event, json, terminal_free);

    if cli.once {
        let cycle = use_case.run_once(emit)?;
        if !json {
            let output = fs::read(&use_case.workspace().paths().output)
                .context("reading output")?;
            io::stdout().write_all(&output)?;
        }
        return Ok(exit_code(cycle.status));
    }

    if !json {
        eprintln!("workspace: {}", use_case.workspace().root().display());
    }

    let mut editor: Box<dyn Editor> = if config.editor.enabled {
        Box::new(VimEditor::new(
            config.editor.program.clone(),
            config.editor.server_name.clone(),
        ))
    } else {
        Box::new(NoopEditor::new())
    };
    use_case.start(editor.as_mut(), emit)?;
    Ok(ExitCode::SUCCESS)
}

/// CLI flags win over every config layer
fn apply_cli_overrides(config: &mut LividConfig, cli: &Cli) {
    if let Some(delimiter) = &cli.delimiter {
        config.delimiter = delimiter.clone();
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(max_rows) = cli.max_rows {
        config.grid.max_rows = max_rows;
    }
    if cli.no_editor {
        config.editor.enabled = false;
    }
}

fn report(event: &ReloadEvent, json: bool, terminal_free: bool) {
    if json {
        println!("{}", event.to_json());
    } else if let (ReloadEvent::CycleFailed { message }, true) = (event, terminal_free) {
        eprintln!("cycle failed: {}", message);
    }
}

/// Entry point status, clamped into a process exit code
fn exit_code(status: i32) -> ExitCode {
    match u8::try_from(status) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
