//! vim collaborator
//!
//! vim is started as a remote server with a bootstrap script that lays out
//! the output, the log and the source. Refreshes are sent with
//! `--remote-send`; exit is noticed by a thread blocked on the child.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use is_terminal::IsTerminal;

use crate::domain::ports::{Editor, EditorFiles, ExitNotifier};
use crate::error::{LividError, LividResult};
use crate::infrastructure::fs::write_atomic;

const REFRESH_KEYS: &str = "<Esc>:checktime<CR>";

/// vim script opening the session files
///
/// `backupcopy=yes` keeps the inode of the source stable on save so the
/// file watcher sees a modification rather than a rename.
pub fn bootstrap_script(files: &EditorFiles) -> String {
    let mut script = String::new();
    script.push_str("set backupcopy=yes\n");
    script.push_str("set autoread\n");
    script.push_str("set splitbelow\n");
    script.push_str("set splitright\n");
    script.push_str(&open_command("edit", &files.output));
    script.push_str(&open_command("split", &files.source));
    script.push_str(&open_command("vsplit", &files.log));
    script.push_str("wincmd h\n");
    script
}

fn open_command(command: &str, path: &Path) -> String {
    let quoted = path.display().to_string().replace('\'', "''");
    format!("execute '{} ' . fnameescape('{}')\n", command, quoted)
}

#[derive(Debug)]
pub struct VimEditor {
    program: String,
    server_name: String,
    watcher: Option<JoinHandle<()>>,
}

impl VimEditor {
    pub fn new(program: impl Into<String>, server_name: Option<String>) -> Self {
        Self {
            program: program.into(),
            server_name: server_name.unwrap_or_else(|| format!("livid-{}", std::process::id())),
            watcher: None,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    fn spawn_error(&self, source: std::io::Error) -> LividError {
        LividError::EditorSpawn {
            program: self.program.clone(),
            source,
        }
    }

    /// The editor needs a terminal even when our stdin is a pipe
    fn terminal_stdin(&self) -> LividResult<Stdio> {
        if std::io::stdin().is_terminal() {
            return Ok(Stdio::inherit());
        }
        let tty = File::open("/dev/tty").map_err(|e| self.spawn_error(e))?;
        Ok(Stdio::from(tty))
    }
}

impl Editor for VimEditor {
    fn spawn(&mut self, files: &EditorFiles, on_exit: ExitNotifier) -> LividResult<()> {
        write_atomic(&files.script, bootstrap_script(files).as_bytes())?;

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&files.log)
            .map_err(|e| self.spawn_error(e))?;

        let mut child = Command::new(&self.program)
            .arg("--servername")
            .arg(&self.server_name)
            .arg("-S")
            .arg(&files.script)
            .current_dir(&files.root)
            .stdin(self.terminal_stdin()?)
            .stderr(Stdio::from(log))
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        tracing::info!(
            program = %self.program,
            server = %self.server_name,
            pid = child.id(),
            "editor started"
        );

        let program = self.program.clone();
        self.watcher = Some(thread::spawn(move || {
            match child.wait() {
                Ok(status) => tracing::info!(%program, ?status, "editor exited"),
                Err(e) => tracing::warn!(%program, error = %e, "lost track of editor"),
            }
            on_exit();
        }));
        Ok(())
    }

    fn notify_refresh(&self) {
        let spawned = Command::new(&self.program)
            .arg("--servername")
            .arg(&self.server_name)
            .arg("--remote-send")
            .arg(REFRESH_KEYS)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Reap without blocking the reload loop
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => tracing::warn!(error = %e, "unable to send refresh to editor"),
        }
    }

    fn wait_for_exit(&mut self) -> LividResult<()> {
        if let Some(watcher) = self.watcher.take() {
            watcher
                .join()
                .map_err(|_| LividError::execution("editor watcher thread panicked"))?;
        }
        Ok(())
    }
}
