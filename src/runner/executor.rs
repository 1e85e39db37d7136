//! Script execution.
//!
//! A [`ScriptRunner`] starts a [`RunRequest`] and returns immediately; the
//! caller decides whether to wait on the child.

use std::cell::RefCell;
use std::io::{self, Write};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use super::request::RunRequest;
use crate::error::{exit_code, NpsError, Result};

/// What a runner did with a request.
#[derive(Debug)]
pub enum Launch {
    /// The package manager was started.
    Spawned(Child),
    /// The command was printed instead of run.
    Printed(String),
}

impl Launch {
    /// Wait for a spawned child and return its exit code.
    ///
    /// A child killed by a signal reports 130. A printed command reports 0.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting on the child fails.
    pub fn wait(self) -> io::Result<i32> {
        match self {
            Launch::Spawned(mut child) => {
                let status = child.wait()?;
                Ok(status.code().unwrap_or(exit_code::INTERRUPTED))
            }
            Launch::Printed(_) => Ok(exit_code::SUCCESS),
        }
    }
}

/// Executes run requests.
pub trait ScriptRunner {
    /// Start `request` without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`NpsError::Spawn`] if the package manager cannot be started.
    fn run(&self, request: &RunRequest) -> Result<Launch>;
}

impl<R: ScriptRunner + ?Sized> ScriptRunner for Box<R> {
    fn run(&self, request: &RunRequest) -> Result<Launch> {
        (**self).run(request)
    }
}

/// Spawns the package manager with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ScriptRunner for ProcessRunner {
    fn run(&self, request: &RunRequest) -> Result<Launch> {
        let parts = request.command_parts();
        let (program, args) = parts.split_first().ok_or_else(|| NpsError::Spawn {
            command: String::new(),
            dir: request.working_directory.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        })?;

        debug!(command = %request.command(), dir = %request.dir().display(), "spawning");

        let child = Command::new(program)
            .args(args)
            .current_dir(request.dir())
            // Inherit stdio for interactive scripts
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| NpsError::Spawn {
                command: request.command(),
                dir: request.working_directory.clone(),
                source,
            })?;

        Ok(Launch::Spawned(child))
    }
}

/// Prints `Would run: cd <dir> && <command>` instead of running anything.
pub struct DryRunRunner {
    output: RefCell<Box<dyn Write>>,
}

impl DryRunRunner {
    /// Print to `output`.
    pub fn new(output: impl Write + 'static) -> Self {
        Self {
            output: RefCell::new(Box::new(output)),
        }
    }

    /// Print to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for DryRunRunner {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ScriptRunner for DryRunRunner {
    fn run(&self, request: &RunRequest) -> Result<Launch> {
        let line = format!("Would run: {request}");
        let mut output = self.output.borrow_mut();
        writeln!(output, "{line}")?;
        output.flush()?;
        Ok(Launch::Printed(line))
    }
}
