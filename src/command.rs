//! External command execution.
//!
//! Discovery shells out to the package manager and to `find`. Both calls go
//! through [`CommandRunner`] so they can be replaced in tests.

use std::borrow::Cow;
#[cfg(unix)]
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::constants::SHELL_UNAVAILABLE_CODES;

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Run through the platform shell so glob patterns in `args` expand.
    pub shell: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            shell: false,
        }
    }

    /// Mark the invocation as one the shell has to interpret.
    pub fn via_shell(mut self) -> Self {
        self.shell = true;
        self
    }

    /// The invocation as a single line, as handed to the shell and shown in errors.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command.
///
/// Stdout is kept as raw bytes so file names that are not valid UTF-8 survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn with_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The shell could not find or execute the requested program.
    pub fn program_unavailable(&self) -> bool {
        matches!(self.code, Some(code) if SHELL_UNAVAILABLE_CODES.contains(&code))
    }

    /// Stdout decoded as UTF-8, with invalid sequences replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Non-empty stdout lines as paths, without their line terminators.
    pub fn stdout_paths(&self) -> Vec<PathBuf> {
        self.stdout
            .split(|byte| *byte == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(path_from_bytes)
            .collect()
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Runs a command to completion and captures its output.
///
/// An `Err` means the command could not be run at all. A command that ran
/// and exited non-zero is reported through [`CommandOutput::code`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        debug!("Running `{}`", spec.command_line());

        let output = if spec.shell {
            shell_command(&spec.command_line()).output()?
        } else {
            Command::new(&spec.program).args(&spec.args).output()?
        };

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}
