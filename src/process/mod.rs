//! Blocking subprocess execution behind a trait seam.
//!
//! Every call spawns a fresh process and waits for it. There is no timeout:
//! a hung `bazel` blocks the caller until the host or the user intervenes.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A fully specified process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Shell-like rendering for logs and `bazel-check command`.
    #[must_use]
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '@' | '+')
        });
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs processes to completion.
pub trait CommandRunner {
    /// Spawn `invocation`, wait for it, and capture its output.
    ///
    /// # Errors
    /// Returns an error only when the process cannot be started (missing
    /// executable, permission denied, bad working directory). A nonzero exit
    /// status is reported through [`ProcessOutput::exit_code`].
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).run(invocation)
    }
}

/// Runner backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        tracing::debug!(
            cwd = %invocation.current_dir.display(),
            command = %invocation.display_command(),
            "spawning process"
        );
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub mod stub {
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    use super::{CommandRunner, Invocation, ProcessOutput};

    /// Replays canned results in order and records every invocation.
    #[derive(Debug, Default)]
    pub struct StubRunner {
        responses: Mutex<VecDeque<io::Result<ProcessOutput>>>,
        calls: Mutex<Vec<Invocation>>,
    }

    impl StubRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, exit_code: i32, stdout: &str) -> Self {
            self.respond_full(exit_code, stdout, "")
        }

        pub fn respond_full(self, exit_code: i32, stdout: &str, stderr: &str) -> Self {
            self.responses.lock().unwrap().push_back(Ok(ProcessOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }));
            self
        }

        pub fn fail_to_spawn(self) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory")));
            self
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for StubRunner {
        fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
            self.calls.lock().unwrap().push(invocation.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ProcessOutput::default()))
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
