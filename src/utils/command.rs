use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

const MASK: &str = "****";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command `{program}` not found on PATH")]
    NotFound { program: String },
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command `{command}` failed with exit status {status}: {output}")]
    Failed {
        command: String,
        status: i32,
        output: String,
    },
}

/// A program plus its argument list, built up front and rendered only for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    secret: Vec<usize>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secret: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        args.into_iter().fold(self, |cmd, arg| cmd.arg(arg))
    }

    /// Adds an argument that is masked whenever the command line is rendered.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret.push(self.args.len());
        self.arg(arg)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn render(&self) -> String {
        let parts: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(self.args.iter().enumerate().map(|(idx, arg)| {
                if self.secret.contains(&idx) {
                    MASK
                } else {
                    arg.as_str()
                }
            }))
            .collect();

        shlex::try_join(parts.iter().copied()).unwrap_or_else(|_| parts.join(" "))
    }
}

/// Runs an external command and hands back its stdout split into lines.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> Result<Vec<String>, CommandError>;
}

/// Runs commands as local child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandLine) -> Result<Vec<String>, CommandError> {
        let rendered = command.render();
        let program = which::which(command.program()).map_err(|_| CommandError::NotFound {
            program: command.program().to_owned(),
        })?;

        debug!("Running command: {}", rendered);
        let output = Command::new(program)
            .args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let captured = [stdout.trim(), stderr.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CommandError::Failed {
                command: rendered,
                status: output.status.code().unwrap_or(-1),
                output: captured,
            });
        }

        Ok(stdout.lines().map(str::to_owned).collect())
    }
}
