use crate::core::command::DemucsCommand;
use std::{io, process::Stdio};

/// Captured result of one tool invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Executes a separation command to completion.
pub trait ToolRunner {
    /// Blocks until the tool exits. `Err` only when it could not be started.
    fn run(&self, cmd: &DemucsCommand) -> io::Result<ToolOutput>;
}

/// Runs the tool as a child process with both streams captured.
/// There is no timeout; a hung child blocks the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, cmd: &DemucsCommand) -> io::Result<ToolOutput> {
        let output = cmd
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    fn run(&self, cmd: &DemucsCommand) -> io::Result<ToolOutput> {
        (**self).run(cmd)
    }
}
