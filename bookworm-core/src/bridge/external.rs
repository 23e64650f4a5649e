//! Best-effort subprocess invocation with a hard timeout.

use crate::error::{Error, Result};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// One bounded run of an external program whose stdout is a JSON document.
#[derive(Debug, Clone)]
pub struct ExternalCall {
    /// Label used in logs
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl ExternalCall {
    pub fn new(name: impl Into<String>, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run the program and parse its stdout as JSON.
    ///
    /// Returns `None` if the program cannot be spawned, exceeds the timeout,
    /// exits unsuccessfully, or prints something that is not JSON. The
    /// failure is logged, never returned.
    pub fn run(&self) -> Option<Value> {
        match self.try_run() {
            Ok(value) => {
                tracing::debug!(script = %self.name, "External script succeeded");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(script = %self.name, error = %e, "External script unavailable, using fallback");
                None
            }
        }
    }

    fn fail(&self, message: impl Into<String>) -> Error {
        Error::External {
            script: self.name.clone(),
            message: message.into(),
        }
    }

    fn try_run(&self) -> Result<Value> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let mut child = command
            .spawn()
            .map_err(|e| self.fail(format!("failed to spawn {}: {}", self.program, e)))?;

        // Drain stdout on a separate thread so a chatty script cannot block on
        // a full pipe while we wait for it to exit.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.fail("failed to capture stdout"))?;
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
        });

        let started = Instant::now();
        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.fail(format!("timed out after {:?}", self.timeout)));
            }
        };

        // A background process started by the script can keep stdout open
        // after the script itself exits; the same deadline covers EOF.
        let remaining = self.timeout.saturating_sub(started.elapsed());
        let output = match rx.recv_timeout(remaining) {
            Ok(read) => read?,
            Err(RecvTimeoutError::Timeout) => {
                return Err(self.fail(format!(
                    "timed out after {:?} waiting for stdout to close",
                    self.timeout
                )));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(self.fail("stdout reader exited without a result"));
            }
        };

        if !status.success() {
            return Err(self.fail(format!("exited with {}", status)));
        }

        Ok(serde_json::from_slice(&output)?)
    }
}
