//! External command execution with a per-invocation timeout.
//!
//! # Graceful Degradation
//!
//! - Nonzero exit: Returned as `CommandOutput { succeeded: false, .. }`, not an error
//! - Timeout: The whole process group is killed and `HarnessError::Timeout` is returned
//! - Spawn failure: Returns `HarnessError::Spawn` with the OS error message
//! - Non-UTF8 output: Converted lossily
//!
//! No function in this module will panic or block past its timeout.

use crate::HarnessError;
use log::{debug, warn};
use std::io::Read;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code was 0
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Failed output carrying the error text as stderr.
    pub fn from_error(err: &HarnessError) -> Self {
        CommandOutput {
            succeeded: false,
            stdout: String::new(),
            stderr: err.to_string(),
        }
    }
}

/// Runs shell command lines on behalf of checks.
pub trait CommandRunner {
    /// Run `command` in `cwd`, giving up after `timeout`.
    fn run(&self, command: &str, cwd: &Path, timeout: Duration) -> Result<CommandOutput, HarnessError>;
}

/// Runs commands through `sh -c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path, timeout: Duration) -> Result<CommandOutput, HarnessError> {
        debug!("running `{}` in {} (timeout {:?})", command, cwd.display(), timeout);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()
            .map_err(|e| HarnessError::Spawn {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Stream::Stdout, tx.clone());
        drain(child.stderr.take(), Stream::Stderr, tx);

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    return Err(timed_out(&mut child, command, timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill_group(&mut child);
                    return Err(HarnessError::Spawn {
                        command: command.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        };

        // A backgrounded grandchild keeps the pipes open after `sh` exits,
        // so EOF on both streams is bounded by the same deadline.
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        loop {
            match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok((Stream::Stdout, buf)) => stdout = buf,
                Ok((Stream::Stderr, buf)) => stderr = buf,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => return Err(timed_out(&mut child, command, timeout)),
            }
        }

        Ok(CommandOutput {
            succeeded: status.success(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Read a pipe to the end on a helper thread so the child never blocks on a full pipe.
///
/// The buffer is sent once the pipe reaches EOF; the sender drops with the thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) {
    if let Some(mut pipe) = pipe {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            let _ = tx.send((stream, buf));
        });
    }
}

fn timed_out(child: &mut Child, command: &str, timeout: Duration) -> HarnessError {
    kill_group(child);
    warn!("command `{}` timed out after {:?}", command, timeout);
    HarnessError::Timeout {
        command: command.to_string(),
        timeout,
    }
}

/// Kill the child's process group, then reap the child.
///
/// The group outlives `sh` while any backgrounded member is still running.
/// Reader threads are left detached; they finish once the group's pipe ends close.
fn kill_group(child: &mut Child) {
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) with a negative pid only signals the process group we created.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}
