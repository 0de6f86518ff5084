//! External project generator execution.
//! Runs a setup script shipped with the template (e.g. `create_java_project.sh`) inside the
//! project directory, with the parent's stdout/stderr attached so its output is visible live.

use crate::error::{Error, Result};
use crate::materialize::set_executable;
use duct::{cmd, Expression, Handle};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::thread;
use std::time::Duration;

const SPAWN_ATTEMPTS: u32 = 5;
const SPAWN_BACKOFF: Duration = Duration::from_millis(50);

/// Describes one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    pub script: PathBuf,
    pub working_dir: PathBuf,
    pub args: Vec<String>,
    /// `None` waits for as long as the script runs
    pub timeout: Option<Duration>,
}

impl GeneratorInvocation {
    pub fn new<P: Into<PathBuf>, W: Into<PathBuf>>(script: P, working_dir: W) -> Self {
        Self {
            script: script.into(),
            working_dir: working_dir.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A started expression that is killed and reaped when dropped before it finished.
struct ScopedHandle {
    handle: Handle,
    finished: bool,
}

impl ScopedHandle {
    fn start(expression: &Expression) -> io::Result<Self> {
        let mut attempt = 1;
        loop {
            match expression.start() {
                Ok(handle) => {
                    return Ok(Self {
                        handle,
                        finished: false,
                    })
                }
                // a concurrently forked process can still hold the freshly written script open
                Err(e) if is_text_file_busy(&e) && attempt < SPAWN_ATTEMPTS => {
                    debug!("Script busy, retrying spawn ({attempt}/{SPAWN_ATTEMPTS})");
                    thread::sleep(SPAWN_BACKOFF * attempt);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Waits for the expression, returning `None` if `timeout` elapsed first.
    fn wait(&mut self, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
        let status = match timeout {
            Some(timeout) => self.handle.wait_timeout(timeout)?.map(|output| output.status),
            None => Some(self.handle.wait()?.status),
        };
        if status.is_some() {
            self.finished = true;
        }
        Ok(status)
    }

    fn pid(&self) -> Option<u32> {
        self.handle.pids().first().copied()
    }

    /// Kills the script together with everything it started, then reaps the script.
    fn terminate(&mut self) {
        if let Some(pid) = self.pid() {
            warn!("Terminating generator process group {pid}");
            kill_process_group(pid);
        }
        if let Err(e) = self.handle.kill() {
            debug!("Kill failed: {e}");
        }
        if let Err(e) = self.handle.wait() {
            debug!("Reaping the generator failed: {e}");
        }
        self.finished = true;
    }
}

impl Drop for ScopedHandle {
    fn drop(&mut self) {
        if !self.finished {
            self.terminate();
        }
    }
}

/// The script leads its own process group so that a timeout also reaches the tools it runs.
#[cfg(unix)]
fn isolate(expression: Expression) -> Expression {
    use std::os::unix::process::CommandExt;

    expression.before_spawn(|command| {
        command.process_group(0);
        Ok(())
    })
}

#[cfg(not(unix))]
fn isolate(expression: Expression) -> Expression {
    expression
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        debug!("Killing process group {pgid} failed: {e}");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

#[cfg(unix)]
fn is_text_file_busy(e: &io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::ETXTBSY as i32)
}

#[cfg(not(unix))]
fn is_text_file_busy(_e: &io::Error) -> bool {
    false
}

/// A started generator that has not been waited for yet.
///
/// Dropping it without calling [`RunningGenerator::wait`] kills the script's process group and
/// reaps the script.
pub struct RunningGenerator {
    handle: ScopedHandle,
    script: PathBuf,
    timeout: Option<Duration>,
}

impl RunningGenerator {
    /// Process id of the script, which is also its process group id on unix.
    pub fn id(&self) -> u32 {
        self.handle.pid().unwrap_or_default()
    }

    /// Blocks until the generator exits or its timeout elapses.
    ///
    /// # Errors
    /// * `Error::ScriptExecutionError` if it times out (its process group is killed first) or
    ///   exits unsuccessfully
    pub fn wait(mut self) -> Result<()> {
        let status = self
            .handle
            .wait(self.timeout)
            .map_err(|e| Error::script(&self.script, format!("cannot wait for exit: {e}")))?;

        match status {
            None => {
                self.handle.terminate();
                let secs = self.timeout.map(|t| t.as_secs_f64()).unwrap_or_default();
                Err(Error::script(
                    &self.script,
                    format!("timed out after {secs} seconds"),
                ))
            }
            Some(status) if status.success() => {
                debug!("Generator finished with {status}");
                Ok(())
            }
            Some(status) => Err(Error::script(
                &self.script,
                format!("exited with {status}"),
            )),
        }
    }
}

/// Makes the script executable and starts it.
///
/// The script inherits stdout and stderr so its output is visible live; stdin is closed.
///
/// # Errors
/// * `Error::ScriptExecutionError` if the script is missing, permissions cannot be set or the
///   process cannot be spawned
pub fn spawn(invocation: &GeneratorInvocation) -> Result<RunningGenerator> {
    let script = absolute(&invocation.script, &invocation.working_dir);
    if !script.is_file() {
        return Err(Error::script(&script, "script does not exist"));
    }

    set_executable(&script)
        .map_err(|e| Error::script(&script, format!("cannot set execute permission: {e}")))?;

    debug!(
        "Running {} {:?} in {}",
        script.display(),
        invocation.args,
        invocation.working_dir.display()
    );

    let expression = cmd(&script, &invocation.args)
        .dir(&invocation.working_dir)
        .stdin_null()
        .unchecked();
    let handle = ScopedHandle::start(&isolate(expression))
        .map_err(|e| Error::script(&script, format!("cannot start: {e}")))?;

    Ok(RunningGenerator {
        handle,
        script,
        timeout: invocation.timeout,
    })
}

/// Runs the script and blocks until it exits.
pub fn invoke(invocation: &GeneratorInvocation) -> Result<()> {
    spawn(invocation)?.wait()
}

/// Relative scripts live in the working directory; a bare name would be searched in PATH instead.
fn absolute(script: &Path, working_dir: &Path) -> PathBuf {
    if script.is_absolute() {
        script.to_path_buf()
    } else {
        working_dir.join(script)
    }
}
