//! Host process control adapter.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::io::config::HostConfig;
use crate::io::process::{OUTPUT_LIMIT_BYTES, command_from_argv, run_command_with_timeout};

/// Process-control primitives consumed by the restart sequencer.
pub trait HostControl {
    /// Ask the OS to stop the named process.
    fn terminate(&self, process_name: &str) -> Result<()>;
    /// Ids of running processes matching `process_name`.
    fn find_pids(&self, process_name: &str) -> Result<Vec<u32>>;
    /// Forcibly signal one process.
    fn kill(&self, pid: u32) -> Result<()>;
    /// Host application's own shutdown command.
    fn shutdown(&self) -> Result<()>;
    /// Host application's own quit command.
    fn quit(&self) -> Result<()>;
    fn sleep(&self, duration: Duration);
}

/// Runs the configured external commands.
pub struct CommandHost {
    config: HostConfig,
}

impl CommandHost {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    fn run(&self, argv: &[String], extra: &[&str], label: &str) -> Result<String> {
        let cmd = command_from_argv(argv, extra).with_context(|| format!("build {label}"))?;
        let output = run_command_with_timeout(cmd, self.config.command_timeout(), OUTPUT_LIMIT_BYTES)
            .with_context(|| format!("run {label}"))?;
        output.ensure_success(label)?;
        Ok(output.stdout_text())
    }
}

impl HostControl for CommandHost {
    fn terminate(&self, process_name: &str) -> Result<()> {
        self.run(&self.config.force_stop_command, &[process_name], "force-stop")?;
        Ok(())
    }

    fn find_pids(&self, process_name: &str) -> Result<Vec<u32>> {
        let cmd = command_from_argv(&self.config.pid_lookup_command, &[process_name])
            .context("build pid lookup")?;
        let output = run_command_with_timeout(cmd, self.config.command_timeout(), OUTPUT_LIMIT_BYTES)
            .context("run pid lookup")?;
        // pidof exits 1 with empty output when nothing matches.
        if !output.timed_out && output.stdout.is_empty() {
            debug!(process_name, "no matching process");
            return Ok(Vec::new());
        }
        output.ensure_success("pid lookup")?;
        parse_pids(&output.stdout_text())
    }

    fn kill(&self, pid: u32) -> Result<()> {
        self.run(&self.config.kill_command, &[&pid.to_string()], "kill")?;
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.run(&self.config.shutdown_command, &[], "shutdown")?;
        Ok(())
    }

    fn quit(&self) -> Result<()> {
        self.run(&self.config.quit_command, &[], "quit")?;
        Ok(())
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Parse whitespace-separated process ids.
pub fn parse_pids(text: &str) -> Result<Vec<u32>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("invalid pid '{token}'"))
        })
        .collect()
}
