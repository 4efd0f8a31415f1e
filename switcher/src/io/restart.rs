//! Layered best-effort shutdown of the host application.
//!
//! Each step runs inside its own failure boundary: a failing step is logged and
//! recorded, and the remaining steps still run.

use tracing::{error, info, instrument};

use crate::core::types::QuitMethod;
use crate::io::host::HostControl;

/// One independent termination attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartStep {
    /// Terminate the host process by name.
    ForceStop,
    /// Look up the host's pids and signal each one.
    KillByPid,
    /// Host application's shutdown command.
    Shutdown,
    /// Host application's quit command.
    Quit,
}

impl RestartStep {
    pub fn label(self) -> &'static str {
        match self {
            RestartStep::ForceStop => "force-stop",
            RestartStep::KillByPid => "kill-by-pid",
            RestartStep::Shutdown => "shutdown",
            RestartStep::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: RestartStep,
    pub outcome: StepOutcome,
}

/// Per-step outcomes of a restart sequence, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    pub method: QuitMethod,
    pub steps: Vec<StepReport>,
}

impl RestartReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|report| matches!(report.outcome, StepOutcome::Failed(_)))
    }
}

/// Ordered steps for a quit method.
pub fn plan_steps(method: QuitMethod) -> Vec<RestartStep> {
    match method {
        QuitMethod::Force => vec![
            RestartStep::ForceStop,
            RestartStep::KillByPid,
            RestartStep::Shutdown,
            RestartStep::Quit,
        ],
        QuitMethod::Regular => vec![RestartStep::Quit],
    }
}

/// Run every step of `method` against `host`, never stopping early.
#[instrument(skip(host))]
pub fn run_restart<H: HostControl>(
    host: &H,
    process_name: &str,
    method: QuitMethod,
) -> RestartReport {
    let steps = plan_steps(method)
        .into_iter()
        .map(|step| {
            let outcome = run_step(host, process_name, step);
            match &outcome {
                StepOutcome::Done => info!(step = step.label(), "restart step done"),
                StepOutcome::Skipped(reason) => {
                    info!(step = step.label(), reason = %reason, "restart step skipped");
                }
                StepOutcome::Failed(err) => {
                    error!(step = step.label(), err = %err, "restart step failed");
                }
            }
            StepReport { step, outcome }
        })
        .collect();
    RestartReport { method, steps }
}

fn run_step<H: HostControl>(host: &H, process_name: &str, step: RestartStep) -> StepOutcome {
    let result = match step {
        RestartStep::ForceStop => host.terminate(process_name),
        RestartStep::KillByPid => return kill_by_pid(host, process_name),
        RestartStep::Shutdown => host.shutdown(),
        RestartStep::Quit => host.quit(),
    };
    match result {
        Ok(()) => StepOutcome::Done,
        Err(err) => StepOutcome::Failed(format!("{err:#}")),
    }
}

fn kill_by_pid<H: HostControl>(host: &H, process_name: &str) -> StepOutcome {
    let pids = match host.find_pids(process_name) {
        Ok(pids) => pids,
        Err(err) => return StepOutcome::Failed(format!("{err:#}")),
    };
    if pids.is_empty() {
        return StepOutcome::Skipped("not running".to_string());
    }
    let errors: Vec<String> = pids
        .iter()
        .filter_map(|pid| {
            host.kill(*pid)
                .err()
                .map(|err| format!("pid {pid}: {err:#}"))
        })
        .collect();
    if errors.is_empty() {
        StepOutcome::Done
    } else {
        StepOutcome::Failed(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{HostCall, RecordingHost};

    #[test]
    fn regular_quit_only_sends_quit() {
        let host = RecordingHost::default();
        let report = run_restart(&host, "org.xbmc.kodi", QuitMethod::Regular);
        assert_eq!(host.calls(), vec![HostCall::Quit]);
        assert_eq!(
            report.steps,
            vec![StepReport {
                step: RestartStep::Quit,
                outcome: StepOutcome::Done
            }]
        );
    }

    #[test]
    fn force_quit_runs_every_layer_in_order() {
        let host = RecordingHost::with_pids(vec![101, 102]);
        let report = run_restart(&host, "org.xbmc.kodi", QuitMethod::Force);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Terminate("org.xbmc.kodi".to_string()),
                HostCall::FindPids("org.xbmc.kodi".to_string()),
                HostCall::Kill(101),
                HostCall::Kill(102),
                HostCall::Shutdown,
                HostCall::Quit,
            ]
        );
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn failures_do_not_stop_later_steps() {
        let mut host = RecordingHost::with_pids(vec![7]);
        host.fail_terminate = true;
        host.fail_kill = true;
        host.fail_shutdown = true;

        let report = run_restart(&host, "org.xbmc.kodi", QuitMethod::Force);
        assert_eq!(host.calls().last(), Some(&HostCall::Quit));
        let failed: Vec<RestartStep> = report.failures().map(|report| report.step).collect();
        assert_eq!(
            failed,
            vec![
                RestartStep::ForceStop,
                RestartStep::KillByPid,
                RestartStep::Shutdown
            ]
        );
        assert_eq!(report.steps[3].outcome, StepOutcome::Done);
    }

    #[test]
    fn kill_is_skipped_when_process_not_running() {
        let host = RecordingHost::default();
        let report = run_restart(&host, "org.xbmc.kodi", QuitMethod::Force);
        assert_eq!(
            report.steps[1].outcome,
            StepOutcome::Skipped("not running".to_string())
        );
        assert!(!host.calls().iter().any(|call| matches!(call, HostCall::Kill(_))));
    }
}
