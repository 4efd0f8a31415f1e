//! Test-only fixtures: a temporary build root, scripted dialogs, and a
//! recording host.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::config::SwitcherConfig;
use crate::io::host::HostControl;
use crate::ui::HostUi;

/// Temporary root directory with a pointer file path beside the builds.
pub struct TestRoot {
    temp: TempDir,
}

impl TestRoot {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn pointer_path(&self) -> PathBuf {
        self.path().join("xbmc_env.properties")
    }

    /// Config rooted at this directory, with no quit delay.
    pub fn config(&self) -> SwitcherConfig {
        SwitcherConfig {
            root: self.path().to_path_buf(),
            pointer_path: self.pointer_path(),
            quit_delay_ms: 0,
            ..SwitcherConfig::default()
        }
    }

    /// Create `<root>/<name>/addons`.
    pub fn build_with_layout(&self, name: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::create_dir_all(path.join("addons"))
            .with_context(|| format!("create {}", path.display()))?;
        Ok(path)
    }

    /// Create an empty `<root>/<name>`.
    pub fn plain_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
        Ok(path)
    }

    pub fn write_pointer(&self, contents: &str) -> Result<()> {
        fs::write(self.pointer_path(), contents).context("write pointer file")
    }

    pub fn read_pointer(&self) -> Result<String> {
        fs::read_to_string(self.pointer_path()).context("read pointer file")
    }
}

/// One scripted reply, consumed in order by [`ScriptedUi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    Select(Option<usize>),
    YesNo(bool),
    Input(Option<String>),
}

/// Dialog double that replays scripted answers and records what was shown.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    answers: VecDeque<ScriptedAnswer>,
    menus: Vec<Vec<String>>,
    dialogs: Vec<String>,
    notifications: Vec<String>,
}

impl ScriptedUi {
    pub fn new(answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Entries of every selector shown, in order.
    pub fn menus(&self) -> &[Vec<String>] {
        &self.menus
    }

    /// Messages of every blocking dialog shown.
    pub fn dialogs(&self) -> &[String] {
        &self.dialogs
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    fn next(&mut self, expected: &str) -> Result<ScriptedAnswer> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for {expected}"))
    }
}

impl HostUi for ScriptedUi {
    fn select(&mut self, _heading: &str, entries: &[String]) -> Result<Option<usize>> {
        self.menus.push(entries.to_vec());
        match self.next("select")? {
            ScriptedAnswer::Select(choice) => Ok(choice),
            other => Err(anyhow!("expected select answer, got {other:?}")),
        }
    }

    fn yes_no(&mut self, _heading: &str, message: &str) -> Result<bool> {
        self.dialogs.push(message.to_string());
        match self.next("yes_no")? {
            ScriptedAnswer::YesNo(answer) => Ok(answer),
            other => Err(anyhow!("expected yes/no answer, got {other:?}")),
        }
    }

    fn notify(&mut self, _heading: &str, message: &str, _duration: Duration) -> Result<()> {
        self.notifications.push(message.to_string());
        Ok(())
    }

    fn input(&mut self, _heading: &str) -> Result<Option<String>> {
        match self.next("input")? {
            ScriptedAnswer::Input(answer) => Ok(answer),
            other => Err(anyhow!("expected input answer, got {other:?}")),
        }
    }

    fn ok(&mut self, _heading: &str, message: &str) -> Result<()> {
        self.dialogs.push(message.to_string());
        Ok(())
    }
}

/// A call made against [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Terminate(String),
    FindPids(String),
    Kill(u32),
    Shutdown,
    Quit,
    Sleep(Duration),
}

/// Host double that records calls and fails on request.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub pids: Vec<u32>,
    pub fail_terminate: bool,
    pub fail_find_pids: bool,
    pub fail_kill: bool,
    pub fail_shutdown: bool,
    pub fail_quit: bool,
    calls: RefCell<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn with_pids(pids: Vec<u32>) -> Self {
        Self {
            pids,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: HostCall, fail: bool) -> Result<()> {
        let label = format!("{call:?}");
        self.calls.borrow_mut().push(call);
        if fail {
            return Err(anyhow!("scripted failure: {label}"));
        }
        Ok(())
    }
}

impl HostControl for RecordingHost {
    fn terminate(&self, process_name: &str) -> Result<()> {
        self.record(
            HostCall::Terminate(process_name.to_string()),
            self.fail_terminate,
        )
    }

    fn find_pids(&self, process_name: &str) -> Result<Vec<u32>> {
        self.record(
            HostCall::FindPids(process_name.to_string()),
            self.fail_find_pids,
        )?;
        Ok(self.pids.clone())
    }

    fn kill(&self, pid: u32) -> Result<()> {
        self.record(HostCall::Kill(pid), self.fail_kill)
    }

    fn shutdown(&self) -> Result<()> {
        self.record(HostCall::Shutdown, self.fail_shutdown)
    }

    fn quit(&self) -> Result<()> {
        self.record(HostCall::Quit, self.fail_quit)
    }

    fn sleep(&self, duration: Duration) {
        self.calls.borrow_mut().push(HostCall::Sleep(duration));
    }
}
