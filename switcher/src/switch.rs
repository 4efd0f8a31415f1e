//! Orchestration for the interactive build switch.
//!
//! Scan → select (marked with the current build) → optionally create →
//! confirm → choose quit method → write pointer → notify → stop the host.
//! Cancelling at any prompt ends the workflow without touching the pointer
//! file.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::core::menu::{MenuPlan, mark_current, plan_menu};
use crate::core::pointer::build_name_from_location;
use crate::core::types::{BuildDirectory, QuitMethod, Selection};
use crate::exit_codes;
use crate::io::config::SwitcherConfig;
use crate::io::creator::create_build;
use crate::io::host::HostControl;
use crate::io::pointer_file::{read_current_location, write_pointer};
use crate::io::restart::{RestartReport, run_restart};
use crate::io::scanner::scan_builds;
use crate::ui::HostUi;

const NOTIFICATION_DURATION: Duration = Duration::from_millis(3_000);

/// Labels of the quit-method selector: force first, then regular.
pub const QUIT_METHOD_LABELS: [&str; 2] = [
    "Force Quit & Auto-Restart (Recommended)",
    "Regular Quit (Manual Restart Required)",
];
const QUIT_METHODS: [QuitMethod; 2] = [QuitMethod::Force, QuitMethod::Regular];

/// Outcome of one run of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The user declined at some prompt.
    Cancelled,
    /// The scan found nothing and the empty-list policy aborts.
    NoBuilds,
    /// Build creation failed; the pointer file was not touched.
    CreateFailed,
    /// Writing the pointer file failed; the host was not stopped.
    WriteFailed,
    /// A dialog failed mid-workflow; the error was logged and reported.
    Unexpected(String),
    Switched {
        build: String,
        report: RestartReport,
    },
}

impl SwitchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SwitchOutcome::Switched { .. } => exit_codes::OK,
            SwitchOutcome::Cancelled => exit_codes::CANCELLED,
            SwitchOutcome::NoBuilds => exit_codes::NOT_FOUND,
            SwitchOutcome::CreateFailed
            | SwitchOutcome::WriteFailed
            | SwitchOutcome::Unexpected(_) => exit_codes::INVALID,
        }
    }
}

/// Discover builds and mark the one the pointer file currently targets.
pub fn discover_builds(config: &SwitcherConfig) -> Vec<BuildDirectory> {
    let names = scan_builds(&config.root, config.infer_from_layout);
    let current = read_current_location(&config.pointer_path)
        .and_then(|location| build_name_from_location(&location));
    mark_current(&names, current.as_deref())
}

/// Run the interactive switch workflow.
///
/// `quit_method` skips the quit-method selector when set. Errors are only
/// returned for dialog failures; file and process failures are reported to
/// the user and reflected in the outcome.
pub fn run_switch<U: HostUi, H: HostControl>(
    config: &SwitcherConfig,
    ui: &mut U,
    host: &H,
    quit_method: Option<QuitMethod>,
) -> Result<SwitchOutcome> {
    info!("build switcher started");
    let heading = config.display_name.as_str();

    let builds = discover_builds(config);
    let menu = match plan_menu(&builds, &config.menu_options()) {
        MenuPlan::Show(menu) => menu,
        MenuPlan::NoBuilds => {
            ui.ok(
                heading,
                &format!(
                    "No build directories found in {}\n\nPlease ensure your build directories are in the root of your device storage.",
                    config.root.display()
                ),
            )?;
            return Ok(SwitchOutcome::NoBuilds);
        }
    };

    let choice = ui.select(&format!("{heading} - Select Build"), menu.entries())?;
    let build = match menu.resolve(choice) {
        Selection::Existing(name) => name,
        Selection::CreateNew => {
            let Some(raw_name) = ui.input("Enter new build name")? else {
                info!("user cancelled build creation");
                return Ok(SwitchOutcome::Cancelled);
            };
            match create_build(&config.root, &raw_name) {
                Ok(created) => created.name,
                Err(err) => {
                    error!(err = %err, "build creation failed");
                    ui.ok(heading, &format!("Error\n\n{err}"))?;
                    return Ok(SwitchOutcome::CreateFailed);
                }
            }
        }
        Selection::Cancelled => {
            info!("no build selected, exiting");
            return Ok(SwitchOutcome::Cancelled);
        }
    };
    info!(build = %build, "user selected build");

    let message = format!(
        "Switch to build: {build}?\n\nThe host application will quit immediately after switching.\n\nContinue?"
    );
    if !ui.yes_no(heading, &message)? {
        info!("user cancelled switch");
        return Ok(SwitchOutcome::Cancelled);
    }

    let method = match quit_method {
        Some(method) => method,
        None => match choose_quit_method(ui, heading)? {
            Some(method) => method,
            None => {
                info!("user cancelled quit method selection");
                return Ok(SwitchOutcome::Cancelled);
            }
        },
    };

    if let Err(err) = write_pointer(&config.pointer_path, &config.root, &build) {
        let err = format!("{err:#}");
        error!(err = %err, "error writing pointer file");
        ui.ok(
            heading,
            &format!(
                "Error\n\nFailed to write {}.\nPlease check permissions and try again.",
                config.pointer_path.display()
            ),
        )?;
        return Ok(SwitchOutcome::WriteFailed);
    }

    ui.notify(
        heading,
        &format!("Switched to: {build}\nThe host application will now quit"),
        NOTIFICATION_DURATION,
    )?;
    info!(build = %build, method = method.label(), "build switch completed, stopping host");
    host.sleep(config.quit_delay());

    let report = run_restart(host, &config.host.process_name, method);
    Ok(SwitchOutcome::Switched { build, report })
}

/// Run the workflow and turn any error into an "Unexpected Error" dialog.
///
/// Never fails; the error detail is kept in [`SwitchOutcome::Unexpected`].
pub fn run_switch_reported<U: HostUi, H: HostControl>(
    config: &SwitcherConfig,
    ui: &mut U,
    host: &H,
    quit_method: Option<QuitMethod>,
) -> SwitchOutcome {
    match run_switch(config, ui, host, quit_method) {
        Ok(outcome) => outcome,
        Err(err) => {
            let detail = format!("{err:#}");
            error!(err = %detail, "unexpected error in switch workflow");
            // The dialog may be what failed; nothing more to report if so.
            if let Err(dialog_err) = ui.ok(
                &config.display_name,
                &format!("Unexpected Error\n\n{detail}"),
            ) {
                let dialog_err = format!("{dialog_err:#}");
                error!(err = %dialog_err, "failed to show error dialog");
            }
            SwitchOutcome::Unexpected(detail)
        }
    }
}

/// Ask for the quit method and explain what it will do.
fn choose_quit_method<U: HostUi>(ui: &mut U, heading: &str) -> Result<Option<QuitMethod>> {
    let labels: Vec<String> = QUIT_METHOD_LABELS.iter().map(|label| label.to_string()).collect();
    let Some(method) = ui
        .select(&format!("{heading} - Select Quit Method"), &labels)?
        .and_then(|index| QUIT_METHODS.get(index).copied())
    else {
        return Ok(None);
    };

    let explanation = match method {
        QuitMethod::Force => {
            "Force Quit Selected\n\nThe host application will be force-stopped and should restart automatically.\n\nIf automatic restart fails, please restart it manually from your launcher."
        }
        QuitMethod::Regular => {
            "Regular Quit Selected\n\nThe host application will exit normally.\n\nYou MUST close it completely and restart it for the build switch to take effect."
        }
    };
    ui.ok(heading, explanation)?;
    info!(method = method.label(), "user selected quit method");
    Ok(Some(method))
}
