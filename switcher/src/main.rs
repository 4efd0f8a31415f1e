//! Build switcher for a media-center host application.
//!
//! Lists build directories under a root, rewrites the host's pointer file to
//! select one, and stops the host so its next start loads the new build.

use std::io::{BufReader, stdin, stderr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use build_switcher::core::types::QuitMethod;
use build_switcher::exit_codes;
use build_switcher::io::config::{SwitcherConfig, load_config};
use build_switcher::io::creator::create_build;
use build_switcher::io::host::CommandHost;
use build_switcher::io::pointer_file::{read_current_location, write_pointer};
use build_switcher::io::restart::{RestartReport, StepOutcome, run_restart};
use build_switcher::logging;
use build_switcher::switch::{SwitchOutcome, discover_builds, run_switch_reported};
use build_switcher::ui::TerminalUi;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "build-switcher",
    version,
    about = "Switch the media-center host between installed builds"
)]
struct Cli {
    /// TOML config file (defaults apply when omitted or missing).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory scanned for builds.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Override the pointer file path.
    #[arg(long, global = true)]
    pointer_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a build interactively, write the pointer file, and stop the host (default).
    Switch {
        /// Skip the quit-method prompt.
        #[arg(long, value_enum)]
        quit: Option<QuitArg>,
    },
    /// List discovered builds, marking the current one.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the data path the pointer file currently targets.
    Current,
    /// Create a new, empty build directory.
    Create {
        /// Build name; path separators are replaced with `_`.
        name: String,
    },
    /// Point the host at a build without prompting.
    Set {
        /// Build name under the root, or an absolute path.
        build: String,
        /// Stop the host afterwards.
        #[arg(long, value_enum)]
        restart: Option<QuitArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QuitArg {
    Force,
    Regular,
}

impl From<QuitArg> for QuitMethod {
    fn from(arg: QuitArg) -> Self {
        match arg {
            QuitArg::Force => QuitMethod::Force,
            QuitArg::Regular => QuitMethod::Regular,
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    match cli.command.unwrap_or(Command::Switch { quit: None }) {
        Command::Switch { quit } => cmd_switch(&config, quit.map(QuitMethod::from)),
        Command::List { json } => cmd_list(&config, json),
        Command::Current => Ok(cmd_current(&config)),
        Command::Create { name } => Ok(cmd_create(&config, &name)),
        Command::Set { build, restart } => Ok(cmd_set(
            &config,
            &build,
            restart.map(QuitMethod::from),
        )),
    }
}

fn resolve_config(cli: &Cli) -> Result<SwitcherConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).with_context(|| "load config")?,
        None => SwitcherConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(pointer) = &cli.pointer_file {
        config.pointer_path = pointer.clone();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_switch(config: &SwitcherConfig, quit: Option<QuitMethod>) -> Result<i32> {
    let mut ui = TerminalUi::new(BufReader::new(stdin()), stderr());
    let host = CommandHost::new(config.host.clone());

    let outcome = run_switch_reported(config, &mut ui, &host, quit);
    if let SwitchOutcome::Switched { report, .. } = &outcome {
        print_report(report);
    }
    Ok(outcome.exit_code())
}

fn cmd_list(config: &SwitcherConfig, json: bool) -> Result<i32> {
    let builds = discover_builds(config);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&builds).context("serialize builds")?
        );
    } else if builds.is_empty() {
        eprintln!("no builds found in {}", config.root.display());
    } else {
        for build in &builds {
            if build.is_current {
                println!("{}{}", config.current_marker, build.name);
            } else {
                println!("{}", build.name);
            }
        }
    }
    if builds.is_empty() {
        return Ok(exit_codes::NOT_FOUND);
    }
    Ok(exit_codes::OK)
}

fn cmd_current(config: &SwitcherConfig) -> i32 {
    match read_current_location(&config.pointer_path) {
        Some(location) => {
            println!("{location}");
            exit_codes::OK
        }
        None => {
            eprintln!("no current location in {}", config.pointer_path.display());
            exit_codes::NOT_FOUND
        }
    }
}

fn cmd_create(config: &SwitcherConfig, name: &str) -> i32 {
    match create_build(&config.root, name) {
        Ok(created) => {
            println!("{}", created.path.display());
            exit_codes::OK
        }
        Err(err) => {
            eprintln!("{err}");
            exit_codes::INVALID
        }
    }
}

fn cmd_set(config: &SwitcherConfig, build: &str, restart: Option<QuitMethod>) -> i32 {
    let data_path = match write_pointer(&config.pointer_path, &config.root, build) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{:#}", err);
            return exit_codes::INVALID;
        }
    };
    println!("xbmc.data={}", data_path.display());
    if let Some(method) = restart {
        let host = CommandHost::new(config.host.clone());
        print_report(&run_restart(&host, &config.host.process_name, method));
    }
    exit_codes::OK
}

fn print_report(report: &RestartReport) {
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Done => eprintln!("{}: done", step.step.label()),
            StepOutcome::Skipped(reason) => eprintln!("{}: skipped ({reason})", step.step.label()),
            StepOutcome::Failed(err) => eprintln!("{}: failed ({err})", step.step.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_interactive_switch() {
        let cli = Cli::parse_from(["build-switcher"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_switch_with_quit_method() {
        let cli = Cli::parse_from(["build-switcher", "switch", "--quit", "regular"]);
        assert!(matches!(
            cli.command,
            Some(Command::Switch {
                quit: Some(QuitArg::Regular)
            })
        ));
    }

    #[test]
    fn global_overrides_apply_after_subcommand() {
        let cli = Cli::parse_from([
            "build-switcher",
            "list",
            "--root",
            "/tmp/builds",
            "--pointer-file",
            "/tmp/pointer.properties",
        ]);
        let config = resolve_config(&cli).expect("config");
        assert_eq!(config.root, PathBuf::from("/tmp/builds"));
        assert_eq!(config.pointer_path, PathBuf::from("/tmp/pointer.properties"));
    }

    #[test]
    fn parse_set_with_restart() {
        let cli = Cli::parse_from(["build-switcher", "set", "KodiBuild1", "--restart", "force"]);
        match cli.command {
            Some(Command::Set { build, restart }) => {
                assert_eq!(build, "KodiBuild1");
                assert!(matches!(restart, Some(QuitArg::Force)));
            }
            _ => panic!("expected set command"),
        }
    }
}
