//! Shared deterministic types for build-switcher core logic.
//!
//! These types define stable contracts between the scanner, the selector menu,
//! and the orchestration. They carry no I/O and no host state.

use serde::{Deserialize, Serialize};

/// A candidate build directory under the configured root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDirectory {
    /// Relative path segment under the root.
    pub name: String,
    pub exists: bool,
    /// True when the pointer file targets this build.
    pub is_current: bool,
}

/// What the user picked from the selector menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Existing(String),
    CreateNew,
    Cancelled,
}

/// Behavior when the scan finds no builds at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyListPolicy {
    /// Show the create-new entry alone.
    #[default]
    OfferCreate,
    /// Show a "no builds found" notice and stop without offering creation.
    Abort,
}

/// How the host application is stopped after a successful switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitMethod {
    /// Kill the host process and rely on an external supervisor to restart it.
    Force,
    /// Ask the host to quit gracefully; the user restarts it by hand.
    Regular,
}

impl QuitMethod {
    pub fn label(self) -> &'static str {
        match self {
            QuitMethod::Force => "force",
            QuitMethod::Regular => "regular",
        }
    }
}
