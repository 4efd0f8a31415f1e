//! Deterministic construction of the build selector menu.

use crate::core::types::{BuildDirectory, EmptyListPolicy, Selection};

/// Display options for the selector menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptions {
    pub current_marker: String,
    pub create_label: String,
    pub empty_list: EmptyListPolicy,
}

/// Result of planning the menu for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuPlan {
    /// No builds were found and the policy forbids offering creation.
    NoBuilds,
    Show(Menu),
}

/// Display entries plus the mapping back to builds.
///
/// Entries are the build names in scan order (current one prefixed with the
/// marker) followed by the create-new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<String>,
    builds: Vec<String>,
}

impl Menu {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Map a selector result (chosen index, or `None` on cancel) to a selection.
    ///
    /// Indices past the end are treated as a cancel.
    pub fn resolve(&self, choice: Option<usize>) -> Selection {
        match choice {
            Some(index) if index < self.builds.len() => {
                Selection::Existing(self.builds[index].clone())
            }
            Some(index) if index == self.builds.len() => Selection::CreateNew,
            _ => Selection::Cancelled,
        }
    }
}

/// Mark the build whose name equals `current` (if any).
pub fn mark_current(builds: &[String], current: Option<&str>) -> Vec<BuildDirectory> {
    builds
        .iter()
        .map(|name| BuildDirectory {
            name: name.clone(),
            exists: true,
            is_current: current == Some(name.as_str()),
        })
        .collect()
}

/// Plan the selector menu for the scanned builds.
pub fn plan_menu(builds: &[BuildDirectory], options: &MenuOptions) -> MenuPlan {
    if builds.is_empty() && options.empty_list == EmptyListPolicy::Abort {
        return MenuPlan::NoBuilds;
    }

    let mut entries: Vec<String> = builds
        .iter()
        .map(|build| {
            if build.is_current {
                format!("{}{}", options.current_marker, build.name)
            } else {
                build.name.clone()
            }
        })
        .collect();
    entries.push(options.create_label.clone());

    MenuPlan::Show(Menu {
        entries,
        builds: builds.iter().map(|build| build.name.clone()).collect(),
    })
}
