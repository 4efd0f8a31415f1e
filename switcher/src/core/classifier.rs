//! Deterministic classification of root subdirectories into builds.

use std::collections::BTreeSet;

/// Child directory names that mark a full host data-directory layout.
pub const LAYOUT_MARKERS: [&str; 2] = ["addons", "userdata"];

/// Name fragments (matched case-insensitively) that mark a probable build.
pub const NAME_HINTS: [&str; 3] = ["kodi", "xbmc", "build"];

/// One immediate subdirectory of the root, as observed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    /// True if the directory contains an `addons` or `userdata` child.
    pub has_layout: bool,
}

impl Candidate {
    pub fn new(name: impl Into<String>, has_layout: bool) -> Self {
        Self {
            name: name.into(),
            has_layout,
        }
    }
}

/// Select the candidates that look like builds.
///
/// - Layout rule (only when `infer_from_layout`): the directory has a layout marker child.
/// - Name rule (always): the lowercased name contains one of [`NAME_HINTS`].
///
/// The result is the union of both rules, sorted and deduplicated.
pub fn classify_builds(candidates: &[Candidate], infer_from_layout: bool) -> Vec<String> {
    let mut builds = BTreeSet::new();

    if infer_from_layout {
        builds.extend(
            candidates
                .iter()
                .filter(|candidate| candidate.has_layout)
                .map(|candidate| candidate.name.clone()),
        );
    }

    builds.extend(
        candidates
            .iter()
            .filter(|candidate| name_matches(&candidate.name))
            .map(|candidate| candidate.name.clone()),
    );

    builds.into_iter().collect()
}

/// True if `name` contains a build hint, ignoring case.
pub fn name_matches(name: &str) -> bool {
    let lower = name.to_lowercase();
    NAME_HINTS.iter().any(|hint| lower.contains(hint))
}
