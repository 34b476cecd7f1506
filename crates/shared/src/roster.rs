use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ParseError, report::render_report};

/// Disposition a person is marked under for a parade report.
///
/// Declaration order is the order categories appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCategory {
    Present,
    Brw,
    RsoMc,
    Off,
    Leave,
    Dc,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 6] = [
        StatusCategory::Present,
        StatusCategory::Brw,
        StatusCategory::RsoMc,
        StatusCategory::Off,
        StatusCategory::Leave,
        StatusCategory::Dc,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StatusCategory::Present => "PRESENT",
            StatusCategory::Brw => "BRW",
            StatusCategory::RsoMc => "RSO_MC",
            StatusCategory::Off => "OFF",
            StatusCategory::Leave => "LEAVE",
            StatusCategory::Dc => "DC",
        }
    }

    /// Text used as the block header in a report.
    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::RsoMc => "RSO/MC",
            other => other.key(),
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusCategory {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase().replace(['/', '-'], "_");
        StatusCategory::ALL
            .into_iter()
            .find(|status| status.key() == normalized)
            .ok_or_else(|| ParseError::UnknownStatus(raw.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParadeType {
    First,
    #[default]
    Last,
}

impl ParadeType {
    pub fn label(self) -> &'static str {
        match self {
            ParadeType::First => "FIRST PARADE",
            ParadeType::Last => "LAST PARADE",
        }
    }
}

impl fmt::Display for ParadeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParadeType {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FIRST" | "FIRST PARADE" => Ok(ParadeType::First),
            "LAST" | "LAST PARADE" => Ok(ParadeType::Last),
            _ => Err(ParseError::UnknownParade(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub status: StatusCategory,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, status: StatusCategory) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Names grouped by status category, insertion order preserved.
///
/// Every category is always present as a key, possibly with no names.
/// Names are not deduplicated and a name may appear under several
/// categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<StatusCategory, Vec<String>>",
    into = "BTreeMap<StatusCategory, Vec<String>>"
)]
pub struct RosterState {
    groups: BTreeMap<StatusCategory, Vec<String>>,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            groups: StatusCategory::ALL
                .into_iter()
                .map(|status| (status, Vec::new()))
                .collect(),
        }
    }
}

impl From<BTreeMap<StatusCategory, Vec<String>>> for RosterState {
    fn from(mut groups: BTreeMap<StatusCategory, Vec<String>>) -> Self {
        for status in StatusCategory::ALL {
            groups.entry(status).or_default();
        }
        Self { groups }
    }
}

impl From<RosterState> for BTreeMap<StatusCategory, Vec<String>> {
    fn from(state: RosterState) -> Self {
        state.groups
    }
}

impl FromIterator<RosterEntry> for RosterState {
    fn from_iter<I: IntoIterator<Item = RosterEntry>>(entries: I) -> Self {
        let mut state = Self::default();
        for entry in entries {
            state.push(entry.status, entry.name);
        }
        state
    }
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self, status: StatusCategory) -> &[String] {
        self.groups.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with their names, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusCategory, &[String])> {
        self.groups
            .iter()
            .map(|(status, names)| (*status, names.as_slice()))
    }

    pub fn entries(&self) -> impl Iterator<Item = RosterEntry> + '_ {
        self.iter().flat_map(|(status, names)| {
            names.iter().map(move |name| RosterEntry {
                name: name.clone(),
                status,
            })
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = StatusCategory> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.values().flatten().any(|existing| existing == name)
    }

    fn push(&mut self, status: StatusCategory, name: String) {
        self.groups.entry(status).or_default().push(name);
    }

    fn remove(&mut self, status: StatusCategory, index: usize) -> Option<String> {
        let names = self.groups.get_mut(&status)?;
        (index < names.len()).then(|| names.remove(index))
    }

    fn clear(&mut self) {
        self.groups.values_mut().for_each(Vec::clear);
    }
}

/// Working roster for one session: branch and parade selection plus the
/// grouped names. `add_person`, `remove_person` and `reset` are the only
/// ways to change the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterStore {
    branch: Option<String>,
    parade: ParadeType,
    state: RosterState,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn parade(&self) -> ParadeType {
        self.parade
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// Already-added names stay on the roster when the branch changes.
    /// A blank name clears the selection.
    pub fn select_branch(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.branch = (!name.trim().is_empty()).then_some(name);
    }

    pub fn select_parade(&mut self, parade: ParadeType) {
        self.parade = parade;
    }

    /// Appends `name` under `status`. An empty name leaves the roster as is.
    pub fn add_person(&mut self, name: impl Into<String>, status: StatusCategory) -> &RosterState {
        let name = name.into();
        if !name.is_empty() {
            self.state.push(status, name);
        }
        &self.state
    }

    /// Removes the name at `index` under `status`; out of range is a no-op.
    pub fn remove_person(&mut self, status: StatusCategory, index: usize) -> &RosterState {
        self.state.remove(status, index);
        &self.state
    }

    pub fn reset(&mut self) -> &RosterState {
        self.state.clear();
        &self.state
    }

    /// `None` until a branch has been selected.
    pub fn report(&self) -> Option<String> {
        self.branch
            .as_deref()
            .map(|branch| render_report(branch, self.parade, &self.state))
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
