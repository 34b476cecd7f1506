use shared::{
    domain::{personnel_in_branch, Branch, Person},
    roster::{ParadeType, RosterState, RosterStore, StatusCategory},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::DirectoryClient;

pub const BRANCHES_FETCH_FAILED: &str = "Failed to fetch branches";
pub const PERSONNEL_FETCH_FAILED: &str = "Failed to fetch personnel";

/// Why a person could not be added to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
    #[error("select a branch first")]
    NoBranch,
    #[error("'{person}' is not in {branch}")]
    NotACandidate { person: String, branch: String },
}

/// One user's roster session: the directory snapshot fetched at start plus
/// the [`RosterStore`] being edited.
#[derive(Debug, Clone, Default)]
pub struct RosterSession {
    store: RosterStore,
    branches: Vec<Branch>,
    personnel: Vec<Person>,
    error: Option<String>,
}

impl RosterSession {
    pub fn new(branches: Vec<Branch>, personnel: Vec<Person>) -> Self {
        Self {
            branches,
            personnel,
            ..Self::default()
        }
    }

    /// Session whose directory could not be loaded. Not retried.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn load(client: &DirectoryClient) -> Self {
        let branches = match client.branches().await {
            Ok(branches) => branches,
            Err(err) => {
                error!(%err, "error fetching branches");
                return Self::failed(BRANCHES_FETCH_FAILED);
            }
        };
        let personnel = match client.personnel().await {
            Ok(personnel) => personnel,
            Err(err) => {
                error!(%err, "error fetching personnel");
                return Self::failed(PERSONNEL_FETCH_FAILED);
            }
        };
        Self::new(branches, personnel)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.error.is_none()
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn personnel(&self) -> &[Person] {
        &self.personnel
    }

    pub fn selected_branch(&self) -> Option<&str> {
        self.store.branch()
    }

    pub fn select_branch(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.trim().is_empty() && !self.branches.iter().any(|b| b.name == name) {
            warn!(branch = %name, "selected branch is not in the directory");
        }
        self.store.select_branch(name);
    }

    pub fn parade(&self) -> ParadeType {
        self.store.parade()
    }

    pub fn select_parade(&mut self, parade: ParadeType) {
        self.store.select_parade(parade);
    }

    /// Personnel of the selected branch; empty until a branch is selected.
    pub fn candidates(&self) -> Vec<&Person> {
        match self.store.branch() {
            Some(branch) => personnel_in_branch(&self.personnel, branch),
            None => Vec::new(),
        }
    }

    /// Resolves `person` among [`candidates`](Self::candidates), either by
    /// exact name or by its position in that list.
    pub fn candidate(&self, person: &str) -> Result<&Person, AddError> {
        let branch = self.store.branch().ok_or(AddError::NoBranch)?;
        let candidates = self.candidates();
        let by_index = person
            .parse::<usize>()
            .ok()
            .and_then(|index| candidates.get(index).copied());
        by_index
            .or_else(|| candidates.iter().copied().find(|p| p.name == person))
            .ok_or_else(|| AddError::NotACandidate {
                person: person.to_string(),
                branch: branch.to_string(),
            })
    }

    /// Adds a person of the selected branch under `status`.
    pub fn add_person(
        &mut self,
        person: &str,
        status: StatusCategory,
    ) -> Result<&RosterState, AddError> {
        let name = self.candidate(person)?.name.clone();
        if self.store.state().contains(&name) {
            debug!(%name, %status, "name already on roster, appending again");
        }
        Ok(self.store.add_person(name, status))
    }

    pub fn remove_person(&mut self, status: StatusCategory, index: usize) -> &RosterState {
        self.store.remove_person(status, index)
    }

    pub fn reset(&mut self) -> &RosterState {
        self.store.reset()
    }

    pub fn state(&self) -> &RosterState {
        self.store.state()
    }

    pub fn report(&self) -> Option<String> {
        self.store.report()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
