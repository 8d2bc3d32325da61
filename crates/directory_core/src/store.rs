//! Load lifecycle for the member collection.
//!
//! The store holds the last successfully loaded collection and a small state
//! machine: `Idle -> Loading -> (Loaded | Failed)`, with `Failed -> Loading`
//! only on an explicit retry. A previously loaded collection survives a failed
//! reload and is replaced wholesale only when a new load succeeds.

use shared::{
    domain::{FilterCriteria, Member, Selector},
    error::LoadError,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::filter::{filter_members, location_options, role_options};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    Reload,
    Retry,
}

/// Identifies one load cycle. Completions carrying any other ticket are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadRejection {
    #[error("a load is already in progress")]
    AlreadyLoading,
    #[error("retry is only available after a failed load")]
    RetryRequiresFailure,
    #[error("the last load failed; use retry")]
    ReloadWhileFailed,
}

#[derive(Debug, Default)]
pub struct DirectoryStore {
    state: LoadState,
    members: Vec<Member>,
    generation: u64,
    outstanding: Option<LoadTicket>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn outstanding(&self) -> Option<LoadTicket> {
        self.outstanding
    }

    /// Enters `Loading`. Only one load may be outstanding; `Retry` is accepted
    /// only from `Failed` and `Reload` only from `Idle` or `Loaded`.
    pub fn begin_load(&mut self, trigger: LoadTrigger) -> Result<LoadTicket, LoadRejection> {
        match (&self.state, trigger) {
            (LoadState::Loading, _) => return Err(LoadRejection::AlreadyLoading),
            (LoadState::Failed { .. }, LoadTrigger::Reload) => {
                return Err(LoadRejection::ReloadWhileFailed)
            }
            (LoadState::Idle | LoadState::Loaded, LoadTrigger::Retry) => {
                return Err(LoadRejection::RetryRequiresFailure)
            }
            _ => {}
        }

        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.outstanding = Some(ticket);
        self.state = LoadState::Loading;
        info!(generation = ticket.0, ?trigger, "member load started");
        Ok(ticket)
    }

    /// Applies the outcome of the load identified by `ticket`. Returns false
    /// when the ticket is not the outstanding one.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<Member>, LoadError>,
    ) -> bool {
        if self.outstanding != Some(ticket) {
            warn!(generation = ticket.0, "discarding completion for a stale load");
            return false;
        }
        self.outstanding = None;

        match outcome {
            Ok(members) => {
                info!(generation = ticket.0, count = members.len(), "member load finished");
                self.members = members;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                error!(generation = ticket.0, error = %err, "member load failed");
                self.state = LoadState::Failed {
                    message: err.user_message().to_string(),
                };
            }
        }
        true
    }

    pub fn visible<'a>(&'a self, criteria: &FilterCriteria) -> Vec<&'a Member> {
        filter_members(&self.members, criteria)
    }

    pub fn role_options(&self) -> Vec<Selector> {
        role_options(&self.members)
    }

    pub fn location_options(&self) -> Vec<Selector> {
        location_options(&self.members)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
