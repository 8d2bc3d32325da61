//! Application state and the unidirectional update function.
//!
//! Front ends turn user input into [`Intent`]s, feed them through [`update`],
//! and execute whatever [`Effect`] comes back. Rendering reads a
//! [`DirectoryView`] projected from the state.

use shared::{
    domain::{FilterCriteria, Member, Selector},
    error::LoadError,
};
use tracing::{debug, warn};

use crate::store::{DirectoryStore, LoadState, LoadTicket, LoadTrigger};

#[derive(Debug, Default)]
pub struct AppState {
    pub store: DirectoryStore,
    pub criteria: FilterCriteria,
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Self::default()
        }
    }

    pub fn view(&self) -> DirectoryView<'_> {
        DirectoryView {
            load_state: self.store.state(),
            visible: self.store.visible(&self.criteria),
            role_options: self.store.role_options(),
            location_options: self.store.location_options(),
            criteria: &self.criteria,
            dark_mode: self.dark_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Reload,
    Retry,
    SetSearchText(String),
    SetRoleSelector(Selector),
    SetLocationSelector(Selector),
    ToggleDarkMode,
    LoadFinished {
        ticket: LoadTicket,
        outcome: Result<Vec<Member>, LoadError>,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::Retry => "retry",
            Self::SetSearchText(_) => "set_search_text",
            Self::SetRoleSelector(_) => "set_role_selector",
            Self::SetLocationSelector(_) => "set_location_selector",
            Self::ToggleDarkMode => "toggle_dark_mode",
            Self::LoadFinished { .. } => "load_finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchMembers(LoadTicket),
    PersistDarkMode(bool),
}

pub fn update(state: &mut AppState, intent: Intent) -> Option<Effect> {
    debug!(
        intent = intent.name(),
        state = state.store.state().label(),
        "applying intent"
    );
    match intent {
        Intent::Reload => begin_load(state, LoadTrigger::Reload),
        Intent::Retry => begin_load(state, LoadTrigger::Retry),
        Intent::SetSearchText(text) => {
            state.criteria.search_text = text;
            None
        }
        Intent::SetRoleSelector(selector) => {
            state.criteria.role = selector;
            None
        }
        Intent::SetLocationSelector(selector) => {
            state.criteria.location = selector;
            None
        }
        Intent::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            Some(Effect::PersistDarkMode(state.dark_mode))
        }
        Intent::LoadFinished { ticket, outcome } => {
            state.store.complete_load(ticket, outcome);
            None
        }
    }
}

fn begin_load(state: &mut AppState, trigger: LoadTrigger) -> Option<Effect> {
    match state.store.begin_load(trigger) {
        Ok(ticket) => Some(Effect::FetchMembers(ticket)),
        Err(rejection) => {
            warn!(?trigger, reason = %rejection, "ignoring load request");
            None
        }
    }
}

/// Read-only projection consumed by renderers.
#[derive(Debug)]
pub struct DirectoryView<'a> {
    pub load_state: &'a LoadState,
    pub visible: Vec<&'a Member>,
    pub role_options: Vec<Selector>,
    pub location_options: Vec<Selector>,
    pub criteria: &'a FilterCriteria,
    pub dark_mode: bool,
}

impl DirectoryView<'_> {
    pub fn is_empty_result(&self) -> bool {
        matches!(self.load_state, LoadState::Loaded) && self.visible.is_empty()
    }
}
