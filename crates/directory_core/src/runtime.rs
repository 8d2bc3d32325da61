//! Executes the effects returned by [`update`] against real collaborators.

use std::sync::Arc;

use shared::error::LoadError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    app_state::{update, AppState, Effect, Intent},
    preferences::PreferenceStore,
    MemberSource,
};

pub struct DirectoryRuntime {
    state: AppState,
    source: Arc<dyn MemberSource>,
    preferences: Arc<dyn PreferenceStore>,
    completions_tx: mpsc::UnboundedSender<Intent>,
    completions_rx: mpsc::UnboundedReceiver<Intent>,
}

impl DirectoryRuntime {
    /// Restores the dark-mode preference; no load is started until a
    /// [`Intent::Reload`] is dispatched.
    pub fn new(source: Arc<dyn MemberSource>, preferences: Arc<dyn PreferenceStore>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(preferences.load_dark_mode()),
            source,
            preferences,
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `intent` and starts any effect it produced. Fetches run on a
    /// spawned task; their results arrive through [`Self::next_completion`].
    pub fn dispatch(&mut self, intent: Intent) {
        if let Some(effect) = update(&mut self.state, intent) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::FetchMembers(ticket) => {
                debug!(generation = ticket.generation(), "spawning member fetch");
                let source = Arc::clone(&self.source);
                let completions = self.completions_tx.clone();
                tokio::spawn(async move {
                    // A panicking source still has to end the load cycle.
                    let fetch = tokio::spawn(async move { source.fetch_members().await });
                    let outcome = match fetch.await {
                        Ok(outcome) => outcome,
                        Err(err) => Err(LoadError::Transport(format!(
                            "member fetch task failed: {err}"
                        ))),
                    };
                    let _ = completions.send(Intent::LoadFinished { ticket, outcome });
                });
            }
            Effect::PersistDarkMode(enabled) => {
                if let Err(err) = self.preferences.save_dark_mode(enabled) {
                    warn!("failed to persist dark mode preference: {err}");
                }
            }
        }
    }

    /// Waits for the next finished load and applies it.
    pub async fn next_completion(&mut self) {
        if let Some(intent) = self.completions_rx.recv().await {
            self.dispatch(intent);
        }
    }

    /// Waits until no load is outstanding.
    pub async fn settle(&mut self) {
        while self.state.store.outstanding().is_some() {
            self.next_completion().await;
        }
    }
}
