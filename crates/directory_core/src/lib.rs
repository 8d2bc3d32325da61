use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Member,
    error::LoadError,
    protocol::MembersResponse,
};
use tracing::{info, warn};
use url::Url;

pub mod app_state;
pub mod filter;
pub mod preferences;
pub mod runtime;
pub mod store;

pub use app_state::{update, AppState, DirectoryView, Effect, Intent};
pub use preferences::{JsonFilePreferences, PreferenceError, PreferenceStore, DARK_MODE_KEY};
pub use runtime::DirectoryRuntime;
pub use store::{DirectoryStore, LoadRejection, LoadState, LoadTicket, LoadTrigger};

/// Where the full member collection comes from.
#[async_trait]
pub trait MemberSource: Send + Sync + 'static {
    async fn fetch_members(&self) -> std::result::Result<Vec<Member>, LoadError>;
}

/// `GET {api_base_url}/members`, expecting `{"data": [...]}`.
pub struct HttpMemberSource {
    http: Client,
    members_url: Url,
}

impl HttpMemberSource {
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            members_url: members_url(api_base_url)?,
        })
    }
}

pub fn members_url(api_base_url: &str) -> Result<Url> {
    let base = api_base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{base}/members"))
        .with_context(|| format!("invalid api base url '{api_base_url}'"))
}

#[async_trait]
impl MemberSource for HttpMemberSource {
    async fn fetch_members(&self) -> std::result::Result<Vec<Member>, LoadError> {
        info!(url = %self.members_url, "fetching members");
        let response = self
            .http
            .get(self.members_url.clone())
            .send()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        let decoded: MembersResponse =
            serde_json::from_slice(&body).map_err(|err| LoadError::Decode(err.to_string()))?;

        warn_on_duplicate_ids(&decoded.data);
        Ok(decoded.data)
    }
}

fn warn_on_duplicate_ids(members: &[Member]) {
    let mut seen = std::collections::HashSet::new();
    for member in members {
        if !seen.insert(&member.id) {
            warn!(id = %member.id, "duplicate member id in loaded collection");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
