use serde::{Deserialize, Serialize};

/// Connection settings for the remote data-modeling service.
///
/// An explicit value threaded through endpoint constructors — there is
/// no process-wide client state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Project the schema lives in.
    pub project: String,
    /// Bearer token. Refresh is the transport layer's concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project: project.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
