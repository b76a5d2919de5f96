use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A session record as the backend's listing endpoint returns it.
///
/// The backend has shipped several field spellings over time; the aliases
/// accept all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSession {
    #[serde(alias = "session_id", alias = "sessionId")]
    pub id: String,
    #[serde(alias = "display_name", alias = "displayName", alias = "title")]
    pub name: String,
    #[serde(alias = "createdAt", alias = "ts")]
    pub created_at: DateTime<Utc>,
}
