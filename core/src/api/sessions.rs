use async_trait::async_trait;

use crate::api::error::Error;
use crate::api::http_sender::HttpSender;
use crate::api::responses::RemoteSession;
use crate::ApiClient;

/// Read access to a user's chat sessions on the backend.
#[async_trait]
pub trait SessionsApi: Send + Sync {
    /// Lists the sessions owned by `user_id`, in the backend's order.
    async fn list_sessions(&self, user_id: &str) -> Result<Vec<RemoteSession>, Error>;
}

#[async_trait]
impl<S: HttpSender> SessionsApi for ApiClient<S> {
    async fn list_sessions(&self, user_id: &str) -> Result<Vec<RemoteSession>, Error> {
        let url = format!("{}/sessions", self.server_url);
        let response = self.send_get(&url, &[("user_id", user_id)]).await?;

        let sessions = response.json::<Vec<RemoteSession>>().await
            .map_err(|e| Error::Deserialization(Box::new(e)))?;
        Ok(sessions)
    }
}
