use crate::api::Error;
use crate::api::http_sender::{HttpSender, DefaultSender};
use reqwest::{Client, Response};

pub(super) const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the chat backend.
pub struct ApiClient<S: HttpSender = DefaultSender> {
    pub(super) client: Client,
    pub(super) sender: S,
    pub(super) server_url: String,
    pub(super) api_key: Option<String>,
}

impl ApiClient<DefaultSender> {
    pub fn new(server_url: impl Into<String>) -> ApiClient<DefaultSender> {
        Self::with_sender(server_url, DefaultSender)
    }
}

impl<S: HttpSender> ApiClient<S> {
    pub fn with_sender(server_url: impl Into<String>, sender: S) -> ApiClient<S> {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            sender,
            server_url,
            api_key: None,
        }
    }

    /// Attaches the key sent in the `X-API-Key` header of every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub(super) async fn send_get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, Error> {
        let mut request = self.client.get(url).query(query);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = self.sender.send(request)
            .await
            .map_err(Error::Transport)?;

        let successful_response = error_if_unsuccessful(response).await?;
        Ok(successful_response)
    }
}

pub(super) async fn error_if_unsuccessful(response: Response) -> Result<Response, Error> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::UnexpectedStatus { status, body });
    }
    Ok(response)
}
