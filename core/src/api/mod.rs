//! Remote session-listing API for the chat backend

mod error;
mod api_client;
mod responses;
mod http_sender;
mod sessions;

#[cfg(test)]
mod mock_sender;
#[cfg(test)]
mod test_utils;

pub use api_client::ApiClient;
pub use error::Error;
pub use http_sender::{HttpSender, DefaultSender};
pub use responses::RemoteSession;
pub use sessions::SessionsApi;
