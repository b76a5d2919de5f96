use std::collections::VecDeque;
use std::sync::Mutex;
use async_trait::async_trait;
use reqwest::{Request, RequestBuilder, Response};
use crate::api::http_sender::HttpSender;

type ScriptedResponse = Result<Response, reqwest::Error>;

// Replays scripted responses in order and keeps every request it was handed
pub(super) struct MockSender {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    captured_requests: Mutex<Vec<Request>>,
}

impl MockSender {
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            captured_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpSender for MockSender {
    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let built_request = request.build()?;
        self.captured_requests.lock().unwrap().push(built_request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockSender ran out of scripted responses")
    }
}
