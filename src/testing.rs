use std::{collections::VecDeque, sync::Mutex};

use futures::{FutureExt as _, future::BoxFuture};

use crate::{
    Result,
    transport::{RawResponse, Transport},
};

pub(crate) fn api_key() -> String {
    "k".repeat(39)
}

/// Replays queued responses and records what was sent. Panics when called with nothing queued.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, is_success: bool, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(RawResponse {
            is_success,
            body: body.to_owned(),
        });
        self
    }

    pub(crate) fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send<'a>(&'a self, endpoint: &'a str, body: String) -> BoxFuture<'a, Result<RawResponse>> {
        let body = serde_json::from_str(&body).expect("request body is JSON");
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_owned(), body));
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called without a queued response");
        async move { Ok(response) }.boxed()
    }
}
