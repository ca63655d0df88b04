use async_trait::async_trait;
use poem_probe::{
    Error, Result,
    api::{HttpReply, PoemApi, PoemRequest},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock poem API. Clones share state, so a test can keep one handle and
/// give the other to a `Probe`.
#[derive(Debug, Clone, Default)]
pub struct MockPoemApi {
    pub health_reply: Arc<Mutex<Option<HttpReply>>>,
    pub replies: Arc<Mutex<VecDeque<std::result::Result<HttpReply, String>>>>,
    pub requests: Arc<Mutex<Vec<PoemRequest>>>,
    pub health_calls: Arc<Mutex<usize>>,
}

impl MockPoemApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(self, reply: HttpReply) -> Self {
        *self.health_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_reply(self, reply: HttpReply) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_error(self, error: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.to_string()));
        self
    }

    pub fn get_requests(&self) -> Vec<PoemRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn health_calls(&self) -> usize {
        *self.health_calls.lock().unwrap()
    }
}

#[async_trait]
impl PoemApi for MockPoemApi {
    async fn health(&self) -> Result<HttpReply> {
        *self.health_calls.lock().unwrap() += 1;
        self.health_reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::internal("No mock health reply configured"))
    }

    async fn generate_poem(&self, request: &PoemRequest) -> Result<HttpReply> {
        self.requests.lock().unwrap().push(request.clone());

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(error)) => Err(Error::internal(error)),
            None => Err(Error::internal("No more mock responses available")),
        }
    }
}
