//! Transport Abstraction
//!
//! The client only needs "post this JSON body, give me the JSON reply".
//! The browser build implements it with `fetch`; tests script the replies.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

#[async_trait(?Send)]
pub trait Transport {
    /// Post one GraphQL request body and return the decoded JSON reply
    async fn send(&self, payload: Value) -> ClientResult<Value>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::Transport;
    use crate::error::{ClientError, ClientResult};

    /// Replies are matched by `operationName`; every payload is recorded
    #[derive(Default)]
    pub struct MockTransport {
        replies: Mutex<Vec<(String, VecDeque<ClientResult<Value>>)>>,
        requests: Mutex<Vec<Value>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(&self, operation: &str, body: Value) -> &Self {
            self.push(operation, Ok(body))
        }

        pub fn fail(&self, operation: &str, err: ClientError) -> &Self {
            self.push(operation, Err(err))
        }

        fn push(&self, operation: &str, result: ClientResult<Value>) -> &Self {
            let mut replies = self.replies.lock().unwrap();
            match replies.iter_mut().find(|(op, _)| op == operation) {
                Some((_, queue)) => queue.push_back(result),
                None => replies.push((operation.to_string(), VecDeque::from([result]))),
            }
            self
        }

        pub fn requests(&self) -> Vec<Value> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, operation: &str) -> usize {
            self.requests()
                .iter()
                .filter(|r| r["operationName"] == operation)
                .count()
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, payload: Value) -> ClientResult<Value> {
            let operation = payload["operationName"].as_str().unwrap_or_default().to_string();
            self.requests.lock().unwrap().push(payload);
            let mut replies = self.replies.lock().unwrap();
            replies
                .iter_mut()
                .find(|(op, _)| *op == operation)
                .and_then(|(_, queue)| queue.pop_front())
                .unwrap_or_else(|| Err(ClientError::Network(format!("no scripted reply for {}", operation))))
        }
    }
}
