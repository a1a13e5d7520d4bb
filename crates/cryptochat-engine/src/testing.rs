//! Scripted backends for engine tests.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::backend::{BackendError, ChatBackend};

type Reply = Result<String, BackendError>;

/// Backend that answers every question at once with a fixed outcome.
pub struct InstantBackend {
    reply: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl InstantBackend {
    /// Always answer with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a non-success status.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Questions received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for InstantBackend {
    async fn ask(&self, question: &str) -> Reply {
        self.calls.lock().unwrap().push(question.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(BackendError::Status(503)),
        }
    }
}

/// Backend whose answers are released by the test, in any order.
#[derive(Default)]
pub struct GatedBackend {
    pending: Mutex<Vec<(String, oneshot::Sender<Reply>)>>,
    asked: Mutex<Vec<String>>,
}

impl GatedBackend {
    /// Questions received so far, in call order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    /// Yield until at least `n` questions have been asked.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.asked.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Release the outstanding call for `question` with `reply`.
    pub fn release(&self, question: &str, reply: Reply) {
        let mut pending = self.pending.lock().unwrap();
        let index = pending
            .iter()
            .position(|(q, _)| q == question)
            .unwrap_or_else(|| panic!("no pending call for {question:?}"));
        let (_, tx) = pending.remove(index);
        let _ = tx.send(reply);
    }
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn ask(&self, question: &str) -> Reply {
        let (tx, rx) = oneshot::channel();
        self.asked.lock().unwrap().push(question.to_string());
        self.pending.lock().unwrap().push((question.to_string(), tx));
        rx.await.unwrap_or(Err(BackendError::Timeout))
    }
}

/// Backend whose every call panics.
pub struct PanickingBackend;

#[async_trait]
impl ChatBackend for PanickingBackend {
    async fn ask(&self, question: &str) -> Reply {
        panic!("backend blew up on {question:?}");
    }
}
