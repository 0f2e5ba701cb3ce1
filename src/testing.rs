use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::{
    controller::{clipboard::Clipboard, prompt::Prompt},
    domain::{
        api::LinksApi,
        error::ApiError,
        models::{CreateRequest, CreatedLink, StatsSnapshot},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(CreateRequest),
    Delete(String),
    FetchStats,
}

enum Reply<T> {
    Now(Result<T, ApiError>),
    Later(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> Reply<T> {
    async fn resolve(reply: Option<Self>, fallback: impl FnOnce() -> Result<T, ApiError>) -> Result<T, ApiError> {
        match reply {
            Some(Reply::Now(result)) => result,
            Some(Reply::Later(rx)) => rx.await.unwrap_or_else(|_| Err(rejected(599, None))),
            None => fallback(),
        }
    }
}

/// Scripted `LinksApi`. Replies are consumed in call order; an unscripted
/// stats call returns an empty snapshot, any other unscripted call fails.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    creates: Mutex<VecDeque<Reply<CreatedLink>>>,
    deletes: Mutex<VecDeque<Reply<()>>>,
    stats: Mutex<VecDeque<Reply<StatsSnapshot>>>,
}

impl FakeApi {
    pub fn on_create(&self, result: Result<CreatedLink, ApiError>) {
        self.creates.lock().push_back(Reply::Now(result));
    }

    pub fn on_create_later(&self) -> oneshot::Sender<Result<CreatedLink, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.creates.lock().push_back(Reply::Later(rx));
        tx
    }

    pub fn on_delete(&self, result: Result<(), ApiError>) {
        self.deletes.lock().push_back(Reply::Now(result));
    }

    pub fn on_stats(&self, result: Result<StatsSnapshot, ApiError>) {
        self.stats.lock().push_back(Reply::Now(result));
    }

    pub fn on_stats_later(&self) -> oneshot::Sender<Result<StatsSnapshot, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.stats.lock().push_back(Reply::Later(rx));
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn create_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, Call::Create(_)))
            .count()
    }
}

impl LinksApi for Arc<FakeApi> {
    async fn create(&self, request: &CreateRequest) -> Result<CreatedLink, ApiError> {
        self.calls.lock().push(Call::Create(request.clone()));
        let reply = self.creates.lock().pop_front();
        Reply::resolve(reply, || Err(rejected(500, None))).await
    }

    async fn delete(&self, code: &str) -> Result<(), ApiError> {
        self.calls.lock().push(Call::Delete(code.to_string()));
        let reply = self.deletes.lock().pop_front();
        Reply::resolve(reply, || Err(rejected(500, None))).await
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.calls.lock().push(Call::FetchStats);
        let reply = self.stats.lock().pop_front();
        Reply::resolve(reply, || Ok(StatsSnapshot::default())).await
    }
}

/// Answers confirmations from a queue and records each question.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answer(&self, yes: bool) {
        self.answers.lock().push_back(yes);
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

impl Prompt for Arc<ScriptedPrompt> {
    async fn confirm(&self, message: &str) -> bool {
        self.asked.lock().push(message.to_string());
        self.answers.lock().pop_front().unwrap_or(false)
    }
}

/// Records every write; fails them all once `fail` is called.
#[derive(Default)]
pub struct FakeClipboard {
    written: Mutex<Vec<String>>,
    broken: AtomicBool,
}

impl FakeClipboard {
    pub fn fail(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().clone()
    }
}

impl Clipboard for Arc<FakeClipboard> {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(io::Error::other("clipboard unavailable"));
        }
        self.written.lock().push(text.to_string());
        Ok(())
    }
}

pub fn rejected(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Application {
        status,
        message: message.map(str::to_string),
    }
}

pub fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("relative URLs cannot be requested");
    ApiError::Transport(err)
}
