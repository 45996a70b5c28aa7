use std::{
    collections::VecDeque,
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::textgen::{
    error::{TextGenError, not_available},
    ports::{TextGenPort, TextGenRequest},
};

type GenerateFuture = Pin<Box<dyn Future<Output = Result<String, TextGenError>> + Send>>;

pub type GenerateHook = Arc<dyn Fn(TextGenRequest) -> GenerateFuture + Send + Sync>;

pub fn boxed<T>(
    future: impl Future<Output = T> + Send + 'static,
) -> Pin<Box<dyn Future<Output = T> + Send>>
where
    T: Send + 'static,
{
    Box::pin(future)
}

/// Replays a fixed list of replies in order and records every request.
/// An exhausted script fails the call, which keeps tests honest about the
/// number of generation round-trips they expect.
pub struct ScriptedTextGen {
    replies: Mutex<VecDeque<Result<String, TextGenError>>>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<TextGenRequest>>>,
}

impl ScriptedTextGen {
    pub fn new(replies: Vec<&str>) -> Self {
        Self::from_results(replies.into_iter().map(|reply| Ok(reply.to_string())).collect())
    }

    pub fn from_results(replies: Vec<Result<String, TextGenError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<TextGenRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TextGenPort for ScriptedTextGen {
    async fn generate(&self, req: TextGenRequest) -> Result<String, TextGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req);
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(not_available("scripted replies exhausted")))
    }
}

/// Always fails with the given error; counts calls so tests can assert a
/// stage was (or was not) reached.
pub struct FailingTextGen {
    error: TextGenError,
    calls: Arc<AtomicUsize>,
}

impl FailingTextGen {
    pub fn new(error: TextGenError) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            error,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenPort for FailingTextGen {
    async fn generate(&self, _req: TextGenRequest) -> Result<String, TextGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Hook-backed double for tests that need request-dependent behavior.
pub struct HookTextGen {
    hook: GenerateHook,
    calls: Arc<AtomicUsize>,
}

impl HookTextGen {
    pub fn new(hook: GenerateHook) -> Self {
        Self {
            hook,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextGenPort for HookTextGen {
    async fn generate(&self, req: TextGenRequest) -> Result<String, TextGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.hook)(req).await
    }
}
