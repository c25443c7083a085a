//! Scripted resolver for dispatcher tests.
//!
//! Counts resolve calls, body polls and body releases so tests can assert
//! that the dispatcher did (or did not) touch the resolver and the stream.

#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, Stream};
use wedl_core::download::ByteStream;
use wedl_core::{FileBody, Resolution, ResolveError, ResolvedFile, Resolver};

/// What the stub does when asked to resolve.
#[derive(Debug, Clone)]
pub enum StubOutcome {
    /// Resolve with `file` metadata and a body yielding `bytes`.
    Bytes { file: ResolvedFile, bytes: Vec<u8> },
    /// Resolve with `file` metadata and a body that fails on first read.
    Poisoned { file: ResolvedFile },
    /// Fail with a service rejection carrying this message.
    Fail(String),
}

/// Counters shared between a stub and the test holding it.
#[derive(Debug, Default)]
pub struct StubCounters {
    pub calls: AtomicUsize,
    pub polls: AtomicUsize,
    pub releases: AtomicUsize,
}

impl StubCounters {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

pub struct StubResolver {
    outcome: StubOutcome,
    counters: Arc<StubCounters>,
    last_request: Mutex<Option<(String, Option<String>)>>,
}

impl StubResolver {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            counters: Arc::new(StubCounters::default()),
            last_request: Mutex::new(None),
        }
    }

    /// Resolves to `filename` with `bytes`, served from `final_url`.
    pub fn serving(filename: &str, final_url: &str, bytes: &[u8]) -> Self {
        Self::new(StubOutcome::Bytes {
            file: file_meta(filename, final_url, bytes.len() as u64),
            bytes: bytes.to_vec(),
        })
    }

    pub fn poisoned(filename: &str, final_url: &str, size: u64) -> Self {
        Self::new(StubOutcome::Poisoned {
            file: file_meta(filename, final_url, size),
        })
    }

    pub fn failing(message: &str) -> Self {
        Self::new(StubOutcome::Fail(message.to_string()))
    }

    pub fn counters(&self) -> Arc<StubCounters> {
        Arc::clone(&self.counters)
    }

    pub fn last_request(&self) -> Option<(String, Option<String>)> {
        self.last_request.lock().unwrap().clone()
    }

    fn tracked_body(&self, inner: ByteStream) -> FileBody {
        FileBody::new(TrackedStream {
            inner,
            counters: Arc::clone(&self.counters),
        })
    }
}

pub fn file_meta(filename: &str, final_url: &str, size: u64) -> ResolvedFile {
    ResolvedFile {
        final_url: final_url.to_string(),
        filename: filename.to_string(),
        size,
        direct_url: format!("{final_url}?direct=1"),
    }
}

#[async_trait]
impl Resolver for StubResolver {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn resolve(
        &self,
        source_url: &str,
        password: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((source_url.to_string(), password.map(str::to_string)));

        match &self.outcome {
            StubOutcome::Bytes { file, bytes } => {
                let bytes = Bytes::from(bytes.clone());
                let body = self.tracked_body(Box::pin(stream::once(async move { Ok(bytes) })));
                Ok(Resolution::new(body, file.clone()))
            }
            StubOutcome::Poisoned { file } => {
                let body = self.tracked_body(Box::pin(stream::once(async {
                    Err(io::Error::other("poisoned stream"))
                })));
                Ok(Resolution::new(body, file.clone()))
            }
            StubOutcome::Fail(message) => Err(ResolveError::rejected(message.clone())),
        }
    }
}

/// Wraps a body stream, counting polls and the final release.
struct TrackedStream {
    inner: ByteStream,
    counters: Arc<StubCounters>,
}

impl Stream for TrackedStream {
    type Item = Result<Bytes, io::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.counters.polls.fetch_add(1, Ordering::SeqCst);
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}
