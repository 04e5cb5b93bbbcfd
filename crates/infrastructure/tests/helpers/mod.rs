#![allow(dead_code)]

use async_trait::async_trait;
use cdnsight_application::ports::{AddressResolver, BlocklistFeed};
use cdnsight_domain::{DomainError, FeedDocument};
use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Feed that replays scripted responses in order, then keeps failing.
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Result<FeedDocument, DomainError>>>,
    fetches: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn then_json(self, body: &str) -> Self {
        let doc = FeedDocument::from_json(body).unwrap();
        self.responses.lock().unwrap().push_back(Ok(doc));
        self
    }

    pub fn then_fail(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(DomainError::FeedUnavailable(reason.to_string())));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistFeed for ScriptedFeed {
    async fn fetch(&self) -> Result<FeedDocument, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::FeedUnavailable("script exhausted".to_string())))
    }

    fn source(&self) -> &str {
        "scripted"
    }
}

/// Resolver with a fixed outcome for every domain.
pub struct FixedResolver {
    name: String,
    answer: Option<IpAddr>,
    calls: AtomicUsize,
}

impl FixedResolver {
    pub fn answering(name: &str, ip: &str) -> Self {
        Self {
            name: name.to_string(),
            answer: Some(ip.parse().unwrap()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for FixedResolver {
    async fn resolve_a(&self, domain: &str) -> Result<IpAddr, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .ok_or_else(|| DomainError::resolution_failed(domain, format!("{} unreachable", self.name)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
