//! Shared test doubles for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use route_sync::domain::{DomainRecord, DomainSource, DomainSourceError, DomainStatus};
use route_sync::proxy::{ApplyError, ApplyReport, ProxyControl};
use route_sync::reconcile::Reconciler;
use route_sync::render::{BaseFragmentLoader, ConfigRenderer, RenderGlobals};

pub fn domain(name: &str, application_id: &str, status: DomainStatus) -> DomainRecord {
    DomainRecord {
        id: format!("id-{name}"),
        domain_name: name.to_string(),
        application_id: application_id.to_string(),
        owner_id: "owner-1".to_string(),
        soa_email: "ops@example.com".to_string(),
        status,
    }
}

pub fn globals() -> RenderGlobals {
    RenderGlobals {
        proxy_snippet_name: "schemaless-reverse-proxy".to_string(),
        apps_base_domain: "apps.local".to_string(),
    }
}

pub fn base_fragment(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

pub fn reconciler(
    source: Arc<dyn DomainSource>,
    proxy: Arc<dyn ProxyControl>,
    base: &tempfile::NamedTempFile,
) -> Reconciler {
    Reconciler::new(
        source,
        BaseFragmentLoader::new(base.path()),
        ConfigRenderer::new(globals()),
        proxy,
    )
}

/// In-memory store returning its records unfiltered, whatever their status.
pub struct MemoryStore {
    records: Mutex<Vec<DomainRecord>>,
    failures: Mutex<Vec<DomainSourceError>>,
    pub calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            failures: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue an error returned by the next call instead of the records.
    pub fn fail_next(&self, err: DomainSourceError) {
        self.failures.lock().unwrap().push(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainSource for MemoryStore {
    async fn list_active_domains(&self) -> Result<Vec<DomainRecord>, DomainSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.lock().unwrap().pop() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Source whose every call takes `delay`, tracking concurrency.
pub struct SlowSource {
    pub delay: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub starts: Mutex<Vec<Instant>>,
    pub ends: Mutex<Vec<Instant>>,
}

impl SlowSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            starts: Mutex::new(Vec::new()),
            ends: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DomainSource for SlowSource {
    async fn list_active_domains(&self) -> Result<Vec<DomainRecord>, DomainSourceError> {
        self.starts.lock().unwrap().push(Instant::now());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.ends.lock().unwrap().push(Instant::now());
        Ok(Vec::new())
    }
}

/// Proxy double that records every document it is asked to apply.
#[derive(Default)]
pub struct RecordingProxy {
    pub documents: Mutex<Vec<String>>,
}

impl RecordingProxy {
    pub fn count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait]
impl ProxyControl for RecordingProxy {
    async fn apply(&self, document: &str) -> Result<ApplyReport, ApplyError> {
        self.documents.lock().unwrap().push(document.to_string());
        Ok(ApplyReport {
            status: 200,
            body: String::new(),
            bytes_sent: document.len(),
        })
    }
}
