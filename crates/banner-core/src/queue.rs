//! Bounded admission queue with overflow accounting.
//!
//! The queue is the only state shared between the HTTP listeners, the IPC
//! receiver, and the display scheduler. All operations are O(1) under a
//! single mutex; callers never hold the lock across I/O.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::request::NotificationRequest;

pub const DEFAULT_CAPACITY: usize = 100;

const SUMMARY_TITLE: &str = "Notification Queue";
const SUMMARY_TTL_SECS: u64 = 5;

/// Thread-safe bounded FIFO of pending banner requests.
#[derive(Clone)]
pub struct AdmissionQueue {
    inner: Arc<Mutex<QueueInner>>,
}

struct QueueInner {
    entries: VecDeque<NotificationRequest>,
    capacity: usize,
    skipped: u64,
}

impl Default for AdmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueInner {
                entries: VecDeque::new(),
                capacity: capacity.max(1),
                skipped: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Admit a request, stamping its admission time. At capacity the
    /// request is counted and dropped instead; the drop is surfaced later
    /// as a synthetic summary banner.
    pub fn enqueue(&self, mut request: NotificationRequest) {
        let mut inner = self.lock();
        if inner.entries.len() >= inner.capacity {
            inner.skipped += 1;
            tracing::warn!(
                title = %request.title,
                skipped = inner.skipped,
                "queue full, skipping notification"
            );
            return;
        }
        request.enqueued_at = Some(Utc::now());
        tracing::debug!(title = %request.title, len = inner.entries.len() + 1, "notification enqueued");
        inner.entries.push_back(request);
    }

    /// Pop the oldest request. Whenever the queue is left empty with drops
    /// on record, a summary request is appended so overflow is never
    /// silent.
    pub fn try_dequeue(&self) -> Option<NotificationRequest> {
        let mut inner = self.lock();
        let popped = inner.entries.pop_front();
        if inner.entries.is_empty() && inner.skipped > 0 {
            let summary = summary_request(inner.skipped);
            tracing::info!(skipped = inner.skipped, "queue drained, enqueueing skip summary");
            inner.entries.push_back(summary);
            inner.skipped = 0;
        }
        popped
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of requests dropped since the last summary was emitted.
    pub fn skipped_count(&self) -> u64 {
        self.lock().skipped
    }
}

fn summary_request(skipped: u64) -> NotificationRequest {
    let mut request = NotificationRequest::new(format!("{skipped} notifications were skipped."));
    request.title = SUMMARY_TITLE.to_string();
    request.ttl_seconds = SUMMARY_TTL_SECS;
    request.enqueued_at = Some(Utc::now());
    request
}
