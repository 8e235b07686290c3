//! Display scheduler: admits queued requests into a bounded set of
//! on-screen slots on a fixed poll cadence.
//!
//! All slot state lives on this one task. Surface completion arrives as a
//! message on an internal event channel, never as a reentrant callback.

use std::sync::Arc;
use std::time::Duration;

use banner_core::{AdmissionQueue, NotificationRequest};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::types::SpecFn;
use super::{Presenter, SuppressionPolicy};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum number of simultaneously occupied display slots.
    pub max_slots: usize,
    pub banner_height: u32,
    pub banner_spacing: u32,
    pub poll_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_slots: 4,
            banner_height: 100,
            banner_spacing: 10,
            poll_interval: Duration::from_millis(100),
        }
    }
}

enum SlotEvent {
    Freed { slot_id: u64 },
}

struct ActiveSlot {
    id: u64,
    title: String,
    exit_after_show: bool,
    offset: watch::Sender<u32>,
}

pub struct DisplayScheduler {
    queue: AdmissionQueue,
    presenter: Arc<dyn Presenter>,
    suppression: Arc<dyn SuppressionPolicy>,
    spec_fn: SpecFn,
    config: SchedulerConfig,
    shutdown: CancellationToken,
}

impl DisplayScheduler {
    pub fn new(
        queue: AdmissionQueue,
        presenter: Arc<dyn Presenter>,
        suppression: Arc<dyn SuppressionPolicy>,
        spec_fn: SpecFn,
        config: SchedulerConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            queue,
            presenter,
            suppression,
            spec_fn,
            config,
            shutdown,
        }
    }

    /// Run until the shutdown token fires. One fill pass runs before the
    /// first tick so a request queued at startup shows without delay.
    pub async fn run(self) {
        let shutdown = self.shutdown.clone();
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut slots = SlotTable {
            queue: self.queue,
            presenter: self.presenter,
            suppression: self.suppression,
            spec_fn: self.spec_fn,
            config: self.config,
            shutdown: shutdown.clone(),
            events_tx,
            active: Vec::new(),
            next_slot_id: 0,
        };

        let mut ticker = tokio::time::interval(slots.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        slots.fill();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => slots.fill(),
                Some(event) = events_rx.recv() => slots.handle(event),
            }
        }
        tracing::info!("display scheduler stopped");
    }
}

/// The set of occupied display slots, owned exclusively by the scheduler
/// task.
struct SlotTable {
    queue: AdmissionQueue,
    presenter: Arc<dyn Presenter>,
    suppression: Arc<dyn SuppressionPolicy>,
    spec_fn: SpecFn,
    config: SchedulerConfig,
    shutdown: CancellationToken,
    events_tx: mpsc::UnboundedSender<SlotEvent>,
    active: Vec<ActiveSlot>,
    next_slot_id: u64,
}

impl SlotTable {
    fn stride(&self) -> u32 {
        self.config.banner_height + self.config.banner_spacing
    }

    /// Admit queued requests until the slots are full or the queue runs
    /// dry. Suppressed requests are dropped in place; the rest of the
    /// queue keeps its order.
    fn fill(&mut self) {
        while self.active.len() < self.config.max_slots {
            let Some(request) = self.queue.try_dequeue() else {
                break;
            };
            if !request.important && self.suppression.is_suppression_active() {
                tracing::info!(
                    title = %request.title,
                    "do-not-disturb active, skipping notification"
                );
                continue;
            }
            self.show(request);
        }
    }

    fn show(&mut self, request: NotificationRequest) {
        let offset_px = self.active.len() as u32 * self.stride();
        let spec = (self.spec_fn)(&request);
        let handle = match self.presenter.present(spec, offset_px) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(title = %request.title, error = %e, "failed to create presentation surface");
                return;
            }
        };

        let (completion, offset) = handle.into_parts();
        let slot_id = self.next_slot_id;
        self.next_slot_id += 1;
        tracing::debug!(slot_id, title = %request.title, offset_px, "display slot occupied");
        self.active.push(ActiveSlot {
            id: slot_id,
            title: request.title,
            exit_after_show: request.exit_after_show,
            offset,
        });

        let events = self.events_tx.clone();
        tokio::spawn(async move {
            // A dropped surface counts as completed.
            let _ = completion.await;
            let _ = events.send(SlotEvent::Freed { slot_id });
        });
    }

    fn handle(&mut self, event: SlotEvent) {
        match event {
            SlotEvent::Freed { slot_id } => self.reclaim(slot_id),
        }
    }

    fn reclaim(&mut self, slot_id: u64) {
        let Some(index) = self.active.iter().position(|slot| slot.id == slot_id) else {
            return;
        };
        let slot = self.active.remove(index);
        tracing::debug!(slot_id, title = %slot.title, "display slot reclaimed");
        self.reflow();

        if slot.exit_after_show {
            tracing::info!("exit-after-show banner dismissed, requesting shutdown");
            self.shutdown.cancel();
            return;
        }
        // Refill straight away instead of waiting for the next tick.
        self.fill();
    }

    /// Recompute offsets from scratch: rank among the currently active
    /// slots, relative order preserved, no gaps.
    fn reflow(&mut self) {
        let stride = self.stride();
        for (rank, slot) in self.active.iter().enumerate() {
            let _ = slot.offset.send(rank as u32 * stride);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::presenter::{DisplayHandle, PresentError};
    use crate::notification::types::{PresentationSpec, presentation_spec};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::oneshot;

    struct TestSurface {
        title: String,
        initial_offset: u32,
        offset_rx: watch::Receiver<u32>,
        done: Option<oneshot::Sender<()>>,
    }

    #[derive(Clone, Default)]
    struct TestPresenter {
        surfaces: Arc<Mutex<Vec<TestSurface>>>,
        fail_next: Arc<AtomicBool>,
    }

    impl TestPresenter {
        fn titles(&self) -> Vec<String> {
            self.surfaces
                .lock()
                .unwrap()
                .iter()
                .map(|s| s.title.clone())
                .collect()
        }

        fn current_offsets(&self) -> Vec<u32> {
            self.surfaces
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.done.is_some())
                .map(|s| *s.offset_rx.borrow())
                .collect()
        }

        fn complete(&self, index: usize) {
            let mut surfaces = self.surfaces.lock().unwrap();
            let done = surfaces[index].done.take().expect("already completed");
            done.send(()).unwrap();
        }
    }

    impl Presenter for TestPresenter {
        fn present(
            &self,
            spec: PresentationSpec,
            offset_px: u32,
        ) -> Result<DisplayHandle, PresentError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(PresentError::Unavailable("test failure".into()));
            }
            let (done_tx, done_rx) = oneshot::channel();
            let (offset_tx, offset_rx) = watch::channel(offset_px);
            self.surfaces.lock().unwrap().push(TestSurface {
                title: spec.title,
                initial_offset: offset_px,
                offset_rx,
                done: Some(done_tx),
            });
            Ok(DisplayHandle::new(done_rx, offset_tx))
        }
    }

    struct Suppressed(bool);

    impl SuppressionPolicy for Suppressed {
        fn is_suppression_active(&self) -> bool {
            self.0
        }
    }

    fn spawn_scheduler(
        queue: &AdmissionQueue,
        presenter: &TestPresenter,
        suppression: bool,
        max_slots: usize,
    ) -> CancellationToken {
        let shutdown = CancellationToken::new();
        let scheduler = DisplayScheduler::new(
            queue.clone(),
            Arc::new(presenter.clone()),
            Arc::new(Suppressed(suppression)),
            presentation_spec,
            SchedulerConfig {
                max_slots,
                ..SchedulerConfig::default()
            },
            shutdown.clone(),
        );
        tokio::spawn(scheduler.run());
        shutdown
    }

    /// Let the paused clock advance past at least one poll tick.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    fn request(message: &str) -> NotificationRequest {
        let mut request = NotificationRequest::new(message);
        request.title = message.to_string();
        request
    }

    #[tokio::test(start_paused = true)]
    async fn slot_bound_holds_and_backlog_drains_in_fifo_order() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        for m in ["m1", "m2", "m3", "m4"] {
            queue.enqueue(request(m));
        }
        let shutdown = spawn_scheduler(&queue, &presenter, false, 2);

        settle().await;
        assert_eq!(presenter.titles(), ["m1", "m2"]);
        assert_eq!(queue.len(), 2);

        presenter.complete(0);
        settle().await;
        assert_eq!(presenter.titles(), ["m1", "m2", "m3"]);

        presenter.complete(1);
        presenter.complete(2);
        settle().await;
        assert_eq!(presenter.titles(), ["m1", "m2", "m3", "m4"]);
        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn offsets_stay_contiguous_after_reclaim() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        for m in ["a", "b", "c"] {
            queue.enqueue(request(m));
        }
        let shutdown = spawn_scheduler(&queue, &presenter, false, 4);

        settle().await;
        assert_eq!(presenter.current_offsets(), [0, 110, 220]);

        // Drop the middle banner; the survivors compact without gaps.
        presenter.complete(1);
        settle().await;
        assert_eq!(presenter.current_offsets(), [0, 110]);
        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn new_banner_fills_the_compacted_position() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        queue.enqueue(request("first"));
        queue.enqueue(request("second"));
        let shutdown = spawn_scheduler(&queue, &presenter, false, 1);

        settle().await;
        assert_eq!(presenter.titles(), ["first"]);

        presenter.complete(0);
        settle().await;
        let surfaces = presenter.surfaces.lock().unwrap();
        assert_eq!(surfaces[1].title, "second");
        assert_eq!(surfaces[1].initial_offset, 0);
        drop(surfaces);
        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn suppression_drops_normal_but_not_important_requests() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        queue.enqueue(request("quiet"));
        let mut urgent = request("urgent");
        urgent.important = true;
        queue.enqueue(urgent);
        queue.enqueue(request("also quiet"));
        let shutdown = spawn_scheduler(&queue, &presenter, true, 4);

        settle().await;
        assert_eq!(presenter.titles(), ["urgent"]);
        assert!(queue.is_empty());
        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn exit_after_show_requests_shutdown_on_completion() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        let mut last = request("bye");
        last.exit_after_show = true;
        queue.enqueue(last);
        let shutdown = spawn_scheduler(&queue, &presenter, false, 4);

        settle().await;
        assert!(!shutdown.is_cancelled());

        presenter.complete(0);
        settle().await;
        assert!(shutdown.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn presentation_failure_skips_without_blocking_the_queue() {
        let queue = AdmissionQueue::new();
        let presenter = TestPresenter::default();
        presenter.fail_next.store(true, Ordering::SeqCst);
        queue.enqueue(request("doomed"));
        queue.enqueue(request("fine"));
        let shutdown = spawn_scheduler(&queue, &presenter, false, 4);

        settle().await;
        assert_eq!(presenter.titles(), ["fine"]);
        assert_eq!(presenter.current_offsets(), [0]);
        shutdown.cancel();
    }
}
