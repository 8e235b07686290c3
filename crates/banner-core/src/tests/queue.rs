use crate::queue::AdmissionQueue;
use crate::request::NotificationRequest;

fn request(message: &str) -> NotificationRequest {
    NotificationRequest::new(message)
}

#[test]
fn dequeues_in_fifo_order() {
    let queue = AdmissionQueue::new();
    for message in ["one", "two", "three"] {
        queue.enqueue(request(message));
    }

    assert_eq!(queue.try_dequeue().unwrap().message, "one");
    assert_eq!(queue.try_dequeue().unwrap().message, "two");
    assert_eq!(queue.try_dequeue().unwrap().message, "three");
    assert!(queue.try_dequeue().is_none());
}

#[test]
fn stamps_admission_time() {
    let queue = AdmissionQueue::new();
    let fresh = request("hello");
    assert!(fresh.enqueued_at.is_none());

    queue.enqueue(fresh);
    assert!(queue.try_dequeue().unwrap().enqueued_at.is_some());
}

#[test]
fn overflow_never_grows_past_capacity() {
    let queue = AdmissionQueue::with_capacity(3);
    for i in 0..10 {
        queue.enqueue(request(&format!("msg {i}")));
    }

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.skipped_count(), 7);
    // Existing entries are untouched by the drops.
    assert_eq!(queue.try_dequeue().unwrap().message, "msg 0");
    assert_eq!(queue.try_dequeue().unwrap().message, "msg 1");
}

#[test]
fn drain_after_overflow_appends_summary() {
    // Scenario from the admission contract: capacity 2, requests A, B, C.
    let queue = AdmissionQueue::with_capacity(2);
    queue.enqueue(request("A"));
    queue.enqueue(request("B"));
    queue.enqueue(request("C"));
    assert_eq!(queue.skipped_count(), 1);

    assert_eq!(queue.try_dequeue().unwrap().message, "A");
    assert_eq!(queue.try_dequeue().unwrap().message, "B");

    let summary = queue.try_dequeue().unwrap();
    assert_eq!(summary.message, "1 notifications were skipped.");
    assert_eq!(summary.title, "Notification Queue");
    assert_eq!(summary.ttl_seconds, 5);
    assert_eq!(queue.skipped_count(), 0);
    assert!(queue.try_dequeue().is_none());
}

#[test]
fn failed_pop_on_empty_queue_still_surfaces_skips() {
    let queue = AdmissionQueue::with_capacity(1);
    queue.enqueue(request("kept"));
    queue.enqueue(request("dropped"));

    assert_eq!(queue.try_dequeue().unwrap().message, "kept");
    // The pop that drained the queue already planted the summary.
    let summary = queue.try_dequeue().unwrap();
    assert_eq!(summary.message, "1 notifications were skipped.");
}

#[test]
fn empty_queue_without_skips_stays_empty() {
    let queue = AdmissionQueue::new();
    assert!(queue.try_dequeue().is_none());
    assert!(queue.is_empty());
    assert_eq!(queue.skipped_count(), 0);
}

#[test]
fn summary_counter_resets_between_bursts() {
    let queue = AdmissionQueue::with_capacity(1);
    queue.enqueue(request("a"));
    queue.enqueue(request("b"));
    queue.enqueue(request("c"));
    assert_eq!(queue.skipped_count(), 2);

    assert_eq!(queue.try_dequeue().unwrap().message, "a");
    assert_eq!(
        queue.try_dequeue().unwrap().message,
        "2 notifications were skipped."
    );

    // A second overflow starts counting from zero again.
    queue.enqueue(request("d"));
    queue.enqueue(request("e"));
    assert_eq!(queue.skipped_count(), 1);
}
