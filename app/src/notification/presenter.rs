//! Presentation surface abstraction.

use tokio::sync::{oneshot, watch};

use super::types::PresentationSpec;

/// Surface creation failure. The request is treated as already completed.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("presentation surface unavailable: {0}")]
    Unavailable(String),
}

/// Handle correlating one on-screen banner with the scheduler.
pub struct DisplayHandle {
    completion: oneshot::Receiver<()>,
    offset: watch::Sender<u32>,
}

impl DisplayHandle {
    pub fn new(completion: oneshot::Receiver<()>, offset: watch::Sender<u32>) -> Self {
        Self { completion, offset }
    }

    /// Split into the completion signal (awaited by the scheduler's waiter
    /// task) and the offset channel (kept with the slot for reflows).
    pub fn into_parts(self) -> (oneshot::Receiver<()>, watch::Sender<u32>) {
        (self.completion, self.offset)
    }
}

/// A presentation surface: renders one banner per call and auto-dismisses
/// it after the requested TTL.
pub trait Presenter: Send + Sync {
    fn present(&self, spec: PresentationSpec, offset_px: u32)
    -> Result<DisplayHandle, PresentError>;
}

/// Surface used when no renderer is wired in: narrates the banner to the
/// log, honors the TTL, then reports completion.
pub struct HeadlessPresenter;

impl Presenter for HeadlessPresenter {
    fn present(
        &self,
        spec: PresentationSpec,
        offset_px: u32,
    ) -> Result<DisplayHandle, PresentError> {
        let (done_tx, done_rx) = oneshot::channel();
        let (offset_tx, mut offset_rx) = watch::channel(offset_px);

        tokio::spawn(async move {
            tracing::info!(
                title = %spec.title,
                message = %spec.message,
                position = ?spec.position,
                offset_px,
                "banner shown"
            );
            let dismiss = tokio::time::sleep(spec.ttl);
            tokio::pin!(dismiss);
            loop {
                tokio::select! {
                    _ = &mut dismiss => break,
                    changed = offset_rx.changed() => match changed {
                        Ok(()) => {
                            let offset_px = *offset_rx.borrow_and_update();
                            tracing::debug!(title = %spec.title, offset_px, "banner repositioned");
                        }
                        Err(_) => {
                            // Scheduler let go of the slot; just wait out the TTL.
                            dismiss.as_mut().await;
                            break;
                        }
                    },
                }
            }
            tracing::info!(title = %spec.title, "banner dismissed");
            let _ = done_tx.send(());
        });

        Ok(DisplayHandle::new(done_rx, offset_tx))
    }
}
