use std::time::Duration;

use glanz_types::{AppEvent, FollowUp};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

/// Delivers delayed follow-ups back to the event loop.
///
/// Every [`reset`](FollowUpScheduler::reset) cancels whatever is pending and
/// starts a new generation; follow-ups that were already in flight carry their
/// generation so the loop can drop them.
pub struct FollowUpScheduler {
    tx: AsyncSender<AppEvent>,
    parent: CancellationToken,
    current: CancellationToken,
    generation: u64,
}

impl FollowUpScheduler {
    pub fn new(tx: AsyncSender<AppEvent>, parent: CancellationToken) -> Self {
        Self {
            tx,
            current: parent.child_token(),
            parent,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Cancel everything pending
    pub fn reset(&mut self) {
        self.current.cancel();
        self.current = self.parent.child_token();
        self.generation += 1;
    }

    pub fn schedule(&self, delay: Duration, follow_up: FollowUp) {
        let cancel = self.current.clone();
        let tx = self.tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Cancelled {:?}", follow_up);
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = tx.send(AppEvent::FollowUp { follow_up, generation }).await {
                        tracing::debug!("Follow-up dropped: {}", e);
                    }
                }
            }
        });
    }
}
