use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::transfer::Transfer;

/// Cloneable handle used by connections to submit transfers to the
/// scheduler task.
#[derive(Clone)]
pub struct SchedulerHandle {
    tx: mpsc::UnboundedSender<Transfer>,
}

impl SchedulerHandle {
    /// Submits a transfer for round-robin service.
    ///
    /// Fails only when the scheduler task has shut down; the transfer is
    /// returned so the caller can observe the dropped socket.
    pub fn submit(&self, transfer: Transfer) -> Result<(), Transfer> {
        self.tx.send(transfer).map_err(|e| e.0)
    }
}

/// Round-robin scheduler for in-progress file transfers.
///
/// One dedicated task owns the queue; submissions arrive over a channel so
/// no other execution context ever touches it. Each pass dequeues one
/// transfer, performs exactly one bounded step, and re-queues it at the
/// tail if incomplete. This bounds per-step work to one chunk, so a large
/// download never starves the others.
pub struct Scheduler {
    rx: mpsc::UnboundedReceiver<Transfer>,
    queue: VecDeque<Transfer>,
    chunk_size: usize,
}

impl Scheduler {
    pub fn new(chunk_size: usize) -> (Scheduler, SchedulerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler {
            rx,
            queue: VecDeque::new(),
            chunk_size,
        };
        (scheduler, SchedulerHandle { tx })
    }

    /// Drains the transfer queue until every handle is dropped.
    ///
    /// Blocks on the channel only while the queue is empty; otherwise new
    /// submissions are pulled in without waiting so they join the rotation
    /// behind the transfers already in flight.
    pub async fn run(mut self) {
        loop {
            while let Ok(transfer) = self.rx.try_recv() {
                self.queue.push_back(transfer);
            }

            let transfer = match self.queue.pop_front() {
                Some(t) => t,
                None => match self.rx.recv().await {
                    Some(t) => t,
                    None => break,
                },
            };

            if let Some(unfinished) = transfer.step(self.chunk_size).await {
                self.queue.push_back(unfinished);
            }
        }

        tracing::debug!("Transfer scheduler shut down");
    }
}
