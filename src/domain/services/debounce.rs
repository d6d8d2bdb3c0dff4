#[cfg(test)]
#[path = "debounce_test.rs"]
mod tests;

use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time;

use super::RemoteDocumentFacade;

struct PendingTask {
    // Set by whichever side gets there first: the timer when it fires, or a
    // cancel. Once set by the timer the task is in flight and must not be
    // aborted.
    claimed: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PendingTask {
    fn cancel(self) -> bool {
        if self.claimed.swap(true, Ordering::SeqCst) {
            return false;
        }

        self.handle.abort();
        return true;
    }
}

#[derive(Default)]
pub struct PendingSync {
    slot: Mutex<Option<PendingTask>>,
}

impl PendingSync {
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.cancel();
        }

        let claimed = Arc::new(AtomicBool::new(false));
        let task_claimed = claimed.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            if task_claimed.swap(true, Ordering::SeqCst) {
                return;
            }
            task.await;
        });

        *slot = Some(PendingTask { claimed, handle });
    }

    /// Returns whether a task was cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = slot.take() {
            return pending.cancel();
        }

        return false;
    }

    pub fn is_pending(&self) -> bool {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = slot.as_ref() {
            return !pending.claimed.load(Ordering::SeqCst);
        }

        return false;
    }
}

pub struct ChangeEmitter {
    facade: Arc<RemoteDocumentFacade>,
    pending: PendingSync,
    snapshot: Mutex<Option<(u64, String)>>,
    next_seq: AtomicU64,
    // Sequence of the last content the backend accepted. Held across every
    // push, so pushes never overlap and an older one never lands after a
    // newer one.
    committed: Arc<AsyncMutex<u64>>,
    quiet_interval: Duration,
}

async fn push_in_order(
    facade: &RemoteDocumentFacade,
    committed: &AsyncMutex<u64>,
    seq: u64,
    content: &str,
) -> Result<bool> {
    let mut last = committed.lock().await;
    if *last > seq {
        tracing::debug!(seq, last = *last, "Dropping superseded push");
        return Ok(false);
    }

    facade.set_content(content).await?;
    *last = seq;
    return Ok(true);
}

impl ChangeEmitter {
    pub fn new(facade: Arc<RemoteDocumentFacade>, quiet_interval: Duration) -> ChangeEmitter {
        return ChangeEmitter {
            facade,
            pending: PendingSync::default(),
            snapshot: Mutex::new(None),
            next_seq: AtomicU64::new(1),
            committed: Arc::new(AsyncMutex::new(0)),
            quiet_interval,
        };
    }

    pub fn schedule_push(&self, content: String) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some((seq, content.clone()));

        let facade = self.facade.clone();
        let committed = self.committed.clone();
        self.pending.schedule(self.quiet_interval, async move {
            if let Err(err) = push_in_order(&facade, &committed, seq, &content).await {
                tracing::error!(error = ?err, "Failed to push editor content");
            }
        });
    }

    /// Waits for a push already in flight before returning.
    pub async fn flush(&self) -> Result<bool> {
        if !self.pending.cancel() {
            let _last = self.committed.lock().await;
            return Ok(false);
        }

        let content = self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some((seq, text)) = content {
            return push_in_order(&self.facade, &self.committed, seq, &text).await;
        }

        return Ok(false);
    }

    pub fn cancel(&self) -> bool {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        return self.pending.cancel();
    }

    pub fn is_pending(&self) -> bool {
        return self.pending.is_pending();
    }
}
