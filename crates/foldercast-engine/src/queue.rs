//! Sequential async task queue
//!
//! A FIFO queue of niladic async jobs with single-consumer draining: at
//! most one job runs at a time, jobs never interleave, and order is strict.
//! `push` never blocks; it spawns the drain loop when the queue was idle
//! and is safe against pushes racing the loop's shutdown.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

type Job = BoxFuture<'static, ()>;

struct QueueInner {
    /// Pending jobs, head next to run
    jobs: Mutex<VecDeque<Job>>,
    /// Jobs not yet completed, including the one in flight
    size: AtomicUsize,
    /// Whether a drain loop currently owns the queue
    draining: AtomicBool,
    /// Signalled each time `size` drops to zero
    idle: Notify,
}

/// FIFO queue of async jobs, drained one at a time.
///
/// Cloning yields another handle to the same queue. Must be used inside a
/// tokio runtime (`push` spawns the drain loop).
#[derive(Clone)]
pub struct TaskQueue {
    inner: Arc<QueueInner>,
}

impl TaskQueue {
    /// Create an empty, idle queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(QueueInner {
                jobs: Mutex::new(VecDeque::new()),
                size: AtomicUsize::new(0),
                draining: AtomicBool::new(false),
                idle: Notify::new(),
            }),
        }
    }

    /// Append a job to the tail; start draining if the queue was idle.
    ///
    /// Never blocks and never runs the job inline: the caller of `push`
    /// is not suspended while jobs execute.
    pub fn push(&self, job: impl Future<Output = ()> + Send + 'static) {
        self.inner.size.fetch_add(1, Ordering::SeqCst);
        self.inner.jobs.lock().push_back(Box::pin(job));
        if !self.inner.draining.swap(true, Ordering::SeqCst) {
            tokio::spawn(drain(Arc::clone(&self.inner)));
        }
    }

    /// Jobs not yet completed, including the one in flight.
    ///
    /// Reaches zero exactly when the last job finishes, which callers use
    /// as the "last job drained" completion signal.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.size.load(Ordering::SeqCst)
    }

    /// Wait until every job pushed so far has completed.
    ///
    /// Returns immediately on an idle queue.
    pub async fn drained(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.size() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("size", &self.size())
            .field("draining", &self.inner.draining.load(Ordering::SeqCst))
            .finish()
    }
}

/// Single-consumer drain loop: pop, await, repeat until empty.
async fn drain(inner: Arc<QueueInner>) {
    loop {
        let job = inner.jobs.lock().pop_front();
        if let Some(job) = job {
            job.await;
            if inner.size.fetch_sub(1, Ordering::SeqCst) == 1 {
                inner.idle.notify_waiters();
            }
            continue;
        }

        inner.draining.store(false, Ordering::SeqCst);
        // A push may have landed between the empty pop and the flag reset
        // and seen `draining == true`, so it did not spawn a loop of its
        // own. Reclaim the queue in that case instead of stranding the job.
        if inner.jobs.lock().is_empty() {
            break;
        }
        if inner.draining.swap(true, Ordering::SeqCst) {
            // Another push spawned a fresh loop first; let it take over.
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn drains_in_fifo_order() {
        let queue = TaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let log = Arc::clone(&log);
            queue.push(async move {
                log.lock().push(i);
            });
        }

        queue.drained().await;
        assert_eq!(*log.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn jobs_never_overlap() {
        let queue = TaskQueue::new();
        let running = Arc::new(AtomicUsize::new(0));
        let overlapped = Arc::new(AtomicBool::new(false));

        for _ in 0..8 {
            let running = Arc::clone(&running);
            let overlapped = Arc::clone(&overlapped);
            queue.push(async move {
                if running.fetch_add(1, Ordering::SeqCst) > 0 {
                    overlapped.store(true, Ordering::SeqCst);
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            });
        }

        queue.drained().await;
        assert!(!overlapped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn size_counts_the_in_flight_job() {
        let queue = TaskQueue::new();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let observed = Arc::new(AtomicUsize::new(usize::MAX));

        let inner_queue = queue.clone();
        let job_observed = Arc::clone(&observed);
        queue.push(async move {
            release_rx.await.ok();
            job_observed.store(inner_queue.size(), Ordering::SeqCst);
        });

        // The job is blocked on the channel, so it is in flight and counted.
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(queue.size(), 1);

        release_tx.send(()).ok();
        queue.drained().await;
        assert_eq!(observed.load(Ordering::SeqCst), 1);
        assert_eq!(queue.size(), 0);
    }

    #[tokio::test]
    async fn restarts_after_running_dry() {
        let queue = TaskQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&counter);
        queue.push(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        queue.drained().await;

        // Queue ran dry; a later push must start a fresh drain loop.
        let c = Arc::clone(&counter);
        queue.push(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        queue.drained().await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn pushes_while_draining_are_picked_up() {
        let queue = TaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_queue = queue.clone();
        let inner_log = Arc::clone(&log);
        let outer_log = Arc::clone(&log);
        queue.push(async move {
            inner_log.lock().push("first");
            let log = Arc::clone(&inner_log);
            inner_queue.push(async move {
                log.lock().push("second");
            });
        });

        queue.drained().await;
        assert_eq!(*outer_log.lock(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn drained_returns_immediately_when_idle() {
        let queue = TaskQueue::new();
        queue.drained().await;
        assert_eq!(queue.size(), 0);
    }
}
