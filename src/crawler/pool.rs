//! Worker pool for crawl tasks
//!
//! This module handles:
//! - A fixed set of tokio workers draining one unbounded task queue
//! - Pending (not yet started) and in-flight (submitted, not finished) counters
//! - The instant of the most recent task completion, which only moves forward
//! - Shutdown: stop accepting work, discard queued tasks, wait for running ones

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

type Job = BoxFuture<'static, ()>;

struct Shared {
    sender: mpsc::UnboundedSender<Job>,
    accepting: AtomicBool,
    pending: AtomicUsize,
    in_flight: AtomicUsize,
    epoch: Instant,
    /// Nanoseconds after `epoch` of the latest completion
    last_completion: AtomicU64,
}

impl Shared {
    /// Moves the last-completion mark to `at` unless a later one is already stored
    fn record_completion(&self, at: Instant) {
        let nanos = at.saturating_duration_since(self.epoch).as_nanos() as u64;
        let mut current = self.last_completion.load(Ordering::Acquire);

        while nanos > current {
            match self.last_completion.compare_exchange_weak(
                current,
                nanos,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    fn finish_one(&self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A bounded pool of workers pulling tasks from a shared queue
///
/// Cloning a `WorkerPool` yields another handle to the same pool, which is how
/// running tasks submit follow-up work.
#[derive(Clone)]
pub struct WorkerPool {
    shared: Arc<Shared>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl WorkerPool {
    /// Starts `size` workers on the current tokio runtime
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let receiver = Arc::new(Mutex::new(receiver));

        let shared = Arc::new(Shared {
            sender,
            accepting: AtomicBool::new(true),
            pending: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            epoch: Instant::now(),
            last_completion: AtomicU64::new(0),
        });

        let workers = (0..size.max(1))
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&shared),
                    Arc::clone(&receiver),
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        Self {
            shared,
            shutdown_tx: Arc::new(shutdown_tx),
            workers: Arc::new(Mutex::new(workers)),
        }
    }

    /// Enqueues a task; never waits
    ///
    /// Returns false if the pool has been shut down, in which case the task is
    /// dropped without running.
    pub fn submit<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.shared.accepting.load(Ordering::Acquire) {
            tracing::debug!("Pool is shut down, rejecting task");
            return false;
        }

        self.shared.in_flight.fetch_add(1, Ordering::AcqRel);
        self.shared.pending.fetch_add(1, Ordering::AcqRel);

        if self.shared.sender.send(task.boxed()).is_err() {
            self.shared.pending.fetch_sub(1, Ordering::AcqRel);
            self.shared.finish_one();
            tracing::debug!("Task queue closed, rejecting task");
            return false;
        }

        true
    }

    /// Number of queued tasks that no worker has started yet
    pub fn pending_count(&self) -> usize {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Number of tasks submitted but not yet finished or discarded
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::Acquire)
    }

    /// Instant of the most recent task completion (pool creation if none)
    pub fn last_completion_time(&self) -> Instant {
        self.shared.epoch + Duration::from_nanos(self.shared.last_completion.load(Ordering::Acquire))
    }

    /// Time elapsed since the most recent task completion
    pub fn idle_for(&self) -> Duration {
        self.last_completion_time().elapsed()
    }

    pub fn is_shutdown(&self) -> bool {
        !self.shared.accepting.load(Ordering::Acquire)
    }

    /// Stops accepting work and tells workers to exit once their current task ends
    ///
    /// Tasks still waiting in the queue are discarded without running.
    pub fn shutdown(&self) {
        if self.shared.accepting.swap(false, Ordering::AcqRel) {
            tracing::debug!("Shutting down worker pool");
        }
        self.shutdown_tx.send_replace(true);
    }

    /// Waits up to `timeout` for every worker to exit
    ///
    /// Returns true if the pool fully drained in time. Workers still running
    /// after the timeout are left to finish in the background.
    pub async fn await_drain(&self, timeout: Duration) -> bool {
        let handles = std::mem::take(&mut *self.workers.lock().await);
        tokio::time::timeout(timeout, join_all(handles)).await.is_ok()
    }
}

async fn shutdown_signalled(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

async fn run_worker(
    id: usize,
    shared: Arc<Shared>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        let job = {
            let mut queue = receiver.lock().await;
            tokio::select! {
                biased;
                _ = shutdown_signalled(&mut shutdown_rx) => {
                    let mut discarded = 0;
                    while let Ok(job) = queue.try_recv() {
                        drop(job);
                        shared.pending.fetch_sub(1, Ordering::AcqRel);
                        shared.finish_one();
                        discarded += 1;
                    }
                    if discarded > 0 {
                        tracing::debug!("Worker {} discarded {} queued tasks", id, discarded);
                    }
                    None
                }
                job = queue.recv() => job,
            }
        };

        let Some(job) = job else {
            break;
        };
        shared.pending.fetch_sub(1, Ordering::AcqRel);

        if AssertUnwindSafe(job).catch_unwind().await.is_err() {
            tracing::error!("Worker {}: task panicked", id);
        }

        shared.record_completion(Instant::now());
        shared.finish_one();
    }

    tracing::trace!("Worker {} exiting", id);
}
