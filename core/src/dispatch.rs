//! Background execution for callback-mode calls.
//!
//! # Design
//! Network work runs on a small pool of named worker threads fed through a
//! crossbeam channel. Results never invoke user callbacks on a worker:
//! the worker posts a continuation onto the `CallbackContext` captured when
//! the call was enqueued, and the continuation runs when the thread that
//! owns the context pumps it. `CallbackContext` is `!Send`, so only its
//! creating thread can run callbacks.

use std::marker::PhantomData;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::error::{CmaError, CmaResult};

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size worker pool. Dropping it lets queued jobs finish, then joins
/// the workers.
pub struct Dispatcher {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(workers: usize) -> CmaResult<Self> {
        let (sender, receiver) = channel::unbounded::<Job>();
        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("cma-worker-{index}"))
                .spawn(move || {
                    for job in receiver.iter() {
                        job();
                    }
                })
                .map_err(|e| CmaError::Dispatch(e.to_string()))?;
            handles.push(handle);
        }
        debug!(workers, "callback dispatcher started");
        Ok(Self {
            sender: Some(sender),
            workers: handles,
        })
    }

    pub(crate) fn submit(&self, job: Job) -> CmaResult<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| CmaError::Dispatch("dispatcher is shut down".to_string()))?;
        sender
            .send(job)
            .map_err(|_| CmaError::Dispatch("all workers have exited".to_string()))
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.sender.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("callback worker panicked");
            }
        }
    }
}

/// The execution context callbacks are delivered to.
///
/// Create one on the thread that should receive callbacks and pump it with
/// `run_pending` or `run_until`.
pub struct CallbackContext {
    sender: Sender<Job>,
    receiver: Receiver<Job>,
    owner: ThreadId,
    _not_send: PhantomData<*const ()>,
}

/// Sendable handle used by workers to post continuations.
#[derive(Clone)]
pub(crate) struct ContextHandle {
    sender: Sender<Job>,
}

impl ContextHandle {
    pub(crate) fn post(&self, job: Job) {
        // The context may have been dropped by a caller that stopped caring.
        if self.sender.send(job).is_err() {
            debug!("callback context is gone, dropping result");
        }
    }
}

impl Default for CallbackContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackContext {
    pub fn new() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            sender,
            receiver,
            owner: thread::current().id(),
            _not_send: PhantomData,
        }
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    pub(crate) fn handle(&self) -> ContextHandle {
        ContextHandle {
            sender: self.sender.clone(),
        }
    }

    /// Run every callback that is ready now. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Block until `count` callbacks have run or `timeout` elapses. Returns
    /// how many ran.
    pub fn run_until(&self, count: usize, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut ran = 0;
        while ran < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(job) => {
                    job();
                    ran += 1;
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        ran
    }
}
