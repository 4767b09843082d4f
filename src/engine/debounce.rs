use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::errors::{AppError, AppResult};

type Callback<A> = Box<dyn FnMut(A) + Send + 'static>;

struct Slot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Collapses a burst of calls into one invocation of the wrapped callback.
///
/// Every [`Debouncer::call`] cancels the invocation scheduled by the previous
/// call and schedules a new one `quiet_period` later, so only the arguments of
/// the last call in a burst reach the callback. Each instance owns its own
/// timer; separate instances never interfere.
///
/// A woken timer fires only if its generation is still current when it takes
/// the slot lock; that check and clearing `pending` happen together. The
/// callback then runs with the slot lock released, so it may call back into
/// the same debouncer.
pub struct Debouncer<A> {
    quiet_period: Duration,
    runtime: Handle,
    slot: Arc<Mutex<Slot>>,
    callback: Arc<Mutex<Callback<A>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Must be called from within a tokio runtime.
    pub fn new<F>(quiet_period: Duration, callback: F) -> AppResult<Self>
    where
        F: FnMut(A) + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|e| {
            AppError::Runtime(format!("debouncer needs a tokio runtime: {e}"))
        })?;
        Ok(Self::with_handle(runtime, quiet_period, callback))
    }

    pub fn with_handle<F>(runtime: Handle, quiet_period: Duration, callback: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        Self {
            quiet_period,
            runtime,
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                pending: None,
            })),
            callback: Arc::new(Mutex::new(Box::new(callback))),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// True while an invocation is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }

    pub fn call(&self, args: A) {
        let mut slot = self.slot.lock();
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        if let Some(previous) = slot.pending.take() {
            previous.abort();
            trace!(generation, "superseded pending invocation");
        }

        let shared = Arc::clone(&self.slot);
        let callback = Arc::clone(&self.callback);
        let quiet_period = self.quiet_period;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(quiet_period).await;
            {
                let mut slot = shared.lock();
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            trace!(generation, "quiet period elapsed, invoking callback");
            let mut callback = callback.lock();
            (*callback)(args);
        });
        slot.pending = Some(task);
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("quiet_period", &self.quiet_period)
            .finish_non_exhaustive()
    }
}
