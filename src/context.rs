use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::Error;

/// A cancellation signal, checked once before a run starts parsing.
#[derive(Debug, Clone, Default)]
pub struct Context {
    canceled: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

/// Cancels the [`Context`] it was created with. Can be sent to another
/// thread.
#[derive(Debug, Clone)]
pub struct Canceler {
    canceled: Arc<AtomicBool>,
}

impl Context {
    /// Never canceled, never expires.
    pub fn background() -> Context {
        Context::default()
    }

    pub fn with_cancel() -> (Context, Canceler) {
        let canceled = Arc::new(AtomicBool::new(false));
        let ctx = Context { canceled: Some(Arc::clone(&canceled)), deadline: None };
        (ctx, Canceler { canceled })
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Context {
        self.deadline = Some(match self.deadline {
            Some(it) => it.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Context {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Why this context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<Error> {
        if self.canceled.as_ref().map_or(false, |it| it.load(Ordering::SeqCst)) {
            return Some(Error::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }
}

impl Canceler {
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }
}
