use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Polled by long-running loops to find out whether the user asked them to stop.
pub trait CancelSignal {
    fn is_cancel_requested(&self) -> bool;
}

/// Used for batch renders, which always run to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancel_requested(&self) -> bool {
        false
    }
}

impl<F> CancelSignal for F
where
    F: Fn() -> bool,
{
    fn is_cancel_requested(&self) -> bool {
        self()
    }
}

/**
 * Cancellation flag shared between the thread that polls the keyboard and the
 * thread that renders. Cloning produces another handle onto the same flag.
 */
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    requested: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }

    pub fn request_cancel(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }
}

impl CancelSignal for CancelFlag {
    fn is_cancel_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}
