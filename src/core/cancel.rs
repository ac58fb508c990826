//! One-way stop flag shared between the monitor loop and whatever asks it to stop.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::capabilities::CancellationSource;

#[derive(Default)]
struct Inner {
    signaled: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable stop signal.
///
/// Goes from not-signaled to signaled exactly once. Waiting on it is
/// alertable: `wait_timeout` returns as soon as `signal` is called from any
/// thread instead of sleeping the full increment.
#[derive(Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Calling it again has no effect.
    pub fn signal(&self) {
        let mut signaled = self.inner.signaled.lock();
        if !*signaled {
            *signaled = true;
            self.inner.wake.notify_all();
        }
    }
}

impl CancellationSource for StopSignal {
    fn is_signaled(&self) -> bool {
        *self.inner.signaled.lock()
    }

    fn wait_timeout(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        let mut signaled = self.inner.signaled.lock();
        while !*signaled {
            if self.inner.wake.wait_until(&mut signaled, deadline).timed_out() {
                break;
            }
        }
    }
}

/// Plain polled flag, for callers that already hold an `Arc<AtomicBool>`
impl CancellationSource for Arc<AtomicBool> {
    fn is_signaled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}
