//! Process-wide network stack lifetime.
//!
//! Some platforms require the socket library to be initialized before the
//! first socket is created and torn down after the last one is gone. The
//! standard library performs the actual Winsock startup lazily, so the guard
//! here only tracks how many transports are alive and marks the first/last
//! transitions. Every [`TcpTransport`](crate::TcpTransport) holds one guard.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

static LIVE_TRANSPORTS: Mutex<usize> = Mutex::new(0);

fn live_count() -> MutexGuard<'static, usize> {
    // The counter stays consistent even if a holder panicked mid-update.
    LIVE_TRANSPORTS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Reference-counted handle on the process network stack.
#[derive(Debug)]
pub struct NetStackGuard {
    _private: (),
}

impl NetStackGuard {
    /// Register one more live transport.
    pub fn acquire() -> Self {
        let mut live = live_count();
        if *live == 0 {
            debug!("network stack initialized");
        }
        *live += 1;
        Self { _private: () }
    }

    /// Number of guards currently alive in this process.
    pub fn live() -> usize {
        *live_count()
    }
}

impl Clone for NetStackGuard {
    fn clone(&self) -> Self {
        Self::acquire()
    }
}

impl Drop for NetStackGuard {
    fn drop(&mut self) {
        let mut live = live_count();
        *live = live.saturating_sub(1);
        if *live == 0 {
            debug!("network stack released");
        }
    }
}
