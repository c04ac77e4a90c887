//! Binary-flag status signal for the station link.
//!
//! Two bits form a mutually exclusive pair. The link supervisor is the only
//! writer and clears the opposite bit before setting the new one, so waiters
//! never observe both bits outside the atomic update window. Any number of
//! readers may poll `bits`; up to [`LINK_SIGNAL_WAITERS`] callers may block
//! in `wait` at the same time.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, watch::Watch};
use embassy_time::{with_timeout, Duration};

pub const CONNECTED_BIT: u8 = 1 << 0;
pub const DISCONNECTED_BIT: u8 = 1 << 1;

const LINK_SIGNAL_WAITERS: usize = 4;

/// Outcome of [`LinkSignal::wait`]. A timeout is a normal result meaning
/// "status did not change in time", not a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Observed,
    TimedOut,
}

impl WaitOutcome {
    pub fn observed(self) -> bool {
        matches!(self, Self::Observed)
    }
}

pub struct LinkSignal {
    bits: AtomicU8,
    updates: Watch<CriticalSectionRawMutex, u8, LINK_SIGNAL_WAITERS>,
}

impl LinkSignal {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
            updates: Watch::new(),
        }
    }

    pub fn bits(&self) -> u8 {
        self.bits.load(Ordering::Relaxed)
    }

    pub fn is_set(&self, bit: u8) -> bool {
        self.bits() & bit != 0
    }

    // Single-writer discipline: only the link supervisor mutates the bit
    // pair, so the read-modify-write plus watch publish cannot interleave
    // with another writer.
    pub fn set(&self, bit: u8) {
        let bits = self.bits.fetch_or(bit, Ordering::Relaxed) | bit;
        self.updates.sender().send(bits);
    }

    pub fn clear(&self, bit: u8) {
        let bits = self.bits.fetch_and(!bit, Ordering::Relaxed) & !bit;
        self.updates.sender().send(bits);
    }

    /// Suspends until `bit` is observed set or `timeout` elapses. A fresh
    /// watch receiver sees the current value first, so a bit set between the
    /// initial poll and the subscription is not missed.
    pub async fn wait(&self, bit: u8, timeout: Duration) -> WaitOutcome {
        if self.is_set(bit) {
            return WaitOutcome::Observed;
        }
        let mut updates = self
            .updates
            .receiver()
            .expect("link signal waiter limit exceeded");
        let observed = with_timeout(timeout, async {
            loop {
                if self.is_set(bit) {
                    return;
                }
                let bits = updates.changed().await;
                if bits & bit != 0 {
                    return;
                }
            }
        })
        .await;
        match observed {
            Ok(()) => WaitOutcome::Observed,
            Err(_) => WaitOutcome::TimedOut,
        }
    }
}
