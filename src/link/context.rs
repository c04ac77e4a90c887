use crate::types::LinkStatus;

use super::policy::ReconnectPolicy;
use super::signal::{LinkSignal, CONNECTED_BIT, DISCONNECTED_BIT};

/// Shared link state owned by the application root and handed to the
/// supervisor and the AP activation path by reference. Keeps the signal and
/// the reconnect policy together instead of scattering process globals.
pub struct LinkContext {
    signal: LinkSignal,
    reconnect: ReconnectPolicy,
}

impl LinkContext {
    pub const fn new() -> Self {
        Self {
            signal: LinkSignal::new(),
            reconnect: ReconnectPolicy::new(),
        }
    }

    pub fn signal(&self) -> &LinkSignal {
        &self.signal
    }

    pub fn reconnect_policy(&self) -> &ReconnectPolicy {
        &self.reconnect
    }

    /// Single-writer signal update: the opposite bit is cleared before the
    /// new one is set so both are never observed together.
    pub fn publish(&self, status: LinkStatus) {
        match status {
            LinkStatus::Connected => {
                self.signal.clear(DISCONNECTED_BIT);
                self.signal.set(CONNECTED_BIT);
            }
            LinkStatus::Disconnected => {
                self.signal.clear(CONNECTED_BIT);
                self.signal.set(DISCONNECTED_BIT);
            }
        }
    }
}
