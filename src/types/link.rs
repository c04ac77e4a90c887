use super::Bssid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStatus {
    Disconnected,
    Connected,
}

/// One station-link notification from the radio driver. Each value is
/// delivered through the link event queue and consumed exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    Connected { bssid: Bssid, channel: u8 },
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerInfo {
    pub bssid: Bssid,
    pub channel: u8,
}
