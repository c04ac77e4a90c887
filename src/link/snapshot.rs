use crate::types::{LinkStatus, PeerInfo};

/// Published view of the station link. `peer` keeps the last associated
/// station for diagnostics and survives a disconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub status: LinkStatus,
    pub peer: Option<PeerInfo>,
}

impl Default for LinkSnapshot {
    fn default() -> Self {
        Self {
            status: LinkStatus::Disconnected,
            peer: None,
        }
    }
}
