use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::types::LinkEvent;

pub(crate) static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, 8> = Channel::new();
