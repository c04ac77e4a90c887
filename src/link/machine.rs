use statig::prelude::*;

use crate::types::{LinkEvent, LinkStatus, PeerInfo};

use super::actions::LinkAction;
use super::snapshot::LinkSnapshot;

#[derive(Clone, Copy, Debug)]
pub(super) struct LinkMachine {
    pub(super) snapshot: LinkSnapshot,
}

/// Per-dispatch inputs and outputs. The reconnect policy is sampled by the
/// caller before dispatch so the machine itself stays free of shared state.
#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) reconnect_enabled: bool,
    pub(super) action: LinkAction,
}

impl LinkMachine {
    pub(super) fn new(snapshot: LinkSnapshot) -> Self {
        Self { snapshot }
    }

    fn reconnect_action(context: &DispatchContext) -> LinkAction {
        if context.reconnect_enabled {
            LinkAction::RequestReconnect
        } else {
            LinkAction::None
        }
    }
}

#[state_machine(initial = "State::disconnected()")]
impl LinkMachine {
    #[state]
    fn disconnected(
        &mut self,
        context: &mut DispatchContext,
        event: &LinkEvent,
    ) -> Outcome<State> {
        match event {
            LinkEvent::Connected { bssid, channel } => {
                self.snapshot.status = LinkStatus::Connected;
                self.snapshot.peer = Some(PeerInfo {
                    bssid: *bssid,
                    channel: *channel,
                });
                Transition(State::connected())
            }
            LinkEvent::Disconnected => {
                // Already down; the policy still decides whether this
                // notification pushes another join attempt.
                self.snapshot.status = LinkStatus::Disconnected;
                context.action = Self::reconnect_action(context);
                Handled
            }
        }
    }

    #[state]
    fn connected(&mut self, context: &mut DispatchContext, event: &LinkEvent) -> Outcome<State> {
        match event {
            LinkEvent::Connected { bssid, channel } => {
                // Repeat association; refresh the peer record only.
                self.snapshot.peer = Some(PeerInfo {
                    bssid: *bssid,
                    channel: *channel,
                });
                Handled
            }
            LinkEvent::Disconnected => {
                self.snapshot.status = LinkStatus::Disconnected;
                context.action = Self::reconnect_action(context);
                Transition(State::disconnected())
            }
        }
    }
}
