use statig::blocking::IntoStateMachineExt as _;

use crate::types::LinkEvent;

use super::actions::LinkAction;
use super::machine::{DispatchContext, LinkMachine};
use super::snapshot::LinkSnapshot;

#[derive(Clone, Copy, Debug)]
pub struct LinkApplyResult {
    pub before: LinkSnapshot,
    pub after: LinkSnapshot,
    pub action: LinkAction,
}

impl LinkApplyResult {
    pub fn changed(self) -> bool {
        self.before.status != self.after.status
    }
}

/// Facade over the statig machine: one event in, a before/after snapshot and
/// the requested side effect out. No I/O happens in here.
pub struct LinkEngine {
    machine: statig::blocking::StateMachine<LinkMachine>,
}

impl LinkEngine {
    pub fn new(snapshot: LinkSnapshot) -> Self {
        Self {
            machine: LinkMachine::new(snapshot).state_machine(),
        }
    }

    pub fn snapshot(&self) -> LinkSnapshot {
        self.machine.inner().snapshot
    }

    pub fn apply(&mut self, event: LinkEvent, reconnect_enabled: bool) -> LinkApplyResult {
        let before = self.snapshot();
        let mut context = DispatchContext {
            reconnect_enabled,
            action: LinkAction::None,
        };
        self.machine.handle_with_context(&event, &mut context);
        let after = self.snapshot();
        LinkApplyResult {
            before,
            after,
            action: context.action,
        }
    }
}
