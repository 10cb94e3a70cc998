use tracing::{trace, warn};

use super::{
    event::{AccessEvent, Timestamp},
    observer::Observer,
    state::{ArbiterState, ReleasePolicy, Step},
};
use crate::core::{Result, SimError};

/// Reader-writer arbiter for a single timeline.
///
/// Each [`apply`](Self::apply) folds one event into the current
/// [`ArbiterState`] and returns the resulting snapshot. Events must arrive in
/// timestamp order; the arbiter does not re-sort them.
#[derive(Debug, Default)]
pub struct AccessArbiter {
    state: ArbiterState,
    policy: ReleasePolicy,
    last_timestamp: Option<Timestamp>,
    observer: Observer,
}

impl AccessArbiter {
    pub fn new() -> Self {
        Self::with_policy(ReleasePolicy::default())
    }

    pub fn with_policy(policy: ReleasePolicy) -> Self {
        Self {
            state: ArbiterState::new(),
            policy,
            last_timestamp: None,
            observer: Observer::new(),
        }
    }

    pub fn apply(&mut self, event: &AccessEvent) -> Result<Step> {
        if let Some(last) = self.last_timestamp
            && event.timestamp < last
        {
            warn!(
                process = %event.process,
                timestamp = event.timestamp,
                last,
                "event out of timestamp order"
            );
            return Err(SimError::invalid(
                "timestamp",
                format!(
                    "event for {} at {} precedes previous event at {last}",
                    event.process, event.timestamp
                ),
            ));
        }

        let step = self.state.transition(event, self.policy);
        trace!(
            process = %event.process,
            role = ?event.role,
            kind = ?event.kind,
            transitions = ?step.transitions,
            "arbiter transition"
        );

        self.state = step.state.clone();
        self.last_timestamp = Some(event.timestamp);
        self.observer.observe(&self.state);
        Ok(step)
    }

    /// Apply every event of a fresh run and collect the snapshots.
    pub fn replay(events: &[AccessEvent], policy: ReleasePolicy) -> Result<Vec<Step>> {
        let mut arbiter = Self::with_policy(policy);
        events.iter().map(|event| arbiter.apply(event)).collect()
    }

    pub fn state(&self) -> &ArbiterState {
        &self.state
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    pub fn applied(&self) -> u64 {
        self.observer.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::event::{Role, Transition};

    #[test]
    fn apply_returns_snapshot_after_each_event() {
        let mut arbiter = AccessArbiter::new();

        let step = arbiter.apply(&AccessEvent::request(Role::Writer, "W1", 10)).unwrap();
        assert_eq!(step.timestamp, 10);
        assert_eq!(step.state.active_writer.as_deref(), Some("W1"));
        assert_eq!(
            step.transitions,
            vec![Transition::Admitted {
                process: "W1".into(),
                role: Role::Writer
            }]
        );

        arbiter.apply(&AccessEvent::request(Role::Reader, "R1", 20)).unwrap();
        let step = arbiter.apply(&AccessEvent::release(Role::Writer, "W1", 30)).unwrap();
        assert_eq!(step.state.active_readers, vec!["R1".to_string()]);
        assert_eq!(arbiter.state(), &step.state);
        assert_eq!(arbiter.applied(), 3);
    }

    #[test]
    fn out_of_order_event_is_rejected_without_changing_state() {
        let mut arbiter = AccessArbiter::new();
        arbiter.apply(&AccessEvent::request(Role::Reader, "R1", 100)).unwrap();
        let before = arbiter.state().clone();

        let err = arbiter
            .apply(&AccessEvent::request(Role::Writer, "W1", 50))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { .. }));
        assert_eq!(arbiter.state(), &before);

        // Equal timestamps are fine
        assert!(arbiter.apply(&AccessEvent::release(Role::Reader, "R1", 100)).is_ok());
    }

    #[test]
    fn replay_matches_incremental_apply() {
        let events = vec![
            AccessEvent::request(Role::Reader, "R1", 0),
            AccessEvent::request(Role::Writer, "W1", 1),
            AccessEvent::release(Role::Reader, "R1", 2),
        ];
        let steps = AccessArbiter::replay(&events, ReleasePolicy::HandOff).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].state.active_writer.as_deref(), Some("W1"));

        let steps = AccessArbiter::replay(&events, ReleasePolicy::PromoteReaders).unwrap();
        assert_eq!(steps[2].state.active_writer, None);
        assert_eq!(steps[2].state.waiting_writers.len(), 1);
    }
}
