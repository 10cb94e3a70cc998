use super::source::EventSource;
use crate::{
    core::Result,
    sync::{AccessArbiter, AccessEvent, ArbiterState, ReleasePolicy, Step},
};

/// Replays an event source through an arbiter one event per `step()`.
pub struct Sim {
    pub arbiter: AccessArbiter,
    pub events: Vec<AccessEvent>,
    event_cursor: usize,
}

impl Sim {
    pub fn new<E: EventSource>(source: &mut E, policy: ReleasePolicy) -> Self {
        Self {
            arbiter: AccessArbiter::with_policy(policy),
            events: source.events(),
            event_cursor: 0,
        }
    }

    /// Apply the next event; `None` once the timeline is exhausted.
    pub fn step(&mut self) -> Result<Option<Step>> {
        let Some(event) = self.events.get(self.event_cursor) else {
            return Ok(None);
        };

        let step = self.arbiter.apply(event)?;
        self.event_cursor += 1;
        Ok(Some(step))
    }

    pub fn next_event(&self) -> Option<&AccessEvent> {
        self.events.get(self.event_cursor)
    }

    pub fn state(&self) -> &ArbiterState {
        self.arbiter.state()
    }

    pub fn all_events_applied(&self) -> bool {
        self.event_cursor == self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sim::source::ScriptedEvents,
        sync::{AccessEvent, Role},
    };

    #[test]
    fn steps_until_exhausted() {
        let mut source = ScriptedEvents::new(vec![
            AccessEvent::request(Role::Writer, "W1", 0),
            AccessEvent::request(Role::Reader, "R1", 1),
            AccessEvent::release(Role::Writer, "W1", 2),
        ]);
        let mut sim = Sim::new(&mut source, ReleasePolicy::PromoteReaders);

        let mut snapshots = Vec::new();
        while !sim.all_events_applied() {
            snapshots.push(sim.step().unwrap().unwrap());
        }

        assert_eq!(snapshots.len(), 3);
        assert!(sim.step().unwrap().is_none());
        assert!(sim.next_event().is_none());
        assert_eq!(sim.state().active_readers, vec!["R1".to_string()]);
    }

    #[test]
    fn out_of_order_script_stops_the_run() {
        let mut source = ScriptedEvents::new(vec![
            AccessEvent::request(Role::Reader, "R1", 5),
            AccessEvent::request(Role::Reader, "R2", 1),
        ]);
        let mut sim = Sim::new(&mut source, ReleasePolicy::default());

        assert!(sim.step().unwrap().is_some());
        assert!(sim.step().is_err());
        assert!(!sim.all_events_applied());
        assert_eq!(sim.next_event().map(|e| e.process.as_str()), Some("R2"));
    }
}
