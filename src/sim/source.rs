use rand::prelude::*;
use tracing::debug;

use crate::{
    core::{Result, SimError},
    sync::{AccessEvent, AccessKind, Role, Timestamp},
};

/// Spacing between consecutive generated events.
pub const EVENT_SPACING: Timestamp = 1000;
/// Upper bound (exclusive) of the random offset added to each event time.
pub const EVENT_JITTER: Timestamp = 500;

/// Produces the ordered event stream that drives an arbiter run.
pub trait EventSource {
    /// Events sorted by timestamp.
    fn events(&mut self) -> Vec<AccessEvent>;
}

/// A fixed, caller-supplied timeline.
#[derive(Debug, Clone)]
pub struct ScriptedEvents {
    events: Vec<AccessEvent>,
}

impl ScriptedEvents {
    pub fn new(events: Vec<AccessEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for ScriptedEvents {
    fn events(&mut self) -> Vec<AccessEvent> {
        self.events.clone()
    }
}

#[derive(Debug, Clone)]
pub struct RandomEventsConfig {
    pub readers: usize,
    pub writers: usize,
    /// Chance that an event is a request rather than a release.
    pub request_probability: f64,
    pub seed: u64,
}

impl Default for RandomEventsConfig {
    fn default() -> Self {
        Self {
            readers: 3,
            writers: 2,
            request_probability: 0.6,
            seed: 0,
        }
    }
}

/// Seeded generator of `2 * (readers + writers)` events.
///
/// Each event picks a reader with probability `readers / total`, a uniformly
/// random id within that role, and a request with `request_probability`.
/// Event `i` happens at `i * EVENT_SPACING` plus up to `EVENT_JITTER`.
#[derive(Debug)]
pub struct RandomEvents {
    config: RandomEventsConfig,
    rng: StdRng,
}

impl RandomEvents {
    pub fn new(config: RandomEventsConfig) -> Result<Self> {
        if config.readers + config.writers == 0 {
            return Err(SimError::invalid(
                "processes",
                "at least one reader or writer is required",
            ));
        }
        if !(0.0..=1.0).contains(&config.request_probability) {
            return Err(SimError::invalid(
                "request probability",
                format!("{} is outside [0, 1]", config.request_probability),
            ));
        }

        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }
}

impl EventSource for RandomEvents {
    fn events(&mut self) -> Vec<AccessEvent> {
        let RandomEventsConfig {
            readers,
            writers,
            request_probability,
            ..
        } = self.config;
        let total = readers + writers;
        let p_reader = readers as f64 / total as f64;

        let mut events: Vec<AccessEvent> = (0..2 * total as u64)
            .map(|i| {
                let (role, id) = if self.rng.random::<f64>() < p_reader {
                    (Role::Reader, format!("R{}", self.rng.random_range(1..=readers)))
                } else {
                    (Role::Writer, format!("W{}", self.rng.random_range(1..=writers)))
                };
                let kind = if self.rng.random::<f64>() < request_probability {
                    AccessKind::Request
                } else {
                    AccessKind::Release
                };

                AccessEvent {
                    process: id,
                    role,
                    kind,
                    timestamp: i * EVENT_SPACING + self.rng.random_range(0..EVENT_JITTER),
                }
            })
            .collect();

        events.sort_by_key(|event| event.timestamp);
        debug!(events = events.len(), seed = self.config.seed, "generated access events");
        events
    }
}
