use serde::Serialize;
use tracing::debug;

use super::{Cylinder, DiskScheduler};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskTrace {
    /// Head positions visited, starting with the initial head.
    pub sequence: Vec<Cylinder>,
    pub per_step_movement: Vec<u64>,
    pub total_movement: u64,
}

impl DiskTrace {
    /// `(from, to, movement)` for every serviced request.
    pub fn steps(&self) -> impl Iterator<Item = (Cylinder, Cylinder, u64)> + '_ {
        self.sequence
            .windows(2)
            .zip(&self.per_step_movement)
            .map(|(pair, &movement)| (pair[0], pair[1], movement))
    }
}

pub struct Fcfs;

impl DiskScheduler for Fcfs {
    fn schedule(&self, initial_head: Cylinder, requests: &[Cylinder]) -> DiskTrace {
        schedule(initial_head, requests)
    }
}

/// Service requests strictly in arrival order.
pub fn schedule(initial_head: Cylinder, requests: &[Cylinder]) -> DiskTrace {
    let mut current = initial_head;
    let mut sequence = Vec::with_capacity(requests.len() + 1);
    let mut per_step_movement = Vec::with_capacity(requests.len());
    sequence.push(current);

    for &request in requests {
        per_step_movement.push(current.abs_diff(request));
        current = request;
        sequence.push(current);
    }

    let total_movement = per_step_movement.iter().sum();
    debug!(
        initial_head,
        requests = requests.len(),
        total_movement,
        "fcfs disk schedule computed"
    );

    DiskTrace {
        sequence,
        per_step_movement,
        total_movement,
    }
}
