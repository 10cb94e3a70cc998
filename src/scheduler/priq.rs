use std::cmp;

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, trace};

use super::{GanttSlice, Priority, Process, ScheduleEntry};
use crate::core::{
    Result, SimError, Ticks,
    stats::{mean, round2},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritySchedule {
    /// In completion order.
    pub entries: Vec<ScheduleEntry>,
    pub gantt_chart: Vec<GanttSlice>,
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
}

impl PrioritySchedule {
    /// End of the last slice.
    pub fn makespan(&self) -> Ticks {
        self.gantt_chart.last().map_or(0, |slice| slice.end_time)
    }

    /// Time the CPU spent with nothing eligible to run.
    pub fn idle_time(&self) -> Ticks {
        let busy: Ticks = self
            .gantt_chart
            .iter()
            .map(|slice| slice.end_time - slice.start_time)
            .sum();
        self.makespan() - busy
    }
}

// Index into the seed order; breaks priority ties.
type SeedIndex = usize;

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
struct Rank {
    priority: Priority,
    seed: SeedIndex,
}

// KeyedPriorityQueue is a max-heap; the most urgent rank must compare greatest
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        (other.priority, other.seed).cmp(&(self.priority, self.seed))
    }
}

fn validate(processes: &[Process]) -> Result<()> {
    if processes.is_empty() {
        return Err(SimError::invalid("processes", "at least one process is required"));
    }

    let mut seen = FxHashSet::default();
    for process in processes {
        if process.id.trim().is_empty() {
            return Err(SimError::invalid("process id", "must not be empty"));
        }
        if process.burst_time == 0 {
            return Err(SimError::invalid(
                "burst time",
                format!("process {} must have a positive burst time", process.id),
            ));
        }
        if !seen.insert(process.id.as_str()) {
            return Err(SimError::InvariantViolation(format!(
                "duplicate process id {}",
                process.id
            )));
        }
    }

    Ok(())
}

/// Non-preemptive priority scheduling over a discrete clock.
///
/// A process becomes eligible once the clock reaches its arrival time. Among
/// eligible processes the smallest priority runs to completion; ties go to
/// the earlier arrival, then to the earlier position in `processes`. When
/// nothing is eligible the clock jumps to the next arrival without emitting a
/// slice.
pub fn schedule(processes: &[Process]) -> Result<PrioritySchedule> {
    validate(processes)?;

    let mut seeded: Vec<&Process> = processes.iter().collect();
    seeded.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.priority.cmp(&b.priority))
    });

    let mut ready: KeyedPriorityQueue<SeedIndex, Rank> = KeyedPriorityQueue::new();
    let mut cursor: SeedIndex = 0;
    let mut now: Ticks = 0;
    let mut entries = Vec::with_capacity(seeded.len());
    let mut gantt_chart = Vec::with_capacity(seeded.len());

    while entries.len() < seeded.len() {
        // Arrivals are contiguous in seed order
        while let Some(process) = seeded.get(cursor).filter(|p| p.arrival_time <= now) {
            ready.push(
                cursor,
                Rank {
                    priority: process.priority,
                    seed: cursor,
                },
            );
            cursor += 1;
        }

        let Some((seed, _)) = ready.pop() else {
            let next = seeded.get(cursor).ok_or_else(|| {
                SimError::InvariantViolation("no eligible or pending process remains".into())
            })?;
            trace!(from = now, to = next.arrival_time, "cpu idle");
            now = next.arrival_time;
            continue;
        };

        let process = seeded[seed];
        let end_time = now.checked_add(process.burst_time).ok_or_else(|| {
            SimError::invalid("burst time", format!("process {} overflows the clock", process.id))
        })?;
        trace!(id = %process.id, start = now, end = end_time, "dispatch");

        gantt_chart.push(GanttSlice {
            id: process.id.clone(),
            start_time: now,
            end_time,
        });

        let turnaround_time = end_time - process.arrival_time;
        entries.push(ScheduleEntry {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            completion_time: end_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
        });

        now = end_time;
    }

    let average = |metric: fn(&ScheduleEntry) -> Ticks| {
        mean(entries.iter().map(|e| metric(e) as f64))
            .map(round2)
            .ok_or_else(|| SimError::InvariantViolation("no completed processes".into()))
    };
    let avg_turnaround_time = average(|e| e.turnaround_time)?;
    let avg_waiting_time = average(|e| e.waiting_time)?;

    debug!(
        processes = entries.len(),
        makespan = now,
        avg_turnaround_time,
        avg_waiting_time,
        "priority schedule computed"
    );

    Ok(PrioritySchedule {
        entries,
        gantt_chart,
        avg_turnaround_time,
        avg_waiting_time,
    })
}
