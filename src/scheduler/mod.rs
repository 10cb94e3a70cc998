pub mod fcfs;
pub mod priq;

use serde::Serialize;

use crate::core::{ProcessId, Ticks};
pub use fcfs::{DiskTrace, Fcfs};
pub use priq::PrioritySchedule;

pub type Cylinder = u64;

/// Lower values are more urgent.
pub type Priority = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
}

impl Process {
    pub fn new(
        id: impl Into<ProcessId>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttSlice {
    pub id: ProcessId,
    pub start_time: Ticks,
    pub end_time: Ticks,
}

/// Disk-head scheduling policy: services `requests` starting from `initial_head`.
pub trait DiskScheduler {
    fn schedule(&self, initial_head: Cylinder, requests: &[Cylinder]) -> DiskTrace;
}
