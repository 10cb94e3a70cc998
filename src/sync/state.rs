use std::collections::VecDeque;

use serde::Serialize;

use super::event::{AccessEvent, AccessKind, Role, Timestamp, Transition};
use crate::core::ProcessId;

/// What happens to the waiting queues when access is given back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReleasePolicy {
    /// A writer release admits every waiting reader in one batch; waiting
    /// writers stay queued until they request again. Writers can starve.
    #[default]
    PromoteReaders,
    /// A writer release hands access to the oldest waiting writer, falling
    /// back to the reader batch. The last reader out admits the oldest
    /// waiting writer, and new readers queue while any writer waits.
    HandOff,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArbiterState {
    /// Admission order, no duplicates.
    pub active_readers: Vec<ProcessId>,
    pub active_writer: Option<ProcessId>,
    pub waiting_readers: VecDeque<ProcessId>,
    pub waiting_writers: VecDeque<ProcessId>,
}

/// Snapshot after one applied event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub timestamp: Timestamp,
    pub state: ArbiterState,
    pub transitions: Vec<Transition>,
}

impl ArbiterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// An active writer excludes every reader.
    pub fn exclusion_holds(&self) -> bool {
        self.active_writer.is_none() || self.active_readers.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.active_writer.is_none() && self.active_readers.is_empty()
    }

    /// Fold one event into a fresh state; `self` is left untouched.
    pub fn transition(&self, event: &AccessEvent, policy: ReleasePolicy) -> Step {
        let mut next = self.clone();
        let mut transitions = Vec::new();
        let id = event.process.as_str();

        match (event.role, event.kind) {
            (Role::Reader, AccessKind::Request) => {
                next.reader_request(id, policy, &mut transitions)
            }
            (Role::Reader, AccessKind::Release) => {
                next.reader_release(id, policy, &mut transitions)
            }
            (Role::Writer, AccessKind::Request) => next.writer_request(id, &mut transitions),
            (Role::Writer, AccessKind::Release) => {
                next.writer_release(id, policy, &mut transitions)
            }
        }

        if transitions.is_empty() {
            transitions.push(Transition::Ignored {
                process: event.process.clone(),
                role: event.role,
                kind: event.kind,
            });
        }

        Step {
            timestamp: event.timestamp,
            state: next,
            transitions,
        }
    }

    fn reader_request(&mut self, id: &str, policy: ReleasePolicy, out: &mut Vec<Transition>) {
        if self.active_readers.iter().any(|r| r == id) {
            return;
        }

        let blocked = self.active_writer.is_some()
            || (policy == ReleasePolicy::HandOff && !self.waiting_writers.is_empty());

        if !blocked {
            self.waiting_readers.retain(|r| r != id);
            self.active_readers.push(id.to_string());
            out.push(admitted(id, Role::Reader));
        } else if !self.waiting_readers.iter().any(|r| r == id) {
            self.waiting_readers.push_back(id.to_string());
            out.push(Transition::Queued {
                process: id.to_string(),
                role: Role::Reader,
            });
        }
    }

    fn reader_release(&mut self, id: &str, policy: ReleasePolicy, out: &mut Vec<Transition>) {
        let Some(pos) = self.active_readers.iter().position(|r| r == id) else {
            return;
        };
        self.active_readers.remove(pos);
        out.push(Transition::Released {
            process: id.to_string(),
            role: Role::Reader,
        });

        if policy == ReleasePolicy::HandOff && self.is_idle() {
            self.hand_off_to_writer(out);
        }
    }

    fn writer_request(&mut self, id: &str, out: &mut Vec<Transition>) {
        if self.is_idle() {
            self.waiting_writers.retain(|w| w != id);
            self.active_writer = Some(id.to_string());
            out.push(admitted(id, Role::Writer));
        } else if !self.waiting_writers.iter().any(|w| w == id) {
            self.waiting_writers.push_back(id.to_string());
            out.push(Transition::Queued {
                process: id.to_string(),
                role: Role::Writer,
            });
        }
    }

    fn writer_release(&mut self, id: &str, policy: ReleasePolicy, out: &mut Vec<Transition>) {
        if self.active_writer.as_deref() != Some(id) {
            return;
        }
        self.active_writer = None;
        out.push(Transition::Released {
            process: id.to_string(),
            role: Role::Writer,
        });

        match policy {
            ReleasePolicy::PromoteReaders => self.promote_readers(out),
            ReleasePolicy::HandOff => {
                if !self.hand_off_to_writer(out) {
                    self.promote_readers(out);
                }
            }
        }
    }

    fn promote_readers(&mut self, out: &mut Vec<Transition>) {
        for reader in std::mem::take(&mut self.waiting_readers) {
            if self.active_readers.contains(&reader) {
                continue;
            }
            out.push(Transition::Promoted {
                process: reader.clone(),
                role: Role::Reader,
            });
            self.active_readers.push(reader);
        }
    }

    // Return true if a waiting writer took over
    fn hand_off_to_writer(&mut self, out: &mut Vec<Transition>) -> bool {
        debug_assert!(self.is_idle(), "hand-off requires an idle resource");
        let Some(writer) = self.waiting_writers.pop_front() else {
            return false;
        };
        out.push(Transition::Promoted {
            process: writer.clone(),
            role: Role::Writer,
        });
        self.active_writer = Some(writer);
        true
    }
}

fn admitted(id: &str, role: Role) -> Transition {
    Transition::Admitted {
        process: id.to_string(),
        role,
    }
}
