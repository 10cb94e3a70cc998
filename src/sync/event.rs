use serde::Serialize;

use crate::core::ProcessId;

pub type Timestamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Reader,
    Writer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessKind {
    Request,
    Release,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessEvent {
    pub process: ProcessId,
    pub role: Role,
    pub kind: AccessKind,
    pub timestamp: Timestamp,
}

impl AccessEvent {
    pub fn request(role: Role, process: impl Into<ProcessId>, timestamp: Timestamp) -> Self {
        Self {
            process: process.into(),
            role,
            kind: AccessKind::Request,
            timestamp,
        }
    }

    pub fn release(role: Role, process: impl Into<ProcessId>, timestamp: Timestamp) -> Self {
        Self {
            process: process.into(),
            role,
            kind: AccessKind::Release,
            timestamp,
        }
    }
}

/// What applying one event did to the arbiter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Transition {
    Admitted {
        process: ProcessId,
        role: Role,
    },
    Queued {
        process: ProcessId,
        role: Role,
    },
    Released {
        process: ProcessId,
        role: Role,
    },
    // Moved from a waiting queue to active as a consequence of a release
    Promoted {
        process: ProcessId,
        role: Role,
    },
    // Event left every set unchanged (duplicate request, stray release)
    Ignored {
        process: ProcessId,
        role: Role,
        kind: AccessKind,
    },
}
