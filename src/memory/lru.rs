use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{Result, SimError, stats::round2};

pub type PageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Hit,
    Fault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStep {
    pub request: PageId,
    /// Resident pages, least recently used first.
    pub frames_before: Vec<PageId>,
    pub frames_after: Vec<PageId>,
    pub outcome: Outcome,
    /// Page dropped to make room, if the frames were full.
    pub evicted: Option<PageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LruTrace {
    pub steps: Vec<PageStep>,
    pub total_faults: usize,
    pub hit_ratio: f64,
}

impl LruTrace {
    pub fn total_hits(&self) -> usize {
        self.steps.len() - self.total_faults
    }

    /// Hit ratio as a percentage rounded to two decimals.
    pub fn hit_ratio_percent(&self) -> f64 {
        round2(self.hit_ratio * 100.0)
    }

    pub fn final_frames(&self) -> &[PageId] {
        self.steps
            .last()
            .map_or(&[][..], |step| step.frames_after.as_slice())
    }
}

/// Recency-ordered frames; index 0 is the least recently used page.
#[derive(Debug, Clone)]
struct Frames {
    pages: Vec<PageId>,
    capacity: usize,
}

impl Frames {
    fn new(capacity: usize) -> Self {
        Self {
            pages: Vec::with_capacity(capacity),
            capacity,
        }
    }

    // Return the outcome and the evicted page, if any
    fn touch(&mut self, page: PageId) -> (Outcome, Option<PageId>) {
        if let Some(pos) = self.pages.iter().position(|&p| p == page) {
            self.pages.remove(pos);
            self.pages.push(page);
            return (Outcome::Hit, None);
        }

        let evicted = if self.pages.len() < self.capacity {
            None
        } else {
            Some(self.pages.remove(0))
        };
        self.pages.push(page);
        (Outcome::Fault, evicted)
    }
}

/// Replay `references` against `capacity` frames under LRU replacement.
pub fn replace(references: &[PageId], capacity: usize) -> Result<LruTrace> {
    if capacity == 0 {
        return Err(SimError::invalid("capacity", "must be greater than zero"));
    }
    if references.is_empty() {
        return Err(SimError::invalid("references", "must not be empty"));
    }

    let mut frames = Frames::new(capacity);
    let mut steps = Vec::with_capacity(references.len());
    let mut total_faults = 0;

    for &request in references {
        let frames_before = frames.pages.clone();
        let (outcome, evicted) = frames.touch(request);
        if outcome == Outcome::Fault {
            total_faults += 1;
        }
        trace!(request, ?outcome, ?evicted, "page reference");

        debug_assert!(frames.pages.len() <= capacity, "frames exceed capacity");
        steps.push(PageStep {
            request,
            frames_before,
            frames_after: frames.pages.clone(),
            outcome,
            evicted,
        });
    }

    let n = references.len();
    let hit_ratio = (n - total_faults) as f64 / n as f64;
    debug!(references = n, capacity, total_faults, hit_ratio, "lru trace computed");

    Ok(LruTrace {
        steps,
        total_faults,
        hit_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_example() {
        let trace = replace(&[1, 2, 3, 1, 4], 3).unwrap();

        let outcomes: Vec<_> = trace.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Fault,
                Outcome::Fault,
                Outcome::Fault,
                Outcome::Hit,
                Outcome::Fault
            ]
        );
        assert_eq!(trace.total_faults, 4);
        assert_eq!(trace.total_hits(), 1);
        assert_eq!(trace.final_frames(), &[3, 1, 4]);
        assert_eq!(trace.hit_ratio_percent(), 20.0);
        assert_eq!(trace.steps[4].evicted, Some(2));
    }

    #[test]
    fn hit_moves_page_to_most_recent_end() {
        let trace = replace(&[1, 2, 3, 1], 3).unwrap();
        let hit = &trace.steps[3];
        assert_eq!(hit.frames_before, vec![1, 2, 3]);
        assert_eq!(hit.frames_after, vec![2, 3, 1]);
        assert_eq!(hit.evicted, None);
    }

    #[test]
    fn single_frame_faults_on_every_change() {
        let trace = replace(&[7, 7, 0, 7], 1).unwrap();
        assert_eq!(trace.total_faults, 3);
        assert_eq!(trace.final_frames(), &[7]);
        assert_eq!(trace.steps[2].evicted, Some(7));
    }

    #[test]
    fn rejects_zero_capacity_and_empty_trace() {
        assert!(matches!(replace(&[1], 0), Err(SimError::InvalidInput { .. })));
        assert!(matches!(replace(&[], 2), Err(SimError::InvalidInput { .. })));
    }
}
