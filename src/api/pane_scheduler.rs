use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerState {
    #[default]
    Idle,
    /// Look-ahead/look-behind draws from the last request are still queued.
    Transitioning,
}

/// Draws issued for one segment request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub segment: usize,
    /// Drawn synchronously before the request returns.
    pub immediate: Option<usize>,
    /// Drawn later from the task queue, in this order.
    pub deferred: SmallVec<[usize; 2]>,
}

/// Decides which segments to (re)draw as the current segment moves.
///
/// Only the current segment and its two neighbors are ever requested, which
/// matches the three-slot pane pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneScheduler {
    current: Option<usize>,
    state: SchedulerState,
    pending_draws: usize,
}

impl PaneScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn pending_draws(&self) -> usize {
        self.pending_draws
    }

    /// Plans a move to `segment` and makes it current.
    ///
    /// - first request or jump of more than one: draw `segment` now;
    /// - moving right or jumping: queue `segment + 1`;
    /// - moving left or jumping, unless at 0: queue `segment - 1`.
    pub fn plan(&mut self, segment: usize) -> SegmentPlan {
        let previous = self.current.map_or(-1, |current| current as i64);
        let delta = segment as i64 - previous;
        let jump = delta.abs() > 1;

        let mut plan = SegmentPlan {
            segment,
            ..SegmentPlan::default()
        };
        if self.current.is_none() || jump {
            plan.immediate = Some(segment);
        }
        if delta > 0 || jump {
            plan.deferred.push(segment + 1);
        }
        if segment > 0 && (delta < 0 || jump) {
            plan.deferred.push(segment - 1);
        }

        self.current = Some(segment);
        self.pending_draws += plan.deferred.len();
        if self.pending_draws > 0 {
            self.state = SchedulerState::Transitioning;
        }
        trace!(
            segment,
            delta,
            immediate = ?plan.immediate,
            deferred = ?plan.deferred,
            "planned segment request"
        );
        plan
    }

    /// Called once per deferred draw taken off the queue.
    pub fn deferred_draw_finished(&mut self) {
        self.pending_draws = self.pending_draws.saturating_sub(1);
        if self.pending_draws == 0 {
            self.state = SchedulerState::Idle;
        }
    }

    /// Forgets the current segment so the next request starts over.
    ///
    /// Draws already queued still run and still count as pending.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
