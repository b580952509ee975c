use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deferred unit of work executed on the engine's own thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartTask {
    DrawSegment(usize),
    ReleaseScrollLock,
    /// Carries the playback run it belongs to; steps of a stopped run are
    /// dropped.
    PlaybackStep(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub due: Duration,
    pub sequence: u64,
    pub task: ChartTask,
}

/// Cooperative timer queue driven by a virtual clock.
///
/// Tasks run in `(due, sequence)` order, so tasks with equal delays keep
/// their scheduling order. Nothing is ever cancelled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQueue {
    now: Duration,
    next_sequence: u64,
    pending: Vec<ScheduledTask>,
}

impl TaskQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, task: ChartTask, delay: Duration) {
        let scheduled = ScheduledTask {
            due: self.now + delay,
            sequence: self.next_sequence,
            task,
        };
        self.next_sequence += 1;
        self.pending.push(scheduled);
    }

    /// Due time of the next task to run.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.next_index().map(|index| self.pending[index].due)
    }

    /// Removes the next task due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<ChartTask> {
        let index = self.next_index()?;
        if self.pending[index].due > deadline {
            return None;
        }
        let scheduled = self.pending.swap_remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Pending tasks in execution order.
    #[must_use]
    pub fn pending(&self) -> Vec<ScheduledTask> {
        let mut ordered = self.pending.clone();
        ordered.sort_by_key(|task| (task.due, task.sequence));
        ordered
    }

    fn next_index(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, task)| (task.due, task.sequence))
            .map(|(index, _)| index)
    }
}
