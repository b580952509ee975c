use std::time::Duration;

use tracing::{trace, warn};

use crate::host::ChartHost;

use super::{ChartEngine, ChartTask, ScheduledTask};

impl<H: ChartHost> ChartEngine<H> {
    /// Moves the virtual clock forward by `elapsed`, running every task that
    /// becomes due in `(due, sequence)` order. Returns how many ran.
    pub fn advance_time(&mut self, elapsed: Duration) -> usize {
        let deadline = self.tasks.now() + elapsed;
        let mut executed = 0;
        while let Some(task) = self.tasks.pop_due(deadline) {
            self.run_task(task);
            executed += 1;
        }
        self.tasks.advance_clock_to(deadline);
        executed
    }

    /// Runs queued tasks, including ones they schedule, until the queue is
    /// empty. Returns how many ran.
    pub fn run_until_idle(&mut self) -> usize {
        let mut executed = 0;
        while let Some(due) = self.tasks.next_due() {
            if let Some(task) = self.tasks.pop_due(due) {
                self.run_task(task);
                executed += 1;
            }
        }
        executed
    }

    /// Queued tasks in execution order.
    #[must_use]
    pub fn pending_tasks(&self) -> Vec<ScheduledTask> {
        self.tasks.pending()
    }

    /// Current time of the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.tasks.now()
    }

    fn run_task(&mut self, task: ChartTask) {
        trace!(?task, now = ?self.tasks.now(), "running task");
        match task {
            ChartTask::DrawSegment(segment) => {
                if let Err(error) = self.draw_segment(segment) {
                    warn!(segment, %error, "deferred segment draw failed");
                }
                self.scheduler.deferred_draw_finished();
            }
            ChartTask::ReleaseScrollLock => self.scroll.release(),
            ChartTask::PlaybackStep(run) => self.playback_step(run),
        }
    }
}
