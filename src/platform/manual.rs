//! Virtual-clock scheduler
//!
//! Time only moves when the host says so. Used by the native headless runner
//! and by tests.

use std::time::Duration;

use super::{Scheduler, TaskId, Timer};

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    timer: Timer,
    due: Duration,
    period: Option<Duration>,
}

/// Scheduler driven by explicit calls to [`ManualScheduler::pop_due`]
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Scheduled>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live tasks
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == task)
    }

    /// Pop the earliest task due at or before `until`, advancing the clock to
    /// its due time. Repeating tasks are rescheduled one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, Timer)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let Scheduled {
            id,
            timer,
            due,
            period,
        } = self.tasks[index].clone();
        self.now = self.now.max(due);
        match period {
            Some(period) => self.tasks[index].due += period,
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some((id, timer))
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, timer: Timer) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Scheduled {
            id,
            timer,
            due: self.now + delay,
            period,
        });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration, timer: Timer) -> TaskId {
        // A zero period would never let the clock advance
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), timer)
    }

    fn after(&mut self, delay: Duration, timer: Timer) -> TaskId {
        self.schedule(delay, None, timer)
    }

    fn cancel(&mut self, task: TaskId) {
        self.tasks.retain(|t| t.id != task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_repeating_task_fires_each_period() {
        let mut sched = ManualScheduler::new();
        let task = sched.every(16 * MS, Timer::Tick);

        let mut fired = 0;
        while let Some((id, timer)) = sched.pop_due(100 * MS) {
            assert_eq!(id, task);
            assert_eq!(timer, Timer::Tick);
            fired += 1;
        }
        assert_eq!(fired, 6);
        assert_eq!(sched.now(), 96 * MS);
        assert!(sched.is_scheduled(task));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = ManualScheduler::new();
        let task = sched.after(100 * MS, Timer::Restart);
        assert!(sched.pop_due(99 * MS).is_none());
        assert_eq!(sched.pop_due(100 * MS), Some((task, Timer::Restart)));
        assert!(sched.pop_due(1000 * MS).is_none());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_cancel_stops_task() {
        let mut sched = ManualScheduler::new();
        let task = sched.every(16 * MS, Timer::Tick);
        assert!(sched.pop_due(16 * MS).is_some());
        sched.cancel(task);
        assert!(sched.pop_due(1000 * MS).is_none());
        // Cancelling twice is harmless
        sched.cancel(task);
    }

    #[test]
    fn test_earliest_task_first() {
        let mut sched = ManualScheduler::new();
        let tick = sched.every(16 * MS, Timer::Tick);
        let restart = sched.after(20 * MS, Timer::Restart);
        assert_eq!(sched.pop_due(40 * MS), Some((tick, Timer::Tick)));
        assert_eq!(sched.pop_due(40 * MS), Some((restart, Timer::Restart)));
        assert_eq!(sched.pop_due(40 * MS), Some((tick, Timer::Tick)));
        assert!(sched.pop_due(40 * MS).is_none());
    }
}
