//! Cooperative timer wheel for the session's periodic work
//!
//! Every periodic job (simulation tick, countdown, summary fade, high-score
//! blink, intro animation) is a named [`Task`] with its own period. The
//! runtime asks for the next deadline, sleeps until then and drains the due
//! tasks one at a time, so two jobs never run at once.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Tick,
    Countdown,
    Fade,
    Blink,
    Intro,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::Tick,
        Task::Countdown,
        Task::Fade,
        Task::Blink,
        Task::Intro,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    period: Duration,
    due: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    slots: [Option<Slot>; 5],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `task` to fire every `period`, first at `now + period`.
    /// Re-arming an active task discards its pending deadline.
    pub fn start(&mut self, task: Task, period: Duration, now: Instant) {
        self.slots[task.index()] = Some(Slot {
            period,
            due: now + period,
        });
    }

    pub fn stop(&mut self, task: Task) {
        self.slots[task.index()] = None;
    }

    pub fn stop_all(&mut self) {
        self.slots = [None; 5];
    }

    pub fn is_active(&self, task: Task) -> bool {
        self.slots[task.index()].is_some()
    }

    pub fn period(&self, task: Task) -> Option<Duration> {
        self.slots[task.index()].map(|slot| slot.period)
    }

    /// Change the period of an active task. The next deadline moves to one new
    /// period after the last firing.
    pub fn set_period(&mut self, task: Task, period: Duration) {
        if let Some(slot) = &mut self.slots[task.index()] {
            let last_fire = slot.due.checked_sub(slot.period).unwrap_or(slot.due);
            slot.due = last_fire + period;
            slot.period = period;
        }
    }

    /// Earliest deadline over all active tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().map(|slot| slot.due).min()
    }

    /// Take the earliest task due at `now` and book its next firing.
    ///
    /// Periods missed while the caller was busy collapse into this one
    /// firing: the next deadline always lies after `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Task> {
        let task = Task::ALL
            .into_iter()
            .filter_map(|task| self.slots[task.index()].map(|slot| (task, slot.due)))
            .filter(|&(_, due)| due <= now)
            .min_by_key(|&(_, due)| due)
            .map(|(task, _)| task)?;

        if let Some(slot) = &mut self.slots[task.index()] {
            slot.due += slot.period;
            if slot.due <= now {
                slot.due = now + slot.period;
            }
        }
        Some(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_nothing_due_before_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Task::Tick, 160 * MS, t0);

        assert_eq!(s.next_deadline(), Some(t0 + 160 * MS));
        assert_eq!(s.pop_due(t0 + 159 * MS), None);
        assert_eq!(s.pop_due(t0 + 160 * MS), Some(Task::Tick));
        assert_eq!(s.next_deadline(), Some(t0 + 320 * MS));
    }

    #[test]
    fn test_earliest_task_fires_first() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Task::Blink, 400 * MS, t0);
        s.start(Task::Fade, 50 * MS, t0);

        let now = t0 + 400 * MS;
        assert_eq!(s.pop_due(now), Some(Task::Fade));
        assert_eq!(s.pop_due(now), Some(Task::Blink));
        assert_eq!(s.pop_due(now), None);
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Task::Tick, 100 * MS, t0);

        let late = t0 + 1_000 * MS;
        assert_eq!(s.pop_due(late), Some(Task::Tick));
        assert_eq!(s.pop_due(late), None);
        assert_eq!(s.next_deadline(), Some(late + 100 * MS));
    }

    #[test]
    fn test_stop_discards_pending_firing() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Task::Countdown, 1_000 * MS, t0);
        s.stop(Task::Countdown);

        assert!(!s.is_active(Task::Countdown));
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.pop_due(t0 + 5_000 * MS), None);
    }

    #[test]
    fn test_set_period_reschedules_from_last_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Task::Tick, 160 * MS, t0);
        s.pop_due(t0 + 160 * MS);

        s.set_period(Task::Tick, 154 * MS);
        assert_eq!(s.period(Task::Tick), Some(154 * MS));
        assert_eq!(s.next_deadline(), Some(t0 + 314 * MS));

        s.set_period(Task::Intro, 10 * MS);
        assert!(!s.is_active(Task::Intro));
    }
}
