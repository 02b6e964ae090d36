#[derive(Debug)]
struct Entry<T> {
    /// Scheduling order, breaks ties between equal due times.
    seq: u64,
    due_ms: f64,
    task: T,
}

/// Fire-and-forget delayed tasks for a single-threaded frame loop.
///
/// Tasks are plain values; the owner decides what firing means. Nothing runs
/// on its own: the host calls [`drain_due`](Self::drain_due) once per tick.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedules `task` to fire `delay_ms` after `now_ms`. Negative delays
    /// fire on the next drain.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            seq,
            due_ms: now_ms + delay_ms.max(0.0),
            task,
        });
    }

    /// Removes every pending task matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.task));
        before - self.entries.len()
    }

    /// Takes every task due at or before `now_ms`, earliest first; ties keep
    /// scheduling order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.due_ms <= now_ms);
        self.entries = pending;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.task).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 300.0, "late");
        timers.schedule(0.0, 100.0, "early");
        timers.schedule(0.0, 100.0, "early-second");

        assert!(timers.drain_due(50.0).is_empty());
        assert_eq!(timers.drain_due(150.0), vec!["early", "early-second"]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.drain_due(1_000.0), vec!["late"]);
    }

    #[test]
    fn negative_delay_fires_immediately() {
        let mut timers = TimerQueue::new();
        timers.schedule(500.0, -200.0, 1);
        assert_eq!(timers.drain_due(500.0), vec![1]);
    }

    #[test]
    fn cancel_where_removes_matching_tasks() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 10.0, ('a', 1));
        timers.schedule(0.0, 10.0, ('b', 2));
        timers.schedule(0.0, 20.0, ('a', 3));

        assert_eq!(timers.cancel_where(|(owner, _)| *owner == 'a'), 2);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.drain_due(20.0), vec![('b', 2)]);
    }
}
