//! Deterministic game-clock timers (intervals and one-shot timeouts).
//!
//! Time only moves when the owner calls [`TickScheduler::pop_due`] and
//! [`TickScheduler::settle`], so the same sequence of frame timestamps always
//! produces the same sequence of firings. Both the browser frame loop and the
//! tests drive it the same way.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    task: T,
    due: f64,
    /// `Some` for intervals
    period: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TickScheduler<T> {
    now: f64,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T: Copy> TickScheduler<T> {
    pub fn new(now: f64) -> Self {
        Self {
            now,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn set_interval(&mut self, period_ms: f64, task: T) -> TimerId {
        self.insert(period_ms, Some(period_ms), task)
    }

    pub fn set_timeout(&mut self, delay_ms: f64, task: T) -> TimerId {
        self.insert(delay_ms, None, task)
    }

    fn insert(&mut self, delay_ms: f64, period: Option<f64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            task,
            due: self.now + delay_ms.max(0.0),
            period,
        });
        id
    }

    /// Returns false if the timer already fired (timeouts) or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    #[cfg(test)]
    fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire the earliest timer due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order. Intervals are re-armed
    /// one period later; timeouts are removed.
    pub fn pop_due(&mut self, until: f64) -> Option<T> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        self.now = self.now.max(timer.due);
        let (task, period) = (timer.task, timer.period);
        match period {
            Some(period) => timer.due += period,
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(task)
    }

    /// Move the clock to `until` once every due timer has been popped
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Drop elapsed time without firing anything (e.g. after a long pause).
    /// Pending timers keep their remaining delay.
    pub fn skip(&mut self, gap_ms: f64) {
        if gap_ms <= 0.0 {
            return;
        }
        self.now += gap_ms;
        for timer in &mut self.timers {
            timer.due += gap_ms;
        }
    }
}
