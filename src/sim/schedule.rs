//! Deferred actions on the simulated timeline
//!
//! Every task is stamped with the reset generation current when it was
//! scheduled. [`Scheduler::invalidate`] bumps the generation, after which
//! older tasks are dropped instead of run.

/// A queued action and when it becomes due
#[derive(Debug, Clone)]
struct ScheduledTask<A> {
    due: f64,
    generation: u64,
    seq: u64,
    action: A,
}

/// Single-threaded delayed-action queue
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    tasks: Vec<ScheduledTask<A>>,
    generation: u64,
    next_seq: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            generation: 0,
            next_seq: 0,
        }
    }

    /// Current reset generation
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run `action` once `delay` seconds have passed after `now`
    pub fn schedule(&mut self, now: f64, delay: f32, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            due: now + delay.max(0.0) as f64,
            generation: self.generation,
            seq,
            action,
        });
    }

    /// Supersede everything scheduled so far
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Live tasks still waiting to run
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.generation == self.generation).count()
    }

    /// Take the earliest due live task, dropping stale ones along the way
    ///
    /// Ties run in scheduling order.
    pub fn pop_due(&mut self, now: f64) -> Option<A> {
        let generation = self.generation;
        self.tasks.retain(|t| t.generation == generation);

        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.tasks.remove(index).action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 1.5, "b");
        scheduler.schedule(0.0, 0.8, "a");
        scheduler.schedule(0.0, 1.5, "c");

        assert_eq!(scheduler.pop_due(0.5), None);
        assert_eq!(scheduler.pop_due(2.0), Some("a"));
        assert_eq!(scheduler.pop_due(2.0), Some("b"));
        assert_eq!(scheduler.pop_due(2.0), Some("c"));
        assert_eq!(scheduler.pop_due(2.0), None);
    }

    #[test]
    fn test_invalidate_drops_stale_tasks() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 0.1, 1);
        scheduler.invalidate();
        scheduler.schedule(0.0, 0.2, 2);

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(1.0), Some(2));
        assert_eq!(scheduler.pop_due(1.0), None);
        assert_eq!(scheduler.generation(), 1);
    }
}
