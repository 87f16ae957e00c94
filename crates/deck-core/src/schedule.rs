//! Deferred chart construction.
//!
//! Tasks are never cancelled. Each carries the generation of its chart at
//! scheduling time; scheduling again bumps the generation, so only the newest
//! task for a chart can act. That gives resize its debounce and makes a stale
//! navigation task harmless.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::chart::ChartTarget;

/// Why a draw was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskReason {
    Navigation,
    Resize,
    Startup,
}

/// A pending chart construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub target: ChartTarget,
    /// Slide that was current when the task was scheduled
    pub slide: usize,
    pub generation: u64,
    pub due: Instant,
    pub reason: TaskReason,
}

/// Pending tasks plus the latest generation per chart.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    generations: [u64; 3],
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a draw of `target` for `slide` after `delay`.
    pub fn schedule(
        &mut self,
        target: ChartTarget,
        slide: usize,
        reason: TaskReason,
        now: Instant,
        delay: Duration,
    ) -> &Task {
        let generation = &mut self.generations[target.slot()];
        *generation += 1;
        self.tasks.push(Task {
            target,
            slide,
            generation: *generation,
            due: now + delay,
            reason,
        });
        let last = self.tasks.len() - 1;
        &self.tasks[last]
    }

    /// Whether `task` is the newest one scheduled for its chart.
    pub fn is_latest(&self, task: &Task) -> bool {
        self.generations[task.target.slot()] == task.generation
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let (mut due, pending): (Vec<Task>, Vec<Task>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by_key(|t| t.due);
        due
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
