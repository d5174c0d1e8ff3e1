//! Delayed round steps
//!
//! Stands in for engine timers: a step is queued with a delay, the queue is
//! polled once per tick and hands back whatever came due.

use serde::{Deserialize, Serialize};

/// Steps the round coordinator can schedule for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStep {
    /// Drop every unsafe platform
    BeginDrop,
    /// Probe under the player
    CheckPosition,
    /// Pick the next safe color
    BeginRound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    step: RoundStep,
    remaining: f32,
    seq: u64,
}

/// Timer queue polled once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `step` to fire once `delay` seconds have passed
    pub fn after(&mut self, delay: f32, step: RoundStep) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            step,
            remaining: delay.max(0.0),
            seq,
        });
    }

    /// Advance every timer by `dt`; returns due steps, earliest first
    /// (ties in scheduling order)
    pub fn advance(&mut self, dt: f32) -> Vec<RoundStep> {
        for p in &mut self.pending {
            p.remaining -= dt;
        }

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.remaining <= 0.0 {
                due.push(p.clone());
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.remaining
                .partial_cmp(&b.remaining)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|p| p.step).collect()
    }

    /// Drop every pending step
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, step: RoundStep) -> bool {
        self.pending.iter().any(|p| p.step == step)
    }

    /// Seconds until `step` fires, if queued
    pub fn time_until(&self, step: RoundStep) -> Option<f32> {
        self.pending
            .iter()
            .filter(|p| p.step == step)
            .map(|p| p.remaining)
            .reduce(f32::min)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
