//! Deferred-effect queue — cooperative multiplexing of timed work.
//!
//! Triggering an effect (rain, a delayed notice) returns immediately; the
//! effect itself materializes when the queue is polled on a later tick or at
//! the next day boundary. There are no threads: the main loop polls once per
//! tick, applies whatever is due, and moves on.
//!
//! Guarantees:
//! - at-most-once: an event is removed from the queue as it is applied;
//! - FIFO: events due on the same tick apply in creation order;
//! - no expiry: an event either fires on its trigger or is cancelled.

use std::collections::{BTreeMap, VecDeque};

use tracing::info;

use crate::shared::{Plot, PlotId};

pub type EventId = u64;

/// When a pending event becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Due once the tick counter reaches this value.
    AtTick(u64),
    /// Due at the next day-advance, after growth has run.
    OnDayBoundary,
}

/// What a pending event does when it fires. Effects are idempotent: applying
/// one twice would leave the same state, though the queue never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventEffect {
    /// Rain: mark every unlocked plot as watered for today.
    WaterAllPlots,
    /// Log-only notice, used for deferred unlock announcements.
    Announce(String),
}

/// A scheduled effect awaiting its trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvent {
    pub id: EventId,
    pub trigger: Trigger,
    pub effect: EventEffect,
}

/// FIFO queue of pending events, owned by the World.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    next_id: EventId,
    pending: VecDeque<PendingEvent>,
}

/// Ids are handles into the pending list, not durable state; two queues are
/// equal when they hold the same pending events.
impl PartialEq for EventQueue {
    fn eq(&self, other: &Self) -> bool {
        self.pending == other.pending
    }
}

impl EventQueue {
    /// Enqueue an effect and return its id (usable for cancellation).
    /// Never blocks; the effect applies when the trigger is satisfied.
    pub fn schedule(&mut self, trigger: Trigger, effect: EventEffect) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push_back(PendingEvent { id, trigger, effect });
        info!("[Events] Scheduled event {} ({:?})", id, trigger);
        id
    }

    /// Remove an event before it fires. Returns false if the id is unknown
    /// (already fired or never existed); a fired event cannot be rolled back.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|ev| ev.id != id);
        before != self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// The events still waiting on their trigger, front (oldest) first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingEvent> {
        self.pending.iter()
    }

    /// Apply every event whose tick trigger is due at `now`, in FIFO order,
    /// removing each as it fires.
    pub fn poll_tick(&mut self, now: u64, plots: &mut BTreeMap<PlotId, Plot>) {
        self.drain_due(plots, |trigger| matches!(trigger, Trigger::AtTick(t) if t <= now));
    }

    /// Apply every day-boundary event, in FIFO order. Called by the scheduler
    /// as part of the day-advance pipeline.
    pub fn fire_day_boundary(&mut self, plots: &mut BTreeMap<PlotId, Plot>) {
        self.drain_due(plots, |trigger| trigger == Trigger::OnDayBoundary);
    }

    fn drain_due(
        &mut self,
        plots: &mut BTreeMap<PlotId, Plot>,
        due: impl Fn(Trigger) -> bool,
    ) {
        let mut remaining = VecDeque::with_capacity(self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            if due(event.trigger) {
                info!("[Events] Firing event {}", event.id);
                apply_effect(&event.effect, plots);
            } else {
                remaining.push_back(event);
            }
        }
        self.pending = remaining;
    }
}

fn apply_effect(effect: &EventEffect, plots: &mut BTreeMap<PlotId, Plot>) {
    match effect {
        EventEffect::WaterAllPlots => {
            for plot in plots.values_mut().filter(|p| p.unlocked) {
                plot.watered = true;
            }
            info!("[Events] Rain watered the whole farm");
        }
        EventEffect::Announce(message) => {
            info!("[Events] {}", message);
        }
    }
}
