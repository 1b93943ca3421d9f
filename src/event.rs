use std::collections::{BTreeMap, VecDeque};

use loam_geom::Vec3;

use crate::interact::{Action, SurfaceHit};

pub enum Event {
    // Time housekeeping
    Tick,

    // Collaborator inputs
    ObserverMoved { pos: Vec3 },
    InteractionRequested { origin: Vec3, dir: Vec3, action: Action },
    // hit already picked by the renderer
    SurfaceHitReported { hit: Option<SurfaceHit>, action: Action },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick => "Tick",
            Event::ObserverMoved { .. } => "ObserverMoved",
            Event::InteractionRequested { .. } => "InteractionRequested",
            Event::SurfaceHitReported { .. } => "SurfaceHitReported",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    /// Events for a tick already in the past are delivered on the current one.
    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let tick = tick.max(self.now);
        let env = EventEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn emit_after(&mut self, delta: u64, kind: Event) -> u64 {
        self.emit_at(self.now + delta, kind)
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick.get_mut(&self.now)?.pop_front()
    }

    pub fn advance_tick(&mut self) {
        // clean empty current bucket
        if self.by_tick.get(&self.now).is_some_and(VecDeque::is_empty) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.values().all(VecDeque::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_wait_for_their_tick() {
        let mut q = EventQueue::new();
        q.emit_after(2, Event::Tick);
        q.emit_now(Event::ObserverMoved { pos: Vec3::ZERO });
        assert_eq!(q.pop_ready().map(|e| e.kind.name()), Some("ObserverMoved"));
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        let env = q.pop_ready().expect("scheduled event");
        assert_eq!(env.tick, 2);
        assert_eq!(env.kind.name(), "Tick");
        assert!(q.is_empty());
    }

    #[test]
    fn same_tick_is_fifo() {
        let mut q = EventQueue::new();
        let a = q.emit_now(Event::Tick);
        let b = q.emit_now(Event::Tick);
        assert_eq!(q.pop_ready().map(|e| e.id), Some(a));
        assert_eq!(q.pop_ready().map(|e| e.id), Some(b));
    }
}
