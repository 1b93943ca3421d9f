use std::time::Duration;

use super::App;
use crate::event::Event;
use crate::interact::Resolved;
use crate::sink::RenderSink;
use crate::streaming::StreamStats;

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub tick: u64,
    pub events: usize,
    pub resolved: Vec<Resolved>,
    pub stream: StreamStats,
}

impl App {
    /// Runs one tick. Ledger writes from queued interactions land before
    /// streaming reads the ledger, so a chunk created this tick already
    /// carries them.
    pub fn step(&mut self, sink: &mut dyn RenderSink) -> StepReport {
        self.queue.emit_now(Event::Tick);
        let mut events = 0usize;
        while let Some(env) = self.queue.pop_ready() {
            self.handle_event(env, sink);
            events += 1;
        }
        let gs = &mut self.gs;
        let stream = gs.streamer.update(gs.observer, &gs.edits, sink);
        let report = StepReport {
            tick: gs.tick,
            events,
            resolved: std::mem::take(&mut self.resolved),
            stream,
        };
        gs.tick = gs.tick.wrapping_add(1);
        self.queue.advance_tick();
        report
    }

    /// Blocks until every desired chunk is present, for startup and tests.
    pub fn settle(&mut self, sink: &mut dyn RenderSink, timeout: Duration) -> StreamStats {
        let gs = &mut self.gs;
        gs.streamer.finish_pending(&gs.edits, sink, timeout)
    }
}
