use super::App;
use crate::event::{Event, EventEnvelope};
use crate::sink::RenderSink;

impl App {
    pub(super) fn handle_event(&mut self, env: EventEnvelope, sink: &mut dyn RenderSink) {
        Self::log_event(self.gs.tick, &env.kind);
        match env.kind {
            Event::Tick => {}
            Event::ObserverMoved { pos } => {
                if pos.is_finite() {
                    self.gs.observer = pos;
                } else {
                    log::warn!("ignoring non-finite observer position {:?}", pos);
                }
            }
            Event::InteractionRequested {
                origin,
                dir,
                action,
            } => {
                let gs = &mut self.gs;
                let out = gs.resolver.resolve(
                    origin,
                    dir,
                    action,
                    gs.reach,
                    &mut gs.edits,
                    &mut gs.streamer,
                    sink,
                );
                self.resolved.extend(out);
            }
            Event::SurfaceHitReported { hit, action } => {
                let gs = &mut self.gs;
                let out = gs
                    .resolver
                    .apply(hit, action, &mut gs.edits, &mut gs.streamer, sink);
                self.resolved.extend(out);
            }
        }
    }

    fn log_event(tick: u64, ev: &Event) {
        match ev {
            Event::Tick => {
                log::trace!(target: "events", "[tick {}] Tick", tick);
            }
            Event::ObserverMoved { pos } => {
                log::trace!(
                    target: "events",
                    "[tick {}] ObserverMoved pos=({:.2},{:.2},{:.2})",
                    tick,
                    pos.x,
                    pos.y,
                    pos.z
                );
            }
            Event::InteractionRequested {
                origin,
                dir,
                action,
            } => {
                log::info!(
                    target: "events",
                    "[tick {}] InteractionRequested {} origin=({:.2},{:.2},{:.2}) dir=({:.2},{:.2},{:.2})",
                    tick,
                    action.name(),
                    origin.x,
                    origin.y,
                    origin.z,
                    dir.x,
                    dir.y,
                    dir.z
                );
            }
            Event::SurfaceHitReported { hit, action } => {
                log::info!(
                    target: "events",
                    "[tick {}] SurfaceHitReported {} hit={}",
                    tick,
                    action.name(),
                    hit.is_some()
                );
            }
        }
    }
}
