//! The reel machine: owns every reel, runs the frame loop and turns a target grid
//! into one staggered tween per reel.

pub mod ticket;

use crate::api::config::{ReelConfig, ReelLayout};
use crate::api::error::ReelError;
use crate::api::outcome::SpinOutcome;
use crate::api::types::{ReelEvent, ReelId, SpinId, SymbolId};
use crate::assets::registry::TextureRegistry;
use crate::components::reel::{Reel, ReelMotion};
use crate::components::sprite::SymbolTexture;
use crate::core::clock::FrameClock;
use crate::core::rng::{SymbolRng, XorShiftRng};
use crate::core::strip::{ReelStrip, StripStore};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenScheduler, TweenTarget};
use crate::renderer::instance::RenderBuffer;
use crate::systems::frame::drive_reels;
use crate::systems::render::build_render_buffer;
use crate::systems::resolver::{require_stop, resolve_stop, StopResolution};
use ticket::{SpinTicket, TicketResolver};

pub use ticket::SpinState;

/// Seed used when the config does not carry one.
pub const DEFAULT_SEED: u64 = 0x5EED_2EE1;

/// What one reel must show once its tween completes.
struct Landing {
    column: Vec<(SymbolId, SymbolTexture)>,
    spare: (SymbolId, SymbolTexture),
    landed: bool,
}

/// Bookkeeping for the spin in flight. Created per `spin_to`, dropped when the
/// last reel lands, so nothing carries over between spins.
struct SpinSession {
    id: SpinId,
    resolver: TicketResolver,
    landings: Vec<Landing>,
    remaining: usize,
}

/// Reel animation and stop-alignment engine.
///
/// Drive it with `tick(now_ms)` from the host's frame callback. `spin_to` commits
/// every reel to a target, and the returned ticket resolves after the last one lands.
pub struct ReelMachine {
    config: ReelConfig,
    layout: ReelLayout,
    strips: StripStore,
    textures: TextureRegistry,
    reels: Vec<Reel>,
    tweens: TweenScheduler,
    clock: FrameClock,
    rng: Box<dyn SymbolRng>,
    stop_easing: Easing,
    session: Option<SpinSession>,
    next_spin: u32,
    events: Vec<ReelEvent>,
    render_buffer: RenderBuffer,
    torn_down: bool,
}

impl ReelMachine {
    /// Build a machine. Fails on invalid config or when any strip symbol has no texture.
    pub fn new(config: ReelConfig, strips: StripStore, textures: TextureRegistry) -> Result<Self, ReelError> {
        config.validate()?;
        textures.check_strips(&strips)?;

        let layout = config.layout(strips.reel_count());
        let reels = strips
            .iter()
            .map(|strip| Reel::new(strip, &textures, &layout))
            .collect::<Result<Vec<_>, _>>()?;

        let rng = XorShiftRng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let stop_easing = Easing::Backout { amount: config.backout_amount };
        let clock = FrameClock::new(config.max_frame_delta_ms);
        let mut render_buffer = RenderBuffer::with_capacity(reels.len() * layout.virtual_len());
        build_render_buffer(&reels, &layout, &mut render_buffer);

        log::info!(
            "reel machine: {} reels x {} rows, {}x{} px",
            layout.reels,
            layout.rows,
            layout.content_width,
            layout.content_height
        );

        Ok(Self {
            config,
            layout,
            strips,
            textures,
            reels,
            tweens: TweenScheduler::new(),
            clock,
            rng: Box::new(rng),
            stop_easing,
            session: None,
            next_spin: 1,
            events: Vec::new(),
            render_buffer,
            torn_down: false,
        })
    }

    /// Replace the random source (idle resampling and cycle jitter).
    pub fn with_rng(mut self, rng: impl SymbolRng + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the stop curve. Defaults to backout with the configured overshoot.
    pub fn with_stop_easing(mut self, easing: Easing) -> Self {
        self.stop_easing = easing;
        self
    }

    // -- Frame loop --

    /// One frame at host timestamp `now_ms`: idle motion and sprite projection for
    /// every reel, then the tween step, then landings for finished reels.
    pub fn tick(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }

        let dt = self.clock.advance(now_ms);
        drive_reels(
            &mut self.reels,
            &self.strips,
            &self.textures,
            &self.layout,
            self.rng.as_mut(),
            dt,
            self.config.idle_speed,
        );

        self.tweens.tick(now_ms, &mut self.reels);
        let finished: Vec<usize> = self
            .tweens
            .drain_completed()
            .filter_map(|done| match done.target {
                TweenTarget::ReelPosition { reel } => done.event.map(|_| reel),
            })
            .collect();
        for reel in finished {
            self.land_reel(reel);
        }

        build_render_buffer(&self.reels, &self.layout, &mut self.render_buffer);
    }

    // -- Spin control --

    /// Spin every reel to `grid` (one column per reel, top to bottom).
    ///
    /// All stops are resolved before anything moves. A column missing from its strip
    /// degrades to offset 0 and is reported on the ticket and as `StopMismatch`,
    /// unless `strict_stops` is set, in which case nothing starts and the error is returned.
    pub fn spin_to(&mut self, grid: &[Vec<SymbolId>]) -> Result<SpinTicket, ReelError> {
        if self.torn_down {
            return Err(ReelError::TornDown);
        }
        if self.session.is_some() || !self.tweens.is_empty() {
            return Err(ReelError::AlreadySpinning);
        }
        self.check_grid(grid)?;

        let mut columns = Vec::with_capacity(grid.len());
        for column in grid {
            let textured = column
                .iter()
                .map(|&symbol| self.textures.get(symbol).map(|texture| (symbol, texture)))
                .collect::<Result<Vec<_>, _>>()?;
            columns.push(textured);
        }

        let mut resolutions = Vec::with_capacity(grid.len());
        for (reel, column) in grid.iter().enumerate() {
            let strip = self.strips.strip_for(reel);
            let resolution = if self.config.strict_stops {
                StopResolution::Exact(require_stop(reel, strip, column)?)
            } else {
                resolve_stop(strip, column)
            };
            resolutions.push(resolution);
        }

        let id = SpinId(self.next_spin);
        self.next_spin = self.next_spin.wrapping_add(1);
        let (ticket, resolver) = SpinTicket::new(id);

        let mut landings = Vec::with_capacity(grid.len());
        for (reel, (column, resolution)) in columns.into_iter().zip(&resolutions).enumerate() {
            let strip = self.strips.strip_for(reel);
            let stop = resolution.offset();

            if !resolution.is_exact() {
                log::warn!(
                    "spin {}: column {:?} not on strip of reel {}, landing at offset 0",
                    id.0,
                    grid[reel],
                    reel
                );
                resolver.record_mismatch(ReelId(reel));
                self.events.push(ReelEvent::StopMismatch {
                    spin: id,
                    reel: ReelId(reel),
                    column: grid[reel].clone(),
                });
            }

            let spare_symbol = strip.at((stop + self.layout.rows) as i64);
            let spare = (spare_symbol, self.textures.get(spare_symbol)?);
            landings.push(Landing { column, spare, landed: false });
        }

        for reel in 0..self.reels.len() {
            let stop = resolutions[reel].offset();
            self.launch_reel(reel, stop)?;
        }

        log::info!("spin {}: {} reels launched", id.0, self.reels.len());
        self.events.push(ReelEvent::SpinStarted { spin: id });
        self.session = Some(SpinSession {
            id,
            resolver,
            remaining: landings.len(),
            landings,
        });
        Ok(ticket)
    }

    /// Spin to the grid of a results-service outcome; payout data is ignored.
    pub fn spin_to_outcome(&mut self, outcome: &SpinOutcome) -> Result<SpinTicket, ReelError> {
        self.spin_to(&outcome.grid)
    }

    /// Put every resting reel into free motion, staggered left to right. Ignored while
    /// a spin is in flight, so reels that already landed keep showing their target.
    pub fn start_idle_spin(&mut self) {
        if self.torn_down || self.session.is_some() {
            return;
        }
        let stagger = self.config.idle_start_stagger_ms;
        for (index, reel) in self.reels.iter_mut().enumerate() {
            if reel.motion == ReelMotion::Resting {
                reel.motion = ReelMotion::Idle { delay_ms: index as f64 * stagger };
            }
        }
    }

    /// Freeze idle reels where they are. Reels landing a spin are unaffected.
    pub fn stop_idle_spin(&mut self) {
        for reel in &mut self.reels {
            if let ReelMotion::Idle { .. } = reel.motion {
                reel.motion = ReelMotion::Resting;
            }
        }
    }

    /// Release every tween and cancel the pending spin. No landing or event fires
    /// afterwards and `tick` does nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.tweens.clear();
        self.events.clear();
        self.render_buffer.clear();
        if let Some(session) = self.session.take() {
            log::info!("spin {}: cancelled by teardown", session.id.0);
            session.resolver.cancel();
        }
        log::info!("reel machine torn down");
    }

    // -- Inspection --

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    pub fn layout(&self) -> &ReelLayout {
        &self.layout
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn strip(&self, reel: usize) -> Option<&ReelStrip> {
        (reel < self.strips.reel_count()).then(|| self.strips.strip_for(reel))
    }

    /// Whether a spin is in flight.
    pub fn is_spinning(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `reel` is still travelling toward its stop.
    pub fn is_reel_spinning(&self, reel: usize) -> bool {
        self.tweens.is_animating(TweenTarget::ReelPosition { reel })
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current rotation of `reel`.
    pub fn position(&self, reel: usize) -> Option<f64> {
        self.reels.get(reel).map(|r| r.position)
    }

    /// Symbols in the visible rows of `reel`, top to bottom.
    pub fn visible_symbols(&self, reel: usize) -> Option<Vec<SymbolId>> {
        self.reels.get(reel).map(|r| r.visible_symbols(self.layout.rows))
    }

    /// Symbol instances for the host renderer, rebuilt every tick.
    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<ReelEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Internals --

    fn check_grid(&self, grid: &[Vec<SymbolId>]) -> Result<(), ReelError> {
        let rows = self.layout.rows;
        if grid.len() != self.reels.len() || grid.iter().any(|column| column.len() != rows) {
            return Err(ReelError::GridShape {
                expected_reels: self.reels.len(),
                expected_rows: rows,
                reels: grid.len(),
                rows: grid.iter().map(Vec::len).collect(),
            });
        }
        Ok(())
    }

    /// Commit `reel` to a target whose top row is `strip[stop]` and schedule its tween.
    fn launch_reel(&mut self, reel: usize, stop: usize) -> Result<(), ReelError> {
        let jitter = match self.config.cycle_jitter {
            0 => 0,
            bound => self.rng.next_below(bound),
        };
        let stagger = self.config.cycle_stagger.saturating_mul(reel as u32);
        let cycles = self.config.spin_cycles.saturating_add(stagger).saturating_add(jitter).max(1);
        let strip_len = self.strips.strip_for(reel).len();
        let from = self.reels[reel].position;
        let target = aligned_target(from, cycles, stop, strip_len);
        let duration = self.config.base_duration_ms + reel as f64 * self.config.stop_stagger_ms;

        let mut tween = Tween::reel_position(reel, from, target, duration, self.stop_easing)
            .with_on_complete(reel as u32);
        if let Some(now) = self.clock.now() {
            tween = tween.starting_at(now);
        }
        self.tweens.schedule(tween)?;
        self.reels[reel].motion = ReelMotion::Targeted;

        log::debug!(
            "reel {}: {:.2} -> {} ({} cycles, stop {}, {} ms)",
            reel,
            from,
            target,
            cycles,
            stop,
            duration
        );
        Ok(())
    }

    /// Snap a finished reel onto its target column; resolve the spin after the last one.
    fn land_reel(&mut self, reel: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(landing) = session.landings.get_mut(reel) else {
            return;
        };
        if landing.landed {
            return;
        }

        self.reels[reel].land(&landing.column, landing.spare, &self.layout);
        landing.landed = true;
        session.remaining -= 1;
        self.events.push(ReelEvent::ReelLanded { spin: session.id, reel: ReelId(reel) });
        log::debug!("spin {}: reel {} landed at {}", session.id.0, reel, self.reels[reel].position);

        if session.remaining == 0 {
            if let Some(session) = self.session.take() {
                log::info!("spin {}: settled", session.id.0);
                self.events.push(ReelEvent::SpinSettled { spin: session.id });
                session.resolver.settle();
            }
        }
    }
}

impl Drop for ReelMachine {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Smallest whole position at least `cycles` steps past `position` whose top row is
/// `strip[stop]`, i.e. congruent to `stop` modulo the strip length.
pub fn aligned_target(position: f64, cycles: u32, stop: usize, strip_len: usize) -> f64 {
    let len = strip_len.max(1) as i64;
    let base = position.ceil() as i64 + cycles as i64;
    let shift = (stop as i64 - base).rem_euclid(len);
    (base + shift) as f64
}
