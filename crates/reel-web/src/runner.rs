use reel_engine::{
    ReelConfig, ReelError, ReelMachine, SpinId, SpinOutcome, SpinState, SpinTicket,
    StripStore, SymbolId, SymbolManifest, TextureRegistry,
};

/// Wires a `ReelMachine` to a host that has a frame callback but no executor.
///
/// Each spin carries a host handle `H` (the promise callbacks in the browser build).
/// Tickets are checked after every frame and their handles handed back once resolved,
/// so the host never polls a future itself.
pub struct ReelRunner<H> {
    machine: ReelMachine,
    pending: Vec<(SpinTicket, H)>,
}

impl<H> ReelRunner<H> {
    pub fn new(machine: ReelMachine) -> Self {
        Self { machine, pending: Vec::new() }
    }

    /// Build from the host's JSON payloads. An empty `strips_json` selects the classic
    /// strips; an empty `manifest_json` a single 256px atlas with one symbol per column.
    /// `fallback_seed` is used when the config carries no seed.
    pub fn from_json(
        config_json: &str,
        strips_json: &str,
        manifest_json: &str,
        fallback_seed: u64,
    ) -> Result<Self, ReelError> {
        let mut config = if config_json.trim().is_empty() {
            ReelConfig::default()
        } else {
            ReelConfig::from_json(config_json)?
        };
        config.seed.get_or_insert(fallback_seed);

        let strips = if strips_json.trim().is_empty() {
            StripStore::classic()
        } else {
            StripStore::from_json(strips_json)?
        };
        let manifest = if manifest_json.trim().is_empty() {
            SymbolManifest::uniform("symbols.png", 256)
        } else {
            SymbolManifest::from_json(manifest_json)?
        };

        let machine = ReelMachine::new(config, strips, TextureRegistry::from_manifest(&manifest))?;
        Ok(Self::new(machine))
    }

    pub fn machine(&self) -> &ReelMachine {
        &self.machine
    }

    /// Run one frame and return the handles of every spin that finished during it.
    pub fn tick(&mut self, now_ms: f64) -> Vec<(H, Result<(), ReelError>)> {
        self.machine.tick(now_ms);
        self.take_finished()
    }

    pub fn spin_to(&mut self, grid: &[Vec<SymbolId>], handle: H) -> Result<SpinId, ReelError> {
        let ticket = self.machine.spin_to(grid)?;
        let id = ticket.id();
        self.pending.push((ticket, handle));
        Ok(id)
    }

    /// Spin to a grid given as JSON: an array of columns of symbol names.
    pub fn spin_to_json(&mut self, grid_json: &str, handle: H) -> Result<SpinId, ReelError> {
        let grid: Vec<Vec<SymbolId>> = serde_json::from_str(grid_json)?;
        self.spin_to(&grid, handle)
    }

    /// Spin to the grid of a results-service payload.
    pub fn spin_to_outcome_json(&mut self, outcome_json: &str, handle: H) -> Result<SpinId, ReelError> {
        let outcome = SpinOutcome::from_json(outcome_json)?;
        self.spin_to(&outcome.grid, handle)
    }

    pub fn start_idle(&mut self) {
        self.machine.start_idle_spin();
    }

    pub fn stop_idle(&mut self) {
        self.machine.stop_idle_spin();
    }

    /// Tear the machine down; every pending handle comes back with `TornDown`.
    pub fn teardown(&mut self) -> Vec<(H, Result<(), ReelError>)> {
        self.machine.teardown();
        self.take_finished()
    }

    /// Events since the last call, as a JSON array.
    pub fn events_json(&mut self) -> Result<String, ReelError> {
        Ok(serde_json::to_string(&self.machine.drain_events())?)
    }

    /// Visible symbols of every reel as a JSON array of columns.
    pub fn visible_json(&self) -> Result<String, ReelError> {
        let columns: Vec<Vec<SymbolId>> = (0..self.machine.reel_count())
            .filter_map(|reel| self.machine.visible_symbols(reel))
            .collect();
        Ok(serde_json::to_string(&columns)?)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn take_finished(&mut self) -> Vec<(H, Result<(), ReelError>)> {
        let mut finished = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for (ticket, handle) in self.pending.drain(..) {
            match ticket.state() {
                SpinState::Pending => still_pending.push((ticket, handle)),
                SpinState::Settled => finished.push((handle, Ok(()))),
                SpinState::Cancelled => finished.push((handle, Err(ReelError::TornDown))),
            }
        }
        self.pending = still_pending;
        finished
    }

    // ---- Pointer accessors for reads out of wasm memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.machine.render_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.machine.render_buffer().instance_count()
    }

    pub fn viewport_width(&self) -> f32 {
        self.machine.render_buffer().viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.machine.render_buffer().viewport_height
    }
}
