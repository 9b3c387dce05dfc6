pub mod runner;

pub use runner::ReelRunner;

use std::cell::RefCell;

use js_sys::{Function, Promise};
use reel_engine::ReelError;
use wasm_bindgen::prelude::*;

/// Promise callbacks of one `reels_spin_to` call.
pub struct PendingSpin {
    resolve: Function,
    reject: Function,
}

impl PendingSpin {
    fn finish(self, result: Result<(), ReelError>) {
        let outcome = match result {
            Ok(()) => self.resolve.call0(&JsValue::NULL),
            Err(err) => self.reject.call1(&JsValue::NULL, &to_js(&err)),
        };
        if let Err(err) = outcome {
            log::error!("spin callback threw: {:?}", err);
        }
    }
}

thread_local! {
    static RUNNER: RefCell<Option<ReelRunner<PendingSpin>>> = RefCell::new(None);
}

/// Run `f` against the runner, or `None` before `reels_init`.
fn with_runner<R>(f: impl FnOnce(&mut ReelRunner<PendingSpin>) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn to_js(err: &ReelError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn not_initialized() -> JsValue {
    js_sys::Error::new("reel machine not initialized; call reels_init() first").into()
}

/// Settle callbacks outside the runner borrow so they may call back into us.
fn settle(finished: Option<Vec<(PendingSpin, Result<(), ReelError>)>>) {
    for (pending, result) in finished.into_iter().flatten() {
        pending.finish(result);
    }
}

/// Build the machine. Empty strings select the classic strips and a uniform atlas.
#[wasm_bindgen]
pub fn reels_init(config_json: &str, strips_json: &str, manifest_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let runner = ReelRunner::from_json(config_json, strips_json, manifest_json, seed).map_err(|err| to_js(&err))?;

    let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
    if let Some(mut previous) = previous {
        settle(Some(previous.teardown()));
    }
    log::info!("reels: initialized");
    Ok(())
}

/// Advance one frame. `now_ms` is the host's frame timestamp.
#[wasm_bindgen]
pub fn reels_tick(now_ms: f64) {
    settle(with_runner(|r| r.tick(now_ms)));
}

fn spin_promise(start: impl FnOnce(&mut ReelRunner<PendingSpin>, PendingSpin) -> Result<(), ReelError>) -> Promise {
    let mut start = Some(start);
    Promise::new(&mut |resolve, reject: Function| {
        let Some(start) = start.take() else {
            return;
        };
        let pending = PendingSpin { resolve, reject: reject.clone() };
        let failure = match with_runner(|r| start(r, pending)) {
            Some(Ok(())) => None,
            Some(Err(err)) => Some(to_js(&err)),
            None => Some(not_initialized()),
        };
        if let Some(failure) = failure {
            if let Err(err) = reject.call1(&JsValue::NULL, &failure) {
                log::error!("spin rejection threw: {:?}", err);
            }
        }
    })
}

/// Spin to a grid (JSON array of columns of symbol names). The promise resolves once
/// every reel has landed and rejects on a bad grid or teardown.
#[wasm_bindgen]
pub fn reels_spin_to(grid_json: String) -> Promise {
    spin_promise(move |r, pending| r.spin_to_json(&grid_json, pending).map(|_| ()))
}

/// Spin to the grid of a results-service payload.
#[wasm_bindgen]
pub fn reels_spin_to_outcome(outcome_json: String) -> Promise {
    spin_promise(move |r, pending| r.spin_to_outcome_json(&outcome_json, pending).map(|_| ()))
}

#[wasm_bindgen]
pub fn reels_start_idle() {
    with_runner(|r| r.start_idle());
}

#[wasm_bindgen]
pub fn reels_stop_idle() {
    with_runner(|r| r.stop_idle());
}

/// Cancel everything; pending spin promises reject.
#[wasm_bindgen]
pub fn reels_teardown() {
    settle(with_runner(|r| r.teardown()));
}

#[wasm_bindgen]
pub fn reels_is_spinning() -> bool {
    with_runner(|r| r.machine().is_spinning()).unwrap_or(false)
}

/// Events since the last call, as a JSON array.
#[wasm_bindgen]
pub fn reels_drain_events() -> Result<String, JsValue> {
    with_runner(|r| r.events_json())
        .ok_or_else(not_initialized)?
        .map_err(|err| to_js(&err))
}

/// Visible symbols of every reel, as a JSON array of columns.
#[wasm_bindgen]
pub fn reels_visible_symbols() -> Result<String, JsValue> {
    with_runner(|r| r.visible_json())
        .ok_or_else(not_initialized)?
        .map_err(|err| to_js(&err))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height()).unwrap_or(0.0)
}
