use crate::audio::WebCuePlayer;
use crate::constants::CLOCK_TICK_MS;
use crate::overlay;
use countdown_core::{AudioSequencer, Clock, CountdownState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct TickerState {
    clock: Clock,
    countdown: Rc<RefCell<CountdownState>>,
    sequencer: Rc<RefCell<AudioSequencer<WebCuePlayer>>>,
    document: web::Document,
}

impl TickerState {
    fn step(&mut self) {
        let state = self.clock.tick(js_sys::Date::now() as i64);
        *self.countdown.borrow_mut() = state;
        self.sequencer.borrow_mut().on_countdown(&state);
        overlay::update_countdown(&self.document, &state);
    }
}

/// Handle to the one-second countdown interval.
pub struct TickerHandle {
    interval_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl TickerHandle {
    pub fn cancel(&self) {
        if let (Some(w), Some(id)) = (web::window(), self.interval_id.take()) {
            w.clear_interval_with_handle(id);
            log::info!("[ticker] stopped");
        }
        self.callback.borrow_mut().take();
    }
}

/// Tick once now, then every [`CLOCK_TICK_MS`].
pub fn start(
    clock: Clock,
    countdown: Rc<RefCell<CountdownState>>,
    sequencer: Rc<RefCell<AudioSequencer<WebCuePlayer>>>,
    document: web::Document,
) -> anyhow::Result<TickerHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    log::info!("[ticker] target_ms={}", clock.target_ms());
    let state = Rc::new(RefCell::new(TickerState {
        clock,
        countdown,
        sequencer,
        document,
    }));
    state.borrow_mut().step();

    let state_tick = state.clone();
    let callback = Closure::wrap(Box::new(move || {
        state_tick.borrow_mut().step();
    }) as Box<dyn FnMut()>);
    let interval_id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            CLOCK_TICK_MS,
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(TickerHandle {
        interval_id: Cell::new(Some(interval_id)),
        callback: RefCell::new(Some(callback)),
    })
}
