#![cfg(target_arch = "wasm32")]
use countdown_core::{AudioSequencer, Clock, CountdownState, EmberField, Emitter};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod params;
mod render;
mod ticker;

use constants::{CANVAS_ID, MAX_ROCKETS};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("countdown-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    events::wire_canvas_resize(&canvas);

    let cfg = config::load(&window, &canvas)?;
    log::info!(
        "[config] target_ms={} pool={} embers={} final_seconds={}",
        cfg.target_ms,
        cfg.emitter.pool_capacity,
        cfg.ember_count,
        cfg.window.final_seconds
    );

    // Audio starts muted and locked; the toggle and first gesture open it up.
    let player = audio::WebCuePlayer::new();
    let notices = player.notices();
    let sequencer = Rc::new(RefCell::new(AudioSequencer::new(
        player,
        cfg.window,
        cfg.sequencer.clone(),
    )));
    sequencer.borrow_mut().start();
    overlay::update_sound_toggle(&document, sequencer.borrow().is_muted());
    events::wire_sound_toggle(&document, sequencer.clone());
    events::wire_unlock_on_interaction(sequencer.clone());

    // Countdown text and cue transitions run even if WebGPU is unavailable.
    let countdown = Rc::new(RefCell::new(CountdownState::default()));
    let ticker = ticker::start(
        Clock::new(cfg.target_ms),
        countdown.clone(),
        sequencer.clone(),
        document.clone(),
    )?;

    let emitter = Emitter::from_entropy(cfg.window, cfg.emitter)?;
    let pool_capacity = emitter.pool().capacity();
    let embers = EmberField::new(cfg.ember_count, rand::random());

    let gpu = frame::init_gpu(&canvas, pool_capacity, embers.len()).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        emitter,
        embers,
        sequencer: sequencer.clone(),
        notices,
        countdown,
        canvas,
        gpu,
        started: Instant::now(),
        rockets: Vec::with_capacity(MAX_ROCKETS),
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    events::wire_page_lifecycle(ticker, frame_loop, sequencer);
    Ok(())
}
