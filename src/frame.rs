use crate::audio::{NoticeQueue, PlaybackNotice, WebCuePlayer};
use crate::constants::{HEARTBEAT_GAIN, MAX_ROCKETS};
use crate::render;
use countdown_core::{
    heartbeat, AudioSequencer, CountdownState, EmberField, Emitter, ParticleVertex, SequencerState,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub emitter: Emitter,
    pub embers: EmberField,
    pub sequencer: Rc<RefCell<AudioSequencer<WebCuePlayer>>>,
    pub notices: NoticeQueue,
    pub countdown: Rc<RefCell<CountdownState>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub rockets: Vec<ParticleVertex>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        self.drain_notices();

        let countdown = *self.countdown.borrow();
        let celebrating = self.sequencer.borrow().state() == SequencerState::Celebration;
        let report = self.emitter.tick(&countdown, celebrating);
        if let Some(id) = report.spawned {
            log::debug!("[fx] launch {:?} active={}", id, self.emitter.active_count());
        }
        self.embers.update(elapsed);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if self.emitter.pool_mut().take_dirty() {
                g.upload_pool(self.emitter.pool().vertices());
            }
            self.rockets.clear();
            self.rockets.extend(self.emitter.rockets().take(MAX_ROCKETS));
            g.upload_rockets(&self.rockets);
            g.upload_embers(self.embers.vertices());
            if let Err(e) = g.render(heartbeat(elapsed) * HEARTBEAT_GAIN, elapsed) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    // Media callbacks only queue; the sequencer reacts here, outside any JS callback.
    fn drain_notices(&mut self) {
        let notices = std::mem::take(&mut *self.notices.borrow_mut());
        if notices.is_empty() {
            return;
        }
        let mut seq = self.sequencer.borrow_mut();
        for notice in notices {
            match notice {
                PlaybackNotice::Ended(cue) => seq.on_cue_ended(cue),
                PlaybackNotice::Rejected(cue) => seq.on_play_rejected(cue),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    pool_capacity: usize,
    ember_count: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, pool_capacity, ember_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the `requestAnimationFrame` chain started by [`start_loop`].
pub struct LoopHandle {
    tick: TickSlot,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    /// Stop scheduling frames and drop the frame closure (and with it the context).
    pub fn cancel(&self) {
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            _ = w.cancel_animation_frame(id);
        }
        if self.tick.borrow_mut().take().is_some() {
            log::info!("[frame] loop stopped");
        }
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        raf_clone.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));
    LoopHandle { tick, raf_id }
}
