use crate::audio::WebCuePlayer;
use crate::constants::SOUND_TOGGLE_ID;
use crate::frame::LoopHandle;
use crate::ticker::TickerHandle;
use crate::{dom, overlay};
use countdown_core::AudioSequencer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedSequencer = Rc<RefCell<AudioSequencer<WebCuePlayer>>>;

// Gestures that count as a user interaction for autoplay purposes
const UNLOCK_EVENTS: [&str; 3] = ["click", "keydown", "touchstart"];

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// The sound button unlocks playback (it is itself a gesture) and flips mute.
pub fn wire_sound_toggle(document: &web::Document, sequencer: SharedSequencer) {
    let doc = document.clone();
    dom::add_click_listener(document, SOUND_TOGGLE_ID, move || {
        let muted = {
            let mut seq = sequencer.borrow_mut();
            seq.unlock();
            seq.toggle_mute()
        };
        overlay::update_sound_toggle(&doc, muted);
    });
}

/// Any first gesture anywhere on the page unlocks playback.
pub fn wire_unlock_on_interaction(sequencer: SharedSequencer) {
    let Some(window) = web::window() else {
        return;
    };
    for event in UNLOCK_EVENTS {
        let seq = sequencer.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Ok(mut s) = seq.try_borrow_mut() {
                if !s.is_unlocked() {
                    log::info!("[audio] unlocked by {}", event);
                    s.unlock();
                }
            }
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Leaving the page stops both drivers and releases every cue, unless the page
/// is going into the back/forward cache. Then audio is only suspended and
/// `pageshow` resumes it (timers and frames freeze with the page on their own).
pub fn wire_page_lifecycle(
    ticker: TickerHandle,
    frame_loop: LoopHandle,
    sequencer: SharedSequencer,
) {
    let Some(window) = web::window() else {
        return;
    };
    let seq_hide = sequencer.clone();
    let on_hide = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if ev.persisted() {
            seq_hide.borrow_mut().suspend();
            return;
        }
        ticker.cancel();
        frame_loop.cancel();
        seq_hide.borrow_mut().stop();
    }) as Box<dyn FnMut(web::PageTransitionEvent)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let on_show = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if ev.persisted() {
            sequencer.borrow_mut().resume();
        }
    }) as Box<dyn FnMut(web::PageTransitionEvent)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}
