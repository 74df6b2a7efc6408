use countdown_core::{Cue, CuePlayer, CueSpec};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Asynchronous feedback from the media elements, drained by the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackNotice {
    Ended(Cue),
    Rejected(Cue),
}

pub type NoticeQueue = Rc<RefCell<Vec<PlaybackNotice>>>;

struct CueElement {
    cue: Cue,
    audio: web::HtmlAudioElement,
    on_ended: Closure<dyn FnMut()>,
}

/// One `<audio>` element per cue plus an `AudioContext` created on the first
/// user interaction to unlock playback.
#[derive(Default)]
pub struct WebCuePlayer {
    cues: Vec<CueElement>,
    audio_ctx: Option<web::AudioContext>,
    notices: NoticeQueue,
}

impl WebCuePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> NoticeQueue {
        self.notices.clone()
    }

    fn element(&self, cue: Cue) -> Option<&web::HtmlAudioElement> {
        self.cues.iter().find(|c| c.cue == cue).map(|c| &c.audio)
    }
}

impl CuePlayer for WebCuePlayer {
    fn load(&mut self, cue: Cue, spec: &CueSpec) {
        let audio = match web::HtmlAudioElement::new_with_src(&spec.path) {
            Ok(a) => a,
            Err(e) => {
                log::error!("[audio] {:?} element error: {:?}", cue, e);
                return;
            }
        };
        audio.set_loop(spec.looped);
        audio.set_volume(spec.volume.clamp(0.0, 1.0) as f64);
        audio.set_preload("auto");

        let notices = self.notices.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            notices.borrow_mut().push(PlaybackNotice::Ended(cue));
        }) as Box<dyn FnMut()>);
        _ = audio.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());

        self.cues.retain(|c| c.cue != cue);
        self.cues.push(CueElement {
            cue,
            audio,
            on_ended,
        });
    }

    fn play(&mut self, cue: Cue) {
        let Some(audio) = self.element(cue) else {
            return;
        };
        match audio.play() {
            Ok(promise) => {
                let notices = self.notices.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[audio] {:?} play failed: {:?}", cue, e);
                        notices.borrow_mut().push(PlaybackNotice::Rejected(cue));
                    }
                });
            }
            Err(e) => {
                log::warn!("[audio] {:?} play failed: {:?}", cue, e);
                self.notices.borrow_mut().push(PlaybackNotice::Rejected(cue));
            }
        }
    }

    fn pause(&mut self, cue: Cue) {
        if let Some(audio) = self.element(cue) {
            _ = audio.pause();
        }
    }

    fn set_muted(&mut self, cue: Cue, muted: bool) {
        if let Some(audio) = self.element(cue) {
            audio.set_muted(muted);
        }
    }

    fn unlock(&mut self) {
        if self.audio_ctx.is_some() {
            return;
        }
        match web::AudioContext::new() {
            Ok(ctx) => {
                _ = ctx.resume();
                self.audio_ctx = Some(ctx);
            }
            Err(e) => log::warn!("[audio] AudioContext error: {:?}", e),
        }
    }

    fn release(&mut self) {
        for c in self.cues.drain(..) {
            _ = c.audio.pause();
            _ = c
                .audio
                .remove_event_listener_with_callback("ended", c.on_ended.as_ref().unchecked_ref());
            c.audio.set_src("");
        }
        if let Some(ctx) = self.audio_ctx.take() {
            _ = ctx.close();
        }
        self.notices.borrow_mut().clear();
    }
}
