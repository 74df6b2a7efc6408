use crate::constants::{
    COUNTDOWN_ID, MUTE_LABEL, SOUND_TOGGLE_ID, TRIBUTE_ID, UNIT_IDS, UNMUTE_LABEL,
};
use crate::dom;
use countdown_core::CountdownState;
use web_sys as web;

/// Update the four digit units, or swap to the tribute message once the target is reached.
pub fn update_countdown(document: &web::Document, state: &CountdownState) {
    if state.reached_target {
        show_celebration(document);
        return;
    }
    for (id, text) in UNIT_IDS.iter().zip(state.remaining.padded()) {
        dom::set_text(document, id, &text);
    }
}

#[inline]
pub fn show_celebration(document: &web::Document) {
    dom::set_hidden(document, COUNTDOWN_ID, true);
    dom::set_hidden(document, TRIBUTE_ID, false);
}

/// Reflect the mute flag on the sound toggle button (label and tooltip).
pub fn update_sound_toggle(document: &web::Document, muted: bool) {
    if let Some(el) = document.get_element_by_id(SOUND_TOGGLE_ID) {
        let label = if muted { UNMUTE_LABEL } else { MUTE_LABEL };
        _ = el.set_attribute("aria-label", label);
        _ = el.set_attribute("title", label);
        _ = el.set_attribute("data-muted", if muted { "1" } else { "0" });
    }
}
