use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

#[inline]
pub fn set_hidden(document: &web::Document, element_id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        if hidden {
            _ = cl.add_1("hidden");
            // fallback for environments without CSS class
            _ = el.set_attribute("style", "display:none");
        } else {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        }
    }
}
