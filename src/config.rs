use crate::constants::{TARGET_ATTR, TARGET_QUERY_KEY};
use crate::params::query_param;
use countdown_core::CountdownConfig;
use web_sys as web;

/// Build and validate the init-time config for this page.
pub fn load(window: &web::Window, canvas: &web::HtmlCanvasElement) -> anyhow::Result<CountdownConfig> {
    let cfg = CountdownConfig::new(resolve_target_ms(window, canvas));
    cfg.validate()?;
    Ok(cfg)
}

/// `?target=` wins over `data-target`, which wins over the next New Year.
fn resolve_target_ms(window: &web::Window, canvas: &web::HtmlCanvasElement) -> i64 {
    let query = window
        .location()
        .search()
        .ok()
        .and_then(|s| query_param(&s, TARGET_QUERY_KEY));
    if let Some(ms) = query.as_deref().and_then(|v| parse_date("query", v)) {
        return ms;
    }
    let attr = canvas.get_attribute(TARGET_ATTR);
    if let Some(ms) = attr.as_deref().and_then(|v| parse_date(TARGET_ATTR, v)) {
        return ms;
    }
    let ms = next_new_year_ms();
    log::info!("[config] no target given, using next 1 January ({})", ms);
    ms
}

fn parse_date(source: &str, value: &str) -> Option<i64> {
    let ms = js_sys::Date::parse(value);
    if ms.is_nan() {
        log::warn!("[config] ignoring unparsable {} target {:?}", source, value);
        return None;
    }
    Some(ms as i64)
}

// Midnight local time on the coming 1 January.
fn next_new_year_ms() -> i64 {
    let now = js_sys::Date::new_0();
    js_sys::Date::new_with_year_month_day(now.get_full_year() + 1, 0, 1).get_time() as i64
}
