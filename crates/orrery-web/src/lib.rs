//! `#[wasm_bindgen]` exports for the orrery.
//!
//! The runner lives in a `thread_local!` because wasm-bindgen cannot export
//! generic structs. All input is queued and applied at the start of the next tick.

use std::cell::RefCell;

use orrery_core::{InputEvent, Position3D, Selection, SettingsPatch};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::OrreryRunner;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

// ---- Lifecycle ----

/// Create the orrery from a JSON config (empty string for defaults).
#[wasm_bindgen]
pub fn orrery_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = OrreryRunner::from_json(config_json);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
}

/// Run one frame. `timestamp_ms` is the animation-frame timestamp.
#[wasm_bindgen]
pub fn orrery_tick(timestamp_ms: f64) {
    with_runner(|r| r.tick(timestamp_ms));
}

#[wasm_bindgen]
pub fn orrery_mount() {
    with_runner(|r| r.mount());
}

#[wasm_bindgen]
pub fn orrery_unmount() {
    with_runner(|r| r.unmount());
}

// ---- Selection and scene ----

#[wasm_bindgen]
pub fn orrery_select_body(key: &str) {
    with_runner(|r| r.push_input(InputEvent::Select(Selection::planet(key))));
}

#[wasm_bindgen]
pub fn orrery_select_aspect(body1: &str, body2: &str, aspect: &str) {
    with_runner(|r| r.push_input(InputEvent::Select(Selection::aspect(body1, body2, aspect))));
}

/// `bodies_json` is a JSON array of body keys.
#[wasm_bindgen]
pub fn orrery_select_pattern(id: &str, bodies_json: &str) -> bool {
    with_runner(|r| r.select_pattern(id, bodies_json))
}

#[wasm_bindgen]
pub fn orrery_clear_selection() {
    with_runner(|r| r.push_input(InputEvent::Select(Selection::None)));
}

#[wasm_bindgen]
pub fn orrery_pointer_missed() {
    with_runner(|r| r.push_input(InputEvent::PointerMissed));
}

/// `mode` is "orrery" or "sky".
#[wasm_bindgen]
pub fn orrery_request_view(mode: &str) -> bool {
    with_runner(|r| r.request_view(mode))
}

#[wasm_bindgen]
pub fn orrery_fade_complete() {
    with_runner(|r| r.push_input(InputEvent::FadeComplete));
}

#[wasm_bindgen]
pub fn orrery_camera_moved(px: f64, py: f64, pz: f64, tx: f64, ty: f64, tz: f64) {
    with_runner(|r| {
        r.push_input(InputEvent::CameraMoved {
            position: Position3D::new(px, py, pz),
            target: Position3D::new(tx, ty, tz),
        })
    });
}

// ---- Time controls ----

#[wasm_bindgen]
pub fn orrery_step(days: f64) {
    with_runner(|r| r.push_input(InputEvent::Step { days }));
}

#[wasm_bindgen]
pub fn orrery_play() {
    with_runner(|r| r.push_input(InputEvent::Play));
}

#[wasm_bindgen]
pub fn orrery_pause() {
    with_runner(|r| r.push_input(InputEvent::Pause));
}

#[wasm_bindgen]
pub fn orrery_toggle() {
    with_runner(|r| r.push_input(InputEvent::TogglePlay));
}

#[wasm_bindgen]
pub fn orrery_set_speed_slider(position: f64) {
    with_runner(|r| r.push_input(InputEvent::SetSpeedSlider { position }));
}

#[wasm_bindgen]
pub fn orrery_set_date_ms(ms: f64) -> bool {
    with_runner(|r| r.set_date_ms(ms))
}

// ---- Settings and chart ----

#[wasm_bindgen]
pub fn orrery_update_settings(json: &str) -> bool {
    with_runner(|r| r.update_settings(json))
}

#[wasm_bindgen]
pub fn orrery_set_location(latitude: f64, longitude: f64) {
    with_runner(|r| r.push_input(InputEvent::UpdateSettings(SettingsPatch::location(latitude, longitude))));
}

/// Push a chart snapshot computed by the external engine.
#[wasm_bindgen]
pub fn orrery_set_chart(json: &str) -> bool {
    with_runner(|r| r.set_chart(json))
}

#[wasm_bindgen]
pub fn orrery_apply_birth_chart(json: &str) -> bool {
    with_runner(|r| r.apply_birth_chart(json))
}

#[wasm_bindgen]
pub fn orrery_clear_birth_chart() {
    with_runner(|r| r.push_input(InputEvent::ClearBirthChart));
}

// ---- Frame buffer ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_date_ms() -> f64 {
    with_runner(|r| r.date_ms())
}

#[wasm_bindgen]
pub fn get_sky_rotation() -> f64 {
    with_runner(|r| r.sky_rotation())
}

#[wasm_bindgen]
pub fn get_body_keys() -> String {
    with_runner(|r| r.body_keys_json())
}

#[wasm_bindgen]
pub fn get_body_states() -> String {
    with_runner(|r| r.body_states_json())
}

#[wasm_bindgen]
pub fn get_selection() -> String {
    with_runner(|r| r.selection_json())
}

#[wasm_bindgen]
pub fn get_orbit_paths() -> String {
    with_runner(|r| r.orbit_paths_json())
}

#[wasm_bindgen]
pub fn get_aspect_lines() -> String {
    with_runner(|r| r.aspect_lines_json())
}

#[wasm_bindgen]
pub fn get_pattern_lines() -> String {
    with_runner(|r| r.pattern_lines_json())
}

#[wasm_bindgen]
pub fn get_house_cusps() -> String {
    with_runner(|r| r.house_cusps_json())
}

#[wasm_bindgen]
pub fn get_harmonic_lines() -> String {
    with_runner(|r| r.harmonic_lines_json())
}

#[wasm_bindgen]
pub fn get_harmonic_spectrum() -> String {
    with_runner(|r| r.harmonic_spectrum_json())
}

/// Stars, constellation lines, labels and the ecliptic and equator circles. Static; fetch once.
#[wasm_bindgen]
pub fn get_sky_dome() -> String {
    with_runner(|r| r.sky_dome_json())
}

#[wasm_bindgen]
pub fn get_zodiac_ring() -> String {
    with_runner(|r| r.zodiac_ring_json())
}

#[wasm_bindgen]
pub fn get_zodiac_markers() -> String {
    with_runner(|r| r.zodiac_markers_json())
}

#[wasm_bindgen]
pub fn get_sky_bodies() -> String {
    with_runner(|r| r.sky_bodies_json())
}

#[wasm_bindgen]
pub fn get_chart_request() -> String {
    with_runner(|r| r.chart_request_json())
}

#[wasm_bindgen]
pub fn get_settings() -> String {
    with_runner(|r| r.settings_json())
}

/// The saved birth chart as JSON, or an empty string.
#[wasm_bindgen]
pub fn get_saved_birth_chart() -> String {
    with_runner(|r| r.birth_chart_json())
}
