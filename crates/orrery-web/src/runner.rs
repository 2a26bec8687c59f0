use chrono::{DateTime, Utc};
use serde::Serialize;

use orrery_core::{
    BirthChartRecord, ChartSnapshot, FrameBuffer, InputEvent, InputQueue, Orrery,
    OrreryConfig, ProtocolLayout, Selection, SettingsPatch, ViewMode,
};

/// Owns the orrery, its input queue and the frame buffer the host reads.
///
/// The host pushes input between frames and calls `tick` once per animation frame.
pub struct OrreryRunner {
    orrery: Orrery,
    input: InputQueue,
    frame: FrameBuffer,
}

impl OrreryRunner {
    pub fn new(config: OrreryConfig) -> Self {
        let frame = FrameBuffer::new(ProtocolLayout::from_config(&config));
        let mut orrery = Orrery::new(config);
        orrery.mount();
        Self {
            orrery,
            input: InputQueue::new(),
            frame,
        }
    }

    /// Build from a JSON config. Invalid JSON falls back to defaults.
    pub fn from_json(config_json: &str) -> Self {
        let config = if config_json.trim().is_empty() {
            OrreryConfig::default()
        } else {
            OrreryConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("Invalid orrery config, using defaults: {}", e);
                OrreryConfig::default()
            })
        };
        Self::new(config)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at `timestamp_ms` and refresh the frame buffer.
    pub fn tick(&mut self, timestamp_ms: f64) {
        self.orrery.clear_events();
        self.orrery.update(timestamp_ms / 1000.0, &mut self.input);
        self.frame.write(&self.orrery);
    }

    pub fn unmount(&mut self) {
        self.orrery.unmount();
    }

    pub fn mount(&mut self) {
        self.orrery.mount();
    }

    // ---- Input parsing ----

    pub fn select_pattern(&mut self, id: &str, bodies_json: &str) -> bool {
        match serde_json::from_str::<Vec<String>>(bodies_json) {
            Ok(bodies) => {
                self.push_input(InputEvent::Select(Selection::pattern(id, bodies)));
                true
            }
            Err(e) => {
                log::warn!("Invalid pattern body list: {}", e);
                false
            }
        }
    }

    pub fn request_view(&mut self, mode: &str) -> bool {
        let mode = match mode {
            "sky" => ViewMode::Sky,
            "orrery" => ViewMode::Orrery,
            other => {
                log::warn!("Unknown view mode '{}'", other);
                return false;
            }
        };
        self.push_input(InputEvent::RequestView(mode));
        true
    }

    pub fn set_date_ms(&mut self, ms: f64) -> bool {
        match DateTime::<Utc>::from_timestamp_millis(ms as i64) {
            Some(date) if ms.is_finite() => {
                self.push_input(InputEvent::SetDate(date));
                true
            }
            _ => {
                log::warn!("Rejected date {} ms", ms);
                false
            }
        }
    }

    pub fn update_settings(&mut self, json: &str) -> bool {
        self.push_parsed(SettingsPatch::from_json(json), InputEvent::UpdateSettings, "settings")
    }

    pub fn apply_birth_chart(&mut self, json: &str) -> bool {
        self.push_parsed(BirthChartRecord::from_json(json), InputEvent::ApplyBirthChart, "birth chart")
    }

    pub fn set_chart(&mut self, json: &str) -> bool {
        self.push_parsed(ChartSnapshot::from_json(json), InputEvent::SetChart, "chart")
    }

    fn push_parsed<T>(
        &mut self,
        parsed: Result<T, serde_json::Error>,
        wrap: impl FnOnce(T) -> InputEvent,
        what: &str,
    ) -> bool {
        match parsed {
            Ok(value) => {
                self.push_input(wrap(value));
                true
            }
            Err(e) => {
                log::warn!("Invalid {} JSON: {}", what, e);
                false
            }
        }
    }

    // ---- Frame buffer accessors ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.frame.layout().buffer_total_floats as u32
    }

    pub fn max_bodies(&self) -> u32 {
        self.frame.layout().max_bodies as u32
    }

    pub fn max_events(&self) -> u32 {
        self.frame.layout().max_events as u32
    }

    // ---- Structured accessors ----

    pub fn date_ms(&self) -> f64 {
        self.orrery.date().timestamp_millis() as f64
    }

    pub fn sky_rotation(&self) -> f64 {
        self.orrery.sky_rotation()
    }

    pub fn body_states_json(&self) -> String {
        to_json(&self.orrery.states())
    }

    pub fn body_keys_json(&self) -> String {
        let keys: Vec<&str> = self.orrery.states().iter().map(|s| s.key.as_str()).collect();
        to_json(&keys)
    }

    pub fn selection_json(&self) -> String {
        to_json(self.orrery.selection())
    }

    pub fn orbit_paths_json(&self) -> String {
        to_json(&self.orrery.orbit_paths())
    }

    pub fn aspect_lines_json(&self) -> String {
        to_json(&self.orrery.aspect_lines())
    }

    pub fn pattern_lines_json(&self) -> String {
        to_json(&self.orrery.pattern_lines())
    }

    pub fn house_cusps_json(&self) -> String {
        to_json(&self.orrery.house_cusp_lines())
    }

    pub fn sky_bodies_json(&self) -> String {
        to_json(&self.orrery.sky_bodies())
    }

    pub fn harmonic_lines_json(&self) -> String {
        to_json(&self.orrery.harmonic_lines())
    }

    pub fn harmonic_spectrum_json(&self) -> String {
        to_json(&self.orrery.harmonic_spectrum())
    }

    pub fn sky_dome_json(&self) -> String {
        to_json(self.orrery.sky_dome())
    }

    pub fn zodiac_ring_json(&self) -> String {
        to_json(&self.orrery.zodiac_ring())
    }

    pub fn zodiac_markers_json(&self) -> String {
        to_json(&self.orrery.zodiac_markers())
    }

    pub fn chart_request_json(&self) -> String {
        to_json(&self.orrery.chart_request())
    }

    pub fn settings_json(&self) -> String {
        to_json(self.orrery.settings())
    }

    /// The saved birth chart, or an empty string when none is set.
    pub fn birth_chart_json(&self) -> String {
        match self.orrery.birth_chart() {
            Some(record) => record.to_json().unwrap_or_else(|e| {
                log::warn!("Failed to serialize birth chart: {}", e);
                String::new()
            }),
            None => String::new(),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Failed to serialize: {}", e);
        "null".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> OrreryRunner {
        OrreryRunner::from_json(r#"{ "start_date": "2000-01-01T12:00:00Z" }"#)
    }

    #[test]
    fn tick_fills_frame_buffer() {
        let mut r = runner();
        r.tick(0.0);
        assert_eq!(r.frame_len(), r.buffer_total_floats());
        let keys: Vec<String> = serde_json::from_str(&r.body_keys_json()).unwrap();
        assert_eq!(keys.len(), 11);
        assert_eq!(keys[0], "sun");
    }

    #[test]
    fn invalid_config_falls_back() {
        let r = OrreryRunner::from_json("{ nope");
        assert_eq!(r.max_bodies(), 16);
    }

    #[test]
    fn input_parsing_rejects_garbage() {
        let mut r = runner();
        assert!(!r.request_view("sideways"));
        assert!(!r.select_pattern("p", "not json"));
        assert!(!r.apply_birth_chart("{}"));
        assert!(!r.set_date_ms(f64::NAN));
        assert!(r.request_view("sky"));
        r.tick(0.0);
        assert_eq!(r.selection_json(), r#"{"kind":"planet","key":"earth"}"#);
    }

    #[test]
    fn set_date_moves_the_clock() {
        let mut r = runner();
        assert!(r.set_date_ms(0.0));
        r.tick(16.0);
        assert_eq!(r.date_ms(), 0.0);
    }

    #[test]
    fn harmonic_lines_need_the_setting() {
        let mut r = runner();
        r.tick(0.0);
        assert_eq!(r.harmonic_lines_json(), "[]");
        assert!(r.update_settings(r#"{ "show_harmonics": true }"#));
        r.tick(16.0);
        let lines: Vec<serde_json::Value> = serde_json::from_str(&r.harmonic_lines_json()).unwrap();
        assert!(!lines.is_empty());
        assert!(lines[0]["color_index"].is_u64());
    }

    #[test]
    fn sky_dome_serializes() {
        let r = runner();
        let dome: serde_json::Value = serde_json::from_str(&r.sky_dome_json()).unwrap();
        assert!(dome["stars"].as_array().is_some_and(|s| s.len() > 186));
        assert_eq!(dome["zodiac_labels"].as_array().map(Vec::len), Some(12));
        let markers: Vec<serde_json::Value> = serde_json::from_str(&r.zodiac_markers_json()).unwrap();
        assert_eq!(markers[0]["element"], "fire");
    }

    #[test]
    fn birth_chart_round_trip() {
        let mut r = runner();
        assert_eq!(r.birth_chart_json(), "");
        assert!(r.apply_birth_chart(r#"{"date":"1990-07-15T08:30:00Z","latitude":51.5,"longitude":-0.12,"locationName":"London"}"#));
        r.tick(0.0);
        let saved = BirthChartRecord::from_json(&r.birth_chart_json()).unwrap();
        assert_eq!(saved.location_name, "London");
    }
}
