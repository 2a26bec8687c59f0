use chrono::{DateTime, Utc};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::api::settings::{AppSettings, BirthChartRecord, SettingsPatch};
use crate::api::types::{BodyState, OrreryEvent};
use crate::catalog::bodies::{EARTH, FALLBACK_SIZE, SUN};
use crate::catalog::{BodyCatalog, StarCatalog};
use crate::chart::harmonics::{all_harmonic_clusters, harmonic_spectrum, HarmonicCluster, HarmonicStrength, HARMONIC_ORB_DEG, MAX_HARMONIC};
use crate::chart::{ChartRequest, ChartService, ChartSnapshot, KeplerianChart, PatternRecord};
use crate::coords::sidereal::sky_rotation_y;
use crate::core::scene::{SceneTransitionMachine, SceneTrigger, SceneVisibility, ScenePhase, ViewEvent, ViewMode};
use crate::core::selection::Selection;
use crate::core::time::{days_since_j2000, FrameTimer, TimeDriver};
use crate::extensions::easing::Easing;
use crate::input::queue::{InputEvent, InputQueue};
use crate::orbit::path::orbit_path;
use crate::renderer::camera::{default_flight_distance, Camera3D};
use crate::renderer::flight::{focus_key, resolve, CameraFlightController, FlightStatus, FlyTarget};
use crate::renderer::instance::BodyInstance;
use crate::systems::overlays::{
    aspect_lines, harmonic_lines, house_cusp_lines, pattern_lines, zodiac_markers, zodiac_ring, AspectLine, CuspLine,
    HarmonicLine, Segment, ZodiacArc, ZodiacMarker,
};
use crate::systems::positions::PositionSampler;
use crate::systems::sky::{place_sky_bodies, SkyBody, SkyDome, DEFAULT_BACKGROUND_STARS, DEFAULT_STAR_SEED};

/// Configuration for the orrery. Any subset can be overridden from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Camera flight duration in seconds (default: 0.85).
    pub flight_duration: f64,
    pub flight_easing: Easing,
    /// Targets closer than this on every axis do not restart a flight (default: 0.001).
    pub retarget_epsilon: f64,
    /// Display distance of the moon from the earth (default: 0.4).
    pub moon_offset: f64,
    /// Radius of the night-sky sphere (default: 900).
    pub sky_radius: f64,
    /// Faint procedural stars behind the catalog (default: 3500).
    pub background_stars: usize,
    pub star_seed: u64,
    /// Days per second (default: 1).
    pub initial_speed: f64,
    /// Start playing as soon as mounted (default: false).
    pub start_playing: bool,
    /// Initial date. `None` means now.
    pub start_date: Option<DateTime<Utc>>,
    pub settings: AppSettings,
    /// Segments per orbit path (default: 256).
    pub orbit_path_samples: usize,
    /// Maximum bodies in the frame buffer (default: 16).
    pub max_bodies: usize,
    /// Maximum events per frame (default: 32).
    pub max_events: usize,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            flight_duration: 0.85,
            flight_easing: Easing::QuadInOut,
            retarget_epsilon: 0.001,
            moon_offset: 0.4,
            sky_radius: 900.0,
            background_stars: DEFAULT_BACKGROUND_STARS,
            star_seed: DEFAULT_STAR_SEED,
            initial_speed: 1.0,
            start_playing: false,
            start_date: None,
            settings: AppSettings::default(),
            orbit_path_samples: 256,
            max_bodies: 16,
            max_events: 32,
        }
    }
}

impl OrreryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One orbit drawn as a closed polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    pub key: String,
    pub points: Vec<DVec3>,
}

/// The whole application state, advanced one frame at a time.
pub struct Orrery<C: ChartService = KeplerianChart> {
    config: OrreryConfig,
    catalog: BodyCatalog,
    chart: C,
    sky_dome: SkyDome,
    settings: AppSettings,
    time: TimeDriver,
    scene: SceneTransitionMachine,
    camera: Camera3D,
    flight: CameraFlightController,
    timer: FrameTimer,
    states: Vec<BodyState>,
    sampled_at: Option<DateTime<Utc>>,
    chart_request: Option<ChartRequest>,
    snapshot: Option<ChartSnapshot>,
    birth_chart: Option<BirthChartRecord>,
    events: Vec<OrreryEvent>,
    frame_count: u64,
}

impl Orrery<KeplerianChart> {
    /// Built-in catalog with motion derived from its own elements.
    pub fn new(config: OrreryConfig) -> Self {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        Self::with_chart(config, catalog, chart)
    }
}

impl<C: ChartService> Orrery<C> {
    pub fn with_chart(config: OrreryConfig, catalog: BodyCatalog, chart: C) -> Self {
        let date = config.start_date.unwrap_or_else(Utc::now);
        let stars = StarCatalog::builtin().unwrap_or_else(|e| {
            log::warn!("Star catalog failed to load: {}", e);
            StarCatalog::default()
        });
        let mut orrery = Self {
            sky_dome: SkyDome::build(&stars, config.sky_radius, config.background_stars, config.star_seed),
            settings: config.settings.clone(),
            time: TimeDriver::new(date, config.initial_speed),
            scene: SceneTransitionMachine::new(),
            camera: Camera3D::default(),
            flight: CameraFlightController::new(config.flight_duration, config.flight_easing, config.retarget_epsilon),
            timer: FrameTimer::new(),
            states: Vec::new(),
            sampled_at: None,
            chart_request: None,
            snapshot: None,
            birth_chart: None,
            events: Vec::new(),
            frame_count: 0,
            config,
            catalog,
            chart,
        };
        orrery.resample();
        orrery.refresh_chart();
        orrery
    }

    // -- Lifecycle --

    /// Start receiving frames. Begins playback when configured to.
    pub fn mount(&mut self) {
        self.timer.start();
        if self.config.start_playing {
            self.set_playing(true);
        }
        log::info!("Orrery mounted at {}", self.time.date());
    }

    /// Stop receiving frames. Playback stops and any flight freezes where it is.
    pub fn unmount(&mut self) {
        self.timer.stop();
        self.set_playing(false);
    }

    /// Drain input, then run one frame at `timestamp` (seconds).
    pub fn update(&mut self, timestamp: f64, input: &mut InputQueue) {
        for event in input.drain() {
            self.handle(event);
        }
        self.frame(timestamp);
    }

    /// One frame: date, positions, chart, fly target, camera, completion.
    pub fn frame(&mut self, timestamp: f64) {
        self.frame_count += 1;
        let dt = self.timer.tick(timestamp);

        self.time.on_frame(timestamp);
        self.resample();
        self.refresh_chart();

        let phase = self.scene.phase();
        let target = resolve(phase, self.scene.selection(), &self.states);
        let default_distance = self.default_distance(phase);
        self.flight.retarget(target, default_distance, &mut self.camera);

        if self.flight.advance(dt, &mut self.camera) == FlightStatus::Completed {
            self.emit(OrreryEvent::new(OrreryEvent::FLIGHT_COMPLETE, phase.code() as f32, 0.0, 0.0));
            self.on_flight_complete();
        }
    }

    fn default_distance(&self, phase: ScenePhase) -> f64 {
        match focus_key(phase, self.scene.selection()) {
            Some(key) => default_flight_distance(key, self.catalog.size(key)),
            None => default_flight_distance("", FALLBACK_SIZE),
        }
    }

    fn on_flight_complete(&mut self) {
        self.dispatch(ViewEvent::Trigger(SceneTrigger::FlightComplete));
    }

    // -- Input --

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Select(selection) => self.dispatch(ViewEvent::Select(selection)),
            InputEvent::PointerMissed => self.dispatch(ViewEvent::Select(Selection::None)),
            InputEvent::RequestView(mode) => self.request_view(mode),
            InputEvent::FadeComplete => self.dispatch(ViewEvent::Trigger(SceneTrigger::FadeComplete)),
            InputEvent::CameraMoved { position, target } => {
                self.camera = Camera3D::new(position, target);
            }
            InputEvent::Step { days } => self.time.step(days),
            InputEvent::Play => self.set_playing(true),
            InputEvent::Pause => self.set_playing(false),
            InputEvent::TogglePlay => {
                let playing = !self.time.is_playing();
                self.set_playing(playing);
            }
            InputEvent::SetSpeedSlider { position } => {
                if self.time.set_speed_slider(position) {
                    self.emit_playback();
                }
            }
            InputEvent::SetDate(date) => self.time.set_date(date),
            InputEvent::UpdateSettings(patch) => self.settings.apply(&patch),
            InputEvent::ApplyBirthChart(record) => self.apply_birth_chart(record),
            InputEvent::ClearBirthChart => self.birth_chart = None,
            InputEvent::SetChart(snapshot) => self.snapshot = Some(snapshot),
        }
    }

    pub fn request_view(&mut self, mode: ViewMode) {
        self.dispatch(ViewEvent::Trigger(SceneTrigger::RequestView(mode)));
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let prev_phase = self.scene.phase();
        let prev_kind = self.scene.selection().kind_code();
        let prev_selection = self.scene.selection().clone();
        let earth_available = self.earth_available();

        if self.scene.dispatch(event, earth_available) {
            let phase = self.scene.phase();
            // A phase change always gets a fresh flight, even toward the same point.
            self.flight.reset();
            self.emit(OrreryEvent::new(
                OrreryEvent::PHASE_CHANGED,
                phase.code() as f32,
                prev_phase.code() as f32,
                0.0,
            ));
        }
        if *self.scene.selection() != prev_selection {
            self.flight.reset();
            self.emit(OrreryEvent::new(
                OrreryEvent::SELECTION_CHANGED,
                self.scene.selection().kind_code() as f32,
                prev_kind as f32,
                0.0,
            ));
        }
    }

    fn earth_available(&self) -> bool {
        self.catalog.elements(SUN).is_some() && self.states.iter().any(|s| s.key == EARTH)
    }

    fn set_playing(&mut self, playing: bool) {
        if playing == self.time.is_playing() {
            return;
        }
        if playing {
            self.time.play();
        } else {
            self.time.pause();
        }
        self.emit_playback();
    }

    fn emit_playback(&mut self) {
        let playing = if self.time.is_playing() { 1.0 } else { 0.0 };
        self.emit(OrreryEvent::new(OrreryEvent::PLAYBACK_CHANGED, playing, self.time.speed() as f32, 0.0));
    }

    fn apply_birth_chart(&mut self, record: BirthChartRecord) {
        self.time.set_date(record.date);
        self.settings.apply(&SettingsPatch::location(record.latitude, record.longitude));
        log::info!("Applied birth chart for {}", record.date);
        self.birth_chart = Some(record);
    }

    // -- Derived state --

    fn resample(&mut self) {
        let date = self.time.date();
        if self.sampled_at == Some(date) {
            return;
        }
        let sampler = PositionSampler::new(&self.catalog, &self.chart).with_moon_offset(self.config.moon_offset);
        self.states = sampler.sample_all(date);
        self.sampled_at = Some(date);
    }

    fn refresh_chart(&mut self) {
        let request = self.current_request();
        if self.chart_request.as_ref() == Some(&request) {
            return;
        }
        if let Some(snapshot) = self.chart.chart(&request) {
            self.snapshot = Some(snapshot);
        }
        self.chart_request = Some(request);
        self.emit(OrreryEvent::new(OrreryEvent::CHART_REQUEST_CHANGED, 0.0, 0.0, 0.0));
    }

    fn current_request(&self) -> ChartRequest {
        ChartRequest {
            at: self.time.date(),
            latitude: self.settings.latitude,
            longitude: self.settings.longitude,
            house_system: self.settings.house_system,
            major_aspects_only: !self.settings.show_minor_aspects,
        }
    }

    fn emit(&mut self, event: OrreryEvent) {
        self.events.push(event);
    }

    // -- Accessors --

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn time(&self) -> &TimeDriver {
        &self.time
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.time.date()
    }

    pub fn phase(&self) -> ScenePhase {
        self.scene.phase()
    }

    pub fn selection(&self) -> &Selection {
        self.scene.selection()
    }

    pub fn visibility(&self) -> SceneVisibility {
        self.scene.visibility()
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn flight(&self) -> &CameraFlightController {
        &self.flight
    }

    pub fn states(&self) -> &[BodyState] {
        &self.states
    }

    /// The current fly target, recomputed from phase, selection and positions.
    pub fn fly_target(&self) -> Option<FlyTarget> {
        resolve(self.scene.phase(), self.scene.selection(), &self.states)
    }

    pub fn chart_request(&self) -> Option<&ChartRequest> {
        self.chart_request.as_ref()
    }

    pub fn chart_snapshot(&self) -> Option<&ChartSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn birth_chart(&self) -> Option<&BirthChartRecord> {
        self.birth_chart.as_ref()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Events emitted since the last `clear_events`.
    pub fn events(&self) -> &[OrreryEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Frame-buffer instances, in sample order.
    pub fn body_instances(&self) -> Vec<BodyInstance> {
        let selection = self.scene.selection();
        self.states
            .iter()
            .map(|s| BodyInstance::from_state(s, self.catalog.size(&s.key), selection.involves(&s.key)))
            .collect()
    }

    /// Earth's orbit (from the sun entry) followed by every orbiting planet.
    pub fn orbit_paths(&self) -> Vec<OrbitPath> {
        let samples = self.config.orbit_path_samples;
        let earth = self.catalog.elements(SUN).map(|el| OrbitPath {
            key: EARTH.to_string(),
            points: orbit_path(el, samples),
        });
        let planets = self.catalog.orbiting_keys().filter_map(|key| {
            self.catalog.elements(key).map(|el| OrbitPath {
                key: key.to_string(),
                points: orbit_path(el, samples),
            })
        });
        earth.into_iter().chain(planets).collect()
    }

    pub fn aspect_lines(&self) -> Vec<AspectLine> {
        self.snapshot
            .as_ref()
            .map(|chart| aspect_lines(chart, &self.states))
            .unwrap_or_default()
    }

    /// Lines for the selected pattern; empty unless a pattern is selected.
    pub fn pattern_lines(&self) -> Vec<Segment> {
        match self.scene.selection() {
            Selection::Pattern { id, bodies } => {
                let pattern = PatternRecord {
                    id: id.clone(),
                    name: String::new(),
                    bodies: bodies.clone(),
                };
                pattern_lines(&pattern, &self.states)
            }
            _ => Vec::new(),
        }
    }

    pub fn house_cusp_lines(&self) -> Vec<CuspLine> {
        self.snapshot
            .as_ref()
            .map(|chart| house_cusp_lines(&chart.house_cusps))
            .unwrap_or_default()
    }

    /// Bodies in harmonic clusters. A pushed chart's clusters win over locally computed ones.
    pub fn harmonic_clusters(&self) -> Vec<HarmonicCluster> {
        if let Some(chart) = self.snapshot.as_ref().filter(|c| !c.harmonics.is_empty()) {
            return chart.harmonics.clone();
        }
        all_harmonic_clusters(&self.harmonic_longitudes(), MAX_HARMONIC, HARMONIC_ORB_DEG)
    }

    pub fn harmonic_spectrum(&self) -> Vec<HarmonicStrength> {
        harmonic_spectrum(&self.harmonic_longitudes(), MAX_HARMONIC, HARMONIC_ORB_DEG)
    }

    /// Harmonic overlay; empty unless harmonics are switched on.
    pub fn harmonic_lines(&self) -> Vec<HarmonicLine> {
        if !self.settings.show_harmonics {
            return Vec::new();
        }
        harmonic_lines(&self.harmonic_clusters(), &self.states)
    }

    fn harmonic_longitudes(&self) -> Vec<(&str, f64)> {
        self.states
            .iter()
            .filter(|s| s.key != EARTH)
            .map(|s| (s.key.as_str(), s.longitude_deg))
            .collect()
    }

    pub fn zodiac_ring(&self) -> Vec<ZodiacArc> {
        zodiac_ring()
    }

    pub fn zodiac_markers(&self) -> Vec<ZodiacMarker> {
        zodiac_markers()
    }

    /// Stars, constellations and reference circles. Built once; does not move with the date.
    pub fn sky_dome(&self) -> &SkyDome {
        &self.sky_dome
    }

    pub fn sky_bodies(&self) -> Vec<SkyBody> {
        place_sky_bodies(&self.states, self.config.sky_radius)
    }

    /// Rotation of the sky group about display +y (radians) for the observer's longitude.
    pub fn sky_rotation(&self) -> f64 {
        sky_rotation_y(days_since_j2000(self.time.date()), self.settings.longitude)
    }
}
