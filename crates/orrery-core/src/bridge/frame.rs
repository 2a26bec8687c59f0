use crate::api::app::Orrery;
use crate::api::types::OrreryEvent;
use crate::bridge::protocol::*;
use crate::chart::ChartService;
use crate::renderer::instance::BodyInstance;

/// Contiguous f32 frame buffer the host reads through a raw pointer.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write the orrery's current frame. Bodies and events beyond capacity are dropped.
    pub fn write<C: ChartService>(&mut self, orrery: &Orrery<C>) {
        let layout = &self.layout;
        let instances = orrery.body_instances();
        let body_count = instances.len().min(layout.max_bodies);
        if instances.len() > body_count {
            log::warn!("Frame buffer holds {} bodies, dropping {}", layout.max_bodies, instances.len() - body_count);
        }
        let events = orrery.events();
        let event_count = events.len().min(layout.max_events);

        let body_start = layout.body_data_offset;
        let body_floats: &[f32] = bytemuck::cast_slice::<BodyInstance, f32>(&instances[..body_count]);
        self.data[body_start..body_start + body_floats.len()].copy_from_slice(body_floats);

        let cam = orrery.camera();
        let flight = orrery.flight();
        let cam_start = layout.camera_data_offset;
        self.data[cam_start..cam_start + CAMERA_FLOATS].copy_from_slice(&[
            cam.position.x as f32,
            cam.position.y as f32,
            cam.position.z as f32,
            cam.target.x as f32,
            cam.target.y as f32,
            cam.target.z as f32,
            if flight.is_flying() { 1.0 } else { 0.0 },
            flight.progress() as f32,
        ]);

        let event_start = layout.event_data_offset;
        let event_floats: &[f32] = bytemuck::cast_slice::<OrreryEvent, f32>(&events[..event_count]);
        self.data[event_start..event_start + event_floats.len()].copy_from_slice(event_floats);

        let time = orrery.time();
        let header = &mut self.data[..HEADER_FLOATS];
        header[HEADER_LOCK] = 0.0;
        header[HEADER_FRAME_COUNTER] = orrery.frame_count() as f32;
        header[HEADER_MAX_BODIES] = layout.max_bodies as f32;
        header[HEADER_BODY_COUNT] = body_count as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_SCENE_PHASE] = orrery.phase().code() as f32;
        header[HEADER_VISIBILITY] = orrery.visibility().bits() as f32;
        header[HEADER_SELECTION_KIND] = orrery.selection().kind_code() as f32;
        header[HEADER_PLAYING] = if time.is_playing() { 1.0 } else { 0.0 };
        header[HEADER_SPEED] = time.speed() as f32;
        header[HEADER_SLIDER_POSITION] = time.slider_position() as f32;
        header[HEADER_FLIGHT_PROGRESS] = flight.progress() as f32;
    }
}
