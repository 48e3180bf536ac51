//! Turns body frames into overlay markers and Scratch sensor values.

use std::time::{Duration, Instant};

use log::debug;

use super::device::CoordinateMapper;
use crate::bridge::SensorValueBridge;
use crate::types::{Body, BodyFrame, DepthPoint, JointId, TrackingState};

/// Meters → sensor-variable units.
const JOINT_SCALE: f32 = 200.0;

const FRAME_COUNT_KEY: &str = "FrameCount";
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Consumes body frames: refreshes the fixed body array in place, samples
/// the first tracked skeleton into the value bridge, and keeps the overlay
/// marker list for the renderer.
pub struct BodySampler {
    bodies: Vec<Body>,
    markers: Vec<DepthPoint>,
    frames_in_interval: u32,
    interval_start: Option<Instant>,
}

impl BodySampler {
    pub fn new(body_capacity: usize) -> Self {
        Self {
            bodies: vec![Body::untracked(); body_capacity],
            markers: Vec::new(),
            frames_in_interval: 0,
            interval_start: None,
        }
    }

    /// Markers for the current frame, depth-image pixels. Rebuilt from
    /// scratch on every [`sample`] call; stale markers never survive.
    pub fn markers(&self) -> &[DepthPoint] {
        &self.markers
    }

    pub fn sample(
        &mut self,
        frame: &BodyFrame,
        mapper: &dyn CoordinateMapper,
        bridge: &mut SensorValueBridge,
    ) {
        self.sample_at(Instant::now(), frame, mapper, bridge);
    }

    /// Like [`sample`], with the clock supplied by the caller.
    pub fn sample_at(
        &mut self,
        now: Instant,
        frame: &BodyFrame,
        mapper: &dyn CoordinateMapper,
        bridge: &mut SensorValueBridge,
    ) {
        self.frames_in_interval += 1;
        let interval_start = *self.interval_start.get_or_insert(now);
        if now.duration_since(interval_start) >= REPORT_INTERVAL {
            debug!("{} body frames in the last interval", self.frames_in_interval);
            bridge.add_value(FRAME_COUNT_KEY, self.frames_in_interval.to_string());
            self.interval_start = Some(now);
            self.frames_in_interval = 0;
        }

        self.refresh_bodies(frame);
        self.markers.clear();

        // First tracked slot in array order; a stable tie-break, not the
        // closest or largest body.
        let selected = self.bodies.iter().find(|body| body.tracked).cloned();
        match selected {
            Some(body) => {
                for id in JointId::ALL {
                    let joint = body.joint(id);
                    if joint.state == TrackingState::NotTracked {
                        continue;
                    }
                    self.markers.push(mapper.camera_to_depth(joint.position));
                    bridge.add_value(&format!("{id}_X"), scale(joint.position.x));
                    bridge.add_value(&format!("{id}_Y"), scale(joint.position.y));
                }
            }
            None => {
                for id in JointId::ALL {
                    bridge.add_value(&format!("{id}_X"), "0".to_string());
                    bridge.add_value(&format!("{id}_Y"), "0".to_string());
                }
            }
        }
    }

    /// Overwrite the long-lived body array with this frame's records;
    /// slots the frame does not cover fall back to untracked.
    fn refresh_bodies(&mut self, frame: &BodyFrame) {
        for (slot, body) in self.bodies.iter_mut().zip(&frame.bodies) {
            *slot = body.clone();
        }
        for slot in self.bodies.iter_mut().skip(frame.bodies.len()) {
            *slot = Body::untracked();
        }
    }
}

fn scale(meters: f32) -> String {
    ((meters * JOINT_SCALE).round() as i32).to_string()
}
