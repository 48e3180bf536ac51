//! Built-in sensor backend that synthesises depth and body frames, so the
//! application runs (and can be demoed) with no hardware attached.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use super::device::{CoordinateMapper, DeviceStatus, FrameStreams, SensorDevice};
use crate::types::{
    Body, BodyFrame, CameraPoint, DepthFrame, DepthPoint, JOINT_COUNT, Joint, JointId,
    TrackingState,
};

pub const SIM_WIDTH: u32 = 320;
pub const SIM_HEIGHT: u32 = 240;
const SIM_BODY_CAPACITY: usize = 6;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const FOCAL_LENGTH_PX: f32 = 280.0;

/// Where the synthetic skeleton stands, meters from the sensor.
const BODY_DISTANCE_M: f32 = 2.0;

/// Joint offsets of the synthetic skeleton relative to the spine base,
/// meters: (joint, right, up).
const SKELETON_POSE: [(JointId, f32, f32); JOINT_COUNT] = [
    (JointId::SpineBase, 0.0, 0.0),
    (JointId::SpineMid, 0.0, 0.25),
    (JointId::SpineShoulder, 0.0, 0.45),
    (JointId::Neck, 0.0, 0.5),
    (JointId::Head, 0.0, 0.65),
    (JointId::ShoulderLeft, -0.2, 0.45),
    (JointId::ElbowLeft, -0.3, 0.25),
    (JointId::WristLeft, -0.35, 0.05),
    (JointId::HandLeft, -0.36, 0.0),
    (JointId::HandTipLeft, -0.37, -0.03),
    (JointId::ThumbLeft, -0.33, 0.02),
    (JointId::ShoulderRight, 0.2, 0.45),
    (JointId::ElbowRight, 0.3, 0.25),
    (JointId::WristRight, 0.35, 0.05),
    (JointId::HandRight, 0.36, 0.0),
    (JointId::HandTipRight, 0.37, -0.03),
    (JointId::ThumbRight, 0.33, 0.02),
    (JointId::HipLeft, -0.1, -0.05),
    (JointId::KneeLeft, -0.12, -0.45),
    (JointId::AnkleLeft, -0.13, -0.85),
    (JointId::FootLeft, -0.13, -0.9),
    (JointId::HipRight, 0.1, -0.05),
    (JointId::KneeRight, 0.12, -0.45),
    (JointId::AnkleRight, 0.13, -0.85),
    (JointId::FootRight, 0.13, -0.9),
];

/// Synthetic sensor: a swaying skeleton in front of a back wall with a
/// moving bulge, both derived from elapsed time.
pub struct SimulatedSensor {
    status: DeviceStatus,
}

impl SimulatedSensor {
    pub fn connected() -> Self {
        Self {
            status: DeviceStatus::Connected,
        }
    }

    pub fn with_status(status: DeviceStatus) -> Self {
        Self { status }
    }
}

impl SensorDevice for SimulatedSensor {
    fn status(&self) -> DeviceStatus {
        self.status
    }

    fn depth_size(&self) -> (u32, u32) {
        (SIM_WIDTH, SIM_HEIGHT)
    }

    fn body_capacity(&self) -> usize {
        SIM_BODY_CAPACITY
    }

    fn mapper(&self) -> Arc<dyn CoordinateMapper> {
        Arc::new(PinholeMapper {
            width: SIM_WIDTH,
            height: SIM_HEIGHT,
        })
    }

    fn run(self: Box<Self>, streams: FrameStreams) {
        let start = Instant::now();
        while !streams.should_stop() {
            let t = start.elapsed().as_secs_f32();
            streams.offer_depth(synth_depth_frame(t));
            streams.offer_body(synth_body_frame(t));
            thread::sleep(FRAME_INTERVAL);
        }
        info!("simulated sensor stopped");
    }
}

/// Ideal pinhole projection centered on the depth image.
pub struct PinholeMapper {
    width: u32,
    height: u32,
}

impl CoordinateMapper for PinholeMapper {
    fn camera_to_depth(&self, point: CameraPoint) -> DepthPoint {
        let z = point.z.max(0.1);
        DepthPoint {
            x: self.width as f32 / 2.0 + point.x / z * FOCAL_LENGTH_PX,
            y: self.height as f32 / 2.0 - point.y / z * FOCAL_LENGTH_PX,
        }
    }
}

fn synth_depth_frame(t: f32) -> DepthFrame {
    let mut samples = Vec::with_capacity((SIM_WIDTH * SIM_HEIGHT) as usize);
    let bulge_x = 0.3 * (t * 0.6).sin();
    for y in 0..SIM_HEIGHT {
        for x in 0..SIM_WIDTH {
            let fx = x as f32 / SIM_WIDTH as f32 - 0.5;
            let fy = y as f32 / SIM_HEIGHT as f32 - 0.5;
            let d2 = (fx - bulge_x).powi(2) + fy * fy;
            let bulge = (1.0 - d2 * 12.0).max(0.0);
            samples.push((3000.0 - 1200.0 * bulge) as u16);
        }
    }
    DepthFrame::new(SIM_WIDTH, SIM_HEIGHT, samples)
}

fn synth_body_frame(t: f32) -> BodyFrame {
    let sway = 0.3 * (t * 0.8).sin();
    let bob = 0.05 * (t * 2.0).sin();

    let mut body = Body::tracked();
    for (id, right, up) in SKELETON_POSE {
        body.set_joint(
            id,
            Joint::at(sway + right, up + bob, BODY_DISTANCE_M, TrackingState::Tracked),
        );
    }

    let mut bodies = vec![body];
    bodies.resize(SIM_BODY_CAPACITY, Body::untracked());
    BodyFrame { bodies }
}
