//! The vendor-sensor boundary: everything device-specific lives behind
//! [`SensorDevice`], including body tracking and camera-to-depth mapping.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crossbeam_channel::Sender;

use crate::types::{BodyFrame, CameraPoint, DepthFrame, DepthPoint};

/// Connection state a device reports before a session opens it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceStatus {
    Connected,
    Disconnected,
    Error,
}

/// Projects 3-D camera-space points into depth-image pixel coordinates.
///
/// The math is owned by the device (lens intrinsics and all); consumers
/// treat it as opaque.
pub trait CoordinateMapper: Send + Sync {
    fn camera_to_depth(&self, point: CameraPoint) -> DepthPoint;
}

/// Outbound frame channels handed to a running device.
///
/// Both channels hold a single slot. A device offers every frame it
/// produces; whatever the consumer has not picked up yet is dropped, so the
/// consumer only ever sees the latest frame per stream.
pub struct FrameStreams {
    depth_tx: Sender<DepthFrame>,
    body_tx: Sender<BodyFrame>,
    stop: Arc<AtomicBool>,
}

impl FrameStreams {
    pub(crate) fn new(
        depth_tx: Sender<DepthFrame>,
        body_tx: Sender<BodyFrame>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            depth_tx,
            body_tx,
            stop,
        }
    }

    /// True once the owning session has been closed.
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn offer_depth(&self, frame: DepthFrame) {
        // Drop if the consumer is busy, otherwise forward every frame.
        let _ = self.depth_tx.try_send(frame);
    }

    pub fn offer_body(&self, frame: BodyFrame) {
        let _ = self.body_tx.try_send(frame);
    }
}

/// A depth/body sensor backend.
///
/// Implementations push frames from their own thread via [`FrameStreams`]
/// and must return from `run` promptly once `should_stop` turns true.
pub trait SensorDevice: Send + 'static {
    fn status(&self) -> DeviceStatus;

    /// Depth image geometry, pixels.
    fn depth_size(&self) -> (u32, u32);

    /// Number of body slots the device refreshes per body frame.
    fn body_capacity(&self) -> usize;

    fn mapper(&self) -> Arc<dyn CoordinateMapper>;

    /// Produce frames until told to stop. Consumes the device; the session
    /// calls this on a dedicated thread.
    fn run(self: Box<Self>, streams: FrameStreams);
}
