use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;

use crossbeam_channel::{Receiver, bounded};
use log::info;
use thiserror::Error;

use super::device::{CoordinateMapper, DeviceStatus, FrameStreams, SensorDevice};
use crate::types::{BodyFrame, DepthFrame};

#[derive(Debug, Error)]
pub enum SessionError {
    /// No sensor is connected, or the one that is reports a bad status.
    /// Fatal at startup; never retried.
    #[error("sensor device unavailable (status {0:?})")]
    DeviceUnavailable(DeviceStatus),
}

/// An open connection to a sensor device and its two frame streams.
///
/// `open` spawns the device's producer thread; the session side only ever
/// polls the receiving ends, so all frame processing stays on the caller's
/// thread. `close` is idempotent and also runs on drop.
pub struct SensorSession {
    depth_rx: Option<Receiver<DepthFrame>>,
    body_rx: Option<Receiver<BodyFrame>>,
    mapper: Arc<dyn CoordinateMapper>,
    depth_size: (u32, u32),
    body_capacity: usize,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SensorSession {
    pub fn open(device: Box<dyn SensorDevice>) -> Result<Self, SessionError> {
        let status = device.status();
        if status != DeviceStatus::Connected {
            return Err(SessionError::DeviceUnavailable(status));
        }

        let depth_size = device.depth_size();
        let body_capacity = device.body_capacity();
        let mapper = device.mapper();

        // Single-slot channels: the device offers, stale frames are dropped,
        // the consumer sees the latest frame only.
        let (depth_tx, depth_rx) = bounded(1);
        let (body_tx, body_rx) = bounded(1);
        let stop = Arc::new(AtomicBool::new(false));

        let streams = FrameStreams::new(depth_tx, body_tx, stop.clone());
        let handle = thread::spawn(move || device.run(streams));

        info!(
            "sensor session open: {}x{} depth, {body_capacity} body slots",
            depth_size.0, depth_size.1
        );

        Ok(Self {
            depth_rx: Some(depth_rx),
            body_rx: Some(body_rx),
            mapper,
            depth_size,
            body_capacity,
            stop,
            handle: Some(handle),
        })
    }

    pub fn depth_size(&self) -> (u32, u32) {
        self.depth_size
    }

    pub fn body_capacity(&self) -> usize {
        self.body_capacity
    }

    pub fn mapper(&self) -> Arc<dyn CoordinateMapper> {
        self.mapper.clone()
    }

    /// Newest pending depth frame, discarding anything staler. `None` when
    /// nothing arrived since the last poll or the session is closed.
    pub fn latest_depth_frame(&self) -> Option<DepthFrame> {
        let rx = self.depth_rx.as_ref()?;
        let mut latest = None;
        while let Ok(frame) = rx.try_recv() {
            latest = Some(frame);
        }
        latest
    }

    /// Next pending body frame, if any.
    pub fn next_body_frame(&self) -> Option<BodyFrame> {
        self.body_rx.as_ref()?.try_recv().ok()
    }

    /// Release both frame streams and the device. Every step is guarded, so
    /// calling this twice, or after a partially failed open, is fine.
    pub fn close(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.body_rx.take();
        self.depth_rx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            info!("sensor session closed");
        }
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        self.close();
    }
}
