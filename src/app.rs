//! Application wiring: sensor session → renderer / sampler → bridge → window.

use anyhow::Result;
use log::info;

use crate::bridge::{SensorValueBridge, SensorValueSink};
use crate::pipeline::depth;
use crate::pipeline::device::SensorDevice;
use crate::pipeline::sampler::BodySampler;
use crate::pipeline::session::SensorSession;
use crate::ui::PreviewWindow;

pub struct AppConfig {
    pub device: Box<dyn SensorDevice>,
    pub sink: Box<dyn SensorValueSink>,
}

/// Run until the preview window closes (or Escape).
///
/// Depth and body notifications are both dispatched here, serially, on the
/// calling thread; the device only ever touches its side of the frame
/// channels. Frames are processed borrowed and dropped at the end of the
/// iteration that received them.
pub fn run(config: AppConfig) -> Result<()> {
    let mut session = SensorSession::open(config.device)?;
    let (width, height) = session.depth_size();
    let mapper = session.mapper();

    let mut sampler = BodySampler::new(session.body_capacity());
    let mut bridge = SensorValueBridge::new(config.sink);
    let mut window = PreviewWindow::new(width, height)?;
    let mut depth_pixels = vec![0u32; width as usize * height as usize];

    while window.is_open() {
        if let Some(frame) = session.latest_depth_frame() {
            depth_pixels = depth::depth_to_pixels(&frame);
        }

        while let Some(frame) = session.next_body_frame() {
            sampler.sample(&frame, mapper.as_ref(), &mut bridge);
            bridge.flush();
        }

        window.render(&depth_pixels, sampler.markers());
    }

    info!("preview window closed, shutting down");
    session.close();
    Ok(())
}
