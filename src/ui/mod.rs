//! Preview window: depth image at 1:1 with the skeleton overlay on top.

use std::time::Duration;

use anyhow::{Result, anyhow};
use minifb::{Key, Window, WindowOptions};

use crate::types::DepthPoint;

pub mod overlay;

pub struct PreviewWindow {
    window: Window,
    buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl PreviewWindow {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut window = Window::new(
            "motion-scratch — depth preview",
            width as usize,
            height as usize,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|err| anyhow!("failed to open preview window: {err}"))?;

        window.limit_update_rate(Some(Duration::from_millis(16)));

        Ok(Self {
            window,
            buffer: vec![0; width as usize * height as usize],
            width,
            height,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Composite the latest depth pixels and markers, then present.
    pub fn render(&mut self, depth_pixels: &[u32], markers: &[DepthPoint]) {
        let len = self.buffer.len();
        self.buffer.clear();
        self.buffer
            .extend_from_slice(&depth_pixels[..depth_pixels.len().min(len)]);
        self.buffer.resize(len, 0);

        overlay::draw_markers(&mut self.buffer, self.width, self.height, markers);

        self.window
            .update_with_buffer(&self.buffer, self.width as usize, self.height as usize)
            .ok();
    }
}
