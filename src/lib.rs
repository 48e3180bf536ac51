//! Depth-sensor skeleton preview bridged to Scratch remote sensors.
//!
//! A sensor backend (real hardware behind [`pipeline::SensorDevice`], or
//! the built-in [`pipeline::SimulatedSensor`]) pushes depth and body frames
//! over two single-slot channels. The main thread renders the depth image
//! as a grayscale preview with the tracked skeleton's joints overlaid on
//! top. After every body frame it forwards the scaled joint coordinates to
//! a Scratch 1.4 remote-sensor endpoint, so Scratch projects can react to
//! body motion.

pub mod app;
pub mod bridge;
pub mod pipeline;
pub mod scratch;
pub mod types;
pub mod ui;
