pub mod depth;
pub mod device;
pub mod sampler;
pub mod session;
pub mod sim;

// Re-exports for convenience
pub use device::{CoordinateMapper, DeviceStatus, SensorDevice};
pub use sampler::BodySampler;
pub use session::{SensorSession, SessionError};
pub use sim::SimulatedSensor;
