use motion_scratch::app::{self, AppConfig};
use motion_scratch::pipeline::SimulatedSensor;
use motion_scratch::scratch::{DEFAULT_ADDR, ScratchSink};

fn main() {
    env_logger::init();

    let scratch_addr =
        std::env::var("SCRATCH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = AppConfig {
        device: Box::new(SimulatedSensor::connected()),
        sink: Box::new(ScratchSink::new(scratch_addr)),
    };

    if let Err(err) = app::run(config) {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
