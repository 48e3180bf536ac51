//! Drives the full pipeline against the simulated sensor: session → depth
//! renderer / body sampler → value bridge, without opening a window.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use motion_scratch::bridge::{SensorValueBridge, SensorValueSink};
use motion_scratch::pipeline::depth::depth_to_pixels;
use motion_scratch::pipeline::sim::{SIM_HEIGHT, SIM_WIDTH};
use motion_scratch::pipeline::{BodySampler, DeviceStatus, SensorSession, SessionError, SimulatedSensor};
use motion_scratch::types::{BodyFrame, DepthFrame, JointId};

#[derive(Default)]
struct CollectingSink {
    batches: Rc<RefCell<Vec<BTreeMap<String, String>>>>,
}

impl SensorValueSink for CollectingSink {
    fn send(&mut self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        self.batches.borrow_mut().push(values.clone());
        Ok(())
    }
}

fn wait_for<T>(mut poll: impl FnMut() -> Option<T>) -> T {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(value) = poll() {
            return value;
        }
        assert!(Instant::now() < deadline, "timed out waiting for a frame");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn disconnected_device_fails_to_open() {
    let device = SimulatedSensor::with_status(DeviceStatus::Disconnected);
    match SensorSession::open(Box::new(device)) {
        Err(SessionError::DeviceUnavailable(status)) => {
            assert_eq!(status, DeviceStatus::Disconnected);
        }
        Ok(_) => panic!("open must fail without a connected device"),
    }
}

#[test]
fn simulated_frames_flow_through_renderer_and_sampler() {
    let mut session = SensorSession::open(Box::new(SimulatedSensor::connected())).unwrap();
    assert_eq!(session.depth_size(), (SIM_WIDTH, SIM_HEIGHT));

    let depth: DepthFrame = wait_for(|| session.latest_depth_frame());
    let pixels = depth_to_pixels(&depth);
    assert_eq!(pixels.len(), (SIM_WIDTH * SIM_HEIGHT) as usize);
    // Everything in the simulated scene is mid-range: neither black nor
    // saturated white.
    assert!(pixels.iter().all(|&p| p != 0 && p != 0x00FF_FFFF));

    let body: BodyFrame = wait_for(|| session.next_body_frame());

    let sink = CollectingSink::default();
    let batches = sink.batches.clone();
    let mut bridge = SensorValueBridge::new(Box::new(sink));
    let mut sampler = BodySampler::new(session.body_capacity());
    let mapper = session.mapper();

    sampler.sample(&body, mapper.as_ref(), &mut bridge);
    bridge.flush();

    // One X/Y pair per joint, and every marker projects inside the image.
    let batch = &batches.borrow()[0];
    assert_eq!(batch.len(), JointId::ALL.len() * 2);
    for id in JointId::ALL {
        assert!(batch.contains_key(&format!("{id}_X")));
        assert!(batch.contains_key(&format!("{id}_Y")));
    }
    assert_eq!(sampler.markers().len(), JointId::ALL.len());
    for marker in sampler.markers() {
        assert!((0.0..SIM_WIDTH as f32).contains(&marker.x));
        assert!((0.0..SIM_HEIGHT as f32).contains(&marker.y));
    }

    session.close();
    session.close();
    assert!(session.next_body_frame().is_none());
}
