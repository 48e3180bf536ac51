//! Scratch remote-sensor client.
//!
//! Scratch 1.4 listens on TCP port 42001 when remote sensors are enabled.
//! Every message is a 4-byte big-endian length followed by the payload;
//! a `sensor-update` payload carries quoted key / value pairs that show up
//! in Scratch as sensor variables.

use std::collections::BTreeMap;
use std::io::Write;
use std::net::TcpStream;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::bridge::SensorValueSink;

pub const DEFAULT_ADDR: &str = "127.0.0.1:42001";

const RECONNECT_COOLDOWN: Duration = Duration::from_secs(2);

/// Sink that forwards each batch as one `sensor-update` message.
///
/// The connection is made lazily and re-made after failures, with a
/// cooldown so an absent Scratch does not flood the log at frame rate.
/// While disconnected, batches are dropped; the bridge re-sends current
/// state every frame anyway.
pub struct ScratchSink {
    addr: String,
    stream: Option<TcpStream>,
    last_attempt: Option<Instant>,
}

impl ScratchSink {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: None,
            last_attempt: None,
        }
    }

    fn ensure_connected(&mut self) -> Option<&mut TcpStream> {
        if self.stream.is_none() {
            let due = self
                .last_attempt
                .is_none_or(|at| at.elapsed() >= RECONNECT_COOLDOWN);
            if due {
                self.last_attempt = Some(Instant::now());
                match TcpStream::connect(&self.addr) {
                    Ok(stream) => {
                        stream.set_nodelay(true).ok();
                        info!("connected to Scratch at {}", self.addr);
                        self.stream = Some(stream);
                    }
                    Err(err) => {
                        warn!("Scratch not reachable at {}: {err}", self.addr);
                    }
                }
            }
        }
        self.stream.as_mut()
    }
}

impl SensorValueSink for ScratchSink {
    fn send(&mut self, values: &BTreeMap<String, String>) -> Result<()> {
        let message = encode_sensor_update(values);
        let Some(stream) = self.ensure_connected() else {
            // Not connected right now; this frame's update is dropped.
            return Ok(());
        };
        match stream.write_all(&message) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Drop the broken stream; the next flush reconnects.
                self.stream = None;
                Err(err).context("writing sensor-update to Scratch")
            }
        }
    }
}

/// Build one length-prefixed `sensor-update` message. Keys are quoted with
/// embedded quotes doubled; values go out verbatim (ours are integers).
fn encode_sensor_update(values: &BTreeMap<String, String>) -> Vec<u8> {
    let mut payload = String::from("sensor-update");
    for (key, value) in values {
        payload.push_str(" \"");
        payload.push_str(&key.replace('"', "\"\""));
        payload.push_str("\" ");
        payload.push_str(value);
    }

    let payload = payload.into_bytes();
    let mut message = Vec::with_capacity(payload.len() + 4);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(&payload);
    message
}
