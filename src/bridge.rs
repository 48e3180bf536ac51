//! Accumulates named sensor values and hands them to an external consumer.

use std::collections::BTreeMap;

use anyhow::Result;
use log::warn;

/// Receives the complete value batch once per body-frame cycle. The
/// transport (Scratch TCP, logging, a test collector) is the sink's
/// business.
pub trait SensorValueSink {
    fn send(&mut self, values: &BTreeMap<String, String>) -> Result<()>;
}

/// The current snapshot of sensor-derived values.
///
/// The batch is long-lived and never cleared between flushes: a key keeps
/// its last value until something overwrites it, so rarely-updated entries
/// (like the frame counter) stay current for the consumer.
pub struct SensorValueBridge {
    values: BTreeMap<String, String>,
    sink: Box<dyn SensorValueSink>,
}

impl SensorValueBridge {
    pub fn new(sink: Box<dyn SensorValueSink>) -> Self {
        Self {
            values: BTreeMap::new(),
            sink,
        }
    }

    /// Upsert one value. The last write for a key within a frame wins.
    pub fn add_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Hand the whole batch to the sink. A sink failure costs one frame of
    /// updates; it is logged and must never take the frame loop down.
    pub fn flush(&mut self) {
        if let Err(err) = self.sink.send(&self.values) {
            warn!("failed to deliver sensor values: {err:?}");
        }
    }
}

#[cfg(test)]
pub(crate) mod test_sink {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use super::SensorValueSink;

    /// Records every batch it is handed.
    #[derive(Default)]
    pub struct CollectingSink {
        pub batches: Rc<RefCell<Vec<BTreeMap<String, String>>>>,
    }

    impl SensorValueSink for CollectingSink {
        fn send(&mut self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
            self.batches.borrow_mut().push(values.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_sink::CollectingSink;
    use super::*;

    fn bridge_with_sink() -> (
        SensorValueBridge,
        std::rc::Rc<std::cell::RefCell<Vec<BTreeMap<String, String>>>>,
    ) {
        let sink = CollectingSink::default();
        let batches = sink.batches.clone();
        (SensorValueBridge::new(Box::new(sink)), batches)
    }

    #[test]
    fn last_writer_within_a_frame_wins() {
        let (mut bridge, _) = bridge_with_sink();
        bridge.add_value("Head_X", "10".to_string());
        bridge.add_value("Head_X", "20".to_string());
        assert_eq!(bridge.get("Head_X"), Some("20"));
        assert_eq!(bridge.len(), 1);
    }

    #[test]
    fn keys_persist_across_flushes() {
        let (mut bridge, batches) = bridge_with_sink();
        bridge.add_value("FrameCount", "30".to_string());
        bridge.flush();
        bridge.add_value("Head_X", "20".to_string());
        bridge.flush();

        let batches = batches.borrow();
        assert_eq!(batches.len(), 2);
        // The second flush still carries the untouched FrameCount entry.
        assert_eq!(batches[1].get("FrameCount").map(String::as_str), Some("30"));
        assert_eq!(batches[1].get("Head_X").map(String::as_str), Some("20"));
    }

    #[test]
    fn flush_hands_over_the_complete_batch() {
        let (mut bridge, batches) = bridge_with_sink();
        bridge.add_value("a", "1".to_string());
        bridge.add_value("b", "2".to_string());
        bridge.flush();
        assert_eq!(batches.borrow()[0].len(), 2);
    }

    #[test]
    fn sink_failure_does_not_panic() {
        struct FailingSink;
        impl SensorValueSink for FailingSink {
            fn send(&mut self, _: &BTreeMap<String, String>) -> anyhow::Result<()> {
                anyhow::bail!("consumer went away")
            }
        }

        let mut bridge = SensorValueBridge::new(Box::new(FailingSink));
        bridge.add_value("Head_X", "20".to_string());
        bridge.flush();
        // Values survive a failed delivery.
        assert_eq!(bridge.get("Head_X"), Some("20"));
    }
}
