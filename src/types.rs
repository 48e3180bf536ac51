use std::fmt;

/// One depth image: `width * height` distance samples in millimeters.
///
/// Frames are transient; they live for one notification and are dropped at
/// the end of the dispatch iteration that consumed them.
#[derive(Clone, Debug)]
pub struct DepthFrame {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<u16>,
}

impl DepthFrame {
    /// A mismatched sample buffer is a contract violation by the device
    /// backend, not a runtime condition to recover from.
    pub fn new(width: u32, height: u32, samples: Vec<u16>) -> Self {
        assert_eq!(
            samples.len(),
            width as usize * height as usize,
            "depth frame sample count does not match {width}x{height}",
        );
        Self {
            width,
            height,
            samples,
        }
    }
}

/// One body-tracking update: up to the device's body capacity of records.
#[derive(Clone, Debug)]
pub struct BodyFrame {
    pub bodies: Vec<Body>,
}

/// A single skeleton slot as reported by the device.
#[derive(Clone, Debug)]
pub struct Body {
    pub tracked: bool,
    joints: [Joint; JOINT_COUNT],
}

impl Body {
    pub fn untracked() -> Self {
        Self {
            tracked: false,
            joints: [Joint::not_tracked(); JOINT_COUNT],
        }
    }

    pub fn tracked() -> Self {
        Self {
            tracked: true,
            ..Self::untracked()
        }
    }

    pub fn joint(&self, id: JointId) -> Joint {
        self.joints[id as usize]
    }

    pub fn set_joint(&mut self, id: JointId, joint: Joint) {
        self.joints[id as usize] = joint;
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::untracked()
    }
}

/// A tracked or inferred skeletal landmark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub position: CameraPoint,
    pub state: TrackingState,
}

impl Joint {
    pub fn not_tracked() -> Self {
        Self {
            position: CameraPoint::ZERO,
            state: TrackingState::NotTracked,
        }
    }

    pub fn at(x: f32, y: f32, z: f32, state: TrackingState) -> Self {
        Self {
            position: CameraPoint { x, y, z },
            state,
        }
    }
}

/// Confidence of a joint estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    NotTracked,
    Inferred,
    Tracked,
}

/// 3-D position in camera space, meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraPoint {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// 2-D position in depth-image space, pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthPoint {
    pub x: f32,
    pub y: f32,
}

pub const JOINT_COUNT: usize = 25;

/// The enumerated set of skeletal landmarks a body reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointId {
    SpineBase,
    SpineMid,
    Neck,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    SpineShoulder,
    HandTipLeft,
    ThumbLeft,
    HandTipRight,
    ThumbRight,
}

impl JointId {
    pub const ALL: [JointId; JOINT_COUNT] = [
        JointId::SpineBase,
        JointId::SpineMid,
        JointId::Neck,
        JointId::Head,
        JointId::ShoulderLeft,
        JointId::ElbowLeft,
        JointId::WristLeft,
        JointId::HandLeft,
        JointId::ShoulderRight,
        JointId::ElbowRight,
        JointId::WristRight,
        JointId::HandRight,
        JointId::HipLeft,
        JointId::KneeLeft,
        JointId::AnkleLeft,
        JointId::FootLeft,
        JointId::HipRight,
        JointId::KneeRight,
        JointId::AnkleRight,
        JointId::FootRight,
        JointId::SpineShoulder,
        JointId::HandTipLeft,
        JointId::ThumbLeft,
        JointId::HandTipRight,
        JointId::ThumbRight,
    ];

    /// Stable name used to build sensor-variable keys (`Head_X`, `Head_Y`, …).
    pub fn name(&self) -> &'static str {
        match self {
            JointId::SpineBase => "SpineBase",
            JointId::SpineMid => "SpineMid",
            JointId::Neck => "Neck",
            JointId::Head => "Head",
            JointId::ShoulderLeft => "ShoulderLeft",
            JointId::ElbowLeft => "ElbowLeft",
            JointId::WristLeft => "WristLeft",
            JointId::HandLeft => "HandLeft",
            JointId::ShoulderRight => "ShoulderRight",
            JointId::ElbowRight => "ElbowRight",
            JointId::WristRight => "WristRight",
            JointId::HandRight => "HandRight",
            JointId::HipLeft => "HipLeft",
            JointId::KneeLeft => "KneeLeft",
            JointId::AnkleLeft => "AnkleLeft",
            JointId::FootLeft => "FootLeft",
            JointId::HipRight => "HipRight",
            JointId::KneeRight => "KneeRight",
            JointId::AnkleRight => "AnkleRight",
            JointId::FootRight => "FootRight",
            JointId::SpineShoulder => "SpineShoulder",
            JointId::HandTipLeft => "HandTipLeft",
            JointId::ThumbLeft => "ThumbLeft",
            JointId::HandTipRight => "HandTipRight",
            JointId::ThumbRight => "ThumbRight",
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_joint_once() {
        assert_eq!(JointId::ALL.len(), JOINT_COUNT);
        for (index, id) in JointId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, index);
        }
    }

    #[test]
    fn joint_names_are_unique() {
        let mut names: Vec<_> = JointId::ALL.iter().map(|id| id.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), JOINT_COUNT);
    }

    #[test]
    #[should_panic]
    fn depth_frame_rejects_short_buffer() {
        DepthFrame::new(4, 4, vec![0u16; 3]);
    }
}
