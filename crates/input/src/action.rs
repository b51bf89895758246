use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A movement intent bound to a held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Motion {
    /// Unit direction. Forward/backward/left/right are camera-local
    /// (forward is -Z); up/down are world Y.
    pub fn direction(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::NEG_Z,
            Self::Backward => Vec3::Z,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
            Self::Up => Vec3::Y,
            Self::Down => Vec3::NEG_Y,
        }
    }

    /// True for motions expressed in world axes.
    pub fn is_world_space(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// A high-level input action produced by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A motion key went down.
    Press(Motion),
    /// A motion key went up.
    Release(Motion),
    /// Pointer moved while look mode is active, in pixels.
    Look { dx: f32, dy: f32 },
    /// Speed boost held or released.
    Boost(bool),
    /// Unbound input.
    Noop,
}
