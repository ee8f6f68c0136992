//! Input merging
//!
//! Device capture (key events, touch drag, virtual joystick) lives with the
//! platform collaborator; this module only folds the captured sources into
//! the single intent vector the simulation consumes. Y grows downward, as
//! in screen coordinates.

use glam::Vec2;

/// Discrete directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Raw input sources captured for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub keys: DirKeys,
    /// Analog source (virtual joystick or scaled pointer drag), each axis
    /// roughly in [-1, 1]
    pub analog: Vec2,
}

impl InputFrame {
    /// Merge keyboard and analog input into one intent vector.
    ///
    /// The result is normalized only when its magnitude exceeds 1, so a
    /// light analog deflection stays proportional while diagonals never
    /// move faster than cardinals.
    pub fn merged(&self) -> Vec2 {
        let mut v = self.analog;
        if self.keys.up {
            v.y -= 1.0;
        }
        if self.keys.down {
            v.y += 1.0;
        }
        if self.keys.left {
            v.x -= 1.0;
        }
        if self.keys.right {
            v.x += 1.0;
        }
        if v.length() > 1.0 {
            v = v.normalize();
        }
        v
    }
}

/// Clamp a raw joystick deflection to its radius and normalize to [-1, 1]
/// per axis
pub fn clamp_joystick(offset: Vec2, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    let dist = offset.length();
    if dist <= radius {
        offset / radius
    } else {
        offset / dist
    }
}
