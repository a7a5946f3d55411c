//! Transform property selectors used for the driver and each driven channel.

use serde::{Deserialize, Serialize};

/// One scalar component of a local transform.
///
/// Serialized by enumerator name (`"RotationY"`) so authored rigs stay readable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::PositionX,
        PropertyType::PositionY,
        PropertyType::PositionZ,
        PropertyType::RotationX,
        PropertyType::RotationY,
        PropertyType::RotationZ,
    ];

    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            PropertyType::RotationX | PropertyType::RotationY | PropertyType::RotationZ
        )
    }

    /// Component index (x = 0, y = 1, z = 2) within position or Euler angles.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            PropertyType::PositionX | PropertyType::RotationX => 0,
            PropertyType::PositionY | PropertyType::RotationY => 1,
            PropertyType::PositionZ | PropertyType::RotationZ => 2,
        }
    }

    /// Read this component out of a position / Euler pair.
    #[inline]
    pub fn read(self, position: [f32; 3], euler_degrees: [f32; 3]) -> f32 {
        if self.is_rotation() {
            euler_degrees[self.axis()]
        } else {
            position[self.axis()]
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
