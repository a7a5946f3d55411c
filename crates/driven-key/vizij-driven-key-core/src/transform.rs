//! Host object model seam.
//!
//! The core never owns scene objects. Hosts expose the local position and Euler angles
//! (degrees) of driver/driven objects through [`TransformSource`] and accept writes through
//! [`TransformTarget`]. [`LocalTransform`] is a plain implementation for hosts without a
//! scene graph, and for tests.

use serde::{Deserialize, Serialize};

use crate::property::PropertyType;

/// Read access to a local transform.
pub trait TransformSource {
    fn local_position(&self) -> [f32; 3];
    /// Local rotation as Euler angles in degrees.
    fn local_euler_angles(&self) -> [f32; 3];

    fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            position: self.local_position(),
            euler_angles: self.local_euler_angles(),
        }
    }
}

/// Write access to a local transform.
pub trait TransformTarget: TransformSource {
    fn set_local_position(&mut self, position: [f32; 3]);
    /// Set the local rotation from Euler angles in degrees.
    fn set_local_euler_angles(&mut self, euler_degrees: [f32; 3]);
}

/// Plain copy of a transform's position and Euler angles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformSnapshot {
    pub position: [f32; 3],
    pub euler_angles: [f32; 3],
}

impl TransformSnapshot {
    pub fn new(position: [f32; 3], euler_angles: [f32; 3]) -> Self {
        Self {
            position,
            euler_angles,
        }
    }

    #[inline]
    pub fn get(&self, property: PropertyType) -> f32 {
        property.read(self.position, self.euler_angles)
    }

    /// Overwrite one component.
    #[inline]
    pub fn set(&mut self, property: PropertyType, value: f32) {
        if property.is_rotation() {
            self.euler_angles[property.axis()] = value;
        } else {
            self.position[property.axis()] = value;
        }
    }
}

impl TransformSource for TransformSnapshot {
    fn local_position(&self) -> [f32; 3] {
        self.position
    }
    fn local_euler_angles(&self) -> [f32; 3] {
        self.euler_angles
    }
}

impl TransformTarget for TransformSnapshot {
    fn set_local_position(&mut self, position: [f32; 3]) {
        self.position = position;
    }
    fn set_local_euler_angles(&mut self, euler_degrees: [f32; 3]) {
        self.euler_angles = euler_degrees;
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Local transform that behaves like a scene-graph node storing its rotation as a
/// quaternion: Euler angles read back wrapped into `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTransform {
    position: [f32; 3],
    euler_angles: [f32; 3],
}

impl LocalTransform {
    pub fn new(position: [f32; 3], euler_degrees: [f32; 3]) -> Self {
        let mut t = Self {
            position,
            euler_angles: [0.0; 3],
        };
        t.set_local_euler_angles(euler_degrees);
        t
    }

    pub fn from_position(position: [f32; 3]) -> Self {
        Self::new(position, [0.0; 3])
    }

    pub fn from_euler(euler_degrees: [f32; 3]) -> Self {
        Self::new([0.0; 3], euler_degrees)
    }

    /// Unit quaternion `[x, y, z, w]` for the stored Euler angles, applied Z, then X,
    /// then Y.
    pub fn rotation_quat(&self) -> [f32; 4] {
        let [x, y, z] = self.euler_angles;
        let qx = axis_angle([1.0, 0.0, 0.0], x);
        let qy = axis_angle([0.0, 1.0, 0.0], y);
        let qz = axis_angle([0.0, 0.0, 1.0], z);
        quat_mul(quat_mul(qy, qx), qz)
    }
}

impl TransformSource for LocalTransform {
    fn local_position(&self) -> [f32; 3] {
        self.position
    }
    fn local_euler_angles(&self) -> [f32; 3] {
        self.euler_angles
    }
}

impl TransformTarget for LocalTransform {
    fn set_local_position(&mut self, position: [f32; 3]) {
        self.position = position;
    }
    fn set_local_euler_angles(&mut self, euler_degrees: [f32; 3]) {
        self.euler_angles = euler_degrees.map(normalize_degrees);
    }
}

#[inline]
fn axis_angle(axis: [f32; 3], degrees: f32) -> [f32; 4] {
    let half = degrees.to_radians() * 0.5;
    let s = half.sin();
    [axis[0] * s, axis[1] * s, axis[2] * s, half.cos()]
}

/// Hamilton product `a * b` for `[x, y, z, w]` quaternions.
#[inline]
fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}
