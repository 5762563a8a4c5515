use bevy::prelude::*;
use bevy_stride_physics_integration_layer::data_for_backends::GroundHit;

use crate::util::{angle_between_degrees, look_rotation, rotation_from_to};
use crate::StrideConfig;

/// Everything the ground probe needs to know about the character.
///
/// The pose is the one from before this frame's rotation is applied.
#[derive(Clone, Copy, Debug)]
pub struct GroundProbe<'a> {
    pub config: &'a StrideConfig,
    pub translation: Vec3,
    pub rotation: Quat,
    /// The smoothed movement input from the previous frame.
    pub input_smoothed: Vec2,
    /// The offset, relative to the character, of the last recorded contact.
    pub contact_offset: Vec3,
}

/// The slope angles measured by a ground probe that hit something, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundAngles {
    /// The angle between the character's up axis and the ground normal.
    pub slope: f32,
    /// The angle between the ground direction's forward axis and the ground normal, minus 90
    /// degrees. Negative when the character is heading downhill.
    pub forward: f32,
}

/// The product of [`GroundProbe::resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundReading {
    pub origin: Vec3,
    pub hit: Option<GroundHit>,
    /// `None` when the probe missed. The previous angles should be kept in that case.
    pub angles: Option<GroundAngles>,
    /// Compensates for the longer path when walking down a slope.
    pub forward_speed_multiplier: f32,
    /// Compensates for the fall direction not being vertical when sliding down a slope.
    pub fall_speed_multiplier: f32,
    /// World rotation whose forward axis is the direction the character walks in.
    pub ground_direction: Quat,
    /// World rotation whose up axis is the direction vertical velocity is applied along.
    pub fall_direction: Quat,
}

impl GroundProbe<'_> {
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Where the downward ray starts.
    pub fn origin(&self) -> Vec3 {
        self.translation + self.contact_offset + Vec3::Y * self.config.probe_lift
    }

    /// The direction of intended movement on the horizontal plane.
    pub fn facing_direction(&self) -> Vec3 {
        if 0.0 < self.input_smoothed.length_squared() {
            self.forward() * self.input_smoothed.y + self.right() * self.input_smoothed.x
        } else {
            self.forward()
        }
    }

    /// Cast the probe using `cast`, and interpret its result.
    pub fn cast_and_resolve(
        &self,
        cast: impl FnOnce(Vec3, f32) -> Option<GroundHit>,
    ) -> GroundReading {
        let hit = cast(self.origin(), self.config.probe_length);
        self.resolve(hit)
    }

    /// Interpret the result of casting the probe.
    pub fn resolve(&self, hit: Option<GroundHit>) -> GroundReading {
        let mut reading = GroundReading {
            origin: self.origin(),
            hit,
            angles: None,
            forward_speed_multiplier: 1.0,
            fall_speed_multiplier: 1.0,
            ground_direction: look_rotation(self.facing_direction(), Vec3::Y),
            fall_direction: self.rotation,
        };
        let Some(hit) = hit else {
            return reading;
        };

        let ground_forward = reading.ground_direction * Vec3::NEG_Z;
        let angles = GroundAngles {
            slope: angle_between_degrees(self.up(), hit.normal),
            forward: angle_between_degrees(ground_forward, hit.normal) - 90.0,
        };
        reading.angles = Some(angles);

        if angles.forward < 0.0 && self.config.is_walkable(angles.slope) {
            reading.forward_speed_multiplier = 1.0 / angles.forward.to_radians().cos();
            // Pitch down along the slope. Negative angles around X lower the -Z axis.
            reading.ground_direction *= Quat::from_rotation_x(angles.forward.to_radians());
        } else if !self.config.is_walkable(angles.slope)
            && hit.distance <= self.config.slide_contact_distance
        {
            reading.fall_speed_multiplier = 1.0 / (90.0 - angles.slope).to_radians().cos();
            let sideways = hit.normal.cross(Vec3::Y);
            reading.fall_direction = rotation_from_to(self.up(), sideways.cross(hit.normal));
        }

        reading
    }
}
