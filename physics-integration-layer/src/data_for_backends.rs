use bevy::prelude::*;

/// Allows disabling Stride for a specific entity.
///
/// This can be used to let some other system temporarily take control over a character (a
/// cutscene, a vehicle, a ragdoll).
///
/// This component is not mandatory - if omitted, Stride will just assume it is enabled for that
/// entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StrideToggle {
    /// Do not run the locomotion step at all.
    ///
    /// The state stored in the `StrideState` component will retain its last value from before
    /// `StrideToggle::Disabled` was set.
    Disabled,
    /// Probe the ground and update the state, but do not move the character.
    ///
    /// The backend wraps its surface with [`SenseOnlySurface`](crate::motion_surface::SenseOnlySurface)
    /// so the ground probe still works while `move_and_collide` becomes a no-op.
    SenseOnly,
    #[default]
    /// The backend behaves normally - it probes the ground and moves the character.
    Enabled,
}

/// The result of a successful downward ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// The point where the probe hit the ground, in world space.
    pub point: Vec3,
    /// The surface normal at [`point`](Self::point). Expected to be normalized.
    pub normal: Vec3,
    /// The distance from the probe origin to [`point`](Self::point).
    pub distance: f32,
}

/// A single contact generated while moving the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// The contact point on the obstacle, in world space.
    pub point: Vec3,
    /// The obstacle's surface normal at the contact point.
    pub normal: Vec3,
    /// Where the character was when this contact was generated.
    ///
    /// The locomotion logic records `point - character_translation` as the origin offset of the
    /// next ground probe, so this must be the character's position at the moment of the contact
    /// and not its final position after the move.
    pub character_translation: Vec3,
}

/// What happened when the character was moved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// How much the character actually moved. May differ from the requested delta when the
    /// character slid along (or stopped at) obstacles.
    pub translation_applied: Vec3,
    /// Whether the character touched something below it during the move. Any contact whose normal
    /// points upward counts, even if the character slid off it later in the same move.
    ///
    /// Note that this does not care about the steepness of that something - the locomotion logic
    /// decides walkability on its own using the ground probe.
    pub grounded: bool,
    /// All the contacts generated during the move, in the order they were generated.
    pub contacts: Vec<ContactPoint>,
}

impl CollisionReport {
    /// A report for a move that was not blocked by anything.
    pub fn unobstructed(translation_applied: Vec3) -> Self {
        Self {
            translation_applied,
            grounded: false,
            contacts: Vec::new(),
        }
    }

    pub fn last_contact(&self) -> Option<&ContactPoint> {
        self.contacts.last()
    }
}
