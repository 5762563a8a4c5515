use bevy::prelude::*;

use crate::data_for_backends::{CollisionReport, GroundHit};

/// The physics capabilities the locomotion step needs from a backend.
///
/// A backend implements this for a short-lived view of its physics world that is bound to one
/// character (so that the character's own collider can be excluded from the queries). Both methods
/// are called synchronously during the step: first [`cast_down`](Self::cast_down) for the ground
/// probe, then [`move_and_collide`](Self::move_and_collide) exactly once.
pub trait MotionSurface {
    /// Cast a ray straight down (along `-Y`) from `origin`, up to `max_distance`.
    ///
    /// Returning `None` is a normal outcome - it means there is no ground close enough.
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit>;

    /// Move the character's shape by `delta`, sliding along whatever it hits.
    ///
    /// `translation` and `rotation` describe the character before the move. The backend must not
    /// write the new position anywhere - the caller applies
    /// [`translation_applied`](CollisionReport::translation_applied) itself.
    fn move_and_collide(&mut self, translation: Vec3, rotation: Quat, delta: Vec3)
        -> CollisionReport;
}

impl<S: MotionSurface + ?Sized> MotionSurface for &mut S {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        (**self).cast_down(origin, max_distance)
    }

    fn move_and_collide(
        &mut self,
        translation: Vec3,
        rotation: Quat,
        delta: Vec3,
    ) -> CollisionReport {
        (**self).move_and_collide(translation, rotation, delta)
    }
}

/// Wraps a [`MotionSurface`] so that it can still be probed, but never moves the character.
///
/// Used for [`StrideToggle::SenseOnly`](crate::data_for_backends::StrideToggle::SenseOnly).
pub struct SenseOnlySurface<S> {
    pub inner: S,
    /// Reported as the [`grounded`](CollisionReport::grounded) flag of every (non-)move. Backends
    /// usually pass the grounded flag of the last real move, so that the character does not start
    /// accumulating gravity while frozen.
    pub grounded: bool,
}

impl<S: MotionSurface> MotionSurface for SenseOnlySurface<S> {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        self.inner.cast_down(origin, max_distance)
    }

    fn move_and_collide(
        &mut self,
        _translation: Vec3,
        _rotation: Quat,
        _delta: Vec3,
    ) -> CollisionReport {
        CollisionReport {
            grounded: self.grounded,
            ..Default::default()
        }
    }
}
