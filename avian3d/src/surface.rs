use avian3d::prelude::*;
use bevy::prelude::*;

use bevy_stride_physics_integration_layer::data_for_backends::{
    CollisionReport, ContactPoint, GroundHit,
};
use bevy_stride_physics_integration_layer::motion_surface::MotionSurface;

/// Tunables for the collide-and-slide movement of [`Avian3dMotionSurface`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct StrideAvian3dMoveSettings {
    /// How far from obstacles the character stops. Keeps the shape casts from starting inside
    /// the obstacle the character just moved into.
    pub skin_width: f32,
    /// How many times the movement can be deflected by obstacles in a single frame.
    pub max_bumps: usize,
    /// How far below the character (beyond the skin width) the ground check looks after a move
    /// that did not go upward.
    pub ground_check_distance: f32,
}

impl Default for StrideAvian3dMoveSettings {
    fn default() -> Self {
        Self {
            skin_width: 0.01,
            max_bumps: 4,
            ground_check_distance: 0.05,
        }
    }
}

const MIN_MOVEMENT: f32 = 1e-5;

/// Any contact normal with an upward component above this counts as "something below".
const GROUND_NORMAL_MIN_UP: f32 = 1e-3;

/// A [`MotionSurface`] over Avian's spatial queries, bound to a single character.
pub struct Avian3dMotionSurface<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    collider: &'a Collider,
    filter: SpatialQueryFilter,
    settings: StrideAvian3dMoveSettings,
}

impl<'a, 'w, 's> Avian3dMotionSurface<'a, 'w, 's> {
    /// `character` is excluded from all the queries, so that the character does not collide
    /// with itself.
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        character: Entity,
        collider: &'a Collider,
        settings: StrideAvian3dMoveSettings,
    ) -> Self {
        Self {
            spatial_query,
            collider,
            filter: SpatialQueryFilter::default().with_excluded_entities([character]),
            settings,
        }
    }

    fn cast_collider(
        &self,
        translation: Vec3,
        rotation: Quat,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<ShapeHitData> {
        self.spatial_query.cast_shape(
            self.collider,
            translation,
            rotation,
            direction,
            &ShapeCastConfig::from_max_distance(max_distance),
            &self.filter,
        )
    }
}

impl MotionSurface for Avian3dMotionSurface<'_, '_, '_> {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        let hit = self
            .spatial_query
            .cast_ray(origin, Dir3::NEG_Y, max_distance, true, &self.filter)?;
        // A zero normal means the ray started inside a collider. That's not ground we can use.
        let normal = hit.normal.try_normalize()?;
        Some(GroundHit {
            point: origin + Vec3::NEG_Y * hit.distance,
            normal,
            distance: hit.distance,
        })
    }

    fn move_and_collide(
        &mut self,
        translation: Vec3,
        rotation: Quat,
        delta: Vec3,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        let mut position = translation;
        let mut remaining = delta;
        let mut planes = Vec::with_capacity(self.settings.max_bumps);

        for _ in 0..self.settings.max_bumps {
            let Ok((direction, length)) = Dir3::new_and_length(remaining) else {
                break;
            };
            if length < MIN_MOVEMENT {
                break;
            }
            let Some(hit) = self.cast_collider(position, rotation, direction, length) else {
                position += remaining;
                break;
            };

            // Happens when the character starts the cast already penetrating an obstacle.
            let Some(normal) = hit.normal1.try_normalize() else {
                break;
            };
            let safe_distance = (hit.distance - self.settings.skin_width).max(0.0);
            position += direction * safe_distance;
            report.contacts.push(ContactPoint {
                point: hit.point1,
                normal,
                character_translation: position,
            });
            if GROUND_NORMAL_MIN_UP < normal.dot(Vec3::Y) {
                report.grounded = true;
            }

            remaining = slide_velocity(&mut planes, normal, direction * (length - safe_distance));
        }

        let translation_applied = position - translation;

        if translation_applied.dot(Vec3::Y) <= MIN_MOVEMENT {
            if let Some(hit) = self.cast_collider(
                position,
                rotation,
                Dir3::NEG_Y,
                self.settings.skin_width + self.settings.ground_check_distance,
            ) {
                if GROUND_NORMAL_MIN_UP < hit.normal1.dot(Vec3::Y) {
                    report.grounded = true;
                    report.contacts.push(ContactPoint {
                        point: hit.point1,
                        normal: hit.normal1,
                        character_translation: position,
                    });
                }
            }
        }

        report.translation_applied = translation_applied;
        report
    }
}

/// Deflect `velocity` along the plane of `normal`, and along the crease it forms with the previous
/// plane when sliding along the new plane would push back into the previous one.
///
/// `planes` accumulates the normals hit so far during a single move.
pub fn slide_velocity(planes: &mut Vec<Vec3>, normal: Vec3, velocity: Vec3) -> Vec3 {
    planes.push(normal);
    let slid = velocity.reject_from(normal);
    match planes.as_slice() {
        [.., previous, last] if slid.dot(*previous) < 0.0 => {
            match previous.cross(*last).try_normalize() {
                Some(crease) => crease * slid.dot(crease),
                None => slid,
            }
        }
        _ => slid,
    }
}
