use bevy::prelude::*;

use crate::StrideState;

/// Entities that should be rotated to match the orientations Stride computes each frame.
///
/// Both entities are expected to be direct children of the character. Their local rotation is set
/// so that their world rotation matches [`StrideState::ground_direction`] and
/// [`StrideState::fall_direction`], which is useful for cameras, animation rigs and debug
/// visuals. Their translation and scale are left alone.
#[derive(Component, Debug, Clone, Copy)]
pub struct StrideOrientationHandles {
    pub ground_direction: Option<Entity>,
    pub fall_direction: Option<Entity>,
}

pub(crate) fn publish_orientation_system(
    characters_query: Query<(&StrideState, &StrideOrientationHandles, &Transform)>,
    mut handles_query: Query<&mut Transform, Without<StrideState>>,
) {
    for (state, handles, character_transform) in characters_query.iter() {
        let to_local = character_transform.rotation.inverse();
        for (handle, world_rotation) in [
            (handles.ground_direction, state.ground_direction),
            (handles.fall_direction, state.fall_direction),
        ] {
            let Some(handle) = handle else {
                continue;
            };
            let Ok(mut handle_transform) = handles_query.get_mut(handle) else {
                continue;
            };
            handle_transform.rotation = to_local * world_rotation;
        }
    }
}
