//! # avian3d Integration for bevy-stride
//!
//! In addition to the instruction in bevy-stride's documentation:
//!
//! * Add [`StrideAvian3dPlugin`] to the Bevy app, using the same schedule as `StridePlugin`.
//! * Give the character a [`Collider`] (typically a capsule). Stride makes the character a
//!   [`RigidBody::Kinematic`] and moves it by writing its [`Transform`], so the character must
//!   not have a parent.
//! * Optionally: Add [`StrideAvian3dMoveSettings`] to the character to tune the collide-and-slide.
mod surface;

use avian3d::prelude::*;
use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use bevy_stride::diagnostics::StrideDiagnostics;
use bevy_stride::{StrideConfig, StrideControls, StrideState, StrideStepContext};
use bevy_stride_physics_integration_layer::data_for_backends::StrideToggle;
use bevy_stride_physics_integration_layer::motion_surface::SenseOnlySurface;
use bevy_stride_physics_integration_layer::{StridePipelineStages, StrideSystems};

pub use surface::{slide_velocity, Avian3dMotionSurface, StrideAvian3dMoveSettings};

pub mod prelude {
    pub use crate::{StrideAvian3dMoveSettings, StrideAvian3dPlugin};
}

/// Add this plugin to use avian3d as a physics backend.
///
/// This plugin should be used in addition to `StridePlugin`, and both plugins must use the same
/// schedule.
pub struct StrideAvian3dPlugin {
    schedule: InternedScheduleLabel,
}

impl StrideAvian3dPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for StrideAvian3dPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for StrideAvian3dPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components_with::<StrideState, RigidBody>(|| RigidBody::Kinematic);
        app.configure_sets(
            self.schedule,
            StrideSystems.run_if(|physics_time: Res<Time<Physics>>| !physics_time.is_paused()),
        );
        app.add_systems(
            self.schedule,
            (report_missing_colliders_system, step_characters_system)
                .chain()
                .in_set(StridePipelineStages::Step),
        );
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StrideSetupError {
    #[error("Character {0:?} has a StrideState but no Collider - it will not move")]
    MissingCollider(Entity),
}

fn report_missing_colliders_system(
    query: Query<Entity, (Added<StrideState>, Without<Collider>)>,
) {
    for entity in query.iter() {
        error!("{}", StrideSetupError::MissingCollider(entity));
    }
}

#[allow(clippy::type_complexity)]
fn step_characters_system(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &mut StrideState,
        &StrideConfig,
        &StrideControls,
        &mut Transform,
        &Collider,
        &mut StrideDiagnostics,
        Option<&StrideAvian3dMoveSettings>,
        Option<&StrideToggle>,
    )>,
) {
    let frame_duration = time.delta_secs();
    if frame_duration == 0.0 {
        return;
    }
    for (
        entity,
        mut state,
        config,
        controls,
        mut transform,
        collider,
        mut diagnostics,
        move_settings,
        stride_toggle,
    ) in query.iter_mut()
    {
        let mut surface = Avian3dMotionSurface::new(
            &spatial_query,
            entity,
            collider,
            move_settings.copied().unwrap_or_default(),
        );
        let ctx = StrideStepContext {
            frame_duration,
            config,
            controls,
        };
        let output = match stride_toggle.copied().unwrap_or_default() {
            StrideToggle::Disabled => continue,
            StrideToggle::SenseOnly => {
                let mut surface = SenseOnlySurface {
                    inner: surface,
                    grounded: state.grounded,
                };
                state.advance(ctx, transform.as_mut(), &mut surface)
            }
            StrideToggle::Enabled => state.advance(ctx, transform.as_mut(), &mut surface),
        };
        diagnostics.record(&output);
    }
}
