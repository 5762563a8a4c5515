use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use crate::controls::read_keyboard_controls_system;
use crate::orientation::publish_orientation_system;
use crate::{StrideConfig, StridePipelineStages, StrideSystems};

/// The main plugin for Stride.
///
/// This plugin samples keyboard bindings, validates configs and publishes the computed
/// orientations. It does not move anything on its own - a physics backend plugin (e.g.
/// `StrideAvian3dPlugin` from `bevy-stride-avian3d`) must also be added, with the same schedule.
pub struct StridePlugin {
    schedule: InternedScheduleLabel,
}

impl StridePlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for StridePlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for StridePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                StridePipelineStages::Controls,
                StridePipelineStages::Step,
                StridePipelineStages::Orientation,
            )
                .chain()
                .in_set(StrideSystems),
        );
        app.add_systems(
            self.schedule,
            (read_keyboard_controls_system, validate_config_system)
                .in_set(StridePipelineStages::Controls),
        );
        app.add_systems(
            self.schedule,
            publish_orientation_system.in_set(StridePipelineStages::Orientation),
        );
        #[cfg(feature = "gizmos")]
        app.add_systems(
            self.schedule,
            crate::diagnostics::draw_debug_lines_system.in_set(StridePipelineStages::Orientation),
        );
    }
}

fn validate_config_system(query: Query<(Entity, &StrideConfig), Changed<StrideConfig>>) {
    for (entity, config) in query.iter() {
        if let Err(err) = config.validate() {
            error!("Invalid StrideConfig on {entity:?}: {err}");
        }
    }
}
