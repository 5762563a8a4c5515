use bevy::prelude::*;

pub mod data_for_backends;
pub mod motion_surface;

/// Umbrella system set for [`StridePipelineStages`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct StrideSystems;

/// The various stages of the Stride pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum StridePipelineStages {
    /// Player controls are sampled into `StrideControls`.
    Controls,
    /// The physics backend runs the locomotion step, which probes the ground and moves the
    /// character.
    Step,
    /// Orientations computed during the step are published to other entities.
    Orientation,
}
