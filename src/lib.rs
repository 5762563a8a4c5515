//! # Stride - A Slope-Following Locomotion Controller for Bevy
//!
//! Stride moves a kinematic capsule around the way classic third person MMO characters move:
//! forward/backward and strafing relative to the character, turning with the keyboard, a toggle
//! between walking and running, and ballistic jumps whose direction and speed are locked on
//! takeoff. A short downward probe measures the ground under the character, which is used to
//! follow descending slopes without bouncing and to slide down slopes that are too steep to walk
//! on.
//!
//! Stride does not do any physics on its own - it relies on a physics backend that can cast rays
//! and move a shape while sliding along obstacles. See
//! [`MotionSurface`](motion_surface::MotionSurface). The `bevy-stride-avian3d` crate provides one
//! for [Avian](https://github.com/Jondolf/avian).
//!
//! ## Usage
//!
//! * Add [`StridePlugin`] and a backend plugin (e.g. `StrideAvian3dPlugin`) to the app. Both must
//!   use the same schedule.
//! * Add [`StrideState`] to the character entity. This automatically adds [`StrideConfig`] and
//!   [`StrideControls`], which can be overridden.
//! * Either add [`StrideKeyBindings`] to have Stride read the keyboard, or write
//!   [`StrideControls`] from a system in [`StridePipelineStages::Controls`].
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_stride::prelude::*;
//!
//! fn setup_character(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::from_xyz(0.0, 1.0, 0.0),
//!         StrideState::default(),
//!         StrideConfig {
//!             run_speed: 3.0,
//!             ..Default::default()
//!         },
//!         StrideKeyBindings::default(),
//!     ));
//! }
//!
//! App::new()
//!     .add_plugins(StridePlugin::new(Update))
//!     .add_systems(Startup, setup_character);
//! ```
//!
//! The locomotion itself is in [`StrideState::advance`], which does not depend on the ECS and can
//! be driven directly with any [`MotionSurface`](motion_surface::MotionSurface).
mod config;
mod controls;
pub mod diagnostics;
pub mod ground;
mod locomotion;
mod orientation;
mod plugin;
pub mod util;

pub use bevy_stride_physics_integration_layer::data_for_backends;
pub use bevy_stride_physics_integration_layer::motion_surface;
pub use bevy_stride_physics_integration_layer::{StridePipelineStages, StrideSystems};

pub use config::*;
pub use controls::{sample_controls, SampledControls, StrideControls, StrideKeyBindings};
pub use data_for_backends::StrideToggle;
pub use locomotion::{StrideState, StrideStepContext, StrideStepOutput};
pub use orientation::StrideOrientationHandles;
pub use plugin::StridePlugin;

pub mod prelude {
    pub use crate::{
        StrideConfig, StrideControls, StrideKeyBindings, StrideOrientationHandles,
        StridePipelineStages, StridePlugin, StrideState, StrideSystems, StrideToggle,
    };
}
