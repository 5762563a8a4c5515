use bevy::prelude::*;
use bevy_stride_physics_integration_layer::data_for_backends::CollisionReport;
use bevy_stride_physics_integration_layer::motion_surface::MotionSurface;

use crate::controls::{sample_controls, SampledControls};
use crate::diagnostics::{collect_debug_lines, StrideDebugLine, StrideDiagnostics};
use crate::ground::{GroundProbe, GroundReading};
use crate::{StrideConfig, StrideControls};

/// The locomotion state of a character.
///
/// Adding this component is what makes an entity a Stride character. A physics backend plugin
/// (e.g. `bevy-stride-avian3d`) is responsible for calling [`advance`](Self::advance) every frame.
#[derive(Component, Clone, Debug)]
#[require(StrideConfig, StrideControls, StrideDiagnostics)]
pub struct StrideState {
    /// The movement input of the current frame. See [`SampledControls::movement`].
    pub input_raw: Vec2,
    /// The movement input that is actually used. Follows `input_raw` while the character stands
    /// on walkable ground, and decays toward zero otherwise.
    pub input_smoothed: Vec2,
    /// `-1.0`, `0.0` or `1.0`. Positive turns right.
    pub rotation_input: f32,
    /// Running multiplies the speed by [`StrideConfig::run_speed`]. Flipped by the run toggle.
    pub is_running: bool,
    /// The horizontal speed, in units per second.
    pub current_speed: f32,
    /// Along the fall direction (or world up while jumping). Negative is downward.
    pub vertical_velocity: f32,
    /// Set when a jump starts, cleared when a move ends on the ground.
    pub is_jumping: bool,
    /// Latched when the jump starts, used for the entire jump.
    pub jump_direction: Vec3,
    /// Latched when the jump starts, used for the entire jump.
    pub jump_speed: f32,
    /// In degrees. Keeps its previous value when the ground probe misses.
    pub ground_slope_angle: f32,
    /// In degrees. Keeps its previous value when the ground probe misses.
    pub ground_forward_angle: f32,
    /// Where the last contact was, relative to the character. The ground probe starts here.
    pub last_contact_offset: Vec3,
    /// See [`GroundReading::forward_speed_multiplier`].
    pub forward_speed_multiplier: f32,
    /// See [`GroundReading::fall_speed_multiplier`].
    pub fall_speed_multiplier: f32,
    /// Whether the last move ended standing on something.
    pub grounded: bool,
    /// See [`GroundReading::ground_direction`].
    pub ground_direction: Quat,
    /// See [`GroundReading::fall_direction`].
    pub fall_direction: Quat,
}

impl Default for StrideState {
    fn default() -> Self {
        Self {
            input_raw: Vec2::ZERO,
            input_smoothed: Vec2::ZERO,
            rotation_input: 0.0,
            is_running: true,
            current_speed: 0.0,
            vertical_velocity: 0.0,
            is_jumping: false,
            jump_direction: Vec3::ZERO,
            jump_speed: 0.0,
            ground_slope_angle: 0.0,
            ground_forward_angle: 0.0,
            last_contact_offset: Vec3::ZERO,
            forward_speed_multiplier: 1.0,
            fall_speed_multiplier: 1.0,
            grounded: false,
            ground_direction: Quat::IDENTITY,
            fall_direction: Quat::IDENTITY,
        }
    }
}

pub struct StrideStepContext<'a> {
    pub frame_duration: f32,
    pub config: &'a StrideConfig,
    pub controls: &'a StrideControls,
}

/// What happened during a single [`StrideState::advance`].
#[derive(Debug, Clone)]
pub struct StrideStepOutput {
    pub controls: SampledControls,
    pub ground: GroundReading,
    /// The velocity the character tried to move at.
    pub velocity: Vec3,
    /// The displacement submitted to the motion surface - `velocity` times the frame duration.
    pub motion_delta: Vec3,
    pub report: CollisionReport,
    /// A jump was initiated during this step.
    pub jumped: bool,
    /// The character was jumping, and the move ended on the ground.
    pub landed: bool,
    pub debug_lines: Vec<StrideDebugLine>,
}

impl StrideState {
    /// Run one frame of locomotion.
    ///
    /// This samples the controls, probes the ground through `surface`, updates the speed, rotates
    /// `transform`, handles jumping and gravity, moves the character through `surface` (applying
    /// the resulting translation to `transform`) and finally records the contacts and the
    /// grounded status of the move for the next frame.
    pub fn advance(
        &mut self,
        ctx: StrideStepContext,
        transform: &mut Transform,
        surface: &mut impl MotionSurface,
    ) -> StrideStepOutput {
        let config = ctx.config;
        let frame_duration = ctx.frame_duration;

        let controls = self.apply_controls(ctx.controls);

        let ground = GroundProbe {
            config,
            translation: transform.translation,
            rotation: transform.rotation,
            input_smoothed: self.input_smoothed,
            contact_offset: self.last_contact_offset,
        }
        .cast_and_resolve(|origin, max_distance| surface.cast_down(origin, max_distance));
        self.apply_ground_reading(&ground);
        let debug_lines = collect_debug_lines(
            &config.debug,
            transform.translation,
            config.probe_lift,
            config.probe_length,
            &ground,
        );

        self.update_speed(config, frame_duration);

        // The ground and fall directions turn together with the character, as if they were its
        // children.
        let yaw = Quat::from_rotation_y(
            -config
                .frame_rate_scaling
                .per_frame_amount(self.rotation_input * config.rotate_speed, frame_duration)
                .to_radians(),
        );
        transform.rotate(yaw);
        self.ground_direction = yaw * self.ground_direction;
        self.fall_direction = yaw * self.fall_direction;

        let jumped = controls.jump_requested && self.on_walkable_ground(config);
        if jumped {
            self.start_jump(config, transform);
        }

        self.apply_gravity(config, frame_duration);

        let velocity = self.velocity();
        let motion_delta = velocity * frame_duration;
        let report = surface.move_and_collide(transform.translation, transform.rotation, motion_delta);
        transform.translation += report.translation_applied;

        self.record_contacts(&report);
        let landed = self.finish_move(&report);

        StrideStepOutput {
            controls,
            ground,
            velocity,
            motion_delta,
            report,
            jumped,
            landed,
            debug_lines,
        }
    }

    /// Update the raw input, the rotation input and the run toggle from the controls.
    pub fn apply_controls(&mut self, controls: &StrideControls) -> SampledControls {
        let sampled = sample_controls(controls);
        self.input_raw = sampled.movement;
        self.rotation_input = sampled.rotation;
        if sampled.toggle_run {
            self.is_running = !self.is_running;
        }
        sampled
    }

    pub fn apply_ground_reading(&mut self, reading: &GroundReading) {
        if let Some(angles) = reading.angles {
            self.ground_slope_angle = angles.slope;
            self.ground_forward_angle = angles.forward;
            trace!(
                "Ground probe hit: slope {:.1}°, forward {:.1}°",
                angles.slope,
                angles.forward
            );
        }
        self.forward_speed_multiplier = reading.forward_speed_multiplier;
        self.fall_speed_multiplier = reading.fall_speed_multiplier;
        self.ground_direction = reading.ground_direction;
        self.fall_direction = reading.fall_direction;
    }

    /// Grounded on the last move, and the ground is not too steep.
    pub fn on_walkable_ground(&self, config: &StrideConfig) -> bool {
        self.grounded && config.is_walkable(self.ground_slope_angle)
    }

    fn update_speed(&mut self, config: &StrideConfig, frame_duration: f32) {
        if self.on_walkable_ground(config) {
            self.input_smoothed = self.input_raw.clamp_length_max(1.0);
            self.current_speed = config.base_speed;
            if self.is_running {
                self.current_speed *= config.run_speed;
                if self.input_smoothed.y < 0.0 {
                    self.current_speed /= 2.0;
                }
            }
        } else {
            let factor = config
                .frame_rate_scaling
                .lerp_factor(config.airborne_decay, frame_duration);
            self.input_smoothed = self.input_smoothed.lerp(Vec2::ZERO, factor);
            self.current_speed += (0.0 - self.current_speed) * factor;
        }
    }

    fn start_jump(&mut self, config: &StrideConfig, transform: &Transform) {
        self.is_jumping = true;
        self.jump_direction = (transform.forward() * self.input_raw.y
            + transform.right() * self.input_raw.x)
            .normalize_or_zero();
        self.jump_speed = self.current_speed;
        self.vertical_velocity = config.jump_launch_speed();
        debug!(
            "Jump initiated with upward velocity {} and horizontal speed {}",
            self.vertical_velocity, self.jump_speed
        );
    }

    fn apply_gravity(&mut self, config: &StrideConfig, frame_duration: f32) {
        if !self.grounded && config.terminal_velocity < self.vertical_velocity {
            self.vertical_velocity = (self.vertical_velocity + config.gravity * frame_duration)
                .max(config.terminal_velocity);
        } else if self.grounded && !config.is_walkable(self.ground_slope_angle) {
            let factor = config
                .frame_rate_scaling
                .lerp_factor(config.steep_slope_relaxation, frame_duration);
            self.vertical_velocity += (config.terminal_velocity - self.vertical_velocity) * factor;
        }
    }

    /// The velocity the character should move at, given its current state.
    pub fn velocity(&self) -> Vec3 {
        if self.is_jumping {
            self.jump_direction * self.jump_speed + Vec3::Y * self.vertical_velocity
        } else {
            let ground_forward = self.ground_direction * Vec3::NEG_Z;
            let fall_up = self.fall_direction * Vec3::Y;
            ground_forward
                * (self.input_smoothed.length() * self.current_speed * self.forward_speed_multiplier)
                + fall_up * (self.vertical_velocity * self.fall_speed_multiplier)
        }
    }

    /// Remember where the last contact of the move was, for the next ground probe.
    pub fn record_contacts(&mut self, report: &CollisionReport) {
        if let Some(contact) = report.last_contact() {
            self.last_contact_offset = contact.point - contact.character_translation;
        }
    }

    /// Update the grounded status from the report. Returns `true` if this ended a jump.
    fn finish_move(&mut self, report: &CollisionReport) -> bool {
        self.grounded = report.grounded;
        if !report.grounded {
            return false;
        }
        let landed = self.is_jumping;
        if landed {
            debug!("Landed from jump");
        }
        self.is_jumping = false;
        self.vertical_velocity = 0.0;
        landed
    }
}
