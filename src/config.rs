use bevy::prelude::*;

/// Tunables for a character driven by Stride.
///
/// The defaults reproduce a classic MMO-style third person controller: slow walk, four times
/// faster run (which is the default movement mode), floaty but short jumps and a 45 degree slope
/// limit.
#[derive(Component, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StrideConfig {
    /// The walking speed, in units per second.
    pub base_speed: f32,

    /// Multiplier applied to [`base_speed`](Self::base_speed) while running.
    ///
    /// Running backward halves the result.
    pub run_speed: f32,

    /// Degrees of yaw applied per frame while a rotate control is held.
    ///
    /// See [`frame_rate_scaling`](Self::frame_rate_scaling) for what "per frame" means.
    pub rotate_speed: f32,

    /// Vertical acceleration, in units per second squared. Must be negative.
    pub gravity: f32,

    /// The (negative) vertical velocity that gravity stops accelerating the character past.
    pub terminal_velocity: f32,

    /// The height of a jump's apex above the takeoff point, assuming no obstacles.
    pub jump_height: f32,

    /// The steepest surface, in degrees from the up axis, that is still walkable.
    ///
    /// On steeper surfaces the character cannot run or jump, and slides down instead.
    pub slope_limit: f32,

    /// How far down the ground probe reaches.
    pub probe_length: f32,

    /// How far above the recorded contact point the ground probe starts.
    pub probe_lift: f32,

    /// When standing on a surface steeper than [`slope_limit`](Self::slope_limit), the character
    /// only starts sliding if the ground probe hit it within this distance.
    pub slide_contact_distance: f32,

    /// Lerp factor for bleeding off movement input and speed while airborne or on a steep slope.
    pub airborne_decay: f32,

    /// Lerp factor for relaxing the vertical velocity toward
    /// [`terminal_velocity`](Self::terminal_velocity) while standing on a steep slope.
    pub steep_slope_relaxation: f32,

    /// Whether the per-frame factors above are scaled by the frame duration.
    pub frame_rate_scaling: StrideFrameRateScaling,

    pub debug: StrideDebugConfig,
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            run_speed: 4.0,
            rotate_speed: 2.0,
            gravity: -18.0,
            terminal_velocity: -25.0,
            jump_height: 3.0,
            slope_limit: 45.0,
            probe_length: 0.3,
            probe_lift: 0.05,
            slide_contact_distance: 0.1,
            airborne_decay: 0.025,
            steep_slope_relaxation: 0.25,
            frame_rate_scaling: StrideFrameRateScaling::PerFrame,
            debug: StrideDebugConfig::default(),
        }
    }
}

impl StrideConfig {
    /// The upward velocity needed to reach [`jump_height`](Self::jump_height) under
    /// [`gravity`](Self::gravity).
    pub fn jump_launch_speed(&self) -> f32 {
        (-self.gravity * self.jump_height).sqrt()
    }

    pub fn is_walkable(&self, slope_angle: f32) -> bool {
        slope_angle <= self.slope_limit
    }

    pub fn validate(&self) -> Result<(), StrideConfigError> {
        for (name, value) in [
            ("base_speed", self.base_speed),
            ("run_speed", self.run_speed),
            ("probe_length", self.probe_length),
        ] {
            if !(0.0 < value) {
                return Err(StrideConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("probe_lift", self.probe_lift),
            ("slide_contact_distance", self.slide_contact_distance),
        ] {
            if !(0.0 <= value) {
                return Err(StrideConfigError::Negative { name, value });
            }
        }
        if !self.rotate_speed.is_finite() {
            return Err(StrideConfigError::NotFinite {
                name: "rotate_speed",
                value: self.rotate_speed,
            });
        }
        if !(self.gravity < 0.0) {
            return Err(StrideConfigError::GravityNotDownward(self.gravity));
        }
        if !(self.terminal_velocity < 0.0) {
            return Err(StrideConfigError::TerminalVelocityNotDownward(
                self.terminal_velocity,
            ));
        }
        if !(0.0 <= self.jump_height) {
            return Err(StrideConfigError::NegativeJumpHeight(self.jump_height));
        }
        if !(0.0 < self.slope_limit && self.slope_limit < 90.0) {
            return Err(StrideConfigError::SlopeLimitOutOfRange(self.slope_limit));
        }
        for (name, value) in [
            ("airborne_decay", self.airborne_decay),
            ("steep_slope_relaxation", self.steep_slope_relaxation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StrideConfigError::LerpFactorOutOfRange { name, value });
            }
        }
        if let StrideFrameRateScaling::TimeScaled {
            reference_frame_rate,
        } = self.frame_rate_scaling
        {
            if !(0.0 < reference_frame_rate) {
                return Err(StrideConfigError::NotPositive {
                    name: "reference_frame_rate",
                    value: reference_frame_rate,
                });
            }
        }
        Ok(())
    }
}

/// Returned by [`StrideConfig::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StrideConfigError {
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("`{name}` cannot be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("`{name}` must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("gravity must pull downward (be negative), got {0}")]
    GravityNotDownward(f32),
    #[error("terminal velocity must be negative, got {0}")]
    TerminalVelocityNotDownward(f32),
    #[error("jump height cannot be negative, got {0}")]
    NegativeJumpHeight(f32),
    #[error("slope limit must be between 0 and 90 degrees (exclusive), got {0}")]
    SlopeLimitOutOfRange(f32),
    #[error("`{name}` is a lerp factor and must be between 0 and 1, got {value}")]
    LerpFactorOutOfRange { name: &'static str, value: f32 },
}

/// How the per-frame factors of [`StrideConfig`] relate to the frame duration.
///
/// Stride's airborne decay, steep slope relaxation and rotation speed are all defined per frame,
/// which means that a character running at 30 FPS loses its momentum slower (in real time) than
/// one running at 144 FPS. This is kept as the default behavior, but can be switched to
/// [`TimeScaled`](Self::TimeScaled).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum StrideFrameRateScaling {
    /// Apply every factor once per frame, regardless of the frame duration.
    #[default]
    PerFrame,
    /// Scale the factors so that the behavior in real time matches the per-frame behavior at
    /// `reference_frame_rate`.
    TimeScaled { reference_frame_rate: f32 },
}

impl StrideFrameRateScaling {
    /// Convert a per-frame lerp factor into the one to use for a frame of `frame_duration`.
    ///
    /// ```
    /// # use bevy_stride::StrideFrameRateScaling;
    /// let scaling = StrideFrameRateScaling::TimeScaled { reference_frame_rate: 60.0 };
    /// // Two frames at 120 FPS decay as much as one frame at 60 FPS
    /// let half_step = scaling.lerp_factor(0.25, 1.0 / 120.0);
    /// let remaining = (1.0 - half_step) * (1.0 - half_step);
    /// assert!((remaining - 0.75).abs() < 1e-5);
    /// ```
    pub fn lerp_factor(&self, factor: f32, frame_duration: f32) -> f32 {
        match self {
            Self::PerFrame => factor,
            Self::TimeScaled {
                reference_frame_rate,
            } => 1.0 - (1.0 - factor).powf(frame_duration * reference_frame_rate),
        }
    }

    /// Convert a per-frame amount (e.g. degrees of rotation) into the amount to apply during a
    /// frame of `frame_duration`.
    pub fn per_frame_amount(&self, amount: f32, frame_duration: f32) -> f32 {
        match self {
            Self::PerFrame => amount,
            Self::TimeScaled {
                reference_frame_rate,
            } => amount * frame_duration * reference_frame_rate,
        }
    }
}

/// Which debug line segments to emit into
/// [`StrideDiagnostics`](crate::diagnostics::StrideDiagnostics).
///
/// These have no effect on the locomotion itself. With the `gizmos` feature, `StridePlugin` draws
/// them using Bevy's gizmos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StrideDebugConfig {
    /// The ground probe ray, from its origin to its full length.
    pub show_ground_ray: bool,
    /// The forward axis of the ground direction.
    pub show_ground_normal: bool,
    /// The up axis of the fall direction.
    pub show_fall_normal: bool,
}
