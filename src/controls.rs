use bevy::prelude::*;

/// The state of the player's controls for the current frame.
///
/// Stride reads this component during
/// [`StridePipelineStages::Step`](crate::StridePipelineStages::Step). It can be filled by
/// [`StrideKeyBindings`] (which `StridePlugin` processes during
/// [`StridePipelineStages::Controls`](crate::StridePipelineStages::Controls)), or by a user system
/// that uses some other input framework. User systems should run in
/// `StridePipelineStages::Controls` (or any set that runs before `StridePipelineStages::Step`).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrideControls {
    /// Move forward. Wins over [`backward`](Self::backward) when both are held.
    pub forward: bool,
    /// Move backward. Running backward is at half speed.
    pub backward: bool,
    /// Move to the left without turning.
    pub strafe_left: bool,
    /// Move to the right without turning. Wins over [`strafe_left`](Self::strafe_left).
    pub strafe_right: bool,
    /// Turn in place to the left.
    pub rotate_left: bool,
    /// Turn in place to the right. Wins over [`rotate_left`](Self::rotate_left).
    pub rotate_right: bool,
    /// Should only be `true` on the frame the run toggle was pressed.
    pub toggle_run: bool,
    /// Should be `true` for as long as the jump control is held.
    pub jump: bool,
}

/// The control state, converted to the terms the locomotion logic uses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampledControls {
    /// `x` is strafing (positive is right), `y` is forward/backward (positive is forward). Each
    /// axis is exactly `-1.0`, `0.0` or `1.0`.
    pub movement: Vec2,
    /// `-1.0`, `0.0` or `1.0`. Positive turns right.
    pub rotation: f32,
    pub toggle_run: bool,
    pub jump_requested: bool,
}

/// When both directions of an axis are held, the positive one wins.
fn axis(positive: bool, negative: bool) -> f32 {
    if positive {
        1.0
    } else if negative {
        -1.0
    } else {
        0.0
    }
}

/// Convert the raw control state into [`SampledControls`].
pub fn sample_controls(controls: &StrideControls) -> SampledControls {
    SampledControls {
        movement: Vec2::new(
            axis(controls.strafe_right, controls.strafe_left),
            axis(controls.forward, controls.backward),
        ),
        rotation: axis(controls.rotate_right, controls.rotate_left),
        toggle_run: controls.toggle_run,
        jump_requested: controls.jump,
    }
}

/// Keyboard bindings for filling [`StrideControls`].
///
/// Each control is triggered by any of its keys. Leaving a list empty disables that control.
#[derive(Component, Clone, Debug, PartialEq)]
#[require(StrideControls)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StrideKeyBindings {
    pub forward: Vec<KeyCode>,
    pub backward: Vec<KeyCode>,
    pub strafe_left: Vec<KeyCode>,
    pub strafe_right: Vec<KeyCode>,
    pub rotate_left: Vec<KeyCode>,
    pub rotate_right: Vec<KeyCode>,
    pub toggle_run: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl Default for StrideKeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            backward: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            strafe_left: vec![KeyCode::KeyQ],
            strafe_right: vec![KeyCode::KeyE],
            rotate_left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            rotate_right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            toggle_run: vec![KeyCode::NumpadDivide],
            jump: vec![KeyCode::Space],
        }
    }
}

impl StrideKeyBindings {
    pub fn read(&self, keyboard: &ButtonInput<KeyCode>) -> StrideControls {
        let held = |keys: &[KeyCode]| keyboard.any_pressed(keys.iter().copied());
        StrideControls {
            forward: held(&self.forward),
            backward: held(&self.backward),
            strafe_left: held(&self.strafe_left),
            strafe_right: held(&self.strafe_right),
            rotate_left: held(&self.rotate_left),
            rotate_right: held(&self.rotate_right),
            toggle_run: keyboard.any_just_pressed(self.toggle_run.iter().copied()),
            jump: held(&self.jump),
        }
    }
}

pub(crate) fn read_keyboard_controls_system(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut query: Query<(&StrideKeyBindings, &mut StrideControls)>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    for (bindings, mut controls) in query.iter_mut() {
        controls.set_if_neq(bindings.read(&keyboard));
    }
}
