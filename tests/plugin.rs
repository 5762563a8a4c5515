use bevy::prelude::*;
use bevy_stride::prelude::*;

fn app_with_keyboard() -> App {
    let mut app = App::new();
    app.add_plugins(StridePlugin::default());
    app.init_resource::<ButtonInput<KeyCode>>();
    app
}

#[test]
fn key_bindings_fill_controls() {
    let mut app = app_with_keyboard();
    let character = app.world_mut().spawn(StrideKeyBindings::default()).id();

    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::ArrowUp);
        keyboard.press(KeyCode::KeyS);
        keyboard.press(KeyCode::KeyE);
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::NumpadDivide);
        keyboard.press(KeyCode::Space);
    }
    app.update();

    let controls = *app
        .world()
        .get::<StrideControls>(character)
        .expect("StrideKeyBindings should require StrideControls");
    assert_eq!(
        controls,
        StrideControls {
            forward: true,
            backward: true,
            strafe_left: false,
            strafe_right: true,
            rotate_left: true,
            rotate_right: false,
            toggle_run: true,
            jump: true,
        }
    );

    // Still held, but no longer just pressed.
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.update();
    let controls = *app.world().get::<StrideControls>(character).unwrap();
    assert!(!controls.toggle_run);
    assert!(controls.forward);
    assert!(controls.jump);
}

#[test]
fn empty_binding_disables_control() {
    let bindings = StrideKeyBindings {
        jump: Vec::new(),
        ..Default::default()
    };
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::Space);
    keyboard.press(KeyCode::KeyW);
    let controls = bindings.read(&keyboard);
    assert!(!controls.jump);
    assert!(controls.forward);
}

#[test]
fn state_requires_config_and_controls() {
    let mut app = App::new();
    app.add_plugins(StridePlugin::default());
    let character = app.world_mut().spawn(StrideState::default()).id();
    app.update();

    let world = app.world();
    assert_eq!(
        world.get::<StrideConfig>(character),
        Some(&StrideConfig::default())
    );
    assert_eq!(
        world.get::<StrideControls>(character),
        Some(&StrideControls::default())
    );
}

#[test]
fn orientation_handles_follow_the_state() {
    let mut app = App::new();
    app.add_plugins(StridePlugin::default());

    let ground_handle = app.world_mut().spawn(Transform::from_xyz(0.0, 1.0, 0.0)).id();
    let fall_handle = app.world_mut().spawn(Transform::default()).id();
    let character_rotation = Quat::from_rotation_y(0.5);
    let ground_direction = Quat::from_rotation_y(0.5) * Quat::from_rotation_x(-0.3);
    let fall_direction = Quat::from_rotation_z(0.4);
    app.world_mut().spawn((
        Transform::from_rotation(character_rotation),
        StrideState {
            ground_direction,
            fall_direction,
            ..Default::default()
        },
        StrideOrientationHandles {
            ground_direction: Some(ground_handle),
            fall_direction: Some(fall_handle),
        },
    ));
    app.update();

    let world = app.world();
    let ground_transform = world.get::<Transform>(ground_handle).unwrap();
    let fall_transform = world.get::<Transform>(fall_handle).unwrap();
    // The handles are children of the character, so their world rotation is the composition.
    assert!((character_rotation * ground_transform.rotation).abs_diff_eq(ground_direction, 1e-5));
    assert!((character_rotation * fall_transform.rotation).abs_diff_eq(fall_direction, 1e-5));
    assert_eq!(ground_transform.translation, Vec3::new(0.0, 1.0, 0.0));
}
