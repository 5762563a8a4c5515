use bevy::prelude::*;

/// The unsigned angle between two vectors, in degrees.
///
/// Returns `0.0` if either vector is (almost) zero, instead of `NaN`.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

/// A rotation whose forward (`-Z`) axis points along `direction`, keeping its up axis as close to
/// `up` as possible.
///
/// Falls back to facing `-Z` if `direction` is zero.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    Transform::IDENTITY.looking_to(direction, up).rotation
}

/// The rotation that takes `from` to `to`, tolerating non-normalized and zero inputs.
pub fn rotation_from_to(from: Vec3, to: Vec3) -> Quat {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}
