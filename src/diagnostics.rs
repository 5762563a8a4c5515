use bevy::prelude::*;

use crate::ground::GroundReading;
use crate::locomotion::StrideStepOutput;
use crate::StrideDebugConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrideDebugLineKind {
    GroundRay,
    GroundNormal,
    FallNormal,
}

/// A line segment, in world space, describing one aspect of the last locomotion step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrideDebugLine {
    pub kind: StrideDebugLineKind,
    pub start: Vec3,
    pub end: Vec3,
}

/// The debug lines emitted by the last step, according to
/// [`StrideConfig::debug`](crate::StrideConfig::debug).
#[derive(Component, Default, Debug)]
pub struct StrideDiagnostics {
    pub lines: Vec<StrideDebugLine>,
}

impl StrideDiagnostics {
    /// Replace the stored lines with the ones emitted by `output`.
    pub fn record(&mut self, output: &StrideStepOutput) {
        self.lines.clear();
        self.lines.extend_from_slice(&output.debug_lines);
    }
}

const NORMAL_LINE_LENGTH: f32 = 0.5;

pub(crate) fn collect_debug_lines(
    debug: &StrideDebugConfig,
    translation: Vec3,
    probe_lift: f32,
    probe_length: f32,
    ground: &GroundReading,
) -> Vec<StrideDebugLine> {
    let mut lines = Vec::new();
    if debug.show_ground_ray {
        lines.push(StrideDebugLine {
            kind: StrideDebugLineKind::GroundRay,
            start: ground.origin,
            end: ground.origin + Vec3::NEG_Y * probe_length,
        });
    }
    let line_start = translation + Vec3::Y * probe_lift;
    if debug.show_ground_normal {
        lines.push(StrideDebugLine {
            kind: StrideDebugLineKind::GroundNormal,
            start: line_start,
            end: line_start + ground.ground_direction * Vec3::NEG_Z * NORMAL_LINE_LENGTH,
        });
    }
    if debug.show_fall_normal {
        lines.push(StrideDebugLine {
            kind: StrideDebugLineKind::FallNormal,
            start: line_start,
            end: line_start + ground.fall_direction * Vec3::Y * NORMAL_LINE_LENGTH,
        });
    }
    lines
}

#[cfg(feature = "gizmos")]
pub(crate) fn draw_debug_lines_system(mut gizmos: Gizmos, query: Query<&StrideDiagnostics>) {
    use bevy::color::palettes::css;

    for diagnostics in query.iter() {
        for line in diagnostics.lines.iter() {
            let color = match line.kind {
                StrideDebugLineKind::GroundRay => css::RED,
                StrideDebugLineKind::GroundNormal => css::BLUE,
                StrideDebugLineKind::FallNormal => css::LIME,
            };
            gizmos.line(line.start, line.end, color);
        }
    }
}
