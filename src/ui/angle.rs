//! Angle pickers
//!
//! Angles are in radians. 0 points to the right of the wheel and angles grow
//! counter-clockwise as seen on screen (screen y is flipped before `atan2`).
//! Values written by the wheel are always in `(-π, π]`.

use std::f32::consts::{PI, TAU};

use macroquad::prelude::*;

use super::widgets::text_colored;
use super::{display_label, id_from_str, ItemState, UiContext};

/// Visual parameters of an angle wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleWheelParams {
    /// Thickness of the wheel outline and direction line
    pub thickness: f32,
    /// Radius of the wheel (the widget is twice as wide)
    pub radius: f32,
    /// Sides of the polygon approximating the circle (at least 3)
    pub segments: u32,
}

impl Default for AngleWheelParams {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            radius: 25.0,
            segments: 26,
        }
    }
}

/// Wrap an angle into `(-π, π]`. Non-finite angles become 0.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Angle of a pointer offset from the wheel center (screen coordinates)
pub fn angle_from_offset(offset: Vec2) -> f32 {
    normalize_angle((-offset.y).atan2(offset.x))
}

/// Point on the wheel rim in the direction of `angle`
pub fn wheel_point(center: Vec2, angle: f32, radius: f32) -> Vec2 {
    center + vec2(angle.cos(), -angle.sin()) * radius
}

/// Polar angle from straight up, in `[0, π]`, for the inclination half-dial.
/// Both halves of the dial map to the same inclination.
pub fn inclination_from_offset(offset: Vec2) -> f32 {
    offset.x.abs().atan2(-offset.y).clamp(0.0, PI)
}

/// Unit vector for an azimuth (wheel convention, in the XZ plane from +X
/// toward -Z) and an inclination measured from +Y
pub fn direction_from_angles(azimuth: f32, inclination: f32) -> Vec3 {
    let horizontal = inclination.sin();
    vec3(horizontal * azimuth.cos(), inclination.cos(), -horizontal * azimuth.sin())
}

/// How the pointer maps to the bound value
#[derive(Clone, Copy)]
enum Dial {
    Full,
    Inclination,
}

/// Draw a dial and apply pointer drags to `value`. Returns the dial item
/// and whether it was used this frame.
fn dial(ctx: &mut UiContext, id: u64, value: &mut f32, params: &AngleWheelParams, kind: Dial) -> (ItemState, bool) {
    let radius = params.radius.max(1.0);
    let segments = params.segments.clamp(3, u32::from(u8::MAX)) as u8;
    let rect = ctx.allocate(radius * 2.0, radius * 2.0);
    let center = rect.center();
    let item = ctx.interact(id, rect);

    let mut used = false;
    if item.held {
        used = true;
        let offset = ctx.mouse.pos() - center;
        // The exact center has no direction; keep the previous value
        if offset != Vec2::ZERO {
            *value = match kind {
                Dial::Full => angle_from_offset(offset),
                Dial::Inclination => inclination_from_offset(offset),
            };
        }
    }

    let rim = if item.held || item.hovered {
        ctx.style.accent
    } else {
        ctx.style.frame_border
    };
    let needle = ctx.style.text;
    let axis = ctx.style.text_dim;
    let tip = match kind {
        Dial::Full => wheel_point(center, normalize_angle(*value), radius),
        Dial::Inclination => {
            let incl = if value.is_finite() { value.clamp(0.0, PI) } else { 0.0 };
            center + vec2(incl.sin(), -incl.cos()) * radius
        }
    };

    let list = ctx.draw_list();
    list.circle_lines(center, radius, segments, params.thickness, rim);
    if let Dial::Inclination = kind {
        list.line(center - vec2(0.0, radius), center + vec2(0.0, radius), 1.0, axis);
    }
    list.line(center, tip, params.thickness, needle);

    (item, used)
}

/// A widget to pick an angle (in radians), displayed as a direction on a wheel.
///
/// While the wheel is pressed or dragged the value follows the pointer and the
/// call returns true. Otherwise the value is left untouched and it returns false.
pub fn angle_wheel(ctx: &mut UiContext, label: &str, value: &mut f32, params: AngleWheelParams) -> bool {
    let (item, used) = dial(ctx, id_from_str(label), value, &params, Dial::Full);

    ctx.same_line();
    let readout = format!("{} {:.1}°", display_label(label), normalize_angle(*value).to_degrees());
    let color = ctx.style.text;
    text_colored(ctx, &readout, color);
    ctx.set_last_item(item);

    used
}

/// Pick a 3D direction as an azimuth wheel plus an inclination half-dial.
///
/// `azimuth` follows the angle-wheel convention, `inclination` is the angle
/// from straight up in `[0, π]`. Returns true if either dial was used.
pub fn direction_3d(ctx: &mut UiContext, label: &str, azimuth: &mut f32, inclination: &mut f32) -> bool {
    let params = AngleWheelParams::default();
    let id = id_from_str(label);

    let (item, azimuth_used) = dial(ctx, id, azimuth, &params, Dial::Full);
    ctx.same_line();
    let (_, inclination_used) = dial(ctx, id.rotate_left(1), inclination, &params, Dial::Inclination);

    ctx.same_line();
    let dir = direction_from_angles(normalize_angle(*azimuth), *inclination);
    let readout = format!("{} ({:.2}, {:.2}, {:.2})", display_label(label), dir.x, dir.y, dir.z);
    let color = ctx.style.text;
    text_colored(ctx, &readout, color);
    ctx.set_last_item(item);

    azimuth_used || inclination_used
}
