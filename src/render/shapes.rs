//! Dashed lines and arrows built from embedded-graphics primitives.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Triangle};

use crate::geometry::Vec2;

pub const DASH_LENGTH: f64 = 10.0;
pub const ARROW_SHAFT_WIDTH: u32 = 2;
/// Angle between the shaft and each side of the head
const ARROW_HEAD_SPREAD: f64 = core::f64::consts::PI / 6.0;

pub fn line<D>(
    target: &mut D,
    color: Rgb888,
    start: Vec2,
    end: Vec2,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(start.to_point(), end.to_point())
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(target)
}

/// Dashes of `dash` pixels separated by equal gaps, starting at `start`.
///
/// Only whole dashes are drawn, so a line shorter than two dashes may come out empty.
pub fn dashed_line<D>(
    target: &mut D,
    color: Rgb888,
    start: Vec2,
    end: Vec2,
    width: u32,
    dash: f64,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let displacement = end.subtract(start);
    let Some(slope) = displacement.normalized() else {
        return Ok(());
    };
    if dash <= 0.0 {
        return Ok(());
    }

    let dashes = (displacement.magnitude() / dash) as usize;
    for index in (0..dashes).step_by(2) {
        let from = start.add(slope.scale(index as f64 * dash));
        let to = start.add(slope.scale((index + 1) as f64 * dash));
        line(target, color, from, to, width)?;
    }
    Ok(())
}

/// A shaft from `start` to `end` with a filled head of side `head` at `end`.
pub fn arrow<D>(
    target: &mut D,
    color: Rgb888,
    start: Vec2,
    end: Vec2,
    head: f64,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some(direction) = end.subtract(start).normalized() else {
        return Ok(());
    };

    line(target, color, start, end, ARROW_SHAFT_WIDTH)?;

    let back = direction.scale(-head);
    let left = end.add(back.rotate(ARROW_HEAD_SPREAD));
    let right = end.add(back.rotate(-ARROW_HEAD_SPREAD));
    Triangle::new(end.to_point(), left.to_point(), right.to_point())
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

/// Two arrows pointing outwards from the midpoint of `start`..`end`.
pub fn double_arrow<D>(
    target: &mut D,
    color: Rgb888,
    start: Vec2,
    end: Vec2,
    head: f64,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let middle = start.midpoint(end);
    arrow(target, color, middle, end, head)?;
    arrow(target, color, middle, start, head)
}
