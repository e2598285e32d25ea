//! Per-role compositing. Each handler takes the current frames and returns the
//! next ones; roles without an entry in [`HANDLERS`] are skipped.

use image::RgbaImage;
use kurbo::Point;

use crate::compose::config::PreviewConfig;
use crate::compose::digits::{DigitValue, glyph_positions, glyphs};
use crate::compose::frame::{FrameSet, composite, paste};
use crate::compose::rotate::rotate_into_layer;
use crate::format::block::{BlockInfo, BlockRole};

/// A block with its images already decoded to RGBA8.
pub(crate) struct BlockCtx<'a> {
    pub(crate) info: &'a BlockInfo,
    pub(crate) images: &'a [RgbaImage],
}

pub(crate) type RoleHandler = fn(FrameSet, &BlockCtx<'_>, &PreviewConfig) -> FrameSet;

pub(crate) const HANDLERS: &[(BlockRole, RoleHandler)] = &[
    (BlockRole::Background, static_image),
    (BlockRole::BackgroundPiece, static_image),
    (BlockRole::DistanceLabel, static_image),
    (BlockRole::HourArm, hour_arm),
    (BlockRole::MinuteArm, minute_arm),
    (BlockRole::SecondArm, second_arm),
    (BlockRole::Hours, hours),
    (BlockRole::Minutes, minutes),
    (BlockRole::Seconds, seconds),
    (BlockRole::DateYear, date_year),
    (BlockRole::DateMonth, date_month),
    (BlockRole::DateDay, date_day),
    (BlockRole::Steps, steps),
    (BlockRole::Calories, calories),
    (BlockRole::HeartRate, heart_rate),
    (BlockRole::Distance, distance),
    (BlockRole::Battery, battery),
    (BlockRole::StepsStrip, steps_strip),
    (BlockRole::DistanceStrip, distance_strip),
    (BlockRole::CaloriesStrip, calories_strip),
    (BlockRole::HeartRateStrip, heart_rate_strip),
    (BlockRole::BatteryStrip, battery_strip),
    (BlockRole::AmPm, am_pm),
    (BlockRole::WeekDay, week_day),
    (BlockRole::Weather, weather),
    (BlockRole::Animation, animation),
];

pub(crate) fn handler_for(role: BlockRole) -> Option<RoleHandler> {
    HANDLERS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, handler)| *handler)
}

pub(crate) fn hour_arm_angle(cfg: &PreviewConfig) -> f64 {
    30.0 * f64::from(cfg.hour % 12) + 30.0 * f64::from(cfg.minute) / 60.0
}

pub(crate) fn minute_arm_angle(cfg: &PreviewConfig) -> f64 {
    6.0 * f64::from(cfg.minute) + 6.0 * f64::from(cfg.second) / 60.0
}

pub(crate) fn second_arm_angle(cfg: &PreviewConfig) -> f64 {
    6.0 * f64::from(cfg.second)
}

/// `min(count - 1, round(value / (goal / count)))` with ties to even; a
/// non-positive goal shows the last sub-image.
pub(crate) fn strip_index(value: f64, goal: f64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    if goal <= 0.0 {
        return Some(last);
    }
    let step = goal / count as f64;
    let idx = (value / step).round_ties_even().max(0.0);
    Some((idx as usize).min(last))
}

fn pos(info: &BlockInfo) -> (i64, i64) {
    (i64::from(info.pos_x), i64::from(info.pos_y))
}

fn paste_sub_image(mut frames: FrameSet, ctx: &BlockCtx<'_>, index: usize) -> FrameSet {
    let Some(img) = ctx.images.get(index) else {
        tracing::warn!(
            role = ?ctx.info.role,
            index,
            available = ctx.images.len(),
            "sub-image out of range, skipping block"
        );
        return frames;
    };
    let (x, y) = pos(ctx.info);
    for frame in &mut frames {
        paste(frame, img, x, y, ctx.info.has_alpha);
    }
    frames
}

fn paste_digits(mut frames: FrameSet, ctx: &BlockCtx<'_>, value: DigitValue) -> FrameSet {
    let text = value.text();
    let ids = glyphs(&text);
    let (x, y) = pos(ctx.info);
    let xs = glyph_positions(ctx.info.alignment, x, i64::from(ctx.info.width), ids.len());

    for (glyph, gx) in ids.into_iter().zip(xs) {
        let Some(img) = ctx.images.get(glyph) else {
            tracing::warn!(role = ?ctx.info.role, glyph, %text, "missing digit glyph");
            continue;
        };
        for frame in &mut frames {
            paste(frame, img, gx, y, ctx.info.has_alpha);
        }
    }
    frames
}

fn paste_arm(mut frames: FrameSet, ctx: &BlockCtx<'_>, degrees: f64) -> FrameSet {
    let (Some(img), Some(first)) = (ctx.images.first(), frames.first()) else {
        return frames;
    };
    let info = ctx.info;
    let (x, y) = (f64::from(info.pos_x), f64::from(info.pos_y));
    // Pivot bytes count from the bottom-right corner.
    let pivot_x = f64::from(info.width) - f64::from(info.pivot_x);
    let pivot_y = f64::from(info.height) - f64::from(info.pivot_y);
    let origin = Point::new(x - pivot_x, y - pivot_y);
    let pivot = Point::new(origin.x + pivot_x, origin.y + pivot_y);

    let layer = rotate_into_layer(img, origin, pivot, degrees, first.width(), first.height());
    for frame in &mut frames {
        composite(frame, &layer);
    }
    frames
}

fn paste_strip(frames: FrameSet, ctx: &BlockCtx<'_>, value: f64, goal: f64) -> FrameSet {
    match strip_index(value, goal, ctx.images.len()) {
        Some(index) => paste_sub_image(frames, ctx, index),
        None => frames,
    }
}

fn static_image(frames: FrameSet, ctx: &BlockCtx<'_>, _: &PreviewConfig) -> FrameSet {
    paste_sub_image(frames, ctx, 0)
}

fn hour_arm(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_arm(frames, ctx, hour_arm_angle(cfg))
}

fn minute_arm(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_arm(frames, ctx, minute_arm_angle(cfg))
}

fn second_arm(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_arm(frames, ctx, second_arm_angle(cfg))
}

fn padded(value: u32) -> DigitValue {
    DigitValue::Padded { value, width: 2 }
}

fn hours(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.hour))
}

fn minutes(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.minute))
}

fn seconds(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.second))
}

fn date_year(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.date_year))
}

fn date_month(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.date_month))
}

fn date_day(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, padded(cfg.date_day))
}

fn steps(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, DigitValue::Count(cfg.steps))
}

fn calories(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, DigitValue::Count(cfg.calories))
}

fn heart_rate(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, DigitValue::Count(cfg.heart_rate))
}

fn distance(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, DigitValue::Real(cfg.distance))
}

fn battery(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_digits(frames, ctx, DigitValue::Count(cfg.battery))
}

fn steps_strip(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_strip(frames, ctx, f64::from(cfg.steps), f64::from(cfg.steps_goal))
}

fn distance_strip(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_strip(frames, ctx, cfg.distance, cfg.distance_goal)
}

fn calories_strip(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_strip(frames, ctx, f64::from(cfg.calories), f64::from(cfg.calories_goal))
}

fn heart_rate_strip(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_strip(frames, ctx, f64::from(cfg.heart_rate), f64::from(cfg.max_heart_rate))
}

fn battery_strip(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_strip(
        frames,
        ctx,
        f64::from(cfg.battery),
        f64::from(PreviewConfig::BATTERY_FULL),
    )
}

fn am_pm(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_sub_image(frames, ctx, usize::from(cfg.hour % 24 >= 12))
}

fn week_day(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_sub_image(frames, ctx, cfg.week_day as usize)
}

fn weather(frames: FrameSet, ctx: &BlockCtx<'_>, cfg: &PreviewConfig) -> FrameSet {
    paste_sub_image(frames, ctx, usize::from(cfg.weather.code()))
}

/// One copy of every current frame per animation image, image-major.
fn animation(frames: FrameSet, ctx: &BlockCtx<'_>, _: &PreviewConfig) -> FrameSet {
    if ctx.images.is_empty() {
        return frames;
    }
    let (x, y) = pos(ctx.info);
    let mut out = Vec::with_capacity(frames.len() * ctx.images.len());
    for img in ctx.images {
        for frame in &frames {
            let mut copy = frame.clone();
            paste(&mut copy, img, x, y, ctx.info.has_alpha);
            out.push(copy);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/handlers.rs"]
mod tests;
