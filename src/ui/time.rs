//! Time display as hours:minutes:seconds

use super::widgets::text;
use super::UiContext;

const SECS_PER_HOUR: u64 = 3600;

/// Whole seconds, with negative and non-finite inputs treated as 0
fn whole_seconds(t: f32) -> u64 {
    if t.is_finite() && t > 0.0 {
        t as u64
    } else {
        0
    }
}

/// Format `time_in_sec` as `M:SS`, or `H:MM:SS` when hours are needed.
///
/// `total_duration` is the length of the interval the time belongs to (e.g. a
/// video's duration). The hours field is shown whenever that interval reaches
/// an hour, so every timestamp in it has the same shape. Pass 0.0 to decide
/// from `time_in_sec` alone.
pub fn format_hms(time_in_sec: f32, total_duration: f32) -> String {
    let t = whole_seconds(time_in_sec);
    let span = t.max(whole_seconds(total_duration));

    if span >= SECS_PER_HOUR {
        format!("{}:{:02}:{:02}", t / SECS_PER_HOUR, (t % SECS_PER_HOUR) / 60, t % 60)
    } else {
        format!("{}:{:02}", t / 60, t % 60)
    }
}

/// Text widget showing a time formatted by [`format_hms`]
pub fn time_formatted_hms(ctx: &mut UiContext, time_in_sec: f32, total_duration: f32) {
    text(ctx, &format_hms(time_in_sec, total_duration));
}
