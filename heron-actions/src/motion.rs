//! Decomposes a requested displacement into small paced steps.
//!
//! A single-jump drag or scroll is a strong automation signal; stepping
//! through the displacement with short pauses reads like a person. The
//! planners here are pure: they only produce step sequences, and the
//! executor (or the session adapter, for atomic gestures) paces through
//! them.

use heron_common::HeronConfig;
use rand::Rng;
use std::time::Duration;

/// One increment of a decomposed drag or scroll gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStep {
    /// Signed displacement of this step, in pixels.
    pub delta: i64,
    /// Pause after performing this step.
    pub delay: Duration,
}

/// Step sizes and pacing for decomposed motion.
#[derive(Debug, Clone, Copy)]
pub struct MotionProfile {
    pub drag_step_px: u32,
    pub drag_step_delay: Duration,
    pub scroll_step_px: u32,
    /// Per-step scroll pause is sampled uniformly from this range.
    pub scroll_delay: (Duration, Duration),
    /// How far above the viewport top a scrolled-to element should land.
    pub viewport_buffer_px: i64,
    /// Settle pause before a direct jump-to-bottom scroll.
    pub bottom_settle: Duration,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::from_config(&HeronConfig::default())
    }
}

impl MotionProfile {
    pub fn from_config(config: &HeronConfig) -> Self {
        Self {
            drag_step_px: config.drag_step_px,
            drag_step_delay: Duration::from_millis(config.drag_step_delay_ms),
            scroll_step_px: config.scroll_step_px,
            scroll_delay: (
                Duration::from_millis(config.scroll_delay_ms_min),
                Duration::from_millis(config.scroll_delay_ms_max),
            ),
            viewport_buffer_px: config.viewport_buffer_px,
            bottom_settle: Duration::from_millis(config.bottom_settle_ms),
        }
    }
}

/// Decompose a horizontal drag of `total` pixels.
///
/// With `slow` unset this is one full-displacement step. Otherwise steps
/// of `drag_step_px` are emitted until the target is reached, the final
/// step clipped to the exact remainder: the deltas always sum to `total`,
/// with no overshoot. A zero displacement yields an empty plan.
pub fn plan_drag(total: i64, slow: bool, profile: &MotionProfile) -> Vec<MotionStep> {
    let delay = profile.drag_step_delay;
    plan(total, slow, profile.drag_step_px, || delay)
}

/// Decompose a vertical scroll of `total` pixels.
///
/// Same stepping as [`plan_drag`] with the scroll step size; each step
/// carries a pause sampled from the profile's delay range so consecutive
/// scrolls do not tick at a fixed rhythm.
pub fn plan_scroll(total: i64, slow: bool, profile: &MotionProfile) -> Vec<MotionStep> {
    let (lo, hi) = profile.scroll_delay;
    let mut rng = rand::thread_rng();
    plan(total, slow, profile.scroll_step_px, move || {
        if hi > lo {
            rng.gen_range(lo..=hi)
        } else {
            lo
        }
    })
}

fn plan(
    total: i64,
    slow: bool,
    step_px: u32,
    mut delay: impl FnMut() -> Duration,
) -> Vec<MotionStep> {
    if total == 0 {
        return Vec::new();
    }
    if !slow {
        return vec![MotionStep {
            delta: total,
            delay: Duration::ZERO,
        }];
    }

    let step = i64::from(step_px.max(1));
    let sign = total.signum();
    let mut remaining = total.abs();
    let mut steps = Vec::with_capacity((remaining / step) as usize + 1);
    while remaining > 0 {
        let magnitude = remaining.min(step);
        steps.push(MotionStep {
            delta: sign * magnitude,
            delay: delay(),
        });
        remaining -= magnitude;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MotionProfile {
        MotionProfile::default()
    }

    #[test]
    fn slow_drag_steps_sum_exactly() {
        let steps = plan_drag(35, true, &profile());
        let deltas: Vec<i64> = steps.iter().map(|s| s.delta).collect();
        assert_eq!(deltas, vec![10, 10, 10, 5]);
        assert_eq!(deltas.iter().sum::<i64>(), 35);
    }

    #[test]
    fn no_step_exceeds_the_configured_size() {
        for total in [1, 9, 10, 11, 99, 100, 1001] {
            let steps = plan_drag(total, true, &profile());
            assert!(steps.iter().all(|s| s.delta.abs() <= 10), "total={total}");
            assert_eq!(steps.iter().map(|s| s.delta).sum::<i64>(), total);
        }
    }

    #[test]
    fn negative_displacement_mirrors_positive() {
        let steps = plan_drag(-35, true, &profile());
        let deltas: Vec<i64> = steps.iter().map(|s| s.delta).collect();
        assert_eq!(deltas, vec![-10, -10, -10, -5]);
    }

    #[test]
    fn fast_plan_is_one_jump() {
        let steps = plan_drag(350, false, &profile());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].delta, 350);
        assert_eq!(steps[0].delay, Duration::ZERO);
    }

    #[test]
    fn zero_displacement_plans_nothing() {
        assert!(plan_drag(0, true, &profile()).is_empty());
        assert!(plan_drag(0, false, &profile()).is_empty());
        assert!(plan_scroll(0, true, &profile()).is_empty());
    }

    #[test]
    fn scroll_delays_stay_in_the_configured_range() {
        let p = profile();
        let (lo, hi) = p.scroll_delay;
        for step in plan_scroll(950, true, &p) {
            assert!(step.delay >= lo && step.delay <= hi);
        }
    }

    #[test]
    fn scroll_steps_use_the_scroll_step_size() {
        let steps = plan_scroll(250, true, &profile());
        let deltas: Vec<i64> = steps.iter().map(|s| s.delta).collect();
        assert_eq!(deltas, vec![100, 100, 50]);
    }
}
