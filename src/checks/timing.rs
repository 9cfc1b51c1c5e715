use super::{Check, CheckContext, Violation};
use crate::subtitle_processor::Cue;

// @module: Cue timing rules

/// Cue display time outside the configured bounds
pub struct CueDuration;

impl Check for CueDuration {
    fn name(&self) -> &'static str {
        "cue-duration"
    }

    fn description(&self) -> &'static str {
        "Cue shown too briefly, too long, or ending before it starts"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let limits = &ctx.profiles.limits;
        let min = limits.min_duration_ms as i64;
        let max = limits.max_duration_ms as i64;

        cues.iter()
            .filter_map(|cue| {
                let duration = cue.duration_ms();
                let detail = if duration <= 0 {
                    format!("non-positive duration: {} ms (end {} <= start {})", duration, cue.end, cue.start)
                } else if duration < min {
                    format!("duration {} ms (min: {} ms)", duration, min)
                } else if duration > max {
                    format!("duration {} ms (max: {} ms)", duration, max)
                } else {
                    return None;
                };
                Some(ctx.violation(cue, self.name(), detail))
            })
            .collect()
    }
}
