//! Frame step driver
//!
//! One call per rendered frame. The frame delta is split into equal substeps;
//! each substep integrates every ball and then runs the cushion pass. The
//! ball-ball pass runs once after the substeps (or after each substep when
//! `ball_pass_every_substep` is set).

use serde::{Deserialize, Serialize};

use super::collision::{resolve_ball_collisions, resolve_cushion_collisions};
use super::state::TableState;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub substeps: u32,
    pub cushion_hits: u32,
    pub ball_hits: u32,
    pub all_stopped: bool,
}

/// Advance the table by one frame of `dt` seconds
pub fn step(state: &mut TableState, dt: f32) -> StepReport {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.settings.max_frame_dt)
    } else {
        0.0
    };
    let substeps = state.settings.effective_substeps();
    let sub_dt = dt / substeps as f32;
    let eps = state.settings.cushion_epsilon;
    let per_substep = state.settings.ball_pass_every_substep;

    let mut report = StepReport {
        substeps,
        ..Default::default()
    };

    for _ in 0..substeps {
        for ball in state.balls.iter_mut().filter(|b| b.in_play) {
            ball.update(sub_dt);
        }
        report.cushion_hits += resolve_cushion_collisions(&mut state.balls, &state.geometry.cushions, eps);
        if per_substep {
            report.ball_hits += resolve_ball_collisions(&mut state.balls);
        }
    }

    if !per_substep {
        report.ball_hits += resolve_ball_collisions(&mut state.balls);
    }

    state.frames += 1;
    report.all_stopped = state.all_stopped();
    if report.ball_hits > 0 || report.cushion_hits > 0 {
        log::trace!(
            "frame {}: {} cushion hits, {} ball hits",
            state.frames,
            report.cushion_hits,
            report.ball_hits
        );
    }
    report
}

/// Step until every ball rests and no two balls overlap
///
/// Overlaps left behind by sequential pair resolution are cleared by the
/// ball pass of the extra frames. Returns the number of frames stepped, or
/// None if the table had not settled after `max_frames`.
pub fn run_until_settled(state: &mut TableState, dt: f32, max_frames: u32) -> Option<u32> {
    for frame in 1..=max_frames {
        let report = step(state, dt);
        if report.all_stopped && report.ball_hits == 0 {
            log::debug!("table settled after {} frames", frame);
            return Some(frame);
        }
    }
    log::warn!("table still moving after {} frames", max_frames);
    None
}
