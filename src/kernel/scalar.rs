//! Scalar correlation kernel.
//!
//! All sums are integers, so the numerator and both variance terms are exact
//! and only the final division is rounded.

use crate::kernel::{Correlation, EdgeFrame};
use crate::template::MaskPlan;
use crate::util::{AlignError, AlignResult};

/// Scores the window whose top-left corner is `(x, y)`.
///
/// Returns `None` when the window does not fit inside the frame.
pub fn score_at(frame: &EdgeFrame<'_>, plan: &MaskPlan, x: usize, y: usize) -> Option<f64> {
    if plan.width() > frame.width() || plan.height() > frame.height() {
        return None;
    }
    if x > frame.width() - plan.width() || y > frame.height() - plan.height() {
        return None;
    }
    Some(window_score(frame, plan, x, y))
}

/// Slides `plan` over every valid placement and returns the best window.
///
/// Placements are visited in row-major order and a later placement has to
/// score strictly higher to win, so the first maximum is reported.
pub fn scan_best(frame: &EdgeFrame<'_>, plan: &MaskPlan) -> AlignResult<Correlation> {
    let frame_width = frame.width();
    let frame_height = frame.height();
    if plan.width() > frame_width || plan.height() > frame_height {
        return Err(AlignError::SizeMismatch {
            mask_width: plan.width(),
            mask_height: plan.height(),
            frame_width,
            frame_height,
        });
    }

    let max_x = frame_width - plan.width();
    let max_y = frame_height - plan.height();
    let mut best = Correlation {
        score: f64::NEG_INFINITY,
        x: 0,
        y: 0,
    };
    for y in 0..=max_y {
        for x in 0..=max_x {
            let score = window_score(frame, plan, x, y);
            if score > best.score {
                best = Correlation { score, x, y };
            }
        }
    }

    Ok(best)
}

fn window_score(frame: &EdgeFrame<'_>, plan: &MaskPlan, x: usize, y: usize) -> f64 {
    if plan.is_degenerate() {
        return 0.0;
    }

    let (sum_i, sum_i2) = frame
        .integral()
        .window_sums(x, y, plan.width(), plan.height());

    let data = frame.view().as_slice();
    let stride = frame.view().stride();
    let base = y * stride + x;
    let mut dot = 0u64;
    for &(tx, ty, value) in plan.nonzero() {
        dot += value * u64::from(data[base + ty * stride + tx]);
    }

    ncc_from_sums(plan, dot, sum_i, sum_i2)
}

fn ncc_from_sums(plan: &MaskPlan, dot: u64, sum_i: u64, sum_i2: u64) -> f64 {
    let n = plan.area() as i128;
    let sum_i = i128::from(sum_i);
    let den_i = n * i128::from(sum_i2) - sum_i * sum_i;
    if den_i <= 0 {
        return 0.0;
    }
    let num = n * i128::from(dot) - i128::from(plan.sum()) * sum_i;
    let den_t = plan.scaled_variance() as i128;

    // Perfect (anti-)correlation is decided in integers so it is exactly +-1.
    let num_sq = num.checked_mul(num);
    if num_sq.is_some() && num_sq == den_t.checked_mul(den_i) {
        return if num > 0 { 1.0 } else { -1.0 };
    }

    // One rounding in the denominator instead of two.
    let denom = (den_t as f64 * den_i as f64).sqrt();
    let score = num as f64 / denom;
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
