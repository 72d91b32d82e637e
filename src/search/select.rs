//! Candidate evaluation and best-of reduction.

use crate::candidate::topk::ScoredTransform;
#[cfg(feature = "rayon")]
use crate::candidate::topk::better;
use crate::geometry::CanonicalReference;
use crate::grid::{GridConfig, Transform, TransformGrid};
use crate::kernel::{scan_best, EdgeFrame};
use crate::template::{rasterize, MaskPlan};
use crate::util::{AlignError, AlignResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Inclusive acceptance test.
pub fn is_accepted(score: f64, threshold: f64) -> bool {
    score >= threshold
}

fn evaluate(
    reference: &CanonicalReference,
    grid_cfg: &GridConfig,
    frame: &EdgeFrame<'_>,
    grid_index: usize,
    transform: Transform,
) -> AlignResult<ScoredTransform> {
    let mask = rasterize(reference, transform, grid_cfg.offset_step_px)?;
    let plan = MaskPlan::from_view(mask.view());
    let corr = scan_best(frame, &plan)?;
    Ok(ScoredTransform {
        grid_index,
        transform,
        score: corr.score,
        x: corr.x,
        y: corr.y,
    })
}

/// Scans the grid in order; only a strictly greater score replaces the best.
pub(crate) fn best_seq(
    reference: &CanonicalReference,
    grid: &TransformGrid,
    grid_cfg: &GridConfig,
    frame: &EdgeFrame<'_>,
) -> AlignResult<ScoredTransform> {
    // Below any valid correlation, so the first candidate always replaces it.
    let mut best_score = f64::NEG_INFINITY;
    let mut best: Option<ScoredTransform> = None;
    for (grid_index, transform) in grid.iter().enumerate() {
        let scored = evaluate(reference, grid_cfg, frame, grid_index, transform)?;
        if scored.score > best_score {
            best_score = scored.score;
            best = Some(scored);
        }
    }
    best.ok_or(AlignError::EmptyTransformGrid)
}

pub(crate) fn score_all_seq(
    reference: &CanonicalReference,
    grid: &TransformGrid,
    grid_cfg: &GridConfig,
    frame: &EdgeFrame<'_>,
) -> AlignResult<Vec<ScoredTransform>> {
    grid.iter()
        .enumerate()
        .map(|(grid_index, transform)| evaluate(reference, grid_cfg, frame, grid_index, transform))
        .collect()
}

/// Parallel counterpart of [`best_seq`]; the reduction breaks ties by grid
/// index, so the result is identical.
#[cfg(feature = "rayon")]
pub(crate) fn best_par(
    reference: &CanonicalReference,
    grid: &TransformGrid,
    grid_cfg: &GridConfig,
    frame: &EdgeFrame<'_>,
) -> AlignResult<ScoredTransform> {
    grid.as_slice()
        .par_iter()
        .enumerate()
        .map(|(grid_index, &transform)| {
            evaluate(reference, grid_cfg, frame, grid_index, transform)
        })
        .try_reduce_with(|a, b| Ok(better(a, b)))
        .unwrap_or(Err(AlignError::EmptyTransformGrid))
}

#[cfg(feature = "rayon")]
pub(crate) fn score_all_par(
    reference: &CanonicalReference,
    grid: &TransformGrid,
    grid_cfg: &GridConfig,
    frame: &EdgeFrame<'_>,
) -> AlignResult<Vec<ScoredTransform>> {
    grid.as_slice()
        .par_iter()
        .enumerate()
        .map(|(grid_index, &transform)| {
            evaluate(reference, grid_cfg, frame, grid_index, transform)
        })
        .collect()
}
