//! Per-frame best-match search over the transform grid.
//!
//! A [`Matcher`] owns the canonical reference and the transform grid, both
//! built once in [`Matcher::new`] and read-only afterwards. Each call to
//! [`Matcher::match_frame`] rasterizes every candidate, correlates it with the
//! frame and keeps the first candidate reaching the maximum score.

use crate::candidate::topk::{ScoredTransform, TopK};
use crate::geometry::{normalize, CanonicalReference, CanvasConfig, GeometrySet};
use crate::grid::{GridConfig, Transform, TransformGrid};
use crate::image::{ImageView, OwnedImage};
use crate::kernel::EdgeFrame;
use crate::template::rasterize;
use crate::trace::{trace_event, trace_span};
use crate::util::{AlignError, AlignResult};

mod select;

pub use select::is_accepted;

/// Search configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Canvas the reference is fitted into; also the mask size.
    pub canvas: CanvasConfig,
    /// Offsets and rotations to try.
    pub grid: GridConfig,
    /// Minimum best score for a frame to count as a detection (inclusive).
    pub template_threshold: f64,
    /// Score candidates on the rayon pool. Ignored without the `rayon` feature.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            grid: GridConfig::default(),
            template_threshold: 0.60,
            parallel: false,
        }
    }
}

impl MatchConfig {
    /// Checks every option that does not depend on the reference geometry.
    pub fn validate(&self) -> AlignResult<()> {
        self.canvas.validate()?;
        if !self.template_threshold.is_finite() || !(-1.0..=1.0).contains(&self.template_threshold)
        {
            return Err(AlignError::InvalidConfig {
                reason: "template_threshold must lie in [-1, 1]",
            });
        }
        if self.grid.offset_step_px < 0 {
            return Err(AlignError::InvalidConfig {
                reason: "offset_step_px must be >= 0",
            });
        }
        Ok(())
    }
}

/// Outcome of searching one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Best transform (unit offsets and angle).
    pub transform: Transform,
    /// Index of the best transform in the grid.
    pub grid_index: usize,
    /// Best correlation score.
    pub score: f64,
    /// Top-left corner `(x, y)` of the best window in the frame.
    pub location: (usize, usize),
    /// `score >= template_threshold`.
    pub accepted: bool,
}

/// Brute-force transform search against edge frames.
#[derive(Clone, Debug)]
pub struct Matcher {
    cfg: MatchConfig,
    reference: CanonicalReference,
    grid: TransformGrid,
}

impl Matcher {
    /// Validates `cfg`, normalizes `geometry` and enumerates the grid.
    ///
    /// All configuration errors surface here, before any frame is processed.
    pub fn new(geometry: &GeometrySet, cfg: MatchConfig) -> AlignResult<Self> {
        cfg.validate()?;
        let reference = normalize(geometry, &cfg.canvas)?;
        let grid = TransformGrid::generate(&cfg.grid)?;
        Ok(Self {
            cfg,
            reference,
            grid,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the canonical reference.
    pub fn reference(&self) -> &CanonicalReference {
        &self.reference
    }

    /// Returns the transform grid.
    pub fn grid(&self) -> &TransformGrid {
        &self.grid
    }

    /// Rasterizes the reference under `transform`, e.g. to overlay the best
    /// match of a frame.
    pub fn render_mask(&self, transform: Transform) -> AlignResult<OwnedImage> {
        rasterize(&self.reference, transform, self.cfg.grid.offset_step_px)
    }

    /// Searches the full grid for one frame.
    pub fn match_frame(&self, frame: ImageView<'_, u8>) -> AlignResult<MatchResult> {
        let _span = trace_span!("match_frame", candidates = self.grid.len()).entered();
        let frame = self.prepare(frame)?;
        let best = self.search(&frame)?;
        let accepted = is_accepted(best.score, self.cfg.template_threshold);

        trace_event!(
            "frame_matched",
            score = best.score,
            grid_index = best.grid_index,
            accepted = accepted
        );
        Ok(MatchResult {
            transform: best.transform,
            grid_index: best.grid_index,
            score: best.score,
            location: (best.x, best.y),
            accepted,
        })
    }

    /// Returns the best `k` candidates, best-first, ties in grid order.
    pub fn match_frame_topk(
        &self,
        frame: ImageView<'_, u8>,
        k: usize,
    ) -> AlignResult<Vec<ScoredTransform>> {
        let _span = trace_span!("match_frame_topk", candidates = self.grid.len(), k = k).entered();
        if k == 0 {
            return Ok(Vec::new());
        }
        let frame = self.prepare(frame)?;
        let scored = self.score_all(&frame)?;
        let mut topk = TopK::new(k);
        for candidate in scored {
            topk.push(candidate);
        }
        Ok(topk.into_sorted())
    }

    fn prepare<'a>(&self, frame: ImageView<'a, u8>) -> AlignResult<EdgeFrame<'a>> {
        if self.reference.width() > frame.width() || self.reference.height() > frame.height() {
            return Err(AlignError::SizeMismatch {
                mask_width: self.reference.width(),
                mask_height: self.reference.height(),
                frame_width: frame.width(),
                frame_height: frame.height(),
            });
        }
        Ok(EdgeFrame::new(frame))
    }

    fn search(&self, frame: &EdgeFrame<'_>) -> AlignResult<ScoredTransform> {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return select::best_par(&self.reference, &self.grid, &self.cfg.grid, frame);
            }
        }
        select::best_seq(&self.reference, &self.grid, &self.cfg.grid, frame)
    }

    fn score_all(&self, frame: &EdgeFrame<'_>) -> AlignResult<Vec<ScoredTransform>> {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return select::score_all_par(&self.reference, &self.grid, &self.cfg.grid, frame);
            }
        }
        select::score_all_seq(&self.reference, &self.grid, &self.cfg.grid, frame)
    }
}
