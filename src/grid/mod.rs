//! Candidate transform enumeration.
//!
//! The grid is materialized once as a flat list: offsets in neighborhood
//! order, and for each offset every angle in ascending order. The list order
//! is the tie-break order used by the selector, so it must not change for the
//! lifetime of a [`Matcher`](crate::Matcher).

mod angles;

pub use angles::AngleGrid;

use crate::trace::{trace_event, trace_span};
use crate::util::{AlignError, AlignResult};

/// Center plus the 8 compass neighbors, in search order.
pub const NEIGHBORHOOD_9: [(i32, i32); 9] = [
    (0, 0),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A candidate rigid motion of the reference.
///
/// `dx`/`dy` are unit offsets; the rasterizer multiplies them by
/// [`GridConfig::offset_step_px`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub dx: i32,
    pub dy: i32,
    pub angle_deg: f64,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        dx: 0,
        dy: 0,
        angle_deg: 0.0,
    };

    pub const fn new(dx: i32, dy: i32, angle_deg: f64) -> Self {
        Self { dx, dy, angle_deg }
    }

    /// Returns the translation in pixels for the given step.
    pub fn pixel_offset(&self, step_px: i32) -> (i64, i64) {
        (
            i64::from(self.dx) * i64::from(step_px),
            i64::from(self.dy) * i64::from(step_px),
        )
    }
}

/// Parameters of the transform grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Unit offsets to try, in order.
    pub offsets: Vec<(i32, i32)>,
    /// Pixels per unit offset.
    pub offset_step_px: i32,
    /// Angular resolution in degrees.
    pub rotation_step_deg: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            offsets: NEIGHBORHOOD_9.to_vec(),
            offset_step_px: 10,
            rotation_step_deg: 10.0,
        }
    }
}

/// Flat, ordered list of candidate transforms.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformGrid {
    transforms: Vec<Transform>,
    angles: AngleGrid,
}

impl TransformGrid {
    /// Enumerates `offsets × angles` in offset-major order.
    pub fn generate(cfg: &GridConfig) -> AlignResult<Self> {
        let _span = trace_span!("generate_grid", offsets = cfg.offsets.len()).entered();
        if cfg.offsets.is_empty() {
            return Err(AlignError::EmptyTransformGrid);
        }
        let angles = AngleGrid::full_turn(cfg.rotation_step_deg)?;

        let transforms: Vec<Transform> = cfg
            .offsets
            .iter()
            .flat_map(|&(dx, dy)| angles.iter().map(move |angle| Transform::new(dx, dy, angle)))
            .collect();
        if transforms.is_empty() {
            return Err(AlignError::EmptyTransformGrid);
        }

        trace_event!("grid_generated", candidates = transforms.len());
        Ok(Self { transforms, angles })
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Returns the candidate at `idx`.
    pub fn get(&self, idx: usize) -> Option<Transform> {
        self.transforms.get(idx).copied()
    }

    /// Returns all candidates in enumeration order.
    pub fn as_slice(&self) -> &[Transform] {
        &self.transforms
    }

    /// Iterates candidates in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Transform> + '_ {
        self.transforms.iter().copied()
    }

    /// Returns the rotation sub-grid.
    pub fn angles(&self) -> &AngleGrid {
        &self.angles
    }

    /// Returns the first index holding `transform`.
    pub fn index_of(&self, transform: Transform) -> Option<usize> {
        self.transforms.iter().position(|t| *t == transform)
    }
}
