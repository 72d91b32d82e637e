//! Mask rasterization and scoring plans.
//!
//! A mask is produced by a pure function of the canonical reference and one
//! transform. Each shape is translated and rotated about the center of its own
//! bounding box. A multi-part shape turns about the box of all its parts.
//! The vertices are then truncated to integer pixels and drawn as 1-px
//! outlines with value [`MASK_ON`] on a zeroed canvas. Interiors are never
//! filled.

use crate::geometry::{CanonicalReference, Point};
use crate::grid::Transform;
use crate::image::OwnedImage;
use crate::trace::trace_debug;
use crate::util::math::{sin_cos_deg, wrap_deg_positive};
use crate::util::AlignResult;

mod plan;
pub mod raster;
pub mod rotate;

pub use plan::MaskPlan;

/// Pixel value of outline pixels in a mask.
pub const MASK_ON: u8 = 255;

/// Rasterizes `reference` under `transform` onto a canvas of the reference's
/// size.
///
/// The reference itself is left untouched; shapes with fewer than two points
/// are skipped.
pub fn rasterize(
    reference: &CanonicalReference,
    transform: Transform,
    offset_step_px: i32,
) -> AlignResult<OwnedImage> {
    let mut canvas = OwnedImage::zeros(reference.width(), reference.height())?;
    let (off_x, off_y) = transform.pixel_offset(offset_step_px);
    let (off_x, off_y) = (off_x as f64, off_y as f64);
    let turn = wrap_deg_positive(transform.angle_deg);
    let (sin_a, cos_a) = sin_cos_deg(turn);

    let mut pixels = Vec::new();
    for (shape_idx, shape) in reference.geometry().shapes().iter().enumerate() {
        // The pivot is the bounding-box center after translation.
        let Some(pivot) = shape.bounds().map(|bb| bb.center().translated(off_x, off_y)) else {
            trace_debug!("shape_skipped", shape = shape_idx, points = 0usize);
            continue;
        };

        for part in shape.parts() {
            if part.len() < 2 {
                trace_debug!("shape_skipped", shape = shape_idx, points = part.len());
                continue;
            }

            pixels.clear();
            let moved = part.iter().map(|p| p.translated(off_x, off_y));
            if turn == 0.0 {
                pixels.extend(moved.map(to_pixel));
            } else {
                pixels.extend(moved.map(|p| to_pixel(rotate::rotate_with(p, pivot, sin_a, cos_a))));
            }
            raster::draw_polyline(&mut canvas, &pixels, shape.is_closed(), MASK_ON);
        }
    }

    Ok(canvas)
}

/// Truncates toward zero, as integer casts of float coordinates do.
fn to_pixel(p: Point) -> (i64, i64) {
    (p.x.trunc() as i64, p.y.trunc() as i64)
}
