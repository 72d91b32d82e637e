//! Fitting the reference geometry into the canvas.
//!
//! The set is moved so its bounding-box minimum sits at the origin, scaled
//! per axis, then centered using the bounding box of the scaled geometry.
//! The shrink coefficients under-fill the canvas so that offset candidates
//! can move the outline without clipping it.

use crate::geometry::{BoundingBox, GeometrySet, Point};
use crate::trace::{trace_event, trace_span};
use crate::util::{AlignError, AlignResult};

/// Canvas size and under-fill coefficients for the reference fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasConfig {
    /// Canvas width in pixels (the mask width).
    pub width: usize,
    /// Canvas height in pixels (the mask height).
    pub height: usize,
    /// Multiplier on the fit-to-width scale, in (0, 1].
    pub shrink_x: f64,
    /// Multiplier on the fit-to-height scale, in (0, 1].
    pub shrink_y: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
            shrink_x: 0.23,
            shrink_y: 0.67,
        }
    }
}

impl CanvasConfig {
    /// Checks canvas dimensions and shrink coefficients.
    pub fn validate(&self) -> AlignResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AlignError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for shrink in [self.shrink_x, self.shrink_y] {
            if !shrink.is_finite() || shrink <= 0.0 || shrink > 1.0 {
                return Err(AlignError::InvalidConfig {
                    reason: "shrink factors must lie in (0, 1]",
                });
            }
        }
        Ok(())
    }
}

/// Reference geometry fitted into canvas coordinates.
///
/// Produced once by [`normalize`] and read-only afterwards; per-frame
/// transforms are always applied to this value, never to a transformed copy.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalReference {
    geometry: GeometrySet,
    width: usize,
    height: usize,
    scale_x: f64,
    scale_y: f64,
}

impl CanonicalReference {
    /// Returns the fitted geometry.
    pub fn geometry(&self) -> &GeometrySet {
        &self.geometry
    }

    /// Returns the canvas width the geometry was fitted to.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the canvas height the geometry was fitted to.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the `(x, y)` scale applied to the source coordinates.
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Returns the bounding box of the fitted geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.geometry.total_bounds()
    }
}

/// Fits `set` into the canvas described by `canvas`.
///
/// Fails with [`AlignError::EmptyGeometry`] when the set has no points and
/// with [`AlignError::DegenerateGeometry`] when its bounding box has zero
/// width or height.
pub fn normalize(set: &GeometrySet, canvas: &CanvasConfig) -> AlignResult<CanonicalReference> {
    canvas.validate()?;
    let _span = trace_span!("normalize_reference", shapes = set.len()).entered();

    let bounds = set.total_bounds().ok_or(AlignError::EmptyGeometry)?;
    let (bbox_w, bbox_h) = (bounds.width(), bounds.height());
    if !(bbox_w.is_finite() && bbox_h.is_finite()) || bbox_w <= 0.0 || bbox_h <= 0.0 {
        return Err(AlignError::DegenerateGeometry {
            width: bbox_w,
            height: bbox_h,
        });
    }

    let out_w = canvas.width as f64;
    let out_h = canvas.height as f64;
    let scale_x = (out_w / bbox_w) * canvas.shrink_x;
    let scale_y = (out_h / bbox_h) * canvas.shrink_y;

    let scaled = set.map_points(|p| {
        let p = p.translated(-bounds.min_x, -bounds.min_y);
        Point::new(p.x * scale_x, p.y * scale_y)
    });

    let scaled_bounds = scaled.total_bounds().ok_or(AlignError::EmptyGeometry)?;
    let dx = (out_w - scaled_bounds.width()) / 2.0 - scaled_bounds.min_x;
    let dy = (out_h - scaled_bounds.height()) / 2.0 - scaled_bounds.min_y;
    let geometry = scaled.map_points(|p| p.translated(dx, dy));

    trace_event!("reference_normalized", scale_x = scale_x, scale_y = scale_y);
    Ok(CanonicalReference {
        geometry,
        width: canvas.width,
        height: canvas.height,
        scale_x,
        scale_y,
    })
}
