//! EdgeAlign fits a fixed outline shape to edge-filtered video frames.
//!
//! The reference geometry is fitted once into a canvas, then every frame is
//! searched over a fixed grid of translations and rotations. Each candidate
//! is rasterized into a binary outline mask and scored with normalized
//! cross-correlation against the frame's edge map; the first candidate with
//! the highest score wins and is accepted when it clears a threshold.
//!
//! Frame decoding and edge detection happen outside this crate. Optional
//! parallel search is available via the `rayon` feature.

mod candidate;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use candidate::topk::ScoredTransform;
pub use geometry::{BoundingBox, CanonicalReference, CanvasConfig, GeometrySet, Point, Shape};
pub use grid::{GridConfig, Transform, TransformGrid, NEIGHBORHOOD_9};
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{correlate, Correlation, EdgeFrame};
pub use search::{MatchConfig, MatchResult, Matcher};
pub use template::rasterize;
pub use util::{AlignError, AlignResult};
