//! Low-level building blocks for custom search loops.
//!
//! These expose the individual stages behind [`Matcher`](crate::Matcher):
//! normalization, grid enumeration, rasterization and window scoring. Most
//! users should prefer `Matcher::match_frame`.

pub use crate::candidate::topk::TopK;
pub use crate::geometry::normalize;
pub use crate::grid::AngleGrid;
pub use crate::image::integral::IntegralImage;
pub use crate::kernel::{scan_best, score_at};
pub use crate::search::is_accepted;
pub use crate::template::raster::{draw_polyline, draw_segment};
pub use crate::template::rotate::rotate_point;
pub use crate::template::{MaskPlan, MASK_ON};
