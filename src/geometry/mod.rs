//! Planar reference geometry.
//!
//! A [`GeometrySet`] is the ordered list of outlines produced by an external
//! vector loader. Coordinates share one space with arbitrary extents until
//! the set is fitted into the canvas by [`normalize`].

mod normalize;

pub use normalize::{normalize, CanonicalReference, CanvasConfig};

/// A 2D point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A single outline in the reference geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Closed ring. Only the exterior is kept; holes play no part in matching.
    Polygon { exterior: Vec<Point> },
    /// Several closed rings that move and rotate as one body.
    MultiPolygon { parts: Vec<Vec<Point>> },
    /// Open polyline.
    Polyline { points: Vec<Point> },
}

impl Shape {
    /// Builds a polygon from its exterior ring.
    pub fn polygon<P: Into<Point>>(exterior: impl IntoIterator<Item = P>) -> Self {
        Shape::Polygon {
            exterior: collect_points(exterior),
        }
    }

    /// Builds a multi-part polygon from the exterior rings of its parts.
    pub fn multi_polygon<R, P>(parts: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        Shape::MultiPolygon {
            parts: parts.into_iter().map(collect_points).collect(),
        }
    }

    /// Builds an open polyline.
    pub fn polyline<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Shape::Polyline {
            points: collect_points(points),
        }
    }

    /// Returns the vertex runs drawn for this shape, one per part.
    pub fn parts(&self) -> &[Vec<Point>] {
        match self {
            Shape::Polygon { exterior } => std::slice::from_ref(exterior),
            Shape::MultiPolygon { parts } => parts,
            Shape::Polyline { points } => std::slice::from_ref(points),
        }
    }

    /// Iterates over every vertex of every part.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.parts().iter().flatten().copied()
    }

    /// Returns true if the outline is drawn closed.
    pub fn is_closed(&self) -> bool {
        !matches!(self, Shape::Polyline { .. })
    }

    /// Returns the bounding box over all parts, or `None` for a shape
    /// without points.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::of_points(self.points())
    }

    /// Returns a copy with every vertex mapped through `f`.
    pub(crate) fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Shape {
        let mut map_run = |run: &Vec<Point>| run.iter().copied().map(&mut f).collect::<Vec<_>>();
        match self {
            Shape::Polygon { exterior } => Shape::Polygon {
                exterior: map_run(exterior),
            },
            Shape::MultiPolygon { parts } => Shape::MultiPolygon {
                parts: parts.iter().map(map_run).collect(),
            },
            Shape::Polyline { points } => Shape::Polyline {
                points: map_run(points),
            },
        }
    }
}

fn collect_points<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Vec<Point> {
    points.into_iter().map(Into::into).collect()
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a point sequence; `None` when it is empty.
    pub fn of_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(iter.fold(init, |bb, p| BoundingBox {
            min_x: bb.min_x.min(p.x),
            min_y: bb.min_y.min(p.y),
            max_x: bb.max_x.max(p.x),
            max_y: bb.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the box; this is the rotation pivot used by the rasterizer.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

/// Ordered collection of reference outlines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometrySet {
    shapes: Vec<Shape>,
}

impl GeometrySet {
    /// Creates a set from shapes in drawing order.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Appends a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Returns the shapes in order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total bounding box over every point of every shape.
    ///
    /// Shapes too short to be drawn still contribute their points.
    pub fn total_bounds(&self) -> Option<BoundingBox> {
        BoundingBox::of_points(
            self.shapes
                .iter()
                .flat_map(|shape| shape.points()),
        )
    }

    pub(crate) fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> GeometrySet {
        GeometrySet {
            shapes: self
                .shapes
                .iter()
                .map(|shape| shape.map_points(&mut f))
                .collect(),
        }
    }
}

impl FromIterator<Shape> for GeometrySet {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
