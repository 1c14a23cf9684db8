//! Closed 2D outlines built from straight and cubic Bézier segments,
//! plus the cap tessellation used when they are extruded.

use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::math::{point, Point};
use lyon::path::{Path, PathEvent};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};
use crate::math::Vec2;

/// A closed planar outline backed by a lyon path
#[derive(Debug, Clone)]
pub struct Shape {
    path: Path,
}

/// Incremental outline builder. Every subpath is closed back to its start.
pub struct ShapeBuilder {
    builder: lyon::path::path::Builder,
    open: bool,
}

impl Shape {
    pub fn builder() -> ShapeBuilder {
        ShapeBuilder {
            builder: Path::builder(),
            open: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flatten the last subpath into a polygon. Curves get `curve_segments` divisions,
    /// straight edges one. A trailing point equal to the start is dropped.
    pub fn extract_points(&self, curve_segments: usize) -> Vec<Vec2> {
        let divisions = curve_segments.max(1);
        let mut points: Vec<Point> = Vec::new();

        for event in self.path.iter() {
            match event {
                PathEvent::Begin { at } => {
                    points.clear();
                    points.push(at);
                }
                PathEvent::Line { to, .. } => points.push(to),
                PathEvent::Quadratic { from, ctrl, to } => {
                    let curve = QuadraticBezierSegment { from, ctrl, to };
                    points.extend((1..=divisions).map(|i| curve.sample(i as f32 / divisions as f32)));
                }
                PathEvent::Cubic { from, ctrl1, ctrl2, to } => {
                    let curve = CubicBezierSegment { from, ctrl1, ctrl2, to };
                    points.extend((1..=divisions).map(|i| curve.sample(i as f32 / divisions as f32)));
                }
                PathEvent::End { .. } => {}
            }
        }

        if points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if (*last - *first).length() < 1e-5 {
                    points.pop();
                }
            }
        }

        points.into_iter().map(|p| Vec2::new(p.x, p.y)).collect()
    }
}

impl ShapeBuilder {
    /// Start a new outline at (x, y), closing any outline in progress
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        if self.open {
            self.builder.end(true);
        }
        self.builder.begin(point(x, y));
        self.open = true;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        if !self.open {
            return self.move_to(x, y);
        }
        self.builder.line_to(point(x, y));
        self
    }

    /// Cubic Bézier from the current point through control points to (x, y)
    pub fn bezier_curve_to(
        mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> Self {
        if !self.open {
            return self.move_to(x, y);
        }
        self.builder.cubic_bezier_to(point(c1x, c1y), point(c2x, c2y), point(x, y));
        self
    }

    pub fn build(mut self) -> Shape {
        if self.open {
            self.builder.end(true);
        }
        Shape {
            path: self.builder.build(),
        }
    }
}

/// Closed straight-edged path through `points`
fn polygon_path(points: &[Vec2]) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    builder.build()
}

/// Signed area of a closed polygon; positive for counter-clockwise outlines
pub fn polygon_area(points: &[Vec2]) -> f32 {
    let path = polygon_path(points);
    lyon::algorithms::area::approximate_signed_area(0.01, path.iter())
}

pub fn is_clockwise(points: &[Vec2]) -> bool {
    polygon_area(points) < 0.0
}

/// Tessellated fill of a closed polygon
#[derive(Debug, Clone, Default)]
pub struct CapMesh {
    pub positions: Vec<Vec2>,
    /// Triangles indexing `positions`, all counter-clockwise
    pub triangles: Vec<[u32; 3]>,
}

/// Fill a closed polygon with lyon's tessellator
pub fn tessellate_polygon(points: &[Vec2]) -> Result<CapMesh, String> {
    if points.len() < 3 {
        return Ok(CapMesh::default());
    }

    let path = polygon_path(points);
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();

    tessellator
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| vertex.position()),
        )
        .map_err(|e| format!("Cap tessellation failed: {:?}", e))?;

    let positions: Vec<Vec2> = buffers.vertices.iter().map(|p| Vec2::new(p.x, p.y)).collect();
    let triangles = buffers
        .indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let pa = positions[a as usize];
            let turn = (positions[b as usize] - pa).cross(&(positions[c as usize] - pa));
            if turn > 0.0 {
                Some([a, b, c])
            } else if turn < 0.0 {
                Some([a, c, b])
            } else {
                None
            }
        })
        .collect();

    Ok(CapMesh { positions, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap_area(cap: &CapMesh) -> f32 {
        cap.triangles
            .iter()
            .map(|t| {
                let (a, b, c) = (
                    cap.positions[t[0] as usize],
                    cap.positions[t[1] as usize],
                    cap.positions[t[2] as usize],
                );
                (b - a).cross(&(c - a)) * 0.5
            })
            .sum()
    }

    fn petal() -> Shape {
        Shape::builder()
            .move_to(0.0, -1.0)
            .bezier_curve_to(1.5, -1.0, 1.5, 1.0, 0.0, 1.5)
            .bezier_curve_to(-1.5, 1.0, -1.5, -1.0, 0.0, -1.0)
            .build()
    }

    #[test]
    fn test_line_outline_keeps_every_corner() {
        let shape = Shape::builder()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .line_to(1.0, 1.0)
            .line_to(0.0, 1.0)
            .build();
        let points = shape.extract_points(12);
        assert_eq!(points.len(), 4);
        assert!((polygon_area(&points) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_closing_point_is_dropped() {
        let shape = Shape::builder()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .line_to(0.0, 1.0)
            .line_to(0.0, 0.0)
            .build();
        assert_eq!(shape.extract_points(12).len(), 3);
    }

    #[test]
    fn test_curve_divisions() {
        // 1 start + 12 + 12, minus the closing duplicate
        assert_eq!(petal().extract_points(12).len(), 24);
        assert_eq!(petal().extract_points(4).len(), 8);
    }

    #[test]
    fn test_curve_samples_lie_on_arc() {
        let points = petal().extract_points(2);
        // x(t) = 4.5 t (1 - t) on the right arc, so its midpoint sits at x = 1.125
        assert!((points[1].x - 1.125).abs() < 0.0001);
        assert!((points[2].y - 1.5).abs() < 0.0001);
    }

    #[test]
    fn test_move_to_restarts_path() {
        let shape = Shape::builder()
            .move_to(5.0, 5.0)
            .line_to(6.0, 5.0)
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .line_to(0.0, 1.0)
            .build();
        let points = shape.extract_points(12);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Vec2::ZERO);
    }

    #[test]
    fn test_winding_detection() {
        let ccw = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let cw = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)];
        assert!(!is_clockwise(&ccw));
        assert!(is_clockwise(&cw));
    }

    #[test]
    fn test_tessellate_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let cap = tessellate_polygon(&square).unwrap();
        assert_eq!(cap.positions.len(), 4);
        assert_eq!(cap.triangles.len(), 2);
        assert!((cap_area(&cap) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_tessellate_concave_outline_covers_area() {
        // L shape, counter-clockwise
        let l_shape = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let cap = tessellate_polygon(&l_shape).unwrap();
        assert!((cap_area(&cap) - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_tessellation_ignores_input_winding() {
        let mut outline = petal().extract_points(12);
        let ccw = tessellate_polygon(&outline).unwrap();
        outline.reverse();
        let cw = tessellate_polygon(&outline).unwrap();

        assert!(cap_area(&ccw) > 0.0);
        assert!((cap_area(&ccw) - cap_area(&cw)).abs() < 0.0001);
        assert!((cap_area(&ccw) - polygon_area(&petal().extract_points(12))).abs() < 0.001);
    }

    #[test]
    fn test_self_intersecting_outline_stays_consistent() {
        // Bow tie: two lobes of opposite winding
        let bow_tie = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
        ];
        let cap = tessellate_polygon(&bow_tie).unwrap();
        assert!((cap_area(&cap) - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_tessellate_degenerate_input() {
        let cap = tessellate_polygon(&[Vec2::ZERO, Vec2::new(1.0, 0.0)]).unwrap();
        assert!(cap.triangles.is_empty());
    }
}
