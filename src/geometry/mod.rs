//! Planar 2D geometry kernel over lon/lat coordinates.
//!
//! All math is Euclidean in degree space, which is what the boundary
//! pipeline calls for: Natural Earth neighbors share border vertices
//! exactly, so unions and closings work on coordinates as-is.

pub mod closing;
pub mod triangulate;
pub mod union;

use thiserror::Error;

use crate::models::Point;

/// Errors from polygon operations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("ring has {0} vertices, need at least 3")]
    TooFewVertices(usize),

    #[error("no boundary edges remained after union")]
    EmptyUnion,

    #[error("closing points snap to the same ring vertex")]
    DegenerateChord,

    #[error("closing chord intersects the ring boundary")]
    ChordNotExternal,
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.lon - b.lon).powi(2) + (a.lat - b.lat).powi(2)).sqrt()
}

/// 2D cross product of vectors OA and OB (the z-component of the 3D cross
/// product). Positive means counter-clockwise, negative clockwise, zero
/// collinear.
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.lon - o.lon) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lon - o.lon)
}

/// Check if point `q` lies on segment `pr`, assuming the three points are
/// collinear.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.lon >= p.lon.min(r.lon)
        && q.lon <= p.lon.max(r.lon)
        && q.lat >= p.lat.min(r.lat)
        && q.lat <= p.lat.max(r.lat)
}

/// Check if segment p1-p2 intersects segment p3-p4, including touching at
/// endpoints and collinear overlap.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);

    // Proper intersection: the segments straddle each other.
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Collinear endpoints lying on the other segment.
    (d1 == 0.0 && on_segment(p3, p1, p4))
        || (d2 == 0.0 && on_segment(p3, p2, p4))
        || (d3 == 0.0 && on_segment(p1, p3, p2))
        || (d4 == 0.0 && on_segment(p1, p4, p2))
}

/// Test if `p` is inside triangle `abc`, edges included. Same-side test:
/// the point is inside when the three cross products do not mix signs.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Area of a triangle via the cross product, always non-negative.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * cross(a, b, c).abs()
}

/// Signed shoelace area of a ring. Positive for counter-clockwise winding.
/// A duplicated closing vertex is tolerated.
pub fn signed_ring_area(ring: &[Point]) -> f64 {
    let coords = open_ring(ring);
    let n = coords.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += coords[i].lon * coords[j].lat;
        area -= coords[j].lon * coords[i].lat;
    }
    area / 2.0
}

/// Absolute shoelace area of a ring.
pub fn ring_area(ring: &[Point]) -> f64 {
    signed_ring_area(ring).abs()
}

/// Total length of a polyline.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// The ring vertex closest to a target point: (vertex, index, distance).
pub fn closest_vertex(ring: &[Point], target: Point) -> Option<(Point, usize, f64)> {
    ring.iter()
        .enumerate()
        .map(|(i, &p)| (p, i, distance(p, target)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
}

/// Strip the duplicated closing vertex if present.
pub fn open_ring(ring: &[Point]) -> &[Point] {
    if ring.len() > 1 && ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    }
}

/// Close a ring by repeating the first vertex, if not already closed.
pub fn close_ring_coords(mut ring: Vec<Point>) -> Vec<Point> {
    if ring.len() > 1 && ring.first() != ring.last() {
        let first = ring[0];
        ring.push(first);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lon: f64, lat: f64) -> Point {
        Point::new(lon, lat)
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(p(0.0, 0.0), p(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_cross_orientation() {
        // Counter-clockwise turn is positive.
        assert!(cross(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)) > 0.0);
        // Clockwise turn is negative.
        assert!(cross(p(0.0, 0.0), p(1.0, 0.0), p(1.0, -1.0)) < 0.0);
        // Collinear is zero.
        assert_eq!(cross(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_segments_intersect_crossing() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(2.0, 0.0)
        ));
    }

    #[test]
    fn test_segments_intersect_disjoint() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
            p(1.0, 1.0)
        ));
    }

    #[test]
    fn test_segments_intersect_touching_endpoint() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 1.0),
            p(2.0, 0.0)
        ));
    }

    #[test]
    fn test_segments_intersect_collinear_overlap() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(1.0, 0.0),
            p(3.0, 0.0)
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 0.0)
        ));
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        assert!(point_in_triangle(p(1.0, 1.0), a, b, c));
        assert!(point_in_triangle(p(2.0, 0.0), a, b, c)); // on an edge
        assert!(!point_in_triangle(p(3.0, 3.0), a, b, c));
    }

    #[test]
    fn test_ring_area_open_and_closed() {
        let open = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        let closed = close_ring_coords(open.clone());
        assert_eq!(ring_area(&open), 4.0);
        assert_eq!(ring_area(&closed), 4.0);
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(signed_ring_area(&ccw) > 0.0);
        assert!(signed_ring_area(&cw) < 0.0);
    }

    #[test]
    fn test_closest_vertex() {
        let ring = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)];
        let (vertex, idx, dist) = closest_vertex(&ring, p(9.0, 0.5)).unwrap();
        assert_eq!(vertex, p(10.0, 0.0));
        assert_eq!(idx, 1);
        assert!(dist < 1.5);
    }

    #[test]
    fn test_triangle_area() {
        assert_eq!(triangle_area(p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)), 6.0);
    }
}
