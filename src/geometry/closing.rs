//! Polygon closing: cut a new polygon out of a ring by connecting two
//! boundary points with an external chord and keeping the shorter of the
//! two boundary paths between them.
//!
//! This is how the Baltic Sea polygon is extracted from the union of its
//! bordering countries: the chord spans the Danish straits and the short
//! boundary path is the Baltic coastline.

use tracing::debug;

use crate::models::Point;

use super::{closest_vertex, open_ring, path_length, segments_intersect, GeometryError};

/// Check that the chord between two ring vertices does not cross any ring
/// edge other than the ones sharing an endpoint with it.
fn is_chord_external(ring: &[Point], idx1: usize, idx2: usize) -> bool {
    let p1 = ring[idx1];
    let p2 = ring[idx2];
    let n = ring.len();

    for i in 0..n {
        let j = (i + 1) % n;
        if i == idx1 || i == idx2 || j == idx1 || j == idx2 {
            continue;
        }
        if segments_intersect(p1, p2, ring[i], ring[j]) {
            return false;
        }
    }
    true
}

/// Walk the ring from one index to another, inclusive, in either direction.
fn boundary_path(ring: &[Point], from: usize, to: usize, forward: bool) -> Vec<Point> {
    let n = ring.len();
    let mut path = Vec::new();
    let mut i = from;
    loop {
        path.push(ring[i]);
        if i == to {
            break;
        }
        i = if forward { (i + 1) % n } else { (i + n - 1) % n };
    }
    path
}

/// Close a new polygon out of `ring` between the vertices nearest to `a`
/// and `b`. The two target points may be approximate; they are snapped to
/// the nearest ring vertices. Returns a closed ring (first vertex repeated
/// last).
pub fn close_polygon(ring: &[Point], a: Point, b: Point) -> Result<Vec<Point>, GeometryError> {
    let open = open_ring(ring);
    if open.len() < 3 {
        return Err(GeometryError::TooFewVertices(open.len()));
    }

    // closest_vertex cannot fail on a non-empty ring
    let (p1, idx1, dist1) = closest_vertex(open, a).ok_or(GeometryError::TooFewVertices(0))?;
    let (p2, idx2, dist2) = closest_vertex(open, b).ok_or(GeometryError::TooFewVertices(0))?;
    debug!(
        ?p1,
        idx1, dist1, ?p2, idx2, dist2, "snapped closing points to ring vertices"
    );

    if idx1 == idx2 {
        return Err(GeometryError::DegenerateChord);
    }
    if !is_chord_external(open, idx1, idx2) {
        return Err(GeometryError::ChordNotExternal);
    }

    let forward = boundary_path(open, idx1, idx2, true);
    let backward = boundary_path(open, idx1, idx2, false);
    let len_forward = path_length(&forward);
    let len_backward = path_length(&backward);
    debug!(
        forward_vertices = forward.len(),
        forward_length = len_forward,
        backward_vertices = backward.len(),
        backward_length = len_backward,
        "compared boundary paths"
    );

    let chosen = if len_forward <= len_backward {
        forward
    } else {
        backward
    };

    Ok(super::close_ring_coords(chosen))
}
