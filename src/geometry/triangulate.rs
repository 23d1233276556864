//! Ear-clipping triangulation of simple polygons.
//!
//! Quick and simple, not optimal: O(n^2) scans for ears. Holes and
//! self-intersections are not supported; a simple polygon of n vertices
//! yields n - 2 triangles.

use tracing::{debug, warn};

use crate::models::Point;

use super::{cross, open_ring, point_in_triangle, signed_ring_area};

/// A triangle as three vertices.
pub type Triangle = [Point; 3];

/// Check whether the vertex at `curr` (an index into `remaining`) forms an
/// ear: the corner is convex and no other remaining vertex lies inside the
/// corner triangle.
fn is_ear(prev: usize, curr: usize, next: usize, poly: &[Point], remaining: &[usize]) -> bool {
    let a = poly[remaining[prev]];
    let b = poly[remaining[curr]];
    let c = poly[remaining[next]];

    // Reflex or collinear corners are never ears.
    if cross(a, b, c) <= 0.0 {
        return false;
    }

    for &idx in remaining {
        if idx == remaining[prev] || idx == remaining[curr] || idx == remaining[next] {
            continue;
        }
        if point_in_triangle(poly[idx], a, b, c) {
            return false;
        }
    }
    true
}

/// Triangulate a simple polygon ring. A duplicated closing vertex is
/// tolerated; winding order does not matter (clockwise input is reversed).
/// Degenerate input terminates early with however many ears were found.
pub fn triangulate_ring(ring: &[Point]) -> Vec<Triangle> {
    let open = open_ring(ring);
    let n = open.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[open[0], open[1], open[2]]];
    }

    let mut poly: Vec<Point> = open.to_vec();
    if signed_ring_area(&poly) < 0.0 {
        poly.reverse();
        debug!("reversed ring to counter-clockwise");
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut remaining: Vec<usize> = (0..n).collect();

    let max_iterations = 2 * n;
    let mut iterations = 0;

    while remaining.len() > 3 && iterations < max_iterations {
        iterations += 1;

        let mut clipped = false;
        for i in 0..remaining.len() {
            let prev = (i + remaining.len() - 1) % remaining.len();
            let next = (i + 1) % remaining.len();

            if is_ear(prev, i, next, &poly, &remaining) {
                triangles.push([
                    poly[remaining[prev]],
                    poly[remaining[i]],
                    poly[remaining[next]],
                ]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            warn!(
                iterations,
                remaining = remaining.len(),
                "no ear found, polygon is degenerate or self-intersecting"
            );
            break;
        }
    }

    if remaining.len() == 3 {
        triangles.push([
            poly[remaining[0]],
            poly[remaining[1]],
            poly[remaining[2]],
        ]);
    }

    triangles
}
