//! Polygon union by edge cancellation.
//!
//! Natural Earth neighbors share their land borders vertex-for-vertex, so
//! the union of a set of countries falls out of edge counting: an edge
//! that appears in exactly one ring is on the outer boundary, an edge
//! shared by two rings is an internal border and cancels. The surviving
//! edges are then chained into closed rings.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::models::{Feature, Geometry, Point};

use super::GeometryError;

/// Coordinates keyed by IEEE-754 bit patterns, so shared border vertices
/// compare exactly.
type VertexKey = (u64, u64);
type EdgeKey = (VertexKey, VertexKey);

/// Canonical undirected form: lexicographically smaller endpoint first.
fn normalize(a: VertexKey, b: VertexKey) -> EdgeKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counters from a union run.
#[derive(Debug, Clone, Copy)]
pub struct UnionStats {
    pub total_edges: usize,
    pub boundary_edges: usize,
    pub components: usize,
    pub dropped_artifacts: usize,
}

/// The union outcome: one open ring per connected boundary component.
#[derive(Debug)]
pub struct UnionResult {
    pub components: Vec<Vec<Point>>,
    pub stats: UnionStats,
}

impl UnionResult {
    /// The component with the most vertices (the main landmass).
    pub fn largest_component(&self) -> Option<&Vec<Point>> {
        self.components.iter().max_by_key(|c| c.len())
    }

    /// Package the components as a MultiPolygon, one closed outer ring per
    /// component.
    pub fn into_multipolygon(self) -> Geometry {
        Geometry::MultiPolygon {
            coordinates: self
                .components
                .into_iter()
                .map(|ring| vec![super::close_ring_coords(ring)])
                .collect(),
        }
    }
}

/// Union the outer rings of the given polygon features.
pub fn union_features(features: &[Feature]) -> Result<UnionResult, GeometryError> {
    let mut coords: HashMap<VertexKey, Point> = HashMap::new();
    let mut directed: Vec<EdgeKey> = Vec::new();
    let mut counts: HashMap<EdgeKey, u32> = HashMap::new();

    for feature in features {
        for ring in feature.geometry.outer_rings() {
            let open = super::open_ring(ring);
            let n = open.len();
            for i in 0..n {
                let a = open[i];
                let b = open[(i + 1) % n];
                let (ka, kb) = (a.bit_key(), b.bit_key());
                if ka == kb {
                    continue; // zero-length edge
                }
                coords.insert(ka, a);
                coords.insert(kb, b);
                directed.push((ka, kb));
                *counts.entry(normalize(ka, kb)).or_insert(0) += 1;
            }
        }
    }

    // Edges appearing exactly once are the outer boundary. Each survivor is
    // unique as an undirected edge, so visited tracking can be undirected.
    let boundary: Vec<EdgeKey> = directed
        .iter()
        .copied()
        .filter(|&(a, b)| counts[&normalize(a, b)] == 1)
        .collect();

    if boundary.is_empty() {
        return Err(GeometryError::EmptyUnion);
    }

    debug!(
        total = directed.len(),
        boundary = boundary.len(),
        internal = directed.len() - boundary.len(),
        "counted union edges"
    );

    let edge_set: HashSet<EdgeKey> = boundary.iter().map(|&(a, b)| normalize(a, b)).collect();
    let mut adjacency: HashMap<VertexKey, Vec<VertexKey>> = HashMap::new();
    for &(a, b) in &boundary {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }

    // Chain boundary edges into rings; disconnected components (islands)
    // each produce their own ring.
    let mut visited: HashSet<EdgeKey> = HashSet::new();
    let mut components: Vec<Vec<Point>> = Vec::new();

    while visited.len() < boundary.len() {
        let Some(&(start, _)) = boundary
            .iter()
            .find(|&&(a, b)| !visited.contains(&normalize(a, b)))
        else {
            break;
        };

        let mut current = start;
        let mut ring = vec![coords[&current]];

        for _ in 0..=boundary.len() {
            let next = adjacency.get(&current).and_then(|candidates| {
                candidates.iter().copied().find(|&candidate| {
                    let key = normalize(current, candidate);
                    edge_set.contains(&key) && !visited.contains(&key)
                })
            });

            let Some(next) = next else {
                // Dead end; the component is as closed as it will get.
                break;
            };
            visited.insert(normalize(current, next));

            if next == start {
                break;
            }
            ring.push(coords[&next]);
            current = next;
        }

        debug!(vertices = ring.len(), "traced boundary component");
        components.push(ring);
    }

    let total = components.len();
    components.retain(|ring| ring.len() >= 3);
    let dropped = total - components.len();
    if dropped > 0 {
        warn!(dropped, "discarded degenerate union components");
    }

    let stats = UnionStats {
        total_edges: directed.len(),
        boundary_edges: boundary.len(),
        components: components.len(),
        dropped_artifacts: dropped,
    };
    info!(
        components = stats.components,
        vertices = components.iter().map(Vec::len).sum::<usize>(),
        "union complete"
    );

    Ok(UnionResult { components, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ring_area;

    fn p(lon: f64, lat: f64) -> Point {
        Point::new(lon, lat)
    }

    fn square_feature(x: f64, y: f64) -> Feature {
        // Unit square with lower-left corner at (x, y), counter-clockwise,
        // closed ring as GeoJSON requires.
        Feature::new(Geometry::Polygon {
            coordinates: vec![vec![
                p(x, y),
                p(x + 1.0, y),
                p(x + 1.0, y + 1.0),
                p(x, y + 1.0),
                p(x, y),
            ]],
        })
    }

    #[test]
    fn test_union_of_adjacent_squares() {
        // Two unit squares sharing the edge x=1; the shared edge cancels.
        let result = union_features(&[square_feature(0.0, 0.0), square_feature(1.0, 0.0)]).unwrap();

        assert_eq!(result.stats.total_edges, 8);
        assert_eq!(result.stats.boundary_edges, 6);
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].len(), 6);
        assert!((ring_area(&result.components[0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_union_of_disjoint_squares() {
        let result = union_features(&[square_feature(0.0, 0.0), square_feature(5.0, 5.0)]).unwrap();
        assert_eq!(result.components.len(), 2);
        assert_eq!(result.stats.boundary_edges, 8);
    }

    #[test]
    fn test_union_of_single_polygon_is_identity() {
        let result = union_features(&[square_feature(0.0, 0.0)]).unwrap();
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].len(), 4);
        assert!((ring_area(&result.components[0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_union_of_identical_polygons_cancels_completely() {
        // Every edge appears twice, nothing survives.
        let err = union_features(&[square_feature(0.0, 0.0), square_feature(0.0, 0.0)]);
        assert!(matches!(err, Err(GeometryError::EmptyUnion)));
    }

    #[test]
    fn test_largest_component() {
        let triangle = Feature::new(Geometry::Polygon {
            coordinates: vec![vec![p(10.0, 10.0), p(11.0, 10.0), p(10.0, 11.0), p(10.0, 10.0)]],
        });
        let result = union_features(&[
            square_feature(0.0, 0.0),
            square_feature(1.0, 0.0),
            triangle,
        ])
        .unwrap();
        assert_eq!(result.largest_component().unwrap().len(), 6);
    }

    #[test]
    fn test_into_multipolygon_closes_rings() {
        let result = union_features(&[square_feature(0.0, 0.0)]).unwrap();
        let Geometry::MultiPolygon { coordinates } = result.into_multipolygon() else {
            panic!("expected MultiPolygon");
        };
        let ring = &coordinates[0][0];
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring.len(), 5);
    }
}
