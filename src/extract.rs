//! Baltic Sea extraction.
//!
//! Takes the union of the Baltic-bordering countries, picks the main
//! landmass, and closes its boundary across the Danish straits. The short
//! boundary path between the two closing points is the Baltic coastline.

use thiserror::Error;
use tracing::info;

use crate::geometry::{closing, GeometryError};
use crate::models::{Feature, Geometry, Point};

/// Default closing point near Skagen, Denmark.
pub const SKAGEN: Point = Point {
    lon: 10.6,
    lat: 57.7,
};

/// Default closing point near Göteborg, Sweden.
pub const GOTEBORG: Point = Point {
    lon: 11.9,
    lat: 57.7,
};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("union dataset has no polygon components")]
    NoComponents,

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Extract an enclosed sea polygon from a border-union feature by closing
/// its largest component between two boundary points.
pub fn extract_sea(
    union: &Feature,
    point1: Point,
    point2: Point,
    name: &str,
) -> Result<Feature, ExtractError> {
    let rings = union.geometry.outer_rings();
    let main_ring = rings
        .iter()
        .max_by_key(|ring| ring.len())
        .ok_or(ExtractError::NoComponents)?;

    info!(
        vertices = main_ring.len(),
        ?point1,
        ?point2,
        "closing main landmass boundary"
    );
    let closed = closing::close_polygon(main_ring, point1, point2)?;

    let mut feature = Feature::new(Geometry::Polygon {
        coordinates: vec![closed],
    });
    feature.set_property("name", name);
    feature.set_property(
        "method",
        format!(
            "polygon closing between [{}, {}] and [{}, {}]",
            point1.lon, point1.lat, point2.lon, point2.lat
        ),
    );
    let vertices = feature.geometry.vertex_count();
    feature.set_property("vertices", vertices);

    Ok(feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lon: f64, lat: f64) -> Point {
        Point::new(lon, lat)
    }

    fn union_fixture() -> Feature {
        // One notched main component plus a small island; extraction must
        // pick the larger ring.
        Feature::new(Geometry::MultiPolygon {
            coordinates: vec![
                vec![vec![
                    p(0.0, 0.0),
                    p(4.0, 0.0),
                    p(4.0, 3.0),
                    p(3.0, 3.0),
                    p(3.0, 1.0),
                    p(1.0, 1.0),
                    p(1.0, 3.0),
                    p(0.0, 3.0),
                    p(0.0, 0.0),
                ]],
                vec![vec![p(9.0, 9.0), p(10.0, 9.0), p(9.0, 10.0), p(9.0, 9.0)]],
            ],
        })
    }

    #[test]
    fn test_extract_sea_from_largest_component() {
        let sea = extract_sea(&union_fixture(), p(1.1, 3.1), p(2.9, 3.1), "Notch Sea").unwrap();
        assert_eq!(sea.property_str("name"), Some("Notch Sea"));
        let Geometry::Polygon { coordinates } = &sea.geometry else {
            panic!("expected Polygon");
        };
        assert_eq!(coordinates[0].first(), coordinates[0].last());
        assert_eq!(sea.properties.as_ref().unwrap()["vertices"], 5);
    }

    #[test]
    fn test_extract_sea_rejects_internal_chord() {
        let err = extract_sea(&union_fixture(), p(0.0, 0.0), p(4.0, 3.0), "bad");
        assert!(matches!(
            err,
            Err(ExtractError::Geometry(GeometryError::ChordNotExternal))
        ));
    }
}
