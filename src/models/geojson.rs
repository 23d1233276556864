//! Typed GeoJSON model (RFC 7946), restricted to the geometry types the
//! boundary datasets actually use: Polygon and MultiPolygon.
//!
//! Coordinates are WGS84 (EPSG:4326) in (longitude, latitude) order.
//! Serialization round-trips are semantically lossless: geometries and
//! properties survive, key order and whitespace do not matter.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A 2D position: longitude, latitude.
///
/// Serialized as a JSON array. An elevation third element is accepted on
/// input and dropped; the pipeline is strictly planar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Key the coordinates by their IEEE-754 bit patterns so positions can
    /// be hashed and compared exactly. Upstream data is NaN-free.
    pub fn bit_key(&self) -> (u64, u64) {
        (self.lon.to_bits(), self.lat.to_bits())
    }

    /// Check that the position is a finite, in-range WGS84 coordinate.
    pub fn in_wgs84_range(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = Point;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a position array of 2 or 3 numbers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Point, A::Error> {
                let lon: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // Optional elevation, ignored.
                let _elev: Option<f64> = seq.next_element()?;
                if seq.next_element::<f64>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }
                Ok(Point::new(lon, lat))
            }
        }

        deserializer.deserialize_seq(PointVisitor)
    }
}

/// A linear ring or ring-in-progress: a sequence of positions.
pub type Ring = Vec<Point>;

/// Polygon or MultiPolygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// Outer rings of the geometry; interior rings (holes) are ignored by
    /// the whole pipeline, matching the datasets this tool produces.
    pub fn outer_rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.first().into_iter().collect(),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().filter_map(|poly| poly.first()).collect()
            }
        }
    }

    /// Total number of positions across all rings.
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Polygon { coordinates } => coordinates.iter().map(Vec::len).sum(),
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|poly| poly.iter().map(Vec::len))
                .sum(),
        }
    }
}

/// A GeoJSON feature: a geometry plus freeform properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Some(Map::new()),
        }
    }

    /// Look up a string property, e.g. the Natural Earth `NAME` field.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }
}
