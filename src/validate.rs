//! Format-contract validation for boundary dataset files.
//!
//! Checks run against the raw JSON document rather than the typed model,
//! so malformed files produce findings instead of a single parse error.
//! The contract: RFC 7946 FeatureCollection (or single Feature), Polygon
//! and MultiPolygon geometries only, WGS84 positions in (lon, lat) order,
//! closed rings, and a properties member on every feature.

use std::fmt;

use serde_json::Value;

use crate::models::{Feature, FeatureCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding, located by a JSON-path-ish string.
#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// All findings for one document.
#[derive(Debug, Default)]
pub struct Report {
    pub findings: Vec<Finding>,
}

impl Report {
    fn error(&mut self, location: &str, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Error,
            location: location.to_string(),
            message: message.into(),
        });
    }

    fn warning(&mut self, location: &str, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            location: location.to_string(),
            message: message.into(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// No errors (warnings allowed).
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Validate raw text: parse failures become findings too.
pub fn validate_text(text: &str, strict: bool) -> Report {
    match serde_json::from_str::<Value>(text) {
        Ok(doc) => validate_value(&doc, strict),
        Err(err) => {
            let mut report = Report::default();
            report.error("$", format!("not valid JSON: {err}"));
            report
        }
    }
}

/// Validate a parsed JSON document against the dataset contract.
pub fn validate_value(doc: &Value, strict: bool) -> Report {
    let mut report = Report::default();

    let Some(obj) = doc.as_object() else {
        report.error("$", "root is not a JSON object");
        return report;
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => match obj.get("features").and_then(Value::as_array) {
            Some(features) => {
                for (i, feature) in features.iter().enumerate() {
                    check_feature(feature, &format!("$.features[{i}]"), &mut report, strict);
                }
            }
            None => report.error("$", "FeatureCollection has no features array"),
        },
        Some("Feature") => check_feature(doc, "$", &mut report, strict),
        Some(other) => report.error(
            "$",
            format!("root type {other:?} is not FeatureCollection or Feature"),
        ),
        None => report.error("$", "root has no type member"),
    }

    report
}

fn check_feature(value: &Value, loc: &str, report: &mut Report, strict: bool) {
    let Some(obj) = value.as_object() else {
        report.error(loc, "feature is not a JSON object");
        return;
    };

    if obj.get("type").and_then(Value::as_str) != Some("Feature") {
        report.error(loc, "feature type is not \"Feature\"");
    }

    match obj.get("properties") {
        Some(props) if props.is_object() || props.is_null() => {}
        Some(_) => report.error(loc, "properties is not an object or null"),
        None => report.error(loc, "feature has no properties member"),
    }

    match obj.get("geometry") {
        Some(geometry) => check_geometry(geometry, &format!("{loc}.geometry"), report, strict),
        None => report.error(loc, "feature has no geometry member"),
    }
}

fn check_geometry(value: &Value, loc: &str, report: &mut Report, strict: bool) {
    let Some(obj) = value.as_object() else {
        report.error(loc, "geometry is not a JSON object");
        return;
    };

    let coordinates = obj.get("coordinates");
    match obj.get("type").and_then(Value::as_str) {
        Some("Polygon") => match coordinates.and_then(Value::as_array) {
            Some(rings) => {
                for (i, ring) in rings.iter().enumerate() {
                    check_ring(ring, &format!("{loc}.coordinates[{i}]"), report, strict);
                }
            }
            None => report.error(loc, "Polygon has no coordinates array"),
        },
        Some("MultiPolygon") => match coordinates.and_then(Value::as_array) {
            Some(polygons) => {
                for (i, polygon) in polygons.iter().enumerate() {
                    let Some(rings) = polygon.as_array() else {
                        report.error(
                            &format!("{loc}.coordinates[{i}]"),
                            "polygon is not an array of rings",
                        );
                        continue;
                    };
                    for (j, ring) in rings.iter().enumerate() {
                        check_ring(
                            ring,
                            &format!("{loc}.coordinates[{i}][{j}]"),
                            report,
                            strict,
                        );
                    }
                }
            }
            None => report.error(loc, "MultiPolygon has no coordinates array"),
        },
        Some(other) => report.error(
            loc,
            format!("geometry type {other:?} not allowed (expected Polygon or MultiPolygon)"),
        ),
        None => report.error(loc, "geometry has no type member"),
    }
}

fn check_ring(value: &Value, loc: &str, report: &mut Report, strict: bool) {
    let Some(positions) = value.as_array() else {
        report.error(loc, "ring is not an array");
        return;
    };

    if positions.len() < 4 {
        report.error(
            loc,
            format!("ring has {} positions, need at least 4", positions.len()),
        );
    } else if positions.first() != positions.last() {
        report.error(loc, "ring is not closed (first position != last)");
    }

    for (i, position) in positions.iter().enumerate() {
        check_position(position, &format!("{loc}[{i}]"), report, strict);
    }
}

fn check_position(value: &Value, loc: &str, report: &mut Report, strict: bool) {
    let Some(elements) = value.as_array() else {
        report.error(loc, "position is not an array");
        return;
    };

    match elements.len() {
        2 => {}
        3 => {
            if strict {
                report.warning(loc, "position carries an elevation; datasets are planar");
            }
        }
        n => {
            report.error(loc, format!("position has {n} elements, expected 2"));
            return;
        }
    }

    let mut numbers = elements.iter().map(Value::as_f64);
    let lon = numbers.next().flatten();
    let lat = numbers.next().flatten();

    match (lon, lat) {
        (Some(lon), Some(lat)) => {
            if !lon.is_finite() || !lat.is_finite() {
                report.error(loc, "position is not finite");
                return;
            }
            if !(-180.0..=180.0).contains(&lon) {
                report.error(loc, format!("longitude {lon} outside [-180, 180]"));
            }
            if !(-90.0..=90.0).contains(&lat) {
                report.error(loc, format!("latitude {lat} outside [-90, 90]"));
            }
        }
        _ => report.error(loc, "position elements are not numbers"),
    }
}

/// Round-trip property: parse into the typed model, re-serialize, re-parse,
/// and compare semantically (key order and whitespace do not participate).
pub fn round_trip_semantics(text: &str) -> Result<bool, serde_json::Error> {
    if let Ok(fc) = serde_json::from_str::<FeatureCollection>(text) {
        let again: FeatureCollection = serde_json::from_str(&serde_json::to_string(&fc)?)?;
        return Ok(again == fc);
    }
    let feature: Feature = serde_json::from_str(text)?;
    let again: Feature = serde_json::from_str(&serde_json::to_string(&feature)?)?;
    Ok(again == feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_FC: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"NAME": "Denmark", "ISO_A3": "DNK"},
            "geometry": {"type": "Polygon", "coordinates": [
                [[8.0, 55.0], [10.0, 55.0], [10.0, 57.0], [8.0, 55.0]]
            ]}
        }]
    }"#;

    #[test]
    fn test_valid_collection_is_clean() {
        let report = validate_text(VALID_FC, false);
        assert!(report.is_clean(), "findings: {:?}", report.findings);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_invalid_json_is_a_finding() {
        let report = validate_text("{not json", false);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_root_array_rejected() {
        let report = validate_text("[1, 2, 3]", false);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_disallowed_geometry_type() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Point", "coordinates": [4.35, 50.85]}
        }"#;
        let report = validate_text(text, false);
        assert_eq!(report.error_count(), 1);
        assert!(report.findings[0].message.contains("Point"));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [
                [[190.0, 95.0], [0.0, 0.0], [1.0, 1.0], [190.0, 95.0]]
            ]}
        }"#;
        let report = validate_text(text, false);
        // Longitude and latitude findings for both bad positions.
        assert_eq!(report.error_count(), 4);
    }

    #[test]
    fn test_unclosed_ring() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            ]}
        }"#;
        let report = validate_text(text, false);
        assert_eq!(report.error_count(), 1);
        assert!(report.findings[0].message.contains("not closed"));
    }

    #[test]
    fn test_short_ring() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]
            ]}
        }"#;
        let report = validate_text(text, false);
        assert!(report
            .findings
            .iter()
            .any(|f| f.message.contains("at least 4")));
    }

    #[test]
    fn test_missing_properties_member() {
        let text = r#"{
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
            ]}
        }"#;
        let report = validate_text(text, false);
        assert_eq!(report.error_count(), 1);
        assert!(report.findings[0].message.contains("properties"));
    }

    #[test]
    fn test_null_properties_allowed() {
        let text = r#"{
            "type": "Feature",
            "properties": null,
            "geometry": {"type": "Polygon", "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
            ]}
        }"#;
        assert!(validate_text(text, false).is_clean());
    }

    #[test]
    fn test_elevation_flagged_only_in_strict_mode() {
        let text = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [
                [[0.0, 0.0, 5.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0, 5.0]]
            ]}
        }"#;
        assert_eq!(validate_text(text, false).warning_count(), 0);
        let strict = validate_text(text, true);
        assert!(strict.is_clean());
        assert_eq!(strict.warning_count(), 2);
    }

    #[test]
    fn test_round_trip_semantics() {
        assert!(round_trip_semantics(VALID_FC).unwrap());
    }
}
