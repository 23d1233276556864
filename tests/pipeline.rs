//! End-to-end pipeline test on synthetic countries: union two neighbors
//! sharing a border, extract the enclosed sea by polygon closing, and
//! validate every written dataset against the format contract.

use geoprep::config::Settings;
use geoprep::extract::extract_sea;
use geoprep::geometry::ring_area;
use geoprep::geometry::union::union_features;
use geoprep::models::{DatasetRecord, Feature, FeatureCollection, Geometry, Manifest, Point};
use geoprep::storage;
use geoprep::validate::{round_trip_semantics, validate_text};

fn p(lon: f64, lat: f64) -> Point {
    Point::new(lon, lat)
}

fn country(name: &str, ring: Vec<Point>) -> Feature {
    let mut feature = Feature::new(Geometry::Polygon {
        coordinates: vec![geoprep::geometry::close_ring_coords(ring)],
    });
    feature.set_property("NAME", name);
    feature
}

/// Two countries forming a U-shaped landmass around a small sea. They
/// share the border x=2 between y=0 and y=1 vertex-for-vertex, the way
/// Natural Earth neighbors do.
fn synthetic_countries() -> FeatureCollection {
    let west = country(
        "Westland",
        vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ],
    );
    let east = country(
        "Eastland",
        vec![
            p(2.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 3.0),
            p(3.0, 3.0),
            p(3.0, 1.0),
            p(2.0, 1.0),
        ],
    );
    FeatureCollection::new(vec![west, east])
}

fn assert_contract_clean(path: &std::path::Path) {
    let text = std::fs::read_to_string(path).unwrap();
    let report = validate_text(&text, true);
    assert!(
        report.is_clean(),
        "{} has findings: {:?}",
        path.display(),
        report.findings
    );
    assert!(round_trip_semantics(&text).unwrap());
}

#[test]
fn union_extract_validate_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    settings.ensure_directories().unwrap();

    // Seed the upstream countries dataset.
    storage::save_json(&settings.countries_path(), &synthetic_countries()).unwrap();

    // Union the two neighbors; the shared border must cancel.
    let collection = storage::load_feature_collection(&settings.countries_path()).unwrap();
    let result = union_features(&collection.features).unwrap();
    assert_eq!(result.stats.total_edges, 12);
    assert_eq!(result.stats.boundary_edges, 10);
    assert_eq!(result.components.len(), 1);
    assert!((ring_area(&result.components[0]) - 8.0).abs() < 1e-12);

    let mut union = Feature::new(result.into_multipolygon());
    union.set_property("name", "Synthetic Border Union");
    storage::save_json(&settings.union_path(), &union).unwrap();

    // Close the notch mouth to extract the enclosed sea.
    let union = storage::load_feature(&settings.union_path()).unwrap();
    let sea = extract_sea(&union, p(1.1, 3.2), p(2.9, 3.2), "Notch Sea").unwrap();
    let Geometry::Polygon { coordinates } = &sea.geometry else {
        panic!("expected Polygon");
    };
    assert_eq!(coordinates[0].first(), coordinates[0].last());
    assert!((ring_area(&coordinates[0]) - 4.0).abs() < 1e-12);
    storage::save_json(&settings.baltic_path(), &sea).unwrap();

    // Every dataset written by the pipeline honors the format contract.
    assert_contract_clean(&settings.countries_path());
    assert_contract_clean(&settings.union_path());
    assert_contract_clean(&settings.baltic_path());

    // Provenance survives a manifest round trip.
    let mut manifest = Manifest::default();
    let content = std::fs::read(settings.baltic_path()).unwrap();
    manifest.upsert(
        DatasetRecord::new(
            "baltic_sea_extracted.geojson",
            &settings.relative_dataset_path(&settings.baltic_path()),
            &content,
        )
        .with_source("baltic_border_union.geojson")
        .with_method("polygon closing"),
    );
    manifest.save(&settings.manifest_path()).unwrap();

    let manifest = Manifest::load(&settings.manifest_path()).unwrap();
    let record = manifest.get("baltic_sea_extracted.geojson").unwrap();
    assert_eq!(record.path, "test-data/baltic_sea_extracted.geojson");
    assert_eq!(record.sha256, storage::sha256_hex(&content));
}
