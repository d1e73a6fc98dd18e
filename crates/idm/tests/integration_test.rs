//! Integration tests for the village index.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use idm::catalog::{name_of, Dimension};
use idm::engine::{filter_by_search, filter_by_status, region_summary, sort_by_field};
use idm::export::read_delimited_text;
use idm::model::{format_skor, CoordinateStatus, IndicatorSet};
use idm::validation::IssueKind;
use idm::{
    prepare_export, ExportOutcome, IdmConfig, Normalizer, Query, SortDirection, SortField,
    SourceVillage, Status, StatusFilter, VillageIndex,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// 47 ratings in catalog order whose sum is `total`.
fn flat_ratings(total: u32) -> Vec<f64> {
    let base = total / 47;
    let extra = (total % 47) as usize;
    (0..47)
        .map(|i| (if i < extra { base + 1 } else { base }) as f64)
        .collect()
}

fn split_ratings(flat: &[f64]) -> IndicatorSet {
    let slice = |d: Dimension| flat[d.offset()..d.offset() + d.expected_len()].to_vec();
    IndicatorSet {
        dld: slice(Dimension::Dld),
        ds: slice(Dimension::Ds),
        de: slice(Dimension::De),
        dl: slice(Dimension::Dl),
        da: slice(Dimension::Da),
        dtkpd: slice(Dimension::Dtkpd),
    }
}

fn village(kode: &str, desa: &str, kec: &str, total: u32) -> SourceVillage {
    SourceVillage::new(kode, desa, kec)
        .with_coordinates(-5.1, 105.6)
        .with_indicators(split_ratings(&flat_ratings(total)))
}

fn total_for(status: Status) -> u32 {
    match status {
        Status::Mandiri => 200,
        Status::Maju => 140,
        Status::Berkembang => 90,
    }
}

/// Delimited header: identity columns then `dld_1` … `dtkpd_5`.
fn csv_header() -> String {
    let mut columns = vec!["id".to_string(), "kode".into(), "desa".into(), "kec".into(), "lat".into(), "lng".into()];
    for d in Dimension::ALL {
        for n in 1..=d.expected_len() {
            columns.push(format!("{}_{}", d.key(), n));
        }
    }
    columns.join(",")
}

fn csv_row(id: &str, kode: &str, desa: &str, kec: &str, coords: &str, ratings: &[f64]) -> String {
    let cells: Vec<String> = ratings.iter().map(|r| r.to_string()).collect();
    format!("{},{},{},{},{},{}", id, kode, desa, kec, coords, cells.join(","))
}

// =============================================================================
// Scoring Scenario Tests
// =============================================================================

#[test]
fn test_score_scenarios() {
    let normalizer = Normalizer::new();
    let cases = [
        (200, "85,11", Status::Mandiri),
        (140, "59,57", Status::Maju),
        (90, "38,3", Status::Berkembang),
    ];

    for (total, text, status) in cases {
        let record = normalizer
            .normalize(1, &village("1807012001", "Desa", "Sukadana", total))
            .expect("Normalization failed");
        assert_eq!(record.dimensi().total(), total as f64);
        assert_eq!(record.skor_text(), text);
        assert_eq!(record.status(), status);
    }
}

#[test]
fn test_indicator_details_use_catalog_names() {
    let record = Normalizer::new()
        .normalize(1, &village("1807012001", "Desa", "Sukadana", 200))
        .expect("Normalization failed");
    let details = record.indicator_details();

    assert_eq!(details.len(), 47);
    assert_eq!(details[13].dimension, Dimension::Ds);
    assert_eq!(details[13].name, name_of(Dimension::Ds, 0));
    assert_eq!(details[0].rating, 5);
    assert_eq!(details[46].rating, 4);
}

// =============================================================================
// File Loading Tests
// =============================================================================

#[test]
fn test_load_json_file() {
    let raws = vec![
        village("1807012001", "Purwosinoman", "Batanghari", 200),
        village("1807012002", "Way Jepara", "Way Jepara", 140),
    ];
    let file = create_test_file(&serde_json::to_string(&raws).unwrap(), ".json");

    let index = VillageIndex::new();
    let dataset = index.load_file(file.path()).expect("Load failed");

    assert_eq!(dataset.len(), 2);
    assert!(dataset.issues().is_empty());
    assert_eq!(dataset.source().unwrap().record_count, 2);
    let ids: Vec<u32> = dataset.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_load_csv_excludes_short_rows() {
    let full = flat_ratings(200);
    let mut short: Vec<String> = flat_ratings(140).iter().map(|r| r.to_string()).collect();
    short[20] = String::new();

    let content = [
        csv_header(),
        csv_row("1", "1807012001", "Purwosinoman", "Batanghari", "-5.12,105.41", &full),
        format!("2,1807012002,Way Jepara,Way Jepara,-5.20,105.70,{}", short.join(",")),
        csv_row("3", "1807012003", "Braja Sakti", "Way Jepara", "NA,NA", &full),
    ]
    .join("\n");
    let file = create_test_file(&content, ".csv");

    let index = VillageIndex::new();
    let dataset = index.load_file(file.path()).expect("Load failed");

    assert_eq!(dataset.source().unwrap().format, "csv");
    assert_eq!(dataset.len(), 2);

    let length_issue = dataset
        .issues()
        .iter()
        .find(|i| i.kind == IssueKind::IndicatorLength)
        .expect("Expected a length issue");
    assert_eq!(length_issue.kode, "1807012002");

    let estimated = &dataset.records()[1];
    assert_eq!(estimated.kode(), "1807012003");
    assert_eq!(estimated.coordinate_status(), CoordinateStatus::Estimated);
    assert_eq!(estimated.lat(), -5.10);
    assert_eq!(estimated.lng(), 105.60);
}

#[test]
fn test_load_semicolon_file_with_comma_decimals() {
    let header = csv_header().replace(',', ";");
    let ratings: Vec<String> = flat_ratings(140).iter().map(|r| r.to_string()).collect();
    let row = format!(
        "1;1807012001;Purwosinoman;Batanghari;-5,12;105,41;{}",
        ratings.join(";")
    );
    let file = create_test_file(&format!("{}\n{}\n", header, row), ".txt");

    let dataset = VillageIndex::new().load_file(file.path()).expect("Load failed");
    assert_eq!(dataset.source().unwrap().format, "csv-semicolon");
    assert_eq!(dataset.records()[0].lat(), -5.12);
    assert_eq!(dataset.records()[0].status(), Status::Maju);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = VillageIndex::new().load_file("/nonexistent/desa.json");
    assert!(matches!(result, Err(idm::IdmError::Io { .. })));
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_status_filter_scenario() {
    let statuses = [
        Status::Mandiri,
        Status::Maju,
        Status::Berkembang,
        Status::Maju,
        Status::Mandiri,
        Status::Maju,
        Status::Berkembang,
        Status::Mandiri,
        Status::Mandiri,
        Status::Berkembang,
    ];
    let raws: Vec<SourceVillage> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| {
            village(&format!("18070120{:02}", i + 1), "Desa", "Sukadana", total_for(*s))
                .with_id(i as u32 + 1)
        })
        .collect();

    let index = VillageIndex::new();
    index.load_sources(&raws);
    let records = index.processed_data();

    let maju = filter_by_status(&records, StatusFilter::Only(Status::Maju));
    let ids: Vec<u32> = maju.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2, 4, 6]);

    let summary = index.snapshot().summary();
    assert_eq!(summary.status.mandiri, 4);
    assert_eq!(summary.status.maju, 3);
    assert_eq!(summary.status.berkembang, 3);
}

#[test]
fn test_search_scenario() {
    let index = VillageIndex::new();
    index.load_sources(&[
        village("1807012001", "Purwosinoman", "Batanghari", 200),
        village("1807012002", "Way Jepara", "Way Jepara", 140),
    ]);
    let records = index.processed_data();

    let found = filter_by_search(&records, "sino");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].desa(), "Purwosinoman");
}

#[test]
fn test_region_ranking() {
    let index = VillageIndex::new();
    index.load_sources(&[
        village("1", "A", "Batanghari", 90),
        village("2", "B", "Sukadana", 200),
        village("3", "C", "Batanghari", 140),
        village("4", "D", "Sukadana", 140),
    ]);
    let records = index.processed_data();
    let regions = region_summary(&records);

    assert_eq!(regions[0].kec, "Sukadana");
    assert_eq!(regions[0].count, 2);
    assert!((regions[0].mean - (85.11 + 59.57) / 2.0).abs() < 1e-9);
    assert_eq!(regions[1].kec, "Batanghari");
}

#[test]
fn test_query_composes_filter_and_sort() {
    let index = VillageIndex::new();
    index.load_sources(&[
        village("1", "Sumber Agung", "Batanghari", 150),
        village("2", "Adirejo", "Pekalongan", 140),
        village("3", "Banarjoyo", "Batanghari", 145),
        village("4", "Bumiharjo", "Batanghari", 200),
    ]);
    let dataset = index.snapshot();

    let query = Query::new()
        .with_status(Status::Maju)
        .with_search("BATANG")
        .sorted_by(SortField::Skor, SortDirection::Descending);
    let ids: Vec<u32> = dataset.query(&query).iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_sort_by_dimension_path() {
    let index = VillageIndex::new();
    index.load_sources(&[
        village("1", "A", "X", 200),
        village("2", "B", "X", 90),
        village("3", "C", "X", 140),
    ]);
    let records = index.processed_data();
    let field: SortField = "dimensi.dld".parse().unwrap();

    let sorted = sort_by_field(&records, field, SortDirection::Ascending);
    let ids: Vec<u32> = sorted.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_round_trip() {
    let index = VillageIndex::new();
    index.load_sources(&[
        village("1807012001", "Sido \"Makmur\"", "Way Jepara", 200),
        village("1807012002", "Braja Sakti, Baru", "Way Jepara", 90),
    ]);
    let records = index.processed_data();
    let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let file = match prepare_export(&records, "Lamtim", date) {
        ExportOutcome::Ready(file) => file,
        ExportOutcome::NothingToExport => panic!("Expected an export file"),
    };
    assert_eq!(file.file_name, "Data_Desa_Lamtim_2025-06-30.csv");
    assert_eq!(file.contents.lines().count(), records.len() + 1);

    let rows = read_delimited_text(&file.contents).expect("Read back failed");
    assert_eq!(rows[0].desa, "Sido \"Makmur\"");
    assert_eq!(rows[1].desa, "Braja Sakti, Baru");
    for (row, record) in rows.iter().zip(records.iter()) {
        assert_eq!(row.skor, record.skor());
        assert_eq!(row.status, record.status());
        assert_eq!(row.dimensi, *record.dimensi());
        assert_eq!(format_skor(row.skor), record.skor_text());
    }
}

#[test]
fn test_export_empty_selection() {
    let index = VillageIndex::new();
    index.load_sources(&[village("1", "A", "X", 200)]);
    let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let outcome = index.export(&Query::new().with_status(Status::Berkembang), date);
    assert_eq!(outcome, ExportOutcome::NothingToExport);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_custom_config_changes_classification() {
    let config_json = r#"{
        "scoring": { "thresholds": { "mandiri": 90.0, "maju": 80.0 } },
        "region": "Lampung Timur"
    }"#;
    let config_file = create_test_file(config_json, ".json");
    let config = IdmConfig::from_json_file(config_file.path()).expect("Config failed");

    let index = VillageIndex::with_config(config);
    index.load_sources(&[village("1", "A", "X", 200)]);

    let record = &index.processed_data()[0];
    assert_eq!(record.skor(), 85.11);
    assert_eq!(record.status(), Status::Maju);
    assert_eq!(index.config().region, "Lampung Timur");
}

#[test]
fn test_invalid_config_is_rejected() {
    let config_file = create_test_file(r#"{ "scoring": { "scale": -1.0 } }"#, ".json");
    assert!(IdmConfig::from_json_file(config_file.path()).is_err());
}
