//! Record builders for engine unit tests.

use crate::model::{
    classify, CoordinateStatus, DimensionScores, IndicatorSet, Status, VillageRecord,
};

pub(crate) fn record(id: u32, desa: &str, kec: &str, skor: f64) -> VillageRecord {
    VillageRecord {
        id,
        kode: id.to_string(),
        desa: desa.to_string(),
        kec: kec.to_string(),
        lat: -5.1,
        lng: 105.6,
        coordinate_status: CoordinateStatus::Exact,
        dimensi: DimensionScores::default(),
        indikator: IndicatorSet::default(),
        skor,
        status: classify(skor),
    }
}

pub(crate) fn with_dimensions(mut record: VillageRecord, dimensi: DimensionScores) -> VillageRecord {
    record.dimensi = dimensi;
    record
}

/// One record per status, ids starting at 1.
pub(crate) fn records_with_statuses(statuses: &[Status]) -> Vec<VillageRecord> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let skor = match status {
                Status::Mandiri => 80.0,
                Status::Maju => 60.0,
                Status::Berkembang => 40.0,
            };
            record(i as u32 + 1, &format!("Desa {}", i + 1), "Sukadana", skor)
        })
        .collect()
}
