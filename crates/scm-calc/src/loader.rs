//! 需求歷史 CSV 載入
//!
//! 檔案需含標題列，至少包含 `date`（YYYY-MM-DD）與 `demand` 兩欄，其餘欄位忽略。

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use scm_core::{DemandObservation, DemandSeries, ScmError};

const DATE_COLUMN: &str = "date";
const DEMAND_COLUMN: &str = "demand";

/// 需求資料載入器
pub struct DemandCsvLoader;

impl DemandCsvLoader {
    /// 從檔案路徑載入
    pub fn from_path(path: impl AsRef<Path>) -> scm_core::Result<DemandSeries> {
        let path = path.as_ref();
        tracing::debug!("讀取需求資料檔 {}", path.display());

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::parse(reader)
    }

    /// 從任意讀取來源載入
    pub fn from_reader<R: Read>(source: R) -> scm_core::Result<DemandSeries> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);
        Self::parse(reader)
    }

    fn parse<R: Read>(mut reader: csv::Reader<R>) -> scm_core::Result<DemandSeries> {
        let headers = reader.headers()?.clone();
        let date_idx = Self::column_index(&headers, DATE_COLUMN)?;
        let demand_idx = Self::column_index(&headers, DEMAND_COLUMN)?;

        let mut observations = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = row_idx + 2; // 行號從 1 開始且跳過標題列

            let date = Self::get_date_field(&record, date_idx, row_number)?;
            let demand = Self::get_f64_field(&record, demand_idx, row_number)?;
            observations.push(DemandObservation::new(date, demand));
        }

        DemandSeries::new(observations)
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> scm_core::Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScmError::DataLoad(format!("缺少欄位: {name}")))
    }

    fn get_date_field(
        record: &csv::StringRecord,
        index: usize,
        row_number: usize,
    ) -> scm_core::Result<NaiveDate> {
        let raw = record.get(index).unwrap_or_default();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ScmError::InvalidDate(format!("第 {row_number} 行: {raw:?}")))
    }

    fn get_f64_field(
        record: &csv::StringRecord,
        index: usize,
        row_number: usize,
    ) -> scm_core::Result<f64> {
        let raw = record.get(index).unwrap_or_default();
        raw.parse::<f64>()
            .map_err(|_| ScmError::DataLoad(format!("第 {row_number} 行需求量無效: {raw:?}")))
    }
}
