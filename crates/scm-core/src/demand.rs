//! 需求歷史模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Result, ScmError};

/// 單日需求觀測值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandObservation {
    /// 日期
    pub date: NaiveDate,

    /// 需求量
    pub demand: f64,
}

impl DemandObservation {
    pub fn new(date: NaiveDate, demand: f64) -> Self {
        Self { date, demand }
    }
}

/// 需求時間序列
///
/// 依日期升冪排列（同日期保持原順序），至少一筆，需求量皆為非負有限數值。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSeries {
    observations: Vec<DemandObservation>,
}

impl DemandSeries {
    /// 驗證並排序觀測值
    pub fn new(mut observations: Vec<DemandObservation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(ScmError::Validation("需求資料為空".to_string()));
        }

        if let Some(bad) = observations
            .iter()
            .find(|o| !o.demand.is_finite() || o.demand < 0.0)
        {
            return Err(ScmError::Validation(format!(
                "{} 的需求量無效: {}",
                bad.date, bad.demand
            )));
        }

        observations.sort_by_key(|o| o.date);
        Ok(Self { observations })
    }

    /// 觀測筆數
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// 是否為空（經 `new` 建立的序列恆為非空）
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 所有觀測值
    pub fn observations(&self) -> &[DemandObservation] {
        &self.observations
    }

    /// 最早觀測值
    pub fn first(&self) -> Option<&DemandObservation> {
        self.observations.first()
    }

    /// 最近觀測值
    pub fn last(&self) -> Option<&DemandObservation> {
        self.observations.last()
    }

    /// 最近觀測日期
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|o| o.date)
    }

    /// 最近 `window` 筆觀測值（不足時回傳全部）
    pub fn tail(&self, window: usize) -> &[DemandObservation] {
        let start = self.observations.len().saturating_sub(window);
        &self.observations[start..]
    }

    /// 全序列平均需求
    pub fn mean_demand(&self) -> f64 {
        mean(self.observations.iter().map(|o| o.demand))
    }
}

/// 算術平均（空集合為 0）
pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
