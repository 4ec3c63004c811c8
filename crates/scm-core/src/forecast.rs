//! 預測結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單日預測值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_demand: i64,
    pub confidence_lower: i64,
    pub confidence_upper: i64,
}

/// 預測結果
///
/// 四個序列長度一致，索引 i 對應同一個預測日。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForecastResult {
    pub dates: Vec<NaiveDate>,
    pub forecast: Vec<i64>,
    pub confidence_lower: Vec<i64>,
    pub confidence_upper: Vec<i64>,
}

impl ForecastResult {
    /// 預留容量的空結果
    pub fn with_capacity(periods: usize) -> Self {
        Self {
            dates: Vec::with_capacity(periods),
            forecast: Vec::with_capacity(periods),
            confidence_lower: Vec::with_capacity(periods),
            confidence_upper: Vec::with_capacity(periods),
        }
    }

    /// 追加一個預測日
    pub fn push(&mut self, date: NaiveDate, forecast: i64, lower: i64, upper: i64) {
        self.dates.push(date);
        self.forecast.push(forecast);
        self.confidence_lower.push(lower);
        self.confidence_upper.push(upper);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// 逐日檢視
    pub fn points(&self) -> impl Iterator<Item = ForecastPoint> + '_ {
        self.dates
            .iter()
            .zip(&self.forecast)
            .zip(&self.confidence_lower)
            .zip(&self.confidence_upper)
            .map(|(((date, forecast), lower), upper)| ForecastPoint {
                date: *date,
                predicted_demand: *forecast,
                confidence_lower: *lower,
                confidence_upper: *upper,
            })
    }
}

/// 需求趨勢方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// 趨勢分析結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub trend: TrendDirection,

    /// (末值 - 首值) / 筆數，兩位小數
    pub slope: Decimal,

    /// 全序列平均需求，兩位小數
    pub avg_demand: Decimal,
}

/// 趨勢分析輸出
#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome {
    Computed(TrendAnalysis),
    /// 未載入資料或少於兩筆觀測值
    InsufficientData,
}

impl TrendOutcome {
    pub fn analysis(&self) -> Option<&TrendAnalysis> {
        match self {
            TrendOutcome::Computed(analysis) => Some(analysis),
            TrendOutcome::InsufficientData => None,
        }
    }
}

impl Serialize for TrendOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TrendOutcome::Computed(analysis) => analysis.serialize(serializer),
            TrendOutcome::InsufficientData => serializer.serialize_str("Insufficient data"),
        }
    }
}
