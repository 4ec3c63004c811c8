//! 需求預測：移動平均、星期季節性與趨勢分析
//!
//! 兩種方法都是刻意簡化的基準模型，信賴區間為固定 ±20% 而非統計推導。

use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use scm_core::demand::mean;
use scm_core::numeric::{round_to_cents, round_to_units};
use scm_core::{
    DemandSeries, ForecastConfig, ForecastMethod, ForecastResult, TrendAnalysis, TrendDirection,
    TrendOutcome,
};

use crate::loader::DemandCsvLoader;

/// 需求預測器
#[derive(Debug, Clone, Default)]
pub struct DemandForecaster {
    series: Option<DemandSeries>,
    config: ForecastConfig,
}

impl DemandForecaster {
    /// 創建尚未載入資料的預測器
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            series: None,
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// 目前載入的需求序列
    pub fn series(&self) -> Option<&DemandSeries> {
        self.series.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.series.is_some()
    }

    /// 從 CSV 檔載入；失敗時保留原有資料
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> scm_core::Result<usize> {
        let path = path.as_ref();
        match DemandCsvLoader::from_path(path) {
            Ok(series) => Ok(self.load_series(series)),
            Err(err) => {
                tracing::warn!("無法載入需求資料 {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    /// 從讀取來源載入；失敗時保留原有資料
    pub fn load_reader<R: Read>(&mut self, source: R) -> scm_core::Result<usize> {
        match DemandCsvLoader::from_reader(source) {
            Ok(series) => Ok(self.load_series(series)),
            Err(err) => {
                tracing::warn!("無法載入需求資料: {}", err);
                Err(err)
            }
        }
    }

    /// 直接替換需求序列，回傳觀測筆數
    pub fn load_series(&mut self, series: DemandSeries) -> usize {
        let count = series.len();
        tracing::info!("已載入需求資料 {} 筆", count);
        self.series = Some(series);
        count
    }

    /// 依方法產生預測（移動平均使用預設視窗）
    ///
    /// 未載入資料時回傳 `Ok(None)`；預測值超出整數範圍時回傳錯誤。
    pub fn forecast(
        &self,
        method: ForecastMethod,
        periods: usize,
    ) -> scm_core::Result<Option<ForecastResult>> {
        match method {
            ForecastMethod::MovingAverage => {
                self.moving_average_forecast(self.config.window, periods)
            }
            ForecastMethod::Seasonal => self.seasonal_forecast(periods),
        }
    }

    /// 移動平均預測
    ///
    /// 取最近 `window` 筆平均作為每一天的預測值（水平預測）。
    pub fn moving_average_forecast(
        &self,
        window: usize,
        periods: usize,
    ) -> scm_core::Result<Option<ForecastResult>> {
        let Some(series) = self.series.as_ref() else {
            return Ok(None);
        };
        let recent = series.tail(window.max(1));
        let avg_demand = mean(recent.iter().map(|o| o.demand));

        let forecast = round_to_units(avg_demand)?;
        let lower = round_to_units(avg_demand * self.config.lower_factor())?;
        let upper = round_to_units(avg_demand * self.config.upper_factor())?;

        let mut result = ForecastResult::with_capacity(periods);
        for date in future_dates(series, periods) {
            result.push(date, forecast, lower, upper);
        }

        tracing::debug!(
            "移動平均預測：視窗 {}，平均 {:.2}，{} 天",
            recent.len(),
            avg_demand,
            result.len()
        );
        Ok(Some(result))
    }

    /// 星期季節性預測
    ///
    /// 以歷史上同一星期幾（週一=0 … 週日=6）的平均需求作為預測值；
    /// 該星期幾無歷史資料時改用全序列平均。
    pub fn seasonal_forecast(&self, periods: usize) -> scm_core::Result<Option<ForecastResult>> {
        let Some(series) = self.series.as_ref() else {
            return Ok(None);
        };
        let weekday_means = weekday_means(series);
        let overall_mean = series.mean_demand();

        let mut result = ForecastResult::with_capacity(periods);
        for date in future_dates(series, periods) {
            let weekday = date.weekday().num_days_from_monday() as usize;
            let avg_demand = weekday_means[weekday].unwrap_or(overall_mean);

            let forecast = round_to_units(avg_demand)?;
            let value = forecast as f64;
            result.push(
                date,
                forecast,
                round_to_units(value * self.config.lower_factor())?,
                round_to_units(value * self.config.upper_factor())?,
            );
        }

        Ok(Some(result))
    }

    /// 趨勢分析
    ///
    /// 斜率 = (末值 - 首值) / 筆數。
    pub fn trend_analysis(&self) -> TrendOutcome {
        let Some(series) = self.series.as_ref().filter(|s| s.len() >= 2) else {
            return TrendOutcome::InsufficientData;
        };
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return TrendOutcome::InsufficientData;
        };

        let slope = (last.demand - first.demand) / series.len() as f64;
        let trend = if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        // 序列已驗證為有限數值
        match (round_to_cents(slope), round_to_cents(series.mean_demand())) {
            (Ok(slope), Ok(avg_demand)) => TrendOutcome::Computed(TrendAnalysis {
                trend,
                slope,
                avg_demand,
            }),
            _ => TrendOutcome::InsufficientData,
        }
    }
}

/// 最近觀測日之後連續 `periods` 天
fn future_dates(series: &DemandSeries, periods: usize) -> impl Iterator<Item = NaiveDate> {
    series
        .last_date()
        .into_iter()
        .flat_map(|last| last.iter_days().skip(1))
        .take(periods)
}

/// 各星期幾的平均需求，無資料者為 `None`
fn weekday_means(series: &DemandSeries) -> [Option<f64>; 7] {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0usize; 7];

    for observation in series.observations() {
        let weekday = observation.date.weekday().num_days_from_monday() as usize;
        sums[weekday] += observation.demand;
        counts[weekday] += 1;
    }

    let mut means = [None; 7];
    for weekday in 0..7 {
        if counts[weekday] > 0 {
            means[weekday] = Some(sums[weekday] / counts[weekday] as f64);
        }
    }
    means
}
