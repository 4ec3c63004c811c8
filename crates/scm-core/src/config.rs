//! 計算參數配置

use serde::{Deserialize, Serialize};

/// 安全係數（約 95% 服務水準）
pub const SAFETY_FACTOR_Z: f64 = 1.65;

/// 庫存優化參數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// 服務水準對應的安全係數 z
    pub service_level_z: f64,

    /// 預設提前期（天）
    pub default_lead_time_days: u32,

    /// 預設日需求標準差
    pub default_daily_std_dev: f64,

    /// 年需求換算日需求的天數
    pub days_per_year: f64,
}

impl OptimizerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            service_level_z: SAFETY_FACTOR_Z,
            default_lead_time_days: 7,
            default_daily_std_dev: 5.0,
            days_per_year: 365.0,
        }
    }

    /// 建構器模式：設置預設提前期
    pub fn with_default_lead_time_days(mut self, days: u32) -> Self {
        self.default_lead_time_days = days;
        self
    }

    /// 建構器模式：設置預設日需求標準差
    pub fn with_default_daily_std_dev(mut self, std_dev: f64) -> Self {
        self.default_daily_std_dev = std_dev;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 需求預測參數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// 移動平均視窗（天）
    pub window: usize,

    /// 預設預測期數（天）
    pub periods: usize,

    /// 預測期數上限
    pub max_periods: usize,

    /// 信賴區間寬度（固定比例，非統計推導）
    pub confidence_band: f64,
}

impl ForecastConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            window: 7,
            periods: 30,
            max_periods: 90,
            confidence_band: 0.2,
        }
    }

    /// 建構器模式：設置移動平均視窗
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// 建構器模式：設置預測期數上限
    pub fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// 限制請求的預測期數不超過上限
    pub fn clamp_periods(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.periods).min(self.max_periods)
    }

    /// 信賴區間下限係數
    pub fn lower_factor(&self) -> f64 {
        1.0 - self.confidence_band
    }

    /// 信賴區間上限係數
    pub fn upper_factor(&self) -> f64 {
        1.0 + self.confidence_band
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 供應商評分優先順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// 成本優先
    Cost,
    /// 品質優先
    Quality,
    /// 交期優先
    Delivery,
    /// 綜合平衡（預設，無法辨識的值也落在此）
    #[default]
    Balanced,
}

impl Priority {
    /// 解析查詢參數，無法辨識時退回 `Balanced`
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" => Priority::Cost,
            "quality" => Priority::Quality,
            "delivery" => Priority::Delivery,
            _ => Priority::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Cost => "cost",
            Priority::Quality => "quality",
            Priority::Delivery => "delivery",
            Priority::Balanced => "balanced",
        }
    }
}

/// 需求預測方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// 移動平均（預設，無法辨識的值也落在此）
    #[default]
    MovingAverage,
    /// 星期季節性
    Seasonal,
}

impl ForecastMethod {
    /// 解析查詢參數，無法辨識時退回 `MovingAverage`
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "seasonal" => ForecastMethod::Seasonal,
            _ => ForecastMethod::MovingAverage,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::Seasonal => "seasonal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_optimizer_config() {
        let config = OptimizerConfig::default();

        assert_eq!(config.service_level_z, 1.65);
        assert_eq!(config.default_lead_time_days, 7);
        assert_eq!(config.default_daily_std_dev, 5.0);
        assert_eq!(config.days_per_year, 365.0);
    }

    #[test]
    fn test_optimizer_config_builder() {
        let config = OptimizerConfig::new()
            .with_default_lead_time_days(3)
            .with_default_daily_std_dev(2.5);

        assert_eq!(config.default_lead_time_days, 3);
        assert_eq!(config.default_daily_std_dev, 2.5);
    }

    #[test]
    fn test_clamp_periods() {
        let config = ForecastConfig::default();

        assert_eq!(config.clamp_periods(None), 30);
        assert_eq!(config.clamp_periods(Some(14)), 14);
        assert_eq!(config.clamp_periods(Some(365)), 90);

        let short = ForecastConfig::new().with_max_periods(10);
        assert_eq!(short.clamp_periods(None), 10);
    }

    #[test]
    fn test_confidence_factors() {
        let config = ForecastConfig::default();

        assert!((config.lower_factor() - 0.8).abs() < 1e-12);
        assert!((config.upper_factor() - 1.2).abs() < 1e-12);
    }

    #[rstest]
    #[case("cost", Priority::Cost)]
    #[case("quality", Priority::Quality)]
    #[case("Delivery", Priority::Delivery)]
    #[case("balanced", Priority::Balanced)]
    #[case("cheapest", Priority::Balanced)]
    #[case("", Priority::Balanced)]
    fn test_priority_parse(#[case] raw: &str, #[case] expected: Priority) {
        assert_eq!(Priority::parse_or_default(raw), expected);
    }

    #[rstest]
    #[case("seasonal", ForecastMethod::Seasonal)]
    #[case("moving_average", ForecastMethod::MovingAverage)]
    #[case("arima", ForecastMethod::MovingAverage)]
    fn test_forecast_method_parse(#[case] raw: &str, #[case] expected: ForecastMethod) {
        assert_eq!(ForecastMethod::parse_or_default(raw), expected);
    }
}
