//! # SCM Core
//!
//! 供應鏈決策支援的核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod forecast;
pub mod inventory;
pub mod numeric;
pub mod supplier;

// Re-export 主要類型
pub use config::{ForecastConfig, ForecastMethod, OptimizerConfig, Priority, SAFETY_FACTOR_Z};
pub use demand::{DemandObservation, DemandSeries};
pub use forecast::{ForecastPoint, ForecastResult, TrendAnalysis, TrendDirection, TrendOutcome};
pub use inventory::{InventoryProfile, InventoryStatus, OptimizationInput};
pub use supplier::{SupplierRecord, SupplierScore};

/// 供應鏈計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("輸入驗證失敗: {0}")]
    Validation(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("需求資料載入失敗: {0}")]
    DataLoad(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),
}

impl From<csv::Error> for ScmError {
    fn from(err: csv::Error) -> Self {
        ScmError::DataLoad(err.to_string())
    }
}

impl From<std::io::Error> for ScmError {
    fn from(err: std::io::Error) -> Self {
        ScmError::DataLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScmError>;
