//! 庫存優化模型

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一物料的庫存優化結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryProfile {
    /// 物料ID
    pub item_id: String,

    /// 經濟訂購量（EOQ）
    pub optimal_order_quantity: u64,

    /// 再訂購點（ROP）
    pub reorder_point: i64,

    /// 年訂購次數
    pub annual_orders: Decimal,

    /// 年度總庫存成本（訂購 + 持有）
    pub total_annual_cost: Decimal,

    /// 日需求
    pub daily_demand: Decimal,

    /// 提前期（天）
    pub lead_time_days: u32,
}

/// 庫存優化輸入
///
/// 提前期與日需求標準差為選填，未提供時採用 `OptimizerConfig` 的預設值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationInput {
    /// 物料ID
    pub item_id: String,

    /// 年需求量
    pub annual_demand: f64,

    /// 每次訂購成本
    pub ordering_cost: f64,

    /// 單位年持有成本
    #[serde(rename = "holding_cost")]
    pub holding_cost_per_unit: f64,

    /// 提前期（天）
    #[serde(rename = "lead_time", default, skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u32>,

    /// 日需求標準差
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_std_dev: Option<f64>,
}

impl OptimizationInput {
    /// 創建新的優化輸入
    pub fn new(
        item_id: impl Into<String>,
        annual_demand: f64,
        ordering_cost: f64,
        holding_cost_per_unit: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            annual_demand,
            ordering_cost,
            holding_cost_per_unit,
            lead_time_days: None,
            daily_std_dev: None,
        }
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// 建構器模式：設置日需求標準差
    pub fn with_daily_std_dev(mut self, std_dev: f64) -> Self {
        self.daily_std_dev = Some(std_dev);
        self
    }
}

/// 庫存檢查結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InventoryStatus {
    /// 尚無優化資料
    NoData,

    /// 庫存已達再訂購點，需要補貨
    ReorderNeeded {
        current_stock: i64,
        reorder_point: i64,
    },

    /// 庫存充足
    StockOk {
        current_stock: i64,
        reorder_point: i64,
    },
}

impl InventoryStatus {
    /// 是否需要補貨
    pub fn needs_reorder(&self) -> bool {
        matches!(self, InventoryStatus::ReorderNeeded { .. })
    }
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryStatus::NoData => write!(f, "No optimization data available"),
            InventoryStatus::ReorderNeeded {
                current_stock,
                reorder_point,
            } => write!(
                f,
                "REORDER NEEDED! Current: {current_stock}, ROP: {reorder_point}"
            ),
            InventoryStatus::StockOk {
                current_stock,
                reorder_point,
            } => write!(f, "Stock OK. Current: {current_stock}, ROP: {reorder_point}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_input_builder() {
        let input = OptimizationInput::new("PART_001", 10000.0, 50.0, 2.0)
            .with_lead_time_days(5)
            .with_daily_std_dev(10.0);

        assert_eq!(input.item_id, "PART_001");
        assert_eq!(input.lead_time_days, Some(5));
        assert_eq!(input.daily_std_dev, Some(10.0));
    }

    #[test]
    fn test_optimization_input_from_request_json() {
        let input: OptimizationInput = serde_json::from_str(
            r#"{"item_id": "PROD001", "annual_demand": 5000, "ordering_cost": 25, "holding_cost": 1.5, "lead_time": 3}"#,
        )
        .unwrap();

        assert_eq!(input.holding_cost_per_unit, 1.5);
        assert_eq!(input.lead_time_days, Some(3));
        assert_eq!(input.daily_std_dev, None);
    }

    #[test]
    fn test_status_display() {
        let status = InventoryStatus::ReorderNeeded {
            current_stock: 150,
            reorder_point: 174,
        };

        assert!(status.needs_reorder());
        assert_eq!(status.to_string(), "REORDER NEEDED! Current: 150, ROP: 174");
        assert_eq!(InventoryStatus::NoData.to_string(), "No optimization data available");
    }

    #[test]
    fn test_status_serialization() {
        let status = InventoryStatus::StockOk {
            current_stock: 200,
            reorder_point: 174,
        };
        let json = serde_json::to_value(status).unwrap();

        assert_eq!(json["status"], "stock_ok");
        assert_eq!(json["reorder_point"], 174);
    }
}
