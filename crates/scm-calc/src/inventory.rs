//! 庫存優化：經濟訂購量、再訂購點與成本摘要

use std::collections::HashMap;

use scm_core::numeric::{ensure_finite, round_to_cents, round_to_units};
use scm_core::{InventoryProfile, InventoryStatus, OptimizationInput, OptimizerConfig, ScmError};

/// 庫存優化器
///
/// 保存每個物料最近一次的優化結果，供庫存檢查使用。
#[derive(Debug, Clone, Default)]
pub struct InventoryOptimizer {
    /// 物料ID → 最近一次優化結果
    profiles: HashMap<String, InventoryProfile>,

    config: OptimizerConfig,
}

impl InventoryOptimizer {
    /// 創建新的庫存優化器
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            profiles: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 經濟訂購量（EOQ）
    /// EOQ = sqrt(2 * 年需求量 * 訂購成本 / 持有成本)
    ///
    /// 年需求、持有成本或根號內值非正時回傳 0；結果超出整數範圍時回傳錯誤。
    pub fn economic_order_quantity(
        annual_demand: f64,
        ordering_cost: f64,
        holding_cost_per_unit: f64,
    ) -> scm_core::Result<u64> {
        if holding_cost_per_unit <= 0.0 || annual_demand <= 0.0 {
            return Ok(0);
        }

        let radicand = 2.0 * annual_demand * ordering_cost / holding_cost_per_unit;
        if radicand <= 0.0 {
            return Ok(0);
        }

        // 平方根非負
        Ok(round_to_units(radicand.sqrt())?.unsigned_abs())
    }

    /// 再訂購點
    /// ROP = 日需求 × 提前期 + z × 日需求標準差 × sqrt(提前期)
    pub fn reorder_point(
        &self,
        daily_demand: f64,
        lead_time_days: u32,
        daily_std_dev: f64,
    ) -> scm_core::Result<i64> {
        let lead_time = f64::from(lead_time_days);
        let expected_demand = daily_demand * lead_time;
        let safety_stock = self.config.service_level_z * daily_std_dev * lead_time.sqrt();

        round_to_units(expected_demand + safety_stock)
    }

    /// 單一物料完整優化，結果覆寫該物料的既有記錄
    pub fn optimize(&mut self, input: OptimizationInput) -> scm_core::Result<InventoryProfile> {
        let lead_time_days = input
            .lead_time_days
            .unwrap_or(self.config.default_lead_time_days);
        let daily_std_dev = input
            .daily_std_dev
            .unwrap_or(self.config.default_daily_std_dev);

        Self::validate(&input, lead_time_days, daily_std_dev)?;

        let annual_demand = input.annual_demand;
        let ordering_cost = input.ordering_cost;
        let holding_cost = input.holding_cost_per_unit;

        let daily_demand = annual_demand / self.config.days_per_year;
        let eoq = Self::economic_order_quantity(annual_demand, ordering_cost, holding_cost)?;
        let rop = self.reorder_point(daily_demand, lead_time_days, daily_std_dev)?;

        let orders_per_year = if eoq > 0 {
            annual_demand / eoq as f64
        } else {
            0.0
        };
        let total_cost = ordering_cost * orders_per_year + holding_cost * eoq as f64 / 2.0;

        tracing::debug!(
            "物料 {}：EOQ {}，ROP {}，年訂購次數 {:.2}，總成本 {:.2}",
            input.item_id,
            eoq,
            rop,
            orders_per_year,
            total_cost
        );

        let profile = InventoryProfile {
            item_id: input.item_id.clone(),
            optimal_order_quantity: eoq,
            reorder_point: rop,
            annual_orders: round_to_cents(orders_per_year)?,
            total_annual_cost: round_to_cents(total_cost)?,
            daily_demand: round_to_cents(daily_demand)?,
            lead_time_days,
        };

        self.profiles.insert(input.item_id, profile.clone());
        tracing::info!("已更新物料 {} 的庫存優化結果", profile.item_id);

        Ok(profile)
    }

    /// 檢查庫存是否需要補貨
    pub fn check_status(&self, item_id: &str, current_stock: i64) -> InventoryStatus {
        let Some(profile) = self.profiles.get(item_id) else {
            return InventoryStatus::NoData;
        };

        let reorder_point = profile.reorder_point;
        if current_stock <= reorder_point {
            InventoryStatus::ReorderNeeded {
                current_stock,
                reorder_point,
            }
        } else {
            InventoryStatus::StockOk {
                current_stock,
                reorder_point,
            }
        }
    }

    /// 單一物料的優化結果
    pub fn profile(&self, item_id: &str) -> Option<&InventoryProfile> {
        self.profiles.get(item_id)
    }

    /// 所有優化結果的快照
    pub fn all_profiles(&self) -> HashMap<String, InventoryProfile> {
        self.profiles.clone()
    }

    fn validate(
        input: &OptimizationInput,
        lead_time_days: u32,
        daily_std_dev: f64,
    ) -> scm_core::Result<()> {
        if input.item_id.trim().is_empty() {
            return Err(ScmError::Validation("item_id 不可為空".to_string()));
        }

        ensure_finite("annual_demand", input.annual_demand)?;
        ensure_finite("ordering_cost", input.ordering_cost)?;
        ensure_finite("holding_cost", input.holding_cost_per_unit)?;
        ensure_finite("daily_std_dev", daily_std_dev)?;

        if lead_time_days == 0 {
            return Err(ScmError::Validation("lead_time 必須大於 0".to_string()));
        }

        if daily_std_dev < 0.0 {
            return Err(ScmError::Validation(format!(
                "daily_std_dev 不可為負數，收到 {daily_std_dev}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn part_001() -> OptimizationInput {
        OptimizationInput::new("PART_001", 10000.0, 50.0, 2.0)
            .with_lead_time_days(5)
            .with_daily_std_dev(10.0)
    }

    #[test]
    fn test_eoq_classic_case() {
        // sqrt(2 * 10000 * 50 / 2) = 707.1 → 707
        assert_eq!(
            InventoryOptimizer::economic_order_quantity(10000.0, 50.0, 2.0).unwrap(),
            707
        );
    }

    #[rstest]
    #[case(10000.0, 50.0, 0.0)]
    #[case(10000.0, 50.0, -2.0)]
    #[case(0.0, 50.0, 2.0)]
    #[case(-100.0, 50.0, 2.0)]
    #[case(10000.0, 0.0, 2.0)]
    #[case(10000.0, -50.0, 2.0)]
    fn test_eoq_degenerate_inputs(
        #[case] demand: f64,
        #[case] ordering_cost: f64,
        #[case] holding_cost: f64,
    ) {
        assert_eq!(
            InventoryOptimizer::economic_order_quantity(demand, ordering_cost, holding_cost)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_reorder_point_with_safety_stock() {
        let optimizer = InventoryOptimizer::default();

        // 27.4 * 5 + 1.65 * 10 * sqrt(5) = 137 + 36.9 → 174
        assert_eq!(optimizer.reorder_point(27.4, 5, 10.0).unwrap(), 174);
        // 無波動時僅有提前期需求
        assert_eq!(optimizer.reorder_point(20.0, 7, 0.0).unwrap(), 140);
    }

    #[test]
    fn test_eoq_out_of_range() {
        // sqrt(2 * 1e30 * 1e10 / 1) ≈ 1.4e20，超出整數範圍
        assert!(matches!(
            InventoryOptimizer::economic_order_quantity(1e30, 1e10, 1.0),
            Err(ScmError::Calculation(_))
        ));
        // 根號內溢位為無限大
        assert!(InventoryOptimizer::economic_order_quantity(1e300, 1e300, 1.0).is_err());
    }

    #[test]
    fn test_optimize_rejects_unrepresentable_quantities() {
        let mut optimizer = InventoryOptimizer::default();

        let huge = OptimizationInput::new("BIG-001", 1e30, 1e10, 1.0);
        assert!(matches!(optimizer.optimize(huge), Err(ScmError::Calculation(_))));

        // EOQ 可表示，但再訂購點超出範圍
        let huge_rop = OptimizationInput::new("BIG-002", 1e22, 1.0, 1e30);
        assert!(optimizer.optimize(huge_rop).is_err());

        assert!(optimizer.all_profiles().is_empty());
    }

    #[test]
    fn test_optimize_annual_orders_rounds_binary_value() {
        let mut optimizer = InventoryOptimizer::default();
        // EOQ = sqrt(2 * 2675 * (1e6 / 5350)) = 1000，年訂購次數 2.675 → 2.67
        let profile = optimizer
            .optimize(OptimizationInput::new("HALF-CENT", 2675.0, 1e6 / 5350.0, 1.0))
            .unwrap();

        assert_eq!(profile.optimal_order_quantity, 1000);
        assert_eq!(profile.annual_orders, Decimal::new(267, 2));
    }

    #[test]
    fn test_optimize_part_001() {
        let mut optimizer = InventoryOptimizer::default();
        let profile = optimizer.optimize(part_001()).unwrap();

        assert_eq!(profile.optimal_order_quantity, 707);
        assert_eq!(profile.reorder_point, 174);
        assert_eq!(profile.annual_orders, Decimal::new(1414, 2));
        assert_eq!(profile.total_annual_cost, Decimal::new(141421, 2));
        assert_eq!(profile.daily_demand, Decimal::new(2740, 2));
        assert_eq!(profile.lead_time_days, 5);
    }

    #[test]
    fn test_optimize_uses_default_lead_time_and_std_dev() {
        let mut optimizer = InventoryOptimizer::default();
        assert_eq!(optimizer.config().default_lead_time_days, 7);

        let profile = optimizer
            .optimize(OptimizationInput::new("PROD001", 3650.0, 25.0, 1.0))
            .unwrap();

        // 10 * 7 + 1.65 * 5 * sqrt(7) = 70 + 21.83 → 92
        assert_eq!(profile.lead_time_days, 7);
        assert_eq!(profile.reorder_point, 92);
    }

    #[test]
    fn test_optimize_zero_eoq_has_no_orders() {
        let mut optimizer = InventoryOptimizer::default();
        let profile = optimizer
            .optimize(OptimizationInput::new("DEAD-001", 1000.0, 50.0, 0.0))
            .unwrap();

        assert_eq!(profile.optimal_order_quantity, 0);
        assert_eq!(profile.annual_orders, Decimal::ZERO);
        assert_eq!(profile.total_annual_cost, Decimal::ZERO);
    }

    #[test]
    fn test_optimize_rejects_invalid_input() {
        let mut optimizer = InventoryOptimizer::default();

        let zero_lead_time = part_001().with_lead_time_days(0);
        assert!(matches!(
            optimizer.optimize(zero_lead_time),
            Err(ScmError::Validation(_))
        ));

        let negative_std_dev = part_001().with_daily_std_dev(-1.0);
        assert!(optimizer.optimize(negative_std_dev).is_err());

        let nan_demand = OptimizationInput::new("PART_001", f64::NAN, 50.0, 2.0);
        assert!(optimizer.optimize(nan_demand).is_err());

        let blank_id = OptimizationInput::new("  ", 100.0, 50.0, 2.0);
        assert!(optimizer.optimize(blank_id).is_err());

        // 驗證失敗不會留下記錄
        assert!(optimizer.all_profiles().is_empty());
    }

    #[test]
    fn test_custom_config_changes_reorder_point() {
        let config = OptimizerConfig {
            service_level_z: 0.0,
            ..OptimizerConfig::default()
        };
        let optimizer = InventoryOptimizer::new(config);

        assert_eq!(optimizer.config().service_level_z, 0.0);
        // 不含安全庫存
        assert_eq!(optimizer.reorder_point(27.4, 5, 10.0).unwrap(), 137);
    }

    #[test]
    fn test_check_status_flow() {
        let mut optimizer = InventoryOptimizer::default();
        assert_eq!(optimizer.check_status("PART_001", 150), InventoryStatus::NoData);

        optimizer.optimize(part_001()).unwrap();

        assert_eq!(
            optimizer.check_status("PART_001", 150),
            InventoryStatus::ReorderNeeded {
                current_stock: 150,
                reorder_point: 174
            }
        );
        assert!(optimizer.check_status("PART_001", 174).needs_reorder());
        assert_eq!(
            optimizer.check_status("PART_001", 200),
            InventoryStatus::StockOk {
                current_stock: 200,
                reorder_point: 174
            }
        );
    }

    #[test]
    fn test_optimize_overwrites_profile() {
        let mut optimizer = InventoryOptimizer::default();
        optimizer.optimize(part_001()).unwrap();
        optimizer
            .optimize(OptimizationInput::new("PART_001", 40000.0, 50.0, 2.0))
            .unwrap();

        let profiles = optimizer.all_profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles["PART_001"].optimal_order_quantity, 1414);
        assert_eq!(optimizer.profile("PART_001").unwrap().lead_time_days, 7);
    }
}
