//! 供應商模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商評估指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// 供應商ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 成本（1-10，越低越好）
    pub cost: Decimal,

    /// 品質（1-10，越高越好）
    pub quality: Decimal,

    /// 交期表現（1-10，越高越好）
    pub delivery: Decimal,

    /// 可靠度（1-10，越高越好）
    pub reliability: Decimal,

    /// 交貨提前期（天）
    pub lead_time: Decimal,
}

impl SupplierRecord {
    /// 創建新的供應商記錄
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: Decimal,
        quality: Decimal,
        delivery: Decimal,
        reliability: Decimal,
        lead_time: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            quality,
            delivery,
            reliability,
            lead_time,
        }
    }

    /// 成本分數（10 - 成本，越高越便宜）
    pub fn cost_advantage(&self) -> Decimal {
        Decimal::TEN - self.cost
    }
}

/// 供應商評分結果（每次排名重新計算，不保存）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierScore {
    /// 供應商ID
    pub supplier_id: String,

    /// 加權分數（兩位小數）
    pub score: Decimal,

    /// 評分依據
    pub source_record: SupplierRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_advantage() {
        let record = SupplierRecord::new(
            "supplier_x",
            "Test Supplier",
            Decimal::from(12),
            Decimal::from(9),
            Decimal::from(7),
            Decimal::from(8),
            Decimal::from(3),
        );

        // 超出量表的成本會得到負的成本分數
        assert_eq!(record.cost_advantage(), Decimal::from(-2));
    }
}
