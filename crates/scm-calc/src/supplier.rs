//! 供應商多準則加權評分

use rust_decimal::Decimal;
use scm_core::numeric::REPORT_DECIMAL_PLACES;
use scm_core::{Priority, SupplierRecord, SupplierScore};

/// 供應商排名器
///
/// 供應商依加入順序保存，同分時維持此順序。
#[derive(Debug, Clone)]
pub struct SupplierRanker {
    suppliers: Vec<SupplierRecord>,
}

impl SupplierRanker {
    /// 創建空的排名器
    pub fn new() -> Self {
        Self {
            suppliers: Vec::new(),
        }
    }

    /// 創建帶有示範供應商的排名器
    pub fn with_sample_suppliers() -> Self {
        Self {
            suppliers: sample_suppliers(),
        }
    }

    /// 新增或更新供應商（更新時保留原位置）
    pub fn add_or_update_supplier(&mut self, record: SupplierRecord) {
        match self.suppliers.iter_mut().find(|s| s.id == record.id) {
            Some(existing) => {
                tracing::debug!("更新供應商 {}", record.id);
                *existing = record;
            }
            None => {
                tracing::debug!("新增供應商 {}", record.id);
                self.suppliers.push(record);
            }
        }
    }

    pub fn supplier(&self, id: &str) -> Option<&SupplierRecord> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn suppliers(&self) -> &[SupplierRecord] {
        &self.suppliers
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// 依優先順序評分，分數由高到低排序
    pub fn evaluate(&self, priority: Priority) -> Vec<SupplierScore> {
        let mut scores: Vec<SupplierScore> = self
            .suppliers
            .iter()
            .map(|record| SupplierScore {
                supplier_id: record.id.clone(),
                score: Self::score(record, priority),
                source_record: record.clone(),
            })
            .collect();

        // 穩定排序：同分保持加入順序
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            "供應商評分完成（{}）：{} 家",
            priority.as_str(),
            scores.len()
        );
        scores
    }

    /// 最佳供應商
    pub fn best(&self, priority: Priority) -> Option<SupplierScore> {
        self.evaluate(priority).into_iter().next()
    }

    /// 單一供應商的加權分數（兩位小數）
    pub fn score(record: &SupplierRecord, priority: Priority) -> Decimal {
        let cost = record.cost_advantage();
        let raw = match priority {
            Priority::Cost => {
                cost * weight(6) + record.quality * weight(2) + record.delivery * weight(2)
            }
            Priority::Quality => {
                record.quality * weight(6) + record.delivery * weight(2) + cost * weight(2)
            }
            Priority::Delivery => {
                record.delivery * weight(6) + record.quality * weight(2) + cost * weight(2)
            }
            Priority::Balanced => {
                cost * weight(3)
                    + record.quality * weight(3)
                    + record.delivery * weight(2)
                    + record.reliability * weight(2)
            }
        };

        raw.round_dp(REPORT_DECIMAL_PLACES)
    }
}

impl Default for SupplierRanker {
    fn default() -> Self {
        Self::with_sample_suppliers()
    }
}

/// 以十分位表示的權重（6 → 0.6）
fn weight(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1)
}

/// 示範供應商資料
fn sample_suppliers() -> Vec<SupplierRecord> {
    vec![
        SupplierRecord::new(
            "supplier_a",
            "Global Parts Co.",
            Decimal::from(10),
            Decimal::from(8),
            Decimal::from(9),
            Decimal::from(7),
            Decimal::from(5),
        ),
        SupplierRecord::new(
            "supplier_b",
            "Premium Suppliers Inc.",
            Decimal::from(12),
            Decimal::from(9),
            Decimal::from(7),
            Decimal::from(8),
            Decimal::from(3),
        ),
        SupplierRecord::new(
            "supplier_c",
            "Budget Components Ltd.",
            Decimal::from(8),
            Decimal::from(6),
            Decimal::from(8),
            Decimal::from(6),
            Decimal::from(7),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(scores: &[SupplierScore]) -> Vec<&str> {
        scores.iter().map(|s| s.supplier_id.as_str()).collect()
    }

    #[rstest]
    #[case(Priority::Balanced, ["supplier_a", "supplier_c", "supplier_b"], [560, 520, 510])]
    #[case(Priority::Cost, ["supplier_c", "supplier_a", "supplier_b"], [400, 340, 200])]
    #[case(Priority::Quality, ["supplier_a", "supplier_b", "supplier_c"], [660, 640, 560])]
    #[case(Priority::Delivery, ["supplier_a", "supplier_c", "supplier_b"], [700, 640, 560])]
    fn test_evaluate_sample_suppliers(
        #[case] priority: Priority,
        #[case] expected_ids: [&str; 3],
        #[case] expected_cents: [i64; 3],
    ) {
        let ranker = SupplierRanker::with_sample_suppliers();
        let scores = ranker.evaluate(priority);

        assert_eq!(scores.len(), ranker.len());
        assert_eq!(ids(&scores), expected_ids);
        let cents: Vec<_> = scores.iter().map(|s| s.score).collect();
        let expected: Vec<_> = expected_cents.iter().map(|c| Decimal::new(*c, 2)).collect();
        assert_eq!(cents, expected);
    }

    #[test]
    fn test_unrecognized_priority_matches_balanced() {
        let ranker = SupplierRanker::with_sample_suppliers();

        assert_eq!(
            ranker.evaluate(Priority::parse_or_default("fastest")),
            ranker.evaluate(Priority::Balanced)
        );
    }

    #[test]
    fn test_scores_are_rounded_to_two_places() {
        let mut ranker = SupplierRanker::new();
        ranker.add_or_update_supplier(SupplierRecord::new(
            "odd",
            "Odd Metrics",
            Decimal::new(3333, 3),
            Decimal::new(7777, 3),
            Decimal::new(5555, 3),
            Decimal::new(1111, 3),
            Decimal::from(4),
        ));

        let best = ranker.best(Priority::Balanced).unwrap();
        assert!(best.score.scale() <= 2);
        // 6.667*0.3 + 7.777*0.3 + 5.555*0.2 + 1.111*0.2 = 5.6664
        assert_eq!(best.score, Decimal::new(567, 2));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut ranker = SupplierRanker::new();
        for id in ["first", "second", "third"] {
            ranker.add_or_update_supplier(SupplierRecord::new(
                id,
                id,
                Decimal::from(5),
                Decimal::from(5),
                Decimal::from(5),
                Decimal::from(5),
                Decimal::from(5),
            ));
        }

        assert_eq!(ids(&ranker.evaluate(Priority::Cost)), ["first", "second", "third"]);
    }

    #[test]
    fn test_update_supplier_keeps_position() {
        let mut ranker = SupplierRanker::with_sample_suppliers();
        let mut improved = ranker.supplier("supplier_b").unwrap().clone();
        improved.cost = Decimal::from(2);
        ranker.add_or_update_supplier(improved);

        assert_eq!(ranker.len(), 3);
        assert_eq!(ranker.suppliers()[1].id, "supplier_b");
        assert_eq!(ranker.best(Priority::Cost).unwrap().supplier_id, "supplier_b");
    }

    #[test]
    fn test_add_supplier() {
        let mut ranker = SupplierRanker::with_sample_suppliers();
        ranker.add_or_update_supplier(SupplierRecord::new(
            "supplier_d",
            "Delta Logistics",
            Decimal::from(5),
            Decimal::from(10),
            Decimal::from(10),
            Decimal::from(10),
            Decimal::from(2),
        ));

        assert_eq!(ranker.len(), 4);
        assert_eq!(ranker.best(Priority::Balanced).unwrap().supplier_id, "supplier_d");
    }

    #[test]
    fn test_best_of_empty_ranker() {
        assert!(SupplierRanker::new().best(Priority::Balanced).is_none());
    }
}
