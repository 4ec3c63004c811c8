//! 模擬 ERP 資料來源
//!
//! 提供靜態的供應商、產品、庫存資料，以及依日期決定的模擬銷售序列。

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// 銷售資料天數上限
pub const MAX_SALES_DAYS: u32 = 90;

const BASE_SALES: f64 = 100.0;
const WEEKEND_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Serialize)]
pub struct ErpSupplier {
    pub name: String,
    pub status: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErpProduct {
    pub name: String,
    pub category: String,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErpInventoryPosition {
    pub current_stock: u32,
    pub reserved: u32,
    pub available: u32,
}

impl ErpInventoryPosition {
    fn new(current_stock: u32, reserved: u32) -> Self {
        Self {
            current_stock,
            reserved,
            available: current_stock.saturating_sub(reserved),
        }
    }
}

/// 單日銷售
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub sales: u32,
}

/// 模擬 ERP
#[derive(Debug, Clone)]
pub struct ErpMock {
    pub suppliers: BTreeMap<String, ErpSupplier>,
    pub products: BTreeMap<String, ErpProduct>,
    pub inventory: BTreeMap<String, ErpInventoryPosition>,
}

impl ErpMock {
    pub fn new() -> Self {
        let suppliers = [
            ("SUP001", "Global Parts Co.", 4.5),
            ("SUP002", "Premium Suppliers Inc.", 4.8),
            ("SUP003", "Budget Components Ltd.", 3.9),
        ]
        .into_iter()
        .map(|(id, name, rating)| {
            (
                id.to_string(),
                ErpSupplier {
                    name: name.to_string(),
                    status: "active".to_string(),
                    rating,
                },
            )
        })
        .collect();

        let products = [
            ("PROD001", "Widget A", "Electronics", 25.50),
            ("PROD002", "Gadget B", "Hardware", 18.75),
            ("PROD003", "Tool C", "Tools", 32.00),
        ]
        .into_iter()
        .map(|(id, name, category, unit_cost)| {
            (
                id.to_string(),
                ErpProduct {
                    name: name.to_string(),
                    category: category.to_string(),
                    unit_cost,
                },
            )
        })
        .collect();

        let inventory = [("PROD001", 500, 50), ("PROD002", 300, 30), ("PROD003", 150, 15)]
            .into_iter()
            .map(|(id, stock, reserved)| (id.to_string(), ErpInventoryPosition::new(stock, reserved)))
            .collect();

        Self {
            suppliers,
            products,
            inventory,
        }
    }

    /// 截至 `today` 的最近 `days` 天銷售（最舊在前），天數上限 90
    pub fn sales_data(&self, days: u32, today: NaiveDate) -> Vec<SalesRecord> {
        let days = days.min(MAX_SALES_DAYS);

        (0..days)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .map(|date| SalesRecord {
                date,
                sales: daily_sales(date),
            })
            .collect()
    }
}

impl Default for ErpMock {
    fn default() -> Self {
        Self::new()
    }
}

/// 週末打七折，另加 0.8 ~ 1.2 倍的擾動（同一天的擾動固定）
fn daily_sales(date: NaiveDate) -> u32 {
    let weekend_factor = match date.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
        _ => 1.0,
    };

    let mut rng = StdRng::seed_from_u64(date.num_days_from_ce() as u64);
    let noise: u32 = rng.gen_range(0..100);

    (BASE_SALES * weekend_factor * (0.8 + 0.4 * f64::from(noise) / 100.0)) as u32
}
