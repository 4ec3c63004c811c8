//! # SCM
//!
//! 供應鏈決策支援：經濟訂購量、再訂購點、供應商評分與需求預測

pub use scm_calc::{DemandCsvLoader, DemandForecaster, InventoryOptimizer, SupplierRanker};
pub use scm_core::*;
