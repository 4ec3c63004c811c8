//! # SCM Calculation Engine
//!
//! 庫存優化、供應商評分與需求預測三個獨立計算元件

pub mod forecast;
pub mod inventory;
pub mod loader;
pub mod supplier;

// Re-export 主要類型
pub use forecast::DemandForecaster;
pub use inventory::InventoryOptimizer;
pub use loader::DemandCsvLoader;
pub use supplier::SupplierRanker;
