//! 數值捨入工具
//!
//! 整數結果採用四捨六入五成雙（銀行家捨入），
//! 報表用的小數結果以浮點數的精確二進位值轉為 `Decimal` 後保留兩位小數。

use rust_decimal::Decimal;

use crate::{Result, ScmError};

/// 報表小數位數
pub const REPORT_DECIMAL_PLACES: u32 = 2;

/// 2^63，`i64` 可表示範圍的上界（不含）
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// 捨入為整數（五成雙），超出 `i64` 範圍時回傳錯誤
pub fn round_to_units(value: f64) -> Result<i64> {
    let rounded = value.round_ties_even();
    if rounded.is_finite() && (-I64_BOUND..I64_BOUND).contains(&rounded) {
        Ok(rounded as i64)
    } else {
        Err(ScmError::Calculation(format!("超出整數範圍的數值: {value}")))
    }
}

/// 轉為 `Decimal` 並保留兩位小數
///
/// 以二進位精確值捨入，2.675 實際為 2.67499… 故得 2.67。
pub fn round_to_cents(value: f64) -> Result<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(REPORT_DECIMAL_PLACES))
        .ok_or_else(|| ScmError::Calculation(format!("無法表示的數值: {value}")))
}

/// 檢查輸入是否為有限數值
pub fn ensure_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScmError::Validation(format!("{field} 必須是有限數值，收到 {value}")))
    }
}
