//! 时间工具函数
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis (UTC)。

use chrono::{DateTime, NaiveDate, Utc};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}. Use YYYY-MM-DD", date)))
}

/// 当前 UTC 时间 → Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Unix millis → UTC 日期字符串 (YYYY-MM-DD)
pub fn millis_to_date_str(millis: i64) -> String {
    millis_to_datetime(millis).format("%Y-%m-%d").to_string()
}

/// Unix millis → UTC DateTime
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}
