//! Report Windows
//!
//! 半开区间 `[start, end)`，毫秒时间戳，UTC。
//! 每个报表窗口都带一个等长的前置对比窗口。

use crate::utils::time::day_start_millis;
use crate::utils::{AppError, AppResult};
use chrono::{Days, NaiveDate};

/// Half-open aggregation interval `[start, end)` in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: i64,
    pub end: i64,
}

impl ReportWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// The immediately preceding window of equal length
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - (self.end - self.start),
            end: self.start,
        }
    }
}

/// `[date 00:00, date+1 00:00)` and the previous calendar day
pub fn daily(date: NaiveDate) -> (ReportWindow, ReportWindow) {
    let start = day_start_millis(date);
    let end = day_start_millis(date + Days::new(1));
    let window = ReportWindow::new(start, end);
    (window, window.previous())
}

/// `[start_date, start_date+7d)` and the preceding seven days
///
/// `start_date` is taken as given; callers conventionally pass a Monday but
/// nothing here checks that.
pub fn weekly(start_date: NaiveDate) -> (ReportWindow, ReportWindow) {
    let start = day_start_millis(start_date);
    let end = day_start_millis(start_date + Days::new(7));
    let window = ReportWindow::new(start, end);
    (window, window.previous())
}

/// Calendar-month windows plus the English month name
pub struct MonthWindows {
    pub current: ReportWindow,
    pub previous: ReportWindow,
    pub month_name: String,
}

/// `[year-month-01, next-month-01)` with the preceding calendar month as
/// comparison (January compares against the previous December)
pub fn monthly(year: i32, month: u32) -> AppResult<MonthWindows> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation("Month must be between 1 and 12"));
    }

    let month_start = first_of_month(year, month)?;
    let next_start = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    let prev_start = if month == 1 {
        first_of_month(year - 1, 12)?
    } else {
        first_of_month(year, month - 1)?
    };

    Ok(MonthWindows {
        current: ReportWindow::new(day_start_millis(month_start), day_start_millis(next_start)),
        previous: ReportWindow::new(day_start_millis(prev_start), day_start_millis(month_start)),
        month_name: month_start.format("%B").to_string(),
    })
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid year/month: {}-{}", year, month)))
}
