//! Report API Handlers
//!
//! 取数在这里 (当前窗口 + 对比窗口)，聚合全部委托给 [`crate::reports::engine`]。
//! 报表取 top 10，仪表盘取 top 5。

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{OrderRepository, TransactionRepository};
use crate::reports::engine::{
    self, DailyBucket, OrderTypeCount, PaymentBreakdownEntry, ReportSummary, TopItem, WeeklyBucket,
};
use crate::reports::window;
use crate::utils::AppResult;
use crate::utils::time::parse_date;

const REPORT_TOP_ITEMS: usize = 10;

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    pub start_date: String,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub date: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub payment_breakdown: Vec<PaymentBreakdownEntry>,
    pub order_type_breakdown: Vec<OrderTypeCount>,
    pub top_selling_items: Vec<TopItem>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyReport {
    pub start_date: String,
    pub end_date: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub daily_breakdown: Vec<DailyBucket>,
    pub payment_breakdown: Vec<PaymentBreakdownEntry>,
    pub order_type_breakdown: Vec<OrderTypeCount>,
    pub top_selling_items: Vec<TopItem>,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub daily_breakdown: Vec<DailyBucket>,
    pub weekly_breakdown: Vec<WeeklyBucket>,
    pub payment_breakdown: Vec<PaymentBreakdownEntry>,
    pub order_type_breakdown: Vec<OrderTypeCount>,
    pub top_selling_items: Vec<TopItem>,
}

/// 窗口数据集：当前窗口交易、对比窗口交易、当前窗口完成订单
struct WindowData {
    transactions: Vec<crate::db::models::Transaction>,
    prev_transactions: Vec<crate::db::models::Transaction>,
    completed_orders: Vec<crate::db::models::Order>,
}

async fn fetch_window(
    state: &ServerState,
    current: window::ReportWindow,
    previous: window::ReportWindow,
) -> AppResult<WindowData> {
    let txn_repo = TransactionRepository::new(state.get_db());
    let order_repo = OrderRepository::new(state.get_db());

    let transactions = txn_repo.find_in_range(current.start, current.end).await?;
    let prev_transactions = txn_repo.find_in_range(previous.start, previous.end).await?;
    let completed_orders = order_repo
        .find_completed_in_range(current.start, current.end)
        .await?;

    Ok(WindowData {
        transactions,
        prev_transactions,
        completed_orders,
    })
}

/// GET /api/reports/daily?date=YYYY-MM-DD
pub async fn daily(
    State(state): State<ServerState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<DailyReport>> {
    let date = parse_date(&query.date)?;
    let (current, previous) = window::daily(date);
    let data = fetch_window(&state, current, previous).await?;

    Ok(Json(DailyReport {
        date: query.date,
        summary: engine::summarize(&data.transactions, &data.prev_transactions),
        payment_breakdown: engine::payment_breakdown(&data.transactions),
        order_type_breakdown: engine::order_type_breakdown(&data.completed_orders),
        top_selling_items: engine::top_selling_items(&data.completed_orders, REPORT_TOP_ITEMS),
    }))
}

/// GET /api/reports/weekly?start_date=YYYY-MM-DD
///
/// `start_date` 按惯例是周一，但不强制校验。
pub async fn weekly(
    State(state): State<ServerState>,
    Query(query): Query<WeeklyQuery>,
) -> AppResult<Json<WeeklyReport>> {
    let start_date = parse_date(&query.start_date)?;
    let (current, previous) = window::weekly(start_date);
    let data = fetch_window(&state, current, previous).await?;

    Ok(Json(WeeklyReport {
        start_date: query.start_date,
        end_date: (start_date + Days::new(7)).format("%Y-%m-%d").to_string(),
        summary: engine::summarize(&data.transactions, &data.prev_transactions),
        daily_breakdown: engine::daily_breakdown(&data.transactions),
        payment_breakdown: engine::payment_breakdown(&data.transactions),
        order_type_breakdown: engine::order_type_breakdown(&data.completed_orders),
        top_selling_items: engine::top_selling_items(&data.completed_orders, REPORT_TOP_ITEMS),
    }))
}

/// GET /api/reports/monthly?year=&month=
pub async fn monthly(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyQuery>,
) -> AppResult<Json<MonthlyReport>> {
    let windows = window::monthly(query.year, query.month)?;
    let data = fetch_window(&state, windows.current, windows.previous).await?;

    Ok(Json(MonthlyReport {
        year: query.year,
        month: query.month,
        month_name: windows.month_name,
        summary: engine::summarize(&data.transactions, &data.prev_transactions),
        daily_breakdown: engine::daily_breakdown(&data.transactions),
        weekly_breakdown: engine::weekly_breakdown(&data.transactions),
        payment_breakdown: engine::payment_breakdown(&data.transactions),
        order_type_breakdown: engine::order_type_breakdown(&data.completed_orders),
        top_selling_items: engine::top_selling_items(&data.completed_orders, REPORT_TOP_ITEMS),
    }))
}
