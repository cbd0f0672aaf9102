//! Dashboard API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, OrderRepository, TransactionRepository};
use crate::reports::engine::{self, RevenuePoint, TopItem};
use crate::utils::AppResult;
use crate::utils::time::{day_start_millis, millis_to_datetime, now_millis};

/// 仪表盘只取 top 5，报表接口取 top 10
const DASHBOARD_TOP_ITEMS: usize = 5;

const SEVEN_DAYS_MS: i64 = 7 * 86_400_000;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_revenue_today: f64,
    pub total_transactions_today: i64,
    pub pending_orders: i64,
    pub total_menu_items: i64,
    pub revenue_chart: Vec<RevenuePoint>,
    pub top_selling_items: Vec<TopItem>,
}

/// GET /api/dashboard/stats - 门店运营概览
///
/// 今日营收从 UTC 零点起算无上界；营收曲线取最近 7 天；
/// 热销排行跨全部历史完成订单。
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let txn_repo = TransactionRepository::new(state.get_db());
    let order_repo = OrderRepository::new(state.get_db());
    let menu_repo = MenuItemRepository::new(state.get_db());

    let now = now_millis();
    let today_start = day_start_millis(millis_to_datetime(now).date_naive());

    let today = txn_repo.find_in_range(today_start, i64::MAX).await?;
    let recent = txn_repo.find_in_range(now - SEVEN_DAYS_MS, i64::MAX).await?;
    let completed_orders = order_repo.find_all_completed().await?;

    Ok(Json(DashboardStats {
        total_revenue_today: today.iter().map(|t| t.total).sum(),
        total_transactions_today: today.len() as i64,
        pending_orders: order_repo.count_pending().await?,
        total_menu_items: menu_repo.count().await?,
        revenue_chart: engine::revenue_by_date(&recent),
        top_selling_items: engine::top_selling_items(&completed_orders, DASHBOARD_TOP_ITEMS),
    }))
}
