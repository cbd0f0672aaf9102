//! Transaction API Handlers
//!
//! 收款操作显式接收当前登录身份，`cashier` 落库为显示名。

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Transaction, TransactionCreate};
use crate::db::repository::TransactionRepository;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// POST /api/transactions - 收款记账
///
/// 订单完结、桌台释放、交易落库在一个数据库事务内完成。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    payload.validate()?;

    let repo = TransactionRepository::new(state.get_db());
    let transaction = repo.create(payload, &user.full_name, now_millis()).await?;

    tracing::info!(
        transaction_number = %transaction.transaction_number,
        payment_method = transaction.payment_method.as_str(),
        total = transaction.total,
        cashier = %transaction.cashier,
        "Transaction recorded"
    );
    Ok(Json(transaction))
}

/// GET /api/transactions - 交易列表，最新在前
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Transaction>>> {
    let repo = TransactionRepository::new(state.get_db());
    let transactions = repo.find_all().await?;
    Ok(Json(transactions))
}

/// GET /api/transactions/{id} - 单笔交易
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let repo = TransactionRepository::new(state.get_db());
    let transaction = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {} not found", id)))?;
    Ok(Json(transaction))
}
