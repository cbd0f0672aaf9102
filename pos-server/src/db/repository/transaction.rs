//! Transaction Repository
//!
//! 收银记账。一笔交易 = 订单完结 + 桌台释放 + 交易落库，
//! 三步在同一个数据库事务里执行，要么全部生效要么全部回滚。
//!
//! 订单不存在时 UPDATE 是空操作，交易仍会落库 (重复结账容忍策略)。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Transaction, TransactionCreate};
use crate::db::sequence::{SequenceGenerator, SequenceKind};
use crate::utils::time::millis_to_datetime;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// `transaction` 与 SurrealQL 关键字冲突，表名用复数
const RECORD_QUERY: &str = r#"
BEGIN TRANSACTION;
UPDATE $order SET status = 'completed', completed_at = $now;
LET $completed = (SELECT * FROM $order)[0];
IF $completed.table_id != NONE {
    UPDATE type::record($completed.table_id) SET status = 'available'
};
CREATE transactions CONTENT {
    transaction_number: $transaction_number,
    order_id: $order_id,
    payment_method: $payment_method,
    amount_paid: $amount_paid,
    change_amount: $change_amount,
    total: $total,
    cashier: $cashier,
    created_at: $now
};
COMMIT TRANSACTION;
"#;

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
    sequence: SequenceGenerator,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            sequence: SequenceGenerator::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// Record a payment
    ///
    /// Completes the order, frees its table (when dine-in) and persists the
    /// transaction atomically. `change_amount` is stored as supplied by the
    /// caller.
    pub async fn create(
        &self,
        data: TransactionCreate,
        cashier: &str,
        now: i64,
    ) -> RepoResult<Transaction> {
        let date = millis_to_datetime(now).date_naive();
        let transaction_number = self
            .sequence
            .next_number(SequenceKind::Transaction, date)
            .await?;

        let mut result = self
            .base
            .db()
            .query(RECORD_QUERY)
            .bind(("order", data.order_id.clone()))
            .bind(("order_id", data.order_id.to_string()))
            .bind(("transaction_number", transaction_number))
            .bind(("payment_method", data.payment_method))
            .bind(("amount_paid", data.amount_paid))
            .bind(("change_amount", data.change_amount))
            .bind(("total", data.total))
            .bind(("cashier", cashier.to_string()))
            .bind(("now", now))
            .await?;

        // Statement indexes: 0 = order update, 1 = LET, 2 = IF, 3 = CREATE
        let created: Vec<Transaction> = result.take(3)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to record transaction".to_string()))
    }

    /// Find all transactions, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .base
            .db()
            .query("SELECT * FROM transactions ORDER BY created_at DESC LIMIT 1000")
            .await?
            .take(0)?;
        Ok(transactions)
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Transaction>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let transaction: Option<Transaction> = self.base.db().select(thing).await?;
        Ok(transaction)
    }

    /// Transactions with `created_at ∈ [start, end)`
    pub async fn find_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .base
            .db()
            .query(
                "SELECT * FROM transactions \
                 WHERE created_at >= $start AND created_at < $end \
                 ORDER BY created_at",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        DiningTableCreate, OrderCreate, OrderLineInput, OrderStatus, OrderType, PaymentMethod,
        TableStatus,
    };
    use crate::db::open_test_db;
    use crate::db::repository::{DiningTableRepository, OrderRepository};

    fn line(name: &str, price: f64, quantity: i32) -> OrderLineInput {
        OrderLineInput {
            menu_item_id: RecordId::from_table_key("menu_item", name),
            menu_item_name: name.to_string(),
            quantity,
            price,
            notes: None,
        }
    }

    fn payment(order_id: RecordId, amount_paid: f64, total: f64) -> TransactionCreate {
        TransactionCreate {
            order_id,
            payment_method: PaymentMethod::Cash,
            amount_paid,
            change_amount: amount_paid - total,
            total,
        }
    }

    #[tokio::test]
    async fn test_recording_completes_order_and_frees_table() {
        let db = open_test_db().await;
        let tables = DiningTableRepository::new(db.clone());
        let orders = OrderRepository::new(db.clone());
        let transactions = TransactionRepository::new(db);

        let table = tables
            .create(
                DiningTableCreate {
                    table_number: "T5".to_string(),
                    capacity: 2,
                    status: TableStatus::Available,
                },
                1_000,
            )
            .await
            .unwrap();
        let table_id = table.id.clone().unwrap();

        let order = orders
            .create(
                OrderCreate {
                    table_id: Some(table_id.clone()),
                    table_number: Some("T5".to_string()),
                    order_type: OrderType::DineIn,
                    items: vec![line("Gado Gado", 28_000.0, 1)],
                    tax: 2_800.0,
                },
                "budi",
                2_000,
            )
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();

        let txn = transactions
            .create(payment(order_id.clone(), 50_000.0, 30_800.0), "Siti Aminah", 3_000)
            .await
            .unwrap();

        assert!(txn.transaction_number.starts_with("TRX-"));
        assert_eq!(txn.cashier, "Siti Aminah");
        assert_eq!(txn.change_amount, 19_200.0);
        assert_eq!(txn.created_at, 3_000);

        let order = orders
            .find_by_id(&order_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.completed_at, Some(3_000));

        let table = tables
            .find_by_id(&table_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(table.status, TableStatus::Available);
    }

    #[tokio::test]
    async fn test_recording_tolerates_missing_order() {
        let db = open_test_db().await;
        let transactions = TransactionRepository::new(db);

        let ghost = RecordId::from_table_key("order", "ghost");
        let txn = transactions
            .create(payment(ghost, 20_000.0, 20_000.0), "Siti Aminah", 1_000)
            .await
            .unwrap();

        assert_eq!(txn.total, 20_000.0);
        assert_eq!(txn.change_amount, 0.0);
    }

    #[tokio::test]
    async fn test_transaction_numbers_are_sequential() {
        let db = open_test_db().await;
        let orders = OrderRepository::new(db.clone());
        let transactions = TransactionRepository::new(db);
        // 2025-08-30 00:00 UTC
        let now = 1_756_512_000_000;

        let order = orders
            .create(
                OrderCreate {
                    table_id: None,
                    table_number: None,
                    order_type: OrderType::Takeaway,
                    items: vec![line("Kopi", 12_000.0, 1)],
                    tax: 0.0,
                },
                "budi",
                now,
            )
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();

        let first = transactions
            .create(payment(order_id.clone(), 12_000.0, 12_000.0), "Siti", now)
            .await
            .unwrap();
        let second = transactions
            .create(payment(order_id, 12_000.0, 12_000.0), "Siti", now)
            .await
            .unwrap();

        assert_eq!(first.transaction_number, "TRX-20250830-0001");
        assert_eq!(second.transaction_number, "TRX-20250830-0002");
    }

    #[tokio::test]
    async fn test_find_in_range_half_open() {
        let db = open_test_db().await;
        let orders = OrderRepository::new(db.clone());
        let transactions = TransactionRepository::new(db);

        let order = orders
            .create(
                OrderCreate {
                    table_id: None,
                    table_number: None,
                    order_type: OrderType::Takeaway,
                    items: vec![line("Teh", 5_000.0, 1)],
                    tax: 0.0,
                },
                "budi",
                500,
            )
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();

        for now in [1_000, 2_000, 3_000] {
            transactions
                .create(payment(order_id.clone(), 5_000.0, 5_000.0), "Siti", now)
                .await
                .unwrap();
        }

        let window = transactions.find_in_range(1_000, 3_000).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].created_at, 1_000);
        assert_eq!(window[1].created_at, 2_000);
    }
}
