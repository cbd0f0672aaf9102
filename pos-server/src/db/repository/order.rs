//! Order Repository
//!
//! 订单生命周期：建单 → pending → completed / cancelled。
//!
//! 建单时强制金额不变式成立 (行小计、订单小计、总额全部服务端重算)，
//! dine-in 订单无条件将所关联桌台置为 occupied (不检查桌台是否存在，
//! 与前台行为保持一致)。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, OrderLine, OrderStatus, OrderType};
use crate::db::sequence::{SequenceGenerator, SequenceKind};
use crate::utils::time::millis_to_datetime;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    sequence: SequenceGenerator,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            sequence: SequenceGenerator::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order
    ///
    /// Recomputes all monetary fields from the line inputs, assigns the
    /// order number, and marks the referenced table occupied for dine-in
    /// orders.
    pub async fn create(
        &self,
        data: OrderCreate,
        created_by: &str,
        now: i64,
    ) -> RepoResult<Order> {
        if data.items.is_empty() {
            return Err(RepoError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }

        let date = millis_to_datetime(now).date_naive();
        let order_number = self.sequence.next_number(SequenceKind::Order, date).await?;

        // line.subtotal = price * quantity; order totals derived from lines
        let items: Vec<OrderLine> = data
            .items
            .into_iter()
            .map(|line| OrderLine {
                subtotal: line.price * line.quantity as f64,
                menu_item_id: line.menu_item_id,
                menu_item_name: line.menu_item_name,
                quantity: line.quantity,
                price: line.price,
                notes: line.notes,
            })
            .collect();
        let subtotal: f64 = items.iter().map(|line| line.subtotal).sum();
        let total = subtotal + data.tax;

        let order = Order {
            id: None,
            order_number,
            table_id: data.table_id.clone(),
            table_number: data.table_number,
            order_type: data.order_type,
            items,
            subtotal,
            tax: data.tax,
            total,
            status: OrderStatus::Pending,
            created_by: created_by.to_string(),
            created_at: now,
            completed_at: None,
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;

        // Dine-in: mark the table occupied. Unconditional — no existence
        // check, no error when the table is already occupied.
        if let Some(table_id) = data.table_id {
            self.base
                .db()
                .query("UPDATE $table SET status = 'occupied'")
                .bind(("table", table_id))
                .await?;
        }

        Ok(created)
    }

    /// Find all orders, newest first, optionally filtered by exact status
    pub async fn find_all(&self, status: Option<OrderStatus>) -> RepoResult<Vec<Order>> {
        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM order WHERE status = $status \
                         ORDER BY created_at DESC LIMIT 1000",
                    )
                    .bind(("status", status))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM order ORDER BY created_at DESC LIMIT 1000")
                    .await?
            }
        };
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Mark an order completed
    ///
    /// Rewrites status/completed_at even when the order is already terminal
    /// (re-completion is tolerated).
    pub async fn complete(&self, id: &str, now: i64) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = 'completed', completed_at = $now \
                 RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("now", now))
            .await?;

        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Completed orders with `created_at ∈ [start, end)`
    pub async fn find_completed_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE status = 'completed' \
                 AND created_at >= $start AND created_at < $end \
                 ORDER BY created_at",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All completed orders (dashboard all-time top sellers)
    pub async fn find_all_completed(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE status = 'completed' ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Count orders with status = pending
    pub async fn count_pending(&self) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct Row {
            count: i64,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM order WHERE status = 'pending' GROUP ALL")
            .await?;
        let row: Option<Row> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
