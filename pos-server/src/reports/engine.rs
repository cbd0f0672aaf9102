//! Reporting Aggregation Engine
//!
//! 所有函数都是窗口快照上的纯函数，空集合产出零值而不是错误。
//!
//! 几个刻意保留的行为：
//!   - 支付方式分解按首次出现顺序输出，不排序
//!   - 热销排行按 `menu_item_name` 聚合 (同名不同 ID 的菜品会合并)
//!   - 月报的周分解按 "Week N" 标签字符串排序 ("Week 10" 排在 "Week 2" 前)
//!   - 对比窗口营收为零时增长率为 0，不报错也不输出无穷大

use crate::db::models::{Order, OrderType, Transaction};
use crate::utils::time::{millis_to_date_str, millis_to_datetime};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Window totals with growth against the preceding window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_revenue: f64,
    pub total_transactions: i64,
    /// 0 when the window is empty
    pub average_transaction: f64,
    /// Percent; 0 when the previous window's revenue is 0
    pub revenue_growth: f64,
    /// Percent; 0 when the previous window is empty
    pub transaction_growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdownEntry {
    pub method: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: String,
    pub revenue: f64,
    pub transactions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub week: String,
    pub revenue: f64,
    pub transactions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Dashboard revenue-chart point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: f64,
}

/// Compute window totals and growth ratios against the previous window
pub fn summarize(current: &[Transaction], previous: &[Transaction]) -> ReportSummary {
    let total_revenue: f64 = current.iter().map(|t| t.total).sum();
    let total_transactions = current.len() as i64;
    let average_transaction = if total_transactions > 0 {
        total_revenue / total_transactions as f64
    } else {
        0.0
    };

    let prev_revenue: f64 = previous.iter().map(|t| t.total).sum();
    let prev_count = previous.len() as i64;

    let revenue_growth = if prev_revenue > 0.0 {
        (total_revenue - prev_revenue) / prev_revenue * 100.0
    } else {
        0.0
    };
    let transaction_growth = if prev_count > 0 {
        (total_transactions - prev_count) as f64 / prev_count as f64 * 100.0
    } else {
        0.0
    };

    ReportSummary {
        total_revenue,
        total_transactions,
        average_transaction,
        revenue_growth,
        transaction_growth,
    }
}

/// Revenue per payment method, in first-seen order
pub fn payment_breakdown(transactions: &[Transaction]) -> Vec<PaymentBreakdownEntry> {
    let mut entries: Vec<PaymentBreakdownEntry> = Vec::new();
    let mut index: HashMap<&'static str, usize> = HashMap::new();

    for t in transactions {
        let method = t.payment_method.as_str();
        match index.get(method) {
            Some(&i) => entries[i].amount += t.total,
            None => {
                index.insert(method, entries.len());
                entries.push(PaymentBreakdownEntry {
                    method: method.to_string(),
                    amount: t.total,
                });
            }
        }
    }

    entries
}

/// Revenue and count per calendar day, ascending by date
pub fn daily_breakdown(transactions: &[Transaction]) -> Vec<DailyBucket> {
    let mut buckets: BTreeMap<String, (f64, i64)> = BTreeMap::new();
    for t in transactions {
        let entry = buckets.entry(millis_to_date_str(t.created_at)).or_default();
        entry.0 += t.total;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (revenue, transactions))| DailyBucket {
            date,
            revenue,
            transactions,
        })
        .collect()
}

/// Revenue and count per ISO week, ascending by "Week N" label
///
/// The sort is lexicographic on the label, so "Week 10" precedes "Week 2".
pub fn weekly_breakdown(transactions: &[Transaction]) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<String, (f64, i64)> = BTreeMap::new();
    for t in transactions {
        let week = millis_to_datetime(t.created_at).iso_week().week();
        let entry = buckets.entry(format!("Week {}", week)).or_default();
        entry.0 += t.total;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(week, (revenue, transactions))| WeeklyBucket {
            week,
            revenue,
            transactions,
        })
        .collect()
}

/// Completed-order counts per fulfillment mode
///
/// Both modes are always present, dine-in first, even at zero.
pub fn order_type_breakdown(orders: &[Order]) -> Vec<OrderTypeCount> {
    let mut dine_in = 0;
    let mut takeaway = 0;
    for order in orders {
        match order.order_type {
            OrderType::DineIn => dine_in += 1,
            OrderType::Takeaway => takeaway += 1,
        }
    }

    vec![
        OrderTypeCount {
            kind: OrderType::DineIn.as_str().to_string(),
            count: dine_in,
        },
        OrderTypeCount {
            kind: OrderType::Takeaway.as_str().to_string(),
            count: takeaway,
        },
    ]
}

/// Top sellers across the given orders, by accumulated quantity
///
/// Aggregation keys on the line's `menu_item_name`. The sort is stable, so
/// quantity ties keep first-seen order.
pub fn top_selling_items(orders: &[Order], limit: usize) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders {
        for line in &order.items {
            match index.get(&line.menu_item_name) {
                Some(&i) => {
                    items[i].quantity += line.quantity as i64;
                    items[i].revenue += line.subtotal;
                }
                None => {
                    index.insert(line.menu_item_name.clone(), items.len());
                    items.push(TopItem {
                        name: line.menu_item_name.clone(),
                        quantity: line.quantity as i64,
                        revenue: line.subtotal,
                    });
                }
            }
        }
    }

    items.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    items.truncate(limit);
    items
}

/// Revenue per calendar day for the dashboard chart, ascending by date
///
/// Days with no transactions are absent, not zero-filled.
pub fn revenue_by_date(transactions: &[Transaction]) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for t in transactions {
        *buckets.entry(millis_to_date_str(t.created_at)).or_default() += t.total;
    }

    buckets
        .into_iter()
        .map(|(date, revenue)| RevenuePoint { date, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderLine, OrderStatus, PaymentMethod};
    use crate::utils::time::{day_start_millis, parse_date};
    use surrealdb::RecordId;

    fn txn(total: f64, method: PaymentMethod, created_at: i64) -> Transaction {
        Transaction {
            id: None,
            transaction_number: "TRX-20250315-0001".to_string(),
            order_id: RecordId::from_table_key("order", "o1"),
            payment_method: method,
            amount_paid: total,
            change_amount: 0.0,
            total,
            cashier: "Siti Aminah".to_string(),
            created_at,
        }
    }

    fn txn_on(total: f64, method: PaymentMethod, date: &str) -> Transaction {
        txn(total, method, day_start_millis(parse_date(date).unwrap()))
    }

    fn order_with(order_type: OrderType, lines: Vec<(&str, i32, f64)>) -> Order {
        let items = lines
            .into_iter()
            .map(|(name, quantity, price)| OrderLine {
                menu_item_id: RecordId::from_table_key("menu_item", name),
                menu_item_name: name.to_string(),
                quantity,
                price,
                subtotal: price * quantity as f64,
                notes: None,
            })
            .collect();
        Order {
            id: None,
            order_number: "ORD-20250315-0001".to_string(),
            table_id: None,
            table_number: None,
            order_type,
            items,
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            status: OrderStatus::Completed,
            created_by: "budi".to_string(),
            created_at: 1_000,
            completed_at: Some(2_000),
        }
    }

    #[test]
    fn test_summary_worked_example() {
        // Current window: 100k cash + 50k debit; previous: one 100k txn
        let current = vec![
            txn(100_000.0, PaymentMethod::Cash, 1_000),
            txn(50_000.0, PaymentMethod::Debit, 2_000),
        ];
        let previous = vec![txn(100_000.0, PaymentMethod::Cash, 500)];

        let summary = summarize(&current, &previous);
        assert_eq!(summary.total_revenue, 150_000.0);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.average_transaction, 75_000.0);
        assert_eq!(summary.revenue_growth, 50.0);
        assert_eq!(summary.transaction_growth, 100.0);

        let breakdown = payment_breakdown(&current);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].method, "cash");
        assert_eq!(breakdown[0].amount, 100_000.0);
        assert_eq!(breakdown[1].method, "debit");
        assert_eq!(breakdown[1].amount, 50_000.0);
    }

    #[test]
    fn test_empty_window_yields_zeros() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_transaction, 0.0);
        assert_eq!(summary.revenue_growth, 0.0);
        assert_eq!(summary.transaction_growth, 0.0);
        assert!(payment_breakdown(&[]).is_empty());
        assert!(daily_breakdown(&[]).is_empty());
        assert!(top_selling_items(&[], 10).is_empty());
    }

    #[test]
    fn test_growth_zero_when_previous_is_zero() {
        // Positive revenue against an empty previous window is still 0 growth
        let current = vec![txn(75_000.0, PaymentMethod::Cash, 1_000)];
        let summary = summarize(&current, &[]);
        assert_eq!(summary.revenue_growth, 0.0);
        assert_eq!(summary.transaction_growth, 0.0);
    }

    #[test]
    fn test_payment_breakdown_first_seen_order() {
        let transactions = vec![
            txn(10_000.0, PaymentMethod::Debit, 1_000),
            txn(20_000.0, PaymentMethod::Cash, 2_000),
            txn(5_000.0, PaymentMethod::Debit, 3_000),
        ];

        let breakdown = payment_breakdown(&transactions);
        assert_eq!(breakdown[0].method, "debit");
        assert_eq!(breakdown[0].amount, 15_000.0);
        assert_eq!(breakdown[1].method, "cash");
    }

    #[test]
    fn test_daily_breakdown_sorted_ascending() {
        let transactions = vec![
            txn_on(30_000.0, PaymentMethod::Cash, "2025-03-17"),
            txn_on(10_000.0, PaymentMethod::Cash, "2025-03-15"),
            txn_on(20_000.0, PaymentMethod::Cash, "2025-03-15"),
        ];

        let buckets = daily_breakdown(&transactions);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, "2025-03-15");
        assert_eq!(buckets[0].revenue, 30_000.0);
        assert_eq!(buckets[0].transactions, 2);
        assert_eq!(buckets[1].date, "2025-03-17");
    }

    #[test]
    fn test_weekly_labels_sort_lexicographically() {
        // Weeks 2 and 10 of 2025: Jan 6 and Mar 3
        let transactions = vec![
            txn_on(10_000.0, PaymentMethod::Cash, "2025-01-06"),
            txn_on(20_000.0, PaymentMethod::Cash, "2025-03-03"),
        ];

        let buckets = weekly_breakdown(&transactions);
        assert_eq!(buckets.len(), 2);
        // "Week 10" < "Week 2" as strings
        assert_eq!(buckets[0].week, "Week 10");
        assert_eq!(buckets[1].week, "Week 2");
    }

    #[test]
    fn test_order_type_counts_always_both_present() {
        let breakdown = order_type_breakdown(&[]);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].kind, "dine-in");
        assert_eq!(breakdown[0].count, 0);
        assert_eq!(breakdown[1].kind, "takeaway");
        assert_eq!(breakdown[1].count, 0);

        let orders = vec![
            order_with(OrderType::Takeaway, vec![("Kopi", 1, 12_000.0)]),
            order_with(OrderType::Takeaway, vec![("Teh", 1, 5_000.0)]),
            order_with(OrderType::DineIn, vec![("Sate", 2, 30_000.0)]),
        ];
        let breakdown = order_type_breakdown(&orders);
        assert_eq!(breakdown[0].count, 1);
        assert_eq!(breakdown[1].count, 2);
    }

    #[test]
    fn test_top_items_merge_by_name_and_truncate() {
        let orders = vec![
            order_with(
                OrderType::DineIn,
                vec![("Nasi Goreng", 2, 25_000.0), ("Es Teh", 3, 5_000.0)],
            ),
            order_with(
                OrderType::Takeaway,
                vec![("Nasi Goreng", 3, 25_000.0), ("Sate Ayam", 1, 30_000.0)],
            ),
        ];

        let top = top_selling_items(&orders, 10);
        assert_eq!(top[0].name, "Nasi Goreng");
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[0].revenue, 125_000.0);
        assert_eq!(top[1].name, "Es Teh");

        let top2 = top_selling_items(&orders, 2);
        assert_eq!(top2.len(), 2);
    }

    #[test]
    fn test_top_items_ties_keep_first_seen_order() {
        let orders = vec![
            order_with(OrderType::Takeaway, vec![("Bakso", 2, 20_000.0)]),
            order_with(OrderType::Takeaway, vec![("Mie Ayam", 2, 18_000.0)]),
            order_with(OrderType::Takeaway, vec![("Soto", 2, 22_000.0)]),
        ];

        let top = top_selling_items(&orders, 10);
        assert_eq!(top[0].name, "Bakso");
        assert_eq!(top[1].name, "Mie Ayam");
        assert_eq!(top[2].name, "Soto");
    }

    #[test]
    fn test_revenue_by_date_chart() {
        let transactions = vec![
            txn_on(10_000.0, PaymentMethod::Cash, "2025-03-16"),
            txn_on(20_000.0, PaymentMethod::Cash, "2025-03-14"),
            txn_on(5_000.0, PaymentMethod::Debit, "2025-03-16"),
        ];

        let chart = revenue_by_date(&transactions);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].date, "2025-03-14");
        assert_eq!(chart[1].date, "2025-03-16");
        assert_eq!(chart[1].revenue, 15_000.0);
    }
}
