//! 单据编号序列生成器
//!
//! 按「种类 + 营业日」维护一个存储原生的原子计数器，替代「统计已有行数 + 1」
//! 的弱唯一方案。计数器通过单条 `UPSERT` 语句递增，并发建单/收款不会取到
//! 相同序号。
//!
//! 编号格式保持对外可观察的 `PREFIX-YYYYMMDD-NNNN`：
//! - 订单: `ORD-20250830-0001`
//! - 交易: `TRX-20250830-0001`
//!
//! 每个日历日从 0001 重新计数。

use chrono::NaiveDate;
use serde::Deserialize;

use super::repository::{BaseRepository, RepoError, RepoResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Document number kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Order,
    Transaction,
}

impl SequenceKind {
    /// Human-readable number prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            SequenceKind::Order => "ORD",
            SequenceKind::Transaction => "TRX",
        }
    }

    /// Counter record key component
    fn key(&self) -> &'static str {
        match self {
            SequenceKind::Order => "order",
            SequenceKind::Transaction => "transaction",
        }
    }
}

#[derive(Clone)]
pub struct SequenceGenerator {
    base: BaseRepository,
}

impl SequenceGenerator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically allocate the next sequence value for `(kind, date)`
    pub async fn next_value(&self, kind: SequenceKind, date: NaiveDate) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct Row {
            value: i64,
        }

        let key = format!("{}-{}", kind.key(), date.format("%Y%m%d"));
        let mut result = self
            .base
            .db()
            .query("UPSERT type::thing('sequence', $key) SET value = (value OR 0) + 1 RETURN AFTER")
            .bind(("key", key))
            .await?;

        let row: Option<Row> = result.take(0)?;
        row.map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Sequence counter returned no value".to_string()))
    }

    /// Allocate and format the next document number, e.g. `ORD-20250830-0007`
    pub async fn next_number(&self, kind: SequenceKind, date: NaiveDate) -> RepoResult<String> {
        let value = self.next_value(kind, date).await?;
        Ok(format!(
            "{}-{}-{:04}",
            kind.prefix(),
            date.format("%Y%m%d"),
            value
        ))
    }
}
