//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all dining tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate, now: i64) -> RepoResult<DiningTable> {
        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity,
            status: data.status,
            created_at: now,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Replace table fields
    pub async fn update(&self, id: &str, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET table_number = $table_number, capacity = $capacity, \
                 status = $status",
            )
            .bind(("thing", thing))
            .bind(("table_number", data.table_number))
            .bind(("capacity", data.capacity))
            .bind(("status", data.status))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Hard delete a dining table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
        let _: Option<DiningTable> = self.base.db().delete(thing).await?;
        Ok(true)
    }
}
