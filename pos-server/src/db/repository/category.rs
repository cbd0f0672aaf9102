//! Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Category, CategoryCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let category: Option<Category> = self.base.db().select(thing).await?;
        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate, now: i64) -> RepoResult<Category> {
        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            created_at: now,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Replace category fields
    pub async fn update(&self, id: &str, data: CategoryCreate) -> RepoResult<Category> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, description = $description")
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;
        let _: Option<Category> = self.base.db().delete(thing).await?;
        Ok(true)
    }
}
