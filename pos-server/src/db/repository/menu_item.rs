//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Count all menu items (dashboard metric)
    pub async fn count(&self) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct Row {
            count: i64,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM menu_item GROUP ALL")
            .await?;
        let row: Option<Row> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate, now: i64) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            category_id: data.category_id,
            price: data.price,
            description: data.description,
            image_url: data.image_url,
            available: data.available,
            created_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Replace menu item fields
    pub async fn update(&self, id: &str, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, category_id = $category_id, price = $price, \
                 description = $description, image_url = $image_url, available = $available",
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category_id", data.category_id.to_string()))
            .bind(("price", data.price))
            .bind(("description", data.description))
            .bind(("image_url", data.image_url))
            .bind(("available", data.available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;
        let _: Option<MenuItem> = self.base.db().delete(thing).await?;
        Ok(true)
    }
}
