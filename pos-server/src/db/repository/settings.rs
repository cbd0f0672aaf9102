//! Settings Repository
//!
//! 单例表：第一行即全部。读取时若为空则写入默认值。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Settings, SettingsUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "settings";

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Read the settings row, seeding defaults on first access
    pub async fn get_or_create(&self, now: i64) -> RepoResult<Settings> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM settings LIMIT 1")
            .await?;
        let existing: Vec<Settings> = result.take(0)?;
        if let Some(settings) = existing.into_iter().next() {
            return Ok(settings);
        }

        let defaults = Settings {
            updated_at: now,
            ..Settings::default()
        };
        let created: Option<Settings> = self.base.db().create(TABLE).content(defaults).await?;
        created.ok_or_else(|| RepoError::Database("Failed to seed settings".to_string()))
    }

    /// Apply a partial update, seeding defaults first when needed
    pub async fn update(&self, data: SettingsUpdate, now: i64) -> RepoResult<Settings> {
        let current = self.get_or_create(now).await?;
        let id = current
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Settings row has no id".to_string()))?;

        let updated = Settings {
            restaurant_name: data.restaurant_name.unwrap_or(current.restaurant_name),
            address: data.address.unwrap_or(current.address),
            phone: data.phone.unwrap_or(current.phone),
            tax_percentage: data.tax_percentage.unwrap_or(current.tax_percentage),
            logo_url: data.logo_url.or(current.logo_url),
            updated_at: now,
            id: current.id,
        };

        self.base
            .db()
            .query(
                "UPDATE $thing SET restaurant_name = $restaurant_name, address = $address, \
                 phone = $phone, tax_percentage = $tax_percentage, logo_url = $logo_url, \
                 updated_at = $updated_at",
            )
            .bind(("thing", id.clone()))
            .bind(("restaurant_name", updated.restaurant_name.clone()))
            .bind(("address", updated.address.clone()))
            .bind(("phone", updated.phone.clone()))
            .bind(("tax_percentage", updated.tax_percentage))
            .bind(("logo_url", updated.logo_url.clone()))
            .bind(("updated_at", now))
            .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_db;

    #[tokio::test]
    async fn test_first_read_seeds_defaults() {
        let repo = SettingsRepository::new(open_test_db().await);

        let settings = repo.get_or_create(1_000).await.unwrap();
        assert_eq!(settings.restaurant_name, "Restoran Saya");
        assert_eq!(settings.tax_percentage, 10.0);
        assert!(settings.id.is_some());

        // Second read returns the same row, not a new one
        let again = repo.get_or_create(2_000).await.unwrap();
        assert_eq!(again.id, settings.id);
        assert_eq!(again.updated_at, 1_000);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_unset_fields() {
        let repo = SettingsRepository::new(open_test_db().await);
        repo.get_or_create(1_000).await.unwrap();

        let updated = repo
            .update(
                SettingsUpdate {
                    restaurant_name: Some("Warung Tegal".to_string()),
                    address: None,
                    phone: None,
                    tax_percentage: Some(11.0),
                    logo_url: None,
                },
                2_000,
            )
            .await
            .unwrap();

        assert_eq!(updated.restaurant_name, "Warung Tegal");
        assert_eq!(updated.tax_percentage, 11.0);
        assert_eq!(updated.address, "Jl. Contoh No. 123, Jakarta");
        assert_eq!(updated.updated_at, 2_000);

        let reread = repo.get_or_create(3_000).await.unwrap();
        assert_eq!(reread.restaurant_name, "Warung Tegal");
        assert_eq!(reread.phone, "021-12345678");
    }
}
