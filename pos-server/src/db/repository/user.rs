//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by username (includes password hash for verification)
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user with a pre-hashed password
    ///
    /// 哈希字段 `skip_serializing`，必须用显式语句落库，不能走 `.content()`。
    pub async fn create(
        &self,
        data: UserCreate,
        hashed_password: String,
        now: i64,
    ) -> RepoResult<User> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already registered",
                data.username
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"
                CREATE type::table($table) CONTENT {
                    username: $username,
                    full_name: $full_name,
                    role: $role,
                    hashed_password: $hashed_password,
                    created_at: $now
                }
                "#,
            )
            .bind(("table", TABLE))
            .bind(("username", data.username))
            .bind(("full_name", data.full_name))
            .bind(("role", data.role))
            .bind(("hashed_password", hashed_password))
            .bind(("now", now))
            .await?;

        let created: Vec<User> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;
        let _: Option<User> = self.base.db().delete(thing).await?;
        Ok(true)
    }
}
