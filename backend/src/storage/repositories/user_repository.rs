use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::User;
use crate::storage::connection::DbConnection;
use crate::storage::traits::UserStorage;

/// Repository for user accounts and their partner link
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, partner_id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            name: r.get("name"),
            partner_id: r.get("partner_id"),
        }))
    }

    async fn store_user(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, name, partner_id) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.partner_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn set_partner(&self, user_id: &str, partner_id: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE users SET partner_id = ? WHERE id = ?")
            .bind(partner_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
