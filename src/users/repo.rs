use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User, UserRow};

/// Access to the `users` table. Only exact-match lookup and insert are used.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, new: NewUser) -> anyhow::Result<User>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role, email, username, password, fullname, phone
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("select user by email")?;
        row.map(User::try_from).transpose()
    }

    /// Insert a new user; the caller has already checked the email is free.
    async fn create(&self, new: NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (role, email, username, password, fullname, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, role, email, username, password, fullname, phone
            "#,
        )
        .bind(new.role.as_str())
        .bind(&new.email)
        .bind(&new.username)
        .bind(&new.password)
        .bind(&new.fullname)
        .bind(&new.phone)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        User::try_from(row)
    }
}
