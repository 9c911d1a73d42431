use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::{
    migrate::Migrator,
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::config::AppConfig;
use crate::users::{PgUserStore, UserStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Loads config, connects the store pool and runs migrations.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = connect(&config).await?;

        MIGRATOR.run(&db).await.context("run migrations")?;

        let store = Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> Self {
        Self { config, store }
    }

    #[cfg(test)]
    pub fn fake(store: Arc<dyn UserStore>) -> Self {
        let config = Arc::new(AppConfig {
            store: crate::config::StoreConfig {
                url: "postgres://postgres@localhost:5432/postgres".into(),
                key: "test".into(),
            },
            session_idle_minutes: 30,
        });
        Self::from_parts(config, store)
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.store.url)
        .context("parse STORE_URL")?
        .password(&config.store.key);
    PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("connect to user store")
}
