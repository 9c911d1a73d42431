use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{NewUser, User, UserStore};

/// In-process store for tests. Counts reads and writes so flows can assert
/// exactly which queries they issued.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryUserStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn count_email(&self, email: &str) -> usize {
        self.rows.lock().await.iter().filter(|u| u.email == email).count()
    }

    pub async fn stored(&self, email: &str) -> Option<User> {
        self.rows.lock().await.iter().find(|u| u.email == email).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored(email).await)
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<User> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: Uuid::new_v4(),
            role: new.role,
            email: new.email,
            username: new.username,
            password: new.password,
            fullname: new.fullname,
            phone: new.phone,
        };
        self.rows.lock().await.push(user.clone());
        Ok(user)
    }
}

/// Store whose every call fails, standing in for an unreachable database.
pub struct BrokenUserStore;

#[async_trait]
impl UserStore for BrokenUserStore {
    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        anyhow::bail!("connection refused")
    }

    async fn create(&self, _new: NewUser) -> anyhow::Result<User> {
        anyhow::bail!("connection refused")
    }
}
