use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account category chosen at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Customer,
    Farmer,
    #[serde(rename = "Market Owner")]
    MarketOwner,
    Logistics,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Customer,
        Role::Farmer,
        Role::MarketOwner,
        Role::Logistics,
    ];

    /// Label stored in the `role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Farmer => "Farmer",
            Role::MarketOwner => "Market Owner",
            Role::Logistics => "Logistics",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown role {s:?}"))
    }
}

/// Raw `users` row as the store returns it.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub role: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub phone: Option<String>,
}

/// User record in the store.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String, // Argon2 hash, not exposed in JSON
    pub fullname: String,
    pub phone: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            role: r.role.parse()?,
            email: r.email,
            username: r.username,
            password: r.password,
            fullname: r.fullname,
            phone: r.phone,
        })
    }
}

/// Insert payload; `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub role: Role,
    pub email: String,
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub phone: Option<String>,
}
